use crate::error::{AppResult, ConfigError};
use crate::services::labels::LabelStyle;
use std::str::FromStr;

/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 待处理试卷（TOML / JSON）所在目录
    pub input_folder: String,
    /// 生成的 PDF 存放目录
    pub output_folder: String,
    /// 变体数量（划分时校验，必须 >= 1）
    pub variant_count: i64,
    /// 是否打乱每道题的选项顺序
    pub shuffle_options: bool,
    /// 固定随机种子，用于复现同一份试卷
    pub shuffle_seed: Option<u64>,
    /// 选项标签样式
    pub label_style: LabelStyle,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_folder: "papers".to_string(),
            output_folder: "output_pdf".to_string(),
            variant_count: 1,
            shuffle_options: true,
            shuffle_seed: None,
            label_style: LabelStyle::Wrapping,
            verbose_logging: false,
            output_log_file: "output.txt".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置，未设置的项使用默认值；设置了但无法解析的项返回错误
    pub fn from_env() -> AppResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意键值来源加载配置
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();
        Ok(Self {
            input_folder: lookup("INPUT_FOLDER").unwrap_or(default.input_folder),
            output_folder: lookup("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            variant_count: parse_var(&lookup, "VARIANT_COUNT", "i64")?
                .unwrap_or(default.variant_count),
            shuffle_options: parse_var(&lookup, "SHUFFLE_OPTIONS", "bool")?
                .unwrap_or(default.shuffle_options),
            shuffle_seed: parse_var(&lookup, "SHUFFLE_SEED", "u64")?.or(default.shuffle_seed),
            label_style: parse_var(&lookup, "LABEL_STYLE", "wrapping | extended")?
                .unwrap_or(default.label_style),
            verbose_logging: parse_var(&lookup, "VERBOSE_LOGGING", "bool")?
                .unwrap_or(default.verbose_logging),
            output_log_file: lookup("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        })
    }
}

fn parse_var<T, F>(lookup: &F, var_name: &str, expected_type: &str) -> AppResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    let Some(value) = lookup(var_name) else {
        return Ok(None);
    };

    value.trim().parse::<T>().map(Some).map_err(|_| {
        ConfigError::EnvVarParseFailed {
            var_name: var_name.to_string(),
            value,
            expected_type: expected_type.to_string(),
        }
        .into()
    })
}
