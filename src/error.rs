use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 变体划分错误
    #[error("划分错误: {0}")]
    Partition(#[from] PartitionError),
    /// 排版/导出错误
    #[error("渲染错误: {0}")]
    Render(#[from] RenderError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 变体划分错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartitionError {
    /// 变体数量必须为正数
    #[error("变体数量无效: {count}（必须 >= 1）")]
    InvalidVariantCount { count: i64 },
    /// 变体数量超过上限
    #[error("变体数量过大: {count}（最多 {max}）")]
    TooManyVariants { count: i64, max: usize },
}

/// 字体度量错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetricsError {
    /// 字符无法用 WinAnsi 编码
    #[error("字体无法编码字符 {ch:?}")]
    UnsupportedCharacter { ch: char },
    /// 字号无效
    #[error("字号无效: {size}")]
    InvalidFontSize { size: String },
}

/// 排版与导出错误
#[derive(Debug, Error)]
pub enum RenderError {
    /// 度量失败，整个渲染中止
    #[error("文本度量失败 ({text:?}): {source}")]
    Measurement {
        text: String,
        #[source]
        source: MetricsError,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 文件不存在
    #[error("文件不存在: {path}")]
    NotFound { path: String },
    /// 目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },
    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 试卷文件解析失败
    #[error("解析失败 ({path}): {message}")]
    ParseFailed { path: String, message: String },
    /// 不支持的文件扩展名
    #[error("不支持的文件类型: {path}")]
    UnsupportedFormat { path: String },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 环境变量解析失败
    #[error("环境变量 {var_name} 解析失败: 值 '{value}' 无法转换为 {expected_type}")]
    EnvVarParseFailed {
        var_name: String,
        value: String,
        expected_type: String,
    },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn file_read_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::ReadFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建文件写入错误
    pub fn file_write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        AppError::File(FileError::WriteFailed {
            path: path.into(),
            source,
        })
    }

    /// 创建解析错误
    pub fn parse_failed(path: impl Into<String>, message: impl ToString) -> Self {
        AppError::File(FileError::ParseFailed {
            path: path.into(),
            message: message.to_string(),
        })
    }
}

impl RenderError {
    /// 创建度量错误
    pub fn measurement(text: impl Into<String>, source: MetricsError) -> Self {
        RenderError::Measurement {
            text: text.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AppError::from(PartitionError::InvalidVariantCount { count: 0 });
        assert_eq!(err.to_string(), "划分错误: 变体数量无效: 0（必须 >= 1）");

        let err = PartitionError::TooManyVariants { count: 5000, max: 1000 };
        assert_eq!(err.to_string(), "变体数量过大: 5000（最多 1000）");

        let err = MetricsError::UnsupportedCharacter { ch: '中' };
        assert!(err.to_string().contains("'中'"));
    }

    #[test]
    fn test_measurement_source_chain() {
        use std::error::Error as _;

        let err = AppError::from(RenderError::measurement(
            "A. 中",
            MetricsError::UnsupportedCharacter { ch: '中' },
        ));
        let render = err.source().expect("render source");
        assert!(render.source().is_some());
    }
}
