use crate::utils::logging::truncate_text;
use serde::{Deserialize, Serialize};

/// 一道题：题干 + 有序选项列表
///
/// 题目没有持久 ID，身份由其在当前列表中的位置决定。
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Question {
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
}

impl Question {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            options: Vec::new(),
        }
    }

    pub fn with_options<I, S>(text: impl Into<String>, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            text: text.into(),
            options: options.into_iter().map(Into::into).collect(),
        }
    }
}

/// 试卷抬头信息，内容不做校验
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentHeader {
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub grade: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub author: String,
}

/// 一份待导出的试卷（抬头 + 题目列表），对应一个输入文件
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuestionPaper {
    #[serde(flatten)]
    pub header: DocumentHeader,
    #[serde(default)]
    pub questions: Vec<Question>,
    #[serde(skip_serializing, skip_deserializing)]
    pub file_path: Option<String>,
}

impl QuestionPaper {
    /// 所有题目的选项总数
    pub fn option_count(&self) -> usize {
        self.questions.iter().map(|q| q.options.len()).sum()
    }

    pub fn with_file_path(mut self, file_path: String) -> Self {
        self.file_path = Some(file_path);
        self
    }
}

/// 一个变体：随机顺序下连续的一段题目
///
/// 变体不单独存储，每次划分时重新计算。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Variant {
    /// 变体序号（从 1 开始）
    pub number: usize,
    pub questions: Vec<Question>,
}

impl Variant {
    pub fn title(&self) -> String {
        format!("Variant {}", self.number)
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // 截断题干以便日志显示（最多40个字符）
        write!(f, "{} [选项: {}]", truncate_text(&self.text, 40), self.options.len())
    }
}
