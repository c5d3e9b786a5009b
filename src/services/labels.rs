//! 选项标签（A, B, C, ...）

use std::str::FromStr;

const ALPHABET: &[u8; 26] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// 超过 26 个选项时的标签规则
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LabelStyle {
    /// A–Z 循环：第 27 个选项重新使用 "A"
    #[default]
    Wrapping,
    /// 表格列名式：Z 之后是 AA, AB, ...
    Extended,
}

impl LabelStyle {
    /// 根据选项位置（从 0 开始）计算标签
    pub fn label(self, index: usize) -> String {
        match self {
            LabelStyle::Wrapping => char::from(ALPHABET[index % 26]).to_string(),
            LabelStyle::Extended => {
                let mut letters = Vec::new();
                let mut n = index + 1;
                while n > 0 {
                    n -= 1;
                    letters.push(ALPHABET[n % 26]);
                    n /= 26;
                }
                letters.iter().rev().map(|&b| char::from(b)).collect()
            }
        }
    }
}

impl FromStr for LabelStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "wrapping" | "wrap" => Ok(LabelStyle::Wrapping),
            "extended" | "double" => Ok(LabelStyle::Extended),
            other => Err(format!("未知的标签样式: {}", other)),
        }
    }
}
