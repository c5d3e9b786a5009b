//! 字体度量
//!
//! 排版只通过 `FontMetrics` 询问行高和文本宽度。内置实现是 PDF 标准
//! Type 1 字体 Helvetica（WinAnsiEncoding），无需嵌入字体文件。

use crate::error::MetricsError;
use phf::phf_map;

/// 文本度量能力
pub trait FontMetrics {
    /// 给定字号下的行高
    fn height_at_size(&self, size: f32) -> Result<f32, MetricsError>;

    /// 给定字号下文本的宽度
    fn width_of_text_at_size(&self, text: &str, size: f32) -> Result<f32, MetricsError>;
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn height_at_size(&self, size: f32) -> Result<f32, MetricsError> {
        (**self).height_at_size(size)
    }

    fn width_of_text_at_size(&self, text: &str, size: f32) -> Result<f32, MetricsError> {
        (**self).width_of_text_at_size(text, size)
    }
}

/// Helvetica 字体（AFM 度量，单位为 1/1000 em）
#[derive(Debug, Clone, Copy, Default)]
pub struct Helvetica;

impl Helvetica {
    pub const BASE_FONT: &'static str = "Helvetica";
    const ASCENDER: f32 = 718.0;
    const DESCENDER: f32 = -207.0;
    const DEFAULT_WIDTH: u16 = 556;

    fn glyph_width(ch: char) -> Result<u16, MetricsError> {
        to_winansi_byte(ch).ok_or(MetricsError::UnsupportedCharacter { ch })?;
        Ok(HELVETICA_WIDTHS
            .get(&ch)
            .copied()
            .unwrap_or(Self::DEFAULT_WIDTH))
    }
}

impl FontMetrics for Helvetica {
    fn height_at_size(&self, size: f32) -> Result<f32, MetricsError> {
        check_size(size)?;
        Ok((Self::ASCENDER - Self::DESCENDER) / 1000.0 * size)
    }

    fn width_of_text_at_size(&self, text: &str, size: f32) -> Result<f32, MetricsError> {
        check_size(size)?;
        let mut units: u32 = 0;
        for ch in text.chars() {
            units += u32::from(Self::glyph_width(ch)?);
        }
        Ok(units as f32 / 1000.0 * size)
    }
}

fn check_size(size: f32) -> Result<(), MetricsError> {
    if size.is_finite() && size > 0.0 {
        Ok(())
    } else {
        Err(MetricsError::InvalidFontSize {
            size: size.to_string(),
        })
    }
}

/// 把字符映射为 WinAnsiEncoding 字节，无法编码时返回 `None`
pub fn to_winansi_byte(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => u8::try_from(u32::from(ch)).ok(),
        _ => WINANSI_SPECIALS.get(&ch).copied(),
    }
}

/// 把整段文本编码为 WinAnsi 字节
pub fn encode_winansi(text: &str) -> Result<Vec<u8>, MetricsError> {
    text.chars()
        .map(|ch| to_winansi_byte(ch).ok_or(MetricsError::UnsupportedCharacter { ch }))
        .collect()
}

/// WinAnsi 在 0x80..0x9F 区间的特殊字符
static WINANSI_SPECIALS: phf::Map<char, u8> = phf_map! {
    '€' => 0x80, '‚' => 0x82, 'ƒ' => 0x83, '„' => 0x84, '…' => 0x85,
    '†' => 0x86, '‡' => 0x87, 'ˆ' => 0x88, '‰' => 0x89, 'Š' => 0x8A,
    '‹' => 0x8B, 'Œ' => 0x8C, 'Ž' => 0x8E, '‘' => 0x91, '’' => 0x92,
    '“' => 0x93, '”' => 0x94, '•' => 0x95, '–' => 0x96, '—' => 0x97,
    '˜' => 0x98, '™' => 0x99, 'š' => 0x9A, '›' => 0x9B, 'œ' => 0x9C,
    'ž' => 0x9E, 'Ÿ' => 0x9F,
};

/// Helvetica 字形宽度；未列出的可编码字符使用 `DEFAULT_WIDTH`
static HELVETICA_WIDTHS: phf::Map<char, u16> = phf_map! {
    ' ' => 278, '!' => 278, '"' => 355, '#' => 556, '$' => 556, '%' => 889,
    '&' => 667, '\'' => 191, '(' => 333, ')' => 333, '*' => 389, '+' => 584,
    ',' => 278, '-' => 333, '.' => 278, '/' => 278,
    '0' => 556, '1' => 556, '2' => 556, '3' => 556, '4' => 556,
    '5' => 556, '6' => 556, '7' => 556, '8' => 556, '9' => 556,
    ':' => 278, ';' => 278, '<' => 584, '=' => 584, '>' => 584, '?' => 556,
    '@' => 1015,
    'A' => 667, 'B' => 667, 'C' => 722, 'D' => 722, 'E' => 667, 'F' => 611,
    'G' => 778, 'H' => 722, 'I' => 278, 'J' => 500, 'K' => 667, 'L' => 556,
    'M' => 833, 'N' => 722, 'O' => 778, 'P' => 667, 'Q' => 778, 'R' => 722,
    'S' => 667, 'T' => 611, 'U' => 722, 'V' => 667, 'W' => 944, 'X' => 667,
    'Y' => 667, 'Z' => 611,
    '[' => 278, '\\' => 278, ']' => 278, '^' => 469, '_' => 556, '`' => 333,
    'a' => 556, 'b' => 556, 'c' => 500, 'd' => 556, 'e' => 556, 'f' => 278,
    'g' => 556, 'h' => 556, 'i' => 222, 'j' => 222, 'k' => 500, 'l' => 222,
    'm' => 833, 'n' => 556, 'o' => 556, 'p' => 556, 'q' => 556, 'r' => 333,
    's' => 500, 't' => 278, 'u' => 556, 'v' => 500, 'w' => 722, 'x' => 500,
    'y' => 500, 'z' => 500,
    '{' => 334, '|' => 260, '}' => 334, '~' => 584,
    '\u{A0}' => 278, '°' => 400, '«' => 556, '»' => 556, '©' => 737,
    '®' => 737, '×' => 584, '÷' => 584,
    '…' => 1000, '–' => 556, '—' => 1000, '‘' => 222, '’' => 222,
    '“' => 333, '”' => 333, '•' => 350, '™' => 1000,
};
