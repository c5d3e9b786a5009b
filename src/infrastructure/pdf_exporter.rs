//! PDF 导出 - 基础设施层
//!
//! 把排好的页面写成一个 PDF 文件。字体使用 PDF 内置的 Helvetica，
//! 内容流使用 FlateDecode 压缩。

use crate::error::{AppError, AppResult, RenderError};
use crate::infrastructure::font_metrics::{encode_winansi, Helvetica};
use crate::models::question::DocumentHeader;
use crate::services::layout_service::Page;
use chrono::{Datelike, Local, Timelike};
use pdf_writer::{Content, Date, Filter, Name, Pdf, Rect, Ref, Str, TextStr};
use regex::Regex;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::{debug, info};

const FONT_RESOURCE: &[u8] = b"F1";
const DEFAULT_FILE_STEM: &str = "test";
const PRODUCER: &str = "quiz_variants";

/// 文件名中不允许出现的字符
static ILLEGAL_FILE_CHARS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[\\/:*?"<>|\x00-\x1F]"#).expect("illegal file-name regex is invalid")
});

/// PDF 导出器
#[derive(Debug, Clone)]
pub struct PdfExporter {
    compress: bool,
}

impl PdfExporter {
    pub fn new() -> Self {
        Self { compress: true }
    }

    /// 关闭内容流压缩（便于调试查看原始绘制指令）
    pub fn uncompressed() -> Self {
        Self { compress: false }
    }

    /// 把所有页面编码为 PDF 字节
    ///
    /// 要么得到完整的文件，要么返回错误，不会产出半成品。
    pub fn export(&self, header: &DocumentHeader, pages: &[Page]) -> Result<Vec<u8>, RenderError> {
        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();
        let font_id = alloc();
        let info_id = alloc();
        let page_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = pages.iter().map(|_| alloc()).collect();

        // 先编码所有内容流，任何一行失败都直接返回
        let mut streams = Vec::with_capacity(pages.len());
        for page in pages {
            streams.push(self.encode_page(page)?);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        pdf.type1_font(font_id)
            .base_font(Name(Helvetica::BASE_FONT.as_bytes()))
            .encoding_predefined(Name(b"WinAnsiEncoding"));

        for (i, page) in pages.iter().enumerate() {
            let mut page_writer = pdf.page(page_ids[i]);
            page_writer
                .media_box(Rect::new(0.0, 0.0, page.width, page.height))
                .parent(pages_id)
                .contents(content_ids[i]);
            page_writer.resources().fonts().pair(Name(FONT_RESOURCE), font_id);
        }

        for (i, data) in streams.iter().enumerate() {
            if self.compress {
                pdf.stream(content_ids[i], data).filter(Filter::FlateDecode);
            } else {
                pdf.stream(content_ids[i], data);
            }
        }

        let now = Local::now();
        let mut doc_info = pdf.document_info(info_id);
        doc_info
            .producer(TextStr(PRODUCER))
            .creation_date(
                Date::new(u16::try_from(now.year()).unwrap_or(2000))
                    .month(now.month() as u8)
                    .day(now.day() as u8)
                    .hour(now.hour() as u8)
                    .minute(now.minute() as u8)
                    .second(now.second() as u8),
            );
        if !header.subject.trim().is_empty() {
            doc_info.title(TextStr(&header.subject));
        }
        if !header.author.trim().is_empty() {
            doc_info.author(TextStr(&header.author));
        }
        drop(doc_info);

        let bytes = pdf.finish();
        debug!("PDF 编码完成: {} 页, {} 字节", pages.len(), bytes.len());
        Ok(bytes)
    }

    fn encode_page(&self, page: &Page) -> Result<Vec<u8>, RenderError> {
        let mut content = Content::new();
        for line in &page.lines {
            let bytes = encode_winansi(&line.text)
                .map_err(|source| RenderError::measurement(line.text.as_str(), source))?;
            content
                .begin_text()
                .set_font(Name(FONT_RESOURCE), line.size)
                .next_line(line.x, line.y)
                .show(Str(&bytes))
                .end_text();
        }

        let raw = content.finish();
        if self.compress {
            Ok(miniz_oxide::deflate::compress_to_vec_zlib(&raw, 6))
        } else {
            Ok(raw.to_vec())
        }
    }

    /// 把 PDF 写入目录，返回完整路径
    pub async fn save(&self, dir: &Path, file_name: &str, bytes: &[u8]) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| AppError::file_write_failed(dir.display().to_string(), e))?;

        let path = dir.join(file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| AppError::file_write_failed(path.display().to_string(), e))?;

        info!("💾 已保存: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

impl Default for PdfExporter {
    fn default() -> Self {
        Self::new()
    }
}

/// 下载文件名：`<科目>-questions.pdf`，科目为空时使用 `test`
///
/// 文件名中不允许的字符替换为 `_`。
pub fn document_file_name(subject: &str) -> String {
    let subject = subject.trim();
    let stem = if subject.is_empty() {
        DEFAULT_FILE_STEM.to_string()
    } else {
        ILLEGAL_FILE_CHARS.replace_all(subject, "_").into_owned()
    };
    format!("{}-questions.pdf", stem)
}

/// 同一批次内避免重名：已占用时在扩展名前追加 `-2`、`-3`……
pub fn unique_file_name(file_name: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(file_name) {
        return file_name.to_string();
    }
    let (stem, ext) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem, format!(".{}", ext)),
        None => (file_name, String::new()),
    };
    (2..)
        .map(|n| format!("{}-{}{}", stem, n, ext))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| file_name.to_string())
}
