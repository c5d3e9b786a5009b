//! 试卷处理流程 - 流程层
//!
//! 核心职责：定义"一份试卷"的完整处理流程
//!
//! 流程顺序：
//! 1. （可选）打乱每道题的选项
//! 2. 打乱题目并划分变体
//! 3. 排版分页
//! 4. 编码为 PDF

use tracing::info;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::font_metrics::FontMetrics;
use crate::infrastructure::pdf_exporter::{document_file_name, PdfExporter};
use crate::infrastructure::random::RandomSource;
use crate::models::question::{QuestionPaper, Variant};
use crate::services::layout_service::{layout_document, LayoutOptions, Page};
use crate::services::shuffle_service::shuffle_options_within_questions;
use crate::services::variant_service::partition_into_variants;

/// 一份试卷的处理结果
#[derive(Debug, Clone)]
pub struct RenderedPaper {
    /// 建议的下载文件名
    pub file_name: String,
    /// 划分出的变体（已打乱）
    pub variants: Vec<Variant>,
    /// 排好的页面
    pub pages: Vec<Page>,
    /// PDF 字节
    pub bytes: Vec<u8>,
}

impl RenderedPaper {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// 试卷处理流程
///
/// - 不持有随机源和字体，由调用方注入
/// - 每次调用都从头构建状态，互不影响
pub struct PaperFlow {
    variant_count: i64,
    shuffle_options: bool,
    layout: LayoutOptions,
    exporter: PdfExporter,
}

impl PaperFlow {
    /// 根据配置创建流程
    pub fn new(config: &Config) -> Self {
        Self {
            variant_count: config.variant_count,
            shuffle_options: config.shuffle_options,
            layout: LayoutOptions {
                label_style: config.label_style,
                ..LayoutOptions::default()
            },
            exporter: PdfExporter::new(),
        }
    }

    pub fn with_exporter(mut self, exporter: PdfExporter) -> Self {
        self.exporter = exporter;
        self
    }

    /// 执行完整流程
    ///
    /// 变体数量无效时在任何打乱之前就返回错误。
    pub fn run<R, M>(&self, paper: &QuestionPaper, rng: &mut R, metrics: &M) -> AppResult<RenderedPaper>
    where
        R: RandomSource,
        M: FontMetrics,
    {
        let variants = self.build_variants(paper, rng)?;

        let pages = layout_document(&paper.header, &variants, &self.layout, metrics)?;
        let bytes = self.exporter.export(&paper.header, &pages)?;

        info!(
            "✓ {} 道题 → {} 个变体, {} 页",
            paper.questions.len(),
            variants.len(),
            pages.len()
        );

        Ok(RenderedPaper {
            file_name: document_file_name(&paper.header.subject),
            variants,
            pages,
            bytes,
        })
    }

    /// 只做打乱与划分，不排版
    pub fn build_variants<R: RandomSource>(
        &self,
        paper: &QuestionPaper,
        rng: &mut R,
    ) -> AppResult<Vec<Variant>> {
        // 先校验，避免无效输入消耗随机数
        crate::services::variant_service::validate_variant_count(self.variant_count)?;

        let questions = if self.shuffle_options {
            shuffle_options_within_questions(&paper.questions, rng)
        } else {
            paper.questions.clone()
        };

        Ok(partition_into_variants(&questions, self.variant_count, rng)?)
    }
}
