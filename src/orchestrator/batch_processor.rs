//! 批量试卷处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **应用初始化**：初始化日志文件、输出启动信息
//! 2. **批量加载**：扫描并加载输入目录中所有试卷（`Vec<QuestionPaper>`）
//! 3. **逐份处理**：每份试卷独立构建状态，按顺序导出
//! 4. **全局统计**：汇总所有试卷的处理结果
//!
//! 单份试卷失败只记录错误，不影响后续试卷。

use crate::config::Config;
use crate::infrastructure::font_metrics::Helvetica;
use crate::infrastructure::pdf_exporter::{unique_file_name, PdfExporter};
use crate::infrastructure::random::random_source;
use crate::models::{load_all_papers, QuestionPaper};
use crate::utils::logging::{
    init_log_file, log_paper_done, log_papers_loaded, log_startup, print_final_stats,
};
use crate::workflow::PaperFlow;
use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    flow: PaperFlow,
    exporter: PdfExporter,
}

/// 处理统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ProcessingStats {
    pub success: usize,
    pub failed: usize,
    pub total: usize,
    pub pages: usize,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        init_log_file(&config.output_log_file)
            .with_context(|| format!("无法初始化日志文件: {}", config.output_log_file))?;

        log_startup(&config);

        let flow = PaperFlow::new(&config);
        Ok(Self {
            config,
            flow,
            exporter: PdfExporter::new(),
        })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<ProcessingStats> {
        info!("\n📁 正在扫描待处理的试卷...");
        let papers = load_all_papers(&self.config.input_folder)
            .await
            .with_context(|| format!("无法加载试卷目录: {}", self.config.input_folder))?;

        if papers.is_empty() {
            warn!("⚠️ 没有找到待处理的试卷文件，程序结束");
            return Ok(ProcessingStats::default());
        }

        log_papers_loaded(papers.len(), self.config.variant_count);

        let mut stats = ProcessingStats {
            total: papers.len(),
            ..Default::default()
        };

        // 本批次已写出的文件名
        let mut written = HashSet::new();

        for (idx, paper) in papers.iter().enumerate() {
            let paper_index = idx + 1;
            match self.process_paper(paper, paper_index, &mut written).await {
                Ok((path, pages)) => {
                    stats.success += 1;
                    stats.pages += pages;
                    log_paper_done(paper_index, &path, pages);
                }
                Err(e) => {
                    stats.failed += 1;
                    error!("[试卷 {}] ❌ 处理失败: {:#}", paper_index, e);
                }
            }
        }

        print_final_stats(
            stats.success,
            stats.failed,
            stats.total,
            &self.config.output_log_file,
        );
        Ok(stats)
    }

    /// 处理单份试卷并写入输出目录
    async fn process_paper(
        &self,
        paper: &QuestionPaper,
        paper_index: usize,
        written: &mut HashSet<String>,
    ) -> Result<(PathBuf, usize)> {
        let source = paper.file_path.as_deref().unwrap_or("<内存>");
        info!(
            "[试卷 {}] 📄 {} ({} 道题)",
            paper_index,
            source,
            paper.questions.len()
        );

        // 每份试卷单独的随机源；固定种子时按试卷序号偏移
        let rendered = {
            let mut rng = random_source(
                self.config
                    .shuffle_seed
                    .map(|seed| seed.wrapping_add(paper_index as u64)),
            );
            self.flow
                .run(paper, &mut rng, &Helvetica)
                .with_context(|| format!("生成试卷失败: {}", source))?
        };

        let file_name = unique_file_name(&rendered.file_name, written);
        if file_name != rendered.file_name {
            warn!(
                "[试卷 {}] ⚠️ 文件名 {} 已被占用，改为 {}",
                paper_index, rendered.file_name, file_name
            );
        }
        written.insert(file_name.clone());

        let path = self
            .exporter
            .save(
                Path::new(&self.config.output_folder),
                &file_name,
                &rendered.bytes,
            )
            .await?;

        Ok((path, rendered.page_count()))
    }
}
