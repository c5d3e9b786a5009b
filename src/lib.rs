//! # Quiz Variants
//!
//! 把题目列表打乱、划分为多个变体，并导出为可打印的 PDF 试卷
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 随机源、字体度量、PDF 序列化
//! - `RandomSource` - 可注入的随机数来源，测试时可脚本化
//! - `FontMetrics` - 行高与文本宽度度量
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 纯函数，不修改输入
//! - `shuffle_service` - Fisher–Yates 洗牌、选项打乱
//! - `variant_service` - 变体划分
//! - `layout_service` - 分页排版
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一份试卷"的完整处理流程
//! - `PaperFlow` - 流程编排（打乱 → 划分 → 排版 → 导出）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 批量加载试卷并逐份导出

pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::{FontMetrics, Helvetica, PdfExporter, RandomSource, SeededRandom};
pub use models::{DocumentHeader, Question, QuestionPaper, Variant};
pub use orchestrator::{App, ProcessingStats};
pub use services::{partition_into_variants, shuffle, shuffle_options_within_questions};
pub use workflow::{PaperFlow, RenderedPaper};
