//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度。
//!
//! ### `batch_processor` - 批量试卷处理器
//! - 管理应用生命周期（初始化、运行）
//! - 批量加载试卷（Vec<QuestionPaper>）
//! - 为每份试卷创建独立的随机源
//! - 写出 PDF 文件
//! - 输出全局统计信息
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<QuestionPaper>)
//!     ↓
//! workflow::PaperFlow (处理单份试卷)
//!     ↓
//! services (能力层：shuffle / variant / layout)
//!     ↓
//! infrastructure (基础设施：random / font_metrics / pdf_exporter)
//! ```

pub mod batch_processor;

pub use batch_processor::{App, ProcessingStats};
