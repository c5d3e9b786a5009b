pub mod paper_flow;

pub use paper_flow::{PaperFlow, RenderedPaper};
