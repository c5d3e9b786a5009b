pub mod font_metrics;
pub mod pdf_exporter;
pub mod random;

pub use font_metrics::{FontMetrics, Helvetica};
pub use pdf_exporter::{document_file_name, unique_file_name, PdfExporter};
pub use random::{random_source, FnRandom, RandomSource, SeededRandom, ThreadRandom};
