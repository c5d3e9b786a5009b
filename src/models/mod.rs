pub mod editing;
pub mod loaders;
pub mod question;

pub use loaders::{load_all_papers, load_paper};
pub use question::{DocumentHeader, Question, QuestionPaper, Variant};
