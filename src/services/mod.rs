pub mod labels;
pub mod layout_service;
pub mod shuffle_service;
pub mod variant_service;

pub use labels::LabelStyle;
pub use layout_service::{layout_document, LayoutOptions, Page, PageGeometry, TextLine};
pub use shuffle_service::{shuffle, shuffle_options_within_questions};
pub use variant_service::{partition_into_variants, validate_variant_count, MAX_VARIANT_COUNT};
