pub mod engine;
pub mod extractor;
pub mod ranker;

pub use crate::domain::catalog::Catalog;
pub use crate::domain::model::{CatalogEntry, PreferenceRecord, ScoredEntry};
pub use crate::domain::ports::CatalogSource;
pub use crate::utils::error::Result;
