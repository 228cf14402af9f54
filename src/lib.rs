pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::catalog_file::{BuiltinCatalog, FileCatalog};
pub use adapters::storage::LocalStorage;
pub use app::session::{Session, Turn};
pub use config::AppConfig;
pub use crate::core::engine::{RecommendEngine, Recommendation};
pub use crate::core::extractor::{extract, PreferenceExtractor};
pub use crate::core::ranker::{rank, DEFAULT_TOP_N};
pub use domain::catalog::Catalog;
pub use domain::model::{
    CatalogEntry, Layout, PreferenceRecord, ResponseStyle, ScoredEntry, SwitchFeel, UseCase,
};
pub use utils::error::{MatchError, Result};
