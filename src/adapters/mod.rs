// Adapters layer: concrete implementations for external systems (catalog files, local storage).

pub mod catalog_file;
pub mod storage;
