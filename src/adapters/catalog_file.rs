use crate::domain::catalog::Catalog;
use crate::domain::model::{CatalogEntry, Layout, UseCase};
use crate::domain::ports::CatalogSource;
use crate::utils::error::{MatchError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Toml,
    Json,
    Csv,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(CatalogFormat::Toml),
            "json" => Ok(CatalogFormat::Json),
            "csv" => Ok(CatalogFormat::Csv),
            _ => Err(MatchError::UnsupportedFormatError {
                extension: if extension.is_empty() {
                    "(none)".to_string()
                } else {
                    extension
                },
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TomlCatalog {
    keyboards: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CsvRow {
    name: String,
    layout: String,
    #[serde(alias = "switch_description")]
    switch: String,
    #[serde(alias = "price_idr")]
    price: u64,
    #[serde(default, alias = "use_case")]
    use_cases: String,
    #[serde(default, alias = "desc")]
    description: String,
}

/// 從 TOML / JSON / CSV 檔案載入的目錄
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for FileCatalog {
    fn load(&self) -> Result<Catalog> {
        let format = CatalogFormat::from_path(&self.path)?;
        let content = std::fs::read_to_string(&self.path)?;

        tracing::debug!("Loading {:?} catalog from {}", format, self.path.display());

        let catalog = parse_catalog(&content, format).map_err(|e| match e {
            MatchError::CatalogError { message, .. } => MatchError::CatalogError {
                source_name: self.describe(),
                message,
            },
            other => other,
        })?;

        tracing::info!("📚 Loaded {} keyboards from {}", catalog.len(), self.describe());
        Ok(catalog)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// 內建的範例目錄
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl CatalogSource for BuiltinCatalog {
    fn load(&self) -> Result<Catalog> {
        Ok(Catalog::builtin())
    }

    fn describe(&self) -> String {
        "builtin".to_string()
    }
}

/// 解析目錄內容並驗證
pub fn parse_catalog(content: &str, format: CatalogFormat) -> Result<Catalog> {
    let entries = match format {
        CatalogFormat::Toml => toml::from_str::<TomlCatalog>(content)?.keyboards,
        CatalogFormat::Json => serde_json::from_str::<Vec<CatalogEntry>>(content)?,
        CatalogFormat::Csv => parse_csv_entries(content)?,
    };

    Catalog::new(entries)
}

fn parse_csv_entries(content: &str) -> Result<Vec<CatalogEntry>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut entries = Vec::new();
    for (index, row) in reader.deserialize::<CsvRow>().enumerate() {
        let row = row?;
        // 第 1 行是標題
        let line = index + 2;

        let layout: Layout = row.layout.parse().map_err(|reason| csv_error(line, reason))?;
        let use_cases = row
            .use_cases
            .split(';')
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .map(|tag| tag.parse::<UseCase>().map_err(|reason| csv_error(line, reason)))
            .collect::<Result<Vec<_>>>()?;

        entries.push(CatalogEntry::new(
            row.name,
            layout,
            row.switch,
            row.price,
            use_cases,
            row.description,
        ));
    }

    Ok(entries)
}

fn csv_error(line: usize, reason: String) -> MatchError {
    MatchError::CatalogError {
        source_name: "csv".to_string(),
        message: format!("line {}: {}", line, reason),
    }
}
