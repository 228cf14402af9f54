use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Catalog error ({source_name}): {message}")]
    CatalogError {
        source_name: String,
        message: String,
    },

    #[error("Unsupported catalog format: {extension}")]
    UnsupportedFormatError { extension: String },
}

pub type Result<T> = std::result::Result<T, MatchError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Data,
    Configuration,
    Catalog,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl MatchError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            MatchError::IoError(_) => ErrorCategory::Io,
            MatchError::SerializationError(_) | MatchError::CsvError(_) => ErrorCategory::Data,
            MatchError::TomlError(_)
            | MatchError::ConfigValidationError { .. }
            | MatchError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            MatchError::CatalogError { .. } | MatchError::UnsupportedFormatError { .. } => {
                ErrorCategory::Catalog
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Io => ErrorSeverity::Critical,
            ErrorCategory::Data | ErrorCategory::Catalog => ErrorSeverity::High,
            ErrorCategory::Configuration => ErrorSeverity::Medium,
        }
    }

    /// 給終端使用者看的簡短訊息
    pub fn user_friendly_message(&self) -> String {
        match self {
            MatchError::IoError(e) => format!("無法讀取或寫入檔案: {}", e),
            MatchError::SerializationError(e) => format!("JSON 資料格式錯誤: {}", e),
            MatchError::CsvError(e) => format!("CSV 資料格式錯誤: {}", e),
            MatchError::TomlError(e) => format!("TOML 檔案格式錯誤: {}", e),
            MatchError::ConfigValidationError { field, message } => {
                format!("配置 '{}' 無效: {}", field, message)
            }
            MatchError::InvalidConfigValueError { field, value, reason } => {
                format!("配置 '{}' 的值 '{}' 無效: {}", field, value, reason)
            }
            MatchError::CatalogError {
                source_name,
                message,
            } => format!("鍵盤目錄 '{}' 無法載入: {}", source_name, message),
            MatchError::UnsupportedFormatError { extension } => {
                format!("不支援的目錄格式: {}", extension)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "確認檔案路徑存在且具有讀寫權限",
            ErrorCategory::Data => "檢查資料檔案的欄位與格式",
            ErrorCategory::Configuration => "檢查 TOML 配置檔或命令列參數",
            ErrorCategory::Catalog => "使用 .toml、.json 或 .csv 目錄，並確認每筆資料名稱唯一且價格大於 0",
        }
    }
}
