use crate::core::extractor::PreferenceExtractor;
use crate::core::ranker::DEFAULT_TOP_N;
use crate::domain::model::{Layout, ResponseStyle, SwitchFeel, UseCase};
use crate::utils::error::{MatchError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

pub const MAX_TOP_N: usize = 50;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub recommend: RecommendConfig,
    pub catalog: Option<CatalogConfig>,
    pub session: Option<SessionConfig>,
    pub keywords: Option<KeywordConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RecommendConfig {
    pub top_n: Option<usize>,
    pub style: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub path: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    pub remember_keywords: Option<Vec<String>>,
}

/// 追加到抽取規則的關鍵字，key 為規則值 (例如 `linear`、`tkl`、`gaming`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KeywordConfig {
    #[serde(default)]
    pub switch: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub layout: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub use_case: BTreeMap<String, Vec<String>>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(MatchError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| MatchError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CATALOG_PATH})；未定義的變數保持原樣
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        use std::sync::LazyLock;

        static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"\$\{([^}]+)\}").expect("env var pattern is a valid regex")
        });

        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(top_n) = self.recommend.top_n {
            validation::validate_range("recommend.top_n", top_n, 1, MAX_TOP_N)?;
        }

        if let Some(style) = &self.recommend.style {
            parse_field::<ResponseStyle>("recommend.style", style)?;
        }

        if let Some(catalog) = &self.catalog {
            validation::validate_path("catalog.path", &catalog.path)?;
        }

        if let Some(keywords) = self
            .session
            .as_ref()
            .and_then(|s| s.remember_keywords.as_ref())
        {
            if keywords.iter().all(|k| k.trim().is_empty()) {
                return Err(MatchError::InvalidConfigValueError {
                    field: "session.remember_keywords".to_string(),
                    value: format!("{:?}", keywords),
                    reason: "At least one non-empty keyword is required".to_string(),
                });
            }
        }

        // 建一次抽取器即可檢查所有規則 key
        self.build_extractor()?;

        Ok(())
    }

    pub fn top_n(&self) -> usize {
        self.recommend.top_n.unwrap_or(DEFAULT_TOP_N)
    }

    pub fn style(&self) -> ResponseStyle {
        self.recommend
            .style
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    pub fn catalog_path(&self) -> Option<&str> {
        self.catalog.as_ref().map(|c| c.path.as_str())
    }

    pub fn remember_keywords(&self) -> Option<&[String]> {
        self.session
            .as_ref()
            .and_then(|s| s.remember_keywords.as_deref())
    }

    /// 預設規則表加上配置中的額外關鍵字
    pub fn build_extractor(&self) -> Result<PreferenceExtractor> {
        let mut extractor = PreferenceExtractor::new();

        let Some(keywords) = &self.keywords else {
            return Ok(extractor);
        };

        for (key, words) in &keywords.switch {
            let feel = parse_field::<SwitchFeel>("keywords.switch", key)?;
            extractor.add_switch_keywords(feel, words);
        }
        for (key, words) in &keywords.layout {
            let layout = parse_field::<Layout>("keywords.layout", key)?;
            extractor.add_layout_keywords(layout, words);
        }
        for (key, words) in &keywords.use_case {
            let use_case = parse_field::<UseCase>("keywords.use_case", key)?;
            extractor.add_use_case_keywords(use_case, words);
        }

        Ok(extractor)
    }
}

fn parse_field<T: FromStr<Err = String>>(field: &str, value: &str) -> Result<T> {
    value
        .parse()
        .map_err(|reason| MatchError::InvalidConfigValueError {
            field: field.to_string(),
            value: value.to_string(),
            reason,
        })
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
