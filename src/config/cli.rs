use crate::config::toml_config::{AppConfig, CatalogConfig};
use crate::domain::model::ResponseStyle;
use crate::utils::error::{MatchError, Result};
use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "mecharek")]
#[command(about = "Mechanical keyboard recommender")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Catalog file (.toml, .json or .csv); defaults to the builtin catalog
    #[arg(long)]
    pub catalog: Option<String>,

    /// Number of keyboards to recommend
    #[arg(long)]
    pub top_n: Option<usize>,

    /// Reply style: santai or formal
    #[arg(long)]
    pub style: Option<String>,

    /// Answer these queries and exit instead of starting the interactive loop
    #[arg(short, long)]
    pub query: Vec<String>,

    /// Print the score of every recommended keyboard
    #[arg(long)]
    pub explain: bool,

    /// Write the conversation transcript to this file on exit
    #[arg(long)]
    pub export: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

impl CliConfig {
    /// 載入配置檔 (若有)，再以命令列參數覆寫
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(top_n) = self.top_n {
            tracing::info!("🔧 top_n overridden to: {}", top_n);
            config.recommend.top_n = Some(top_n);
        }

        if let Some(style) = &self.style {
            style
                .parse::<ResponseStyle>()
                .map_err(|reason| MatchError::InvalidConfigValueError {
                    field: "--style".to_string(),
                    value: style.clone(),
                    reason,
                })?;
            config.recommend.style = Some(style.clone());
        }

        if let Some(path) = &self.catalog {
            tracing::info!("🔧 catalog overridden to: {}", path);
            config.catalog = Some(CatalogConfig { path: path.clone() });
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_cli_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[recommend]\ntop_n = 2\nstyle = \"santai\"\n")
            .unwrap();
        let path = temp_file.path().to_str().unwrap().to_string();

        let cli = CliConfig::parse_from([
            "mecharek",
            "--config",
            path.as_str(),
            "--top-n",
            "4",
            "--style",
            "formal",
            "--catalog",
            "kb.csv",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.top_n(), 4);
        assert_eq!(config.style(), ResponseStyle::Formal);
        assert_eq!(config.catalog_path(), Some("kb.csv"));
    }

    #[test]
    fn test_invalid_style_flag_is_rejected() {
        let cli = CliConfig::parse_from(["mecharek", "--style", "loud"]);
        assert!(cli.resolve().is_err());
    }

    #[test]
    fn test_repeated_queries() {
        let cli = CliConfig::parse_from(["mecharek", "-q", "linear 500rb", "-q", "tkl gaming"]);
        assert_eq!(cli.query.len(), 2);
        assert_eq!(cli.resolve().unwrap().top_n(), crate::core::ranker::DEFAULT_TOP_N);
    }
}
