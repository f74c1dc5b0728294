use crate::error::ConfigError;
use reqwest::Url;
use std::path::PathBuf;
use std::time::Duration;

pub const BASE_URL_ENV: &str = "REFLOWABLE_API_URL";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

const CONVERT_PATH: &str = "convert";

#[derive(Debug, Clone)]
pub struct ConverterConfig {
    // Always ends with `/`.
    pub base_url: Url,
    pub source_suffix: String,
    pub target_suffix: String,
    pub timeout: Option<Duration>,
    pub download_dir: Option<PathBuf>,
    pub reveal_saved: bool,
}

impl ConverterConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = std::env::var(BASE_URL_ENV).unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        Self::with_base_url(&raw)
    }

    pub fn with_base_url(raw: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(raw)?,
            source_suffix: ".pdf".to_string(),
            target_suffix: ".epub".to_string(),
            timeout: None,
            download_dir: dirs::download_dir(),
            reveal_saved: true,
        })
    }

    pub fn convert_url(&self) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}{}", url.path(), CONVERT_PATH);
        url.set_path(&path);
        url
    }

    pub fn health_url(&self) -> Url {
        self.base_url.clone()
    }

    pub fn target_extension(&self) -> &str {
        self.target_suffix.trim_start_matches('.')
    }

    pub fn source_extension(&self) -> &str {
        self.source_suffix.trim_start_matches('.')
    }
}

fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim();
    let mut url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        value: trimmed.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::UnsupportedScheme {
            value: trimmed.to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url.set_query(None);
    url.set_fragment(None);
    Ok(url)
}
