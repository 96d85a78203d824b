//! Configuration loading for civicross.
//! Reads civicross.toml from the current directory or the path in
//! CIVICROSS_CONFIG; a missing file means defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub civic: CivicConfig,
    #[serde(default)]
    pub pubmed: PubMedConfig,
    #[serde(default)]
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CivicConfig {
    #[serde(default = "default_civic_url")]
    pub base_url: String,
    #[serde(default = "default_page_size")]
    pub directory_page_size: u32,
}

fn default_civic_url() -> String { "https://civicdb.org/api".to_string() }
fn default_page_size() -> u32 { 25 }

impl Default for CivicConfig {
    fn default() -> Self {
        Self {
            base_url: default_civic_url(),
            directory_page_size: default_page_size(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PubMedConfig {
    /// NCBI API key; raises the E-utilities rate limit.
    pub api_key: Option<String>,
    /// Pause after every literature query, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 { 1000 }

impl Default for PubMedConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            delay_ms: default_delay_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpConfig {
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Extra hosts allowed besides the built-in annotation services.
    #[serde(default)]
    pub allow_domains: Vec<String>,
}

fn default_timeout_secs() -> u64 { 30 }

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            allow_domains: Vec::new(),
        }
    }
}

impl Config {
    /// Load configuration from civicross.toml.
    /// Checks CIVICROSS_CONFIG first, then the current directory.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CIVICROSS_CONFIG")
            .unwrap_or_else(|_| "civicross.toml".to_string());

        if !Path::new(&path).exists() {
            tracing::debug!("no config file at {path}, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Key from the config file, or the CIVICROSS_NCBI_API_KEY environment
    /// variable as a fallback.
    pub fn ncbi_api_key(&self) -> Option<String> {
        self.pubmed
            .api_key
            .clone()
            .or_else(|| std::env::var("CIVICROSS_NCBI_API_KEY").ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_gives_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.civic.base_url, "https://civicdb.org/api");
        assert_eq!(config.civic.directory_page_size, 25);
        assert_eq!(config.pubmed.delay_ms, 1000);
        assert_eq!(config.http.timeout_secs, 30);
        assert!(config.http.allow_domains.is_empty());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config: Config = toml::from_str(
            r#"
            [civic]
            base_url = "http://localhost:3000/api"

            [pubmed]
            delay_ms = 350
            "#,
        )
        .unwrap();
        assert_eq!(config.civic.base_url, "http://localhost:3000/api");
        assert_eq!(config.civic.directory_page_size, 25);
        assert_eq!(config.pubmed.delay_ms, 350);
        assert_eq!(config.pubmed.api_key, None);
    }

    #[test]
    fn test_allow_domains_parse() {
        let config: Config = toml::from_str(
            r#"
            [http]
            allow_domains = ["mirror.internal"]
            "#,
        )
        .unwrap();
        assert_eq!(config.http.allow_domains, vec!["mirror.internal"]);
    }
}
