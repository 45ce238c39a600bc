use serde::{Deserialize, Serialize};

pub const DEFAULT_ENDPOINT: &str = "https://huggingface.co";

/// hubmeta configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubmetaConfig {
    /// Model hub base URL
    pub endpoint: String,

    /// Bearer token for gated or private models
    pub api_token: Option<String>,

    /// Hub cache directory for downloaded config and readme files
    pub cache_dir: Option<String>,

    /// Timeout for HTTP calls, in seconds
    pub timeout_secs: u64,

    /// User agent sent with HTTP calls
    pub user_agent: String,

    /// Directory holding imported records
    pub data_dir: String,

    /// Cap on spaces listed per model
    pub max_spaces: usize,

    /// Log level
    pub log_level: String,
}

impl Default for HubmetaConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
            cache_dir: None,
            timeout_secs: 30,
            user_agent: format!("hubmeta/{}", env!("CARGO_PKG_VERSION")),
            data_dir: "hubmeta_data".to_string(),
            max_spaces: hubmeta_core::extras::MAX_SPACES,
            log_level: "info".to_string(),
        }
    }
}

impl HubmetaConfig {
    /// Load from configuration file
    pub fn load_from_file(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file: {}", e))?;

        serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file: {}", e))
    }

    /// Endpoint without a trailing slash
    pub fn endpoint(&self) -> &str {
        self.endpoint.trim_end_matches('/')
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"endpoint": "https://hub.example.org/", "max_spaces": 5}}"#).unwrap();

        let config = HubmetaConfig::load_from_file(file.path()).unwrap();
        assert_eq!(config.endpoint(), "https://hub.example.org");
        assert_eq!(config.max_spaces, 5);
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.data_dir, "hubmeta_data");
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(HubmetaConfig::load_from_file(file.path()).is_err());
        assert!(HubmetaConfig::load_from_file(std::path::Path::new("/nonexistent/hubmeta.json")).is_err());
    }
}
