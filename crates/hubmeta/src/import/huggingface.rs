use async_trait::async_trait;
use hf_hub::api::tokio::{Api, ApiBuilder, ApiRepo};
use hubmeta_core::{ConfigDocument, ConfigKind, FileEntry, ModelSummary, SpaceRef};
use serde::Deserialize;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, warn};

use super::{ImportError, ImportResult, SourceFetcher};
use crate::config::HubmetaConfig;

const README_FILE: &str = "README.md";

/// Entry of the hub's spaces search
#[derive(Debug, Deserialize)]
struct SpaceListing {
    id: String,
}

/// Source fetcher backed by the Hugging Face hub
///
/// The summary and spaces listing go through the HTTP API; config documents and
/// the readme are downloaded through the hub file cache. Both talk to the
/// configured endpoint.
pub struct HuggingFaceFetcher {
    client: reqwest::Client,
    api: Api,
    endpoint: String,
    api_token: Option<String>,
    max_spaces: usize,
}

impl HuggingFaceFetcher {
    pub fn new(config: &HubmetaConfig) -> ImportResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| ImportError::FetcherError(format!("Failed to create HTTP client: {}", e)))?;

        let mut builder = ApiBuilder::new()
            .with_progress(false)
            .with_endpoint(config.endpoint().to_string())
            .with_token(config.api_token.clone());
        if let Some(cache_dir) = &config.cache_dir {
            builder = builder.with_cache_dir(PathBuf::from(cache_dir));
        }
        let api = builder
            .build()
            .map_err(|e| ImportError::FetcherError(format!("Failed to create HF API: {}", e)))?;

        Ok(Self {
            client,
            api,
            endpoint: config.endpoint().to_string(),
            api_token: config.api_token.clone(),
            max_spaces: config.max_spaces,
        })
    }

    fn repo(&self, identifier: &str) -> ApiRepo {
        self.api.model(identifier.to_string())
    }

    fn request(&self, url: &str) -> reqwest::RequestBuilder {
        let request = self.client.get(url);
        match &self.api_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Download one repository file through the cache and read it as text
    async fn read_repo_file(&self, identifier: &str, filename: &str) -> Option<String> {
        let path = match self.repo(identifier).get(filename).await {
            Ok(path) => path,
            Err(e) => {
                debug!(identifier, filename, error = %e, "repository file unavailable");
                return None;
            }
        };
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Some(content),
            Err(e) => {
                warn!(identifier, filename, error = %e, "failed to read cached file");
                None
            }
        }
    }
}

#[async_trait]
impl SourceFetcher for HuggingFaceFetcher {
    async fn get_summary(&self, identifier: &str) -> ImportResult<ModelSummary> {
        let url = format!("{}/api/models/{}?blobs=true", self.endpoint, identifier);
        let unavailable = |reason: String| {
            warn!(identifier, %reason, "model summary unavailable");
            ImportError::SummaryUnavailable {
                identifier: identifier.to_string(),
                reason,
            }
        };

        let response = self
            .request(&url)
            .send()
            .await
            .map_err(|e| unavailable(e.to_string()))?
            .error_for_status()
            .map_err(|e| unavailable(e.to_string()))?;

        response
            .json::<ModelSummary>()
            .await
            .map_err(|e| unavailable(format!("undecodable summary: {}", e)))
    }

    async fn get_config(&self, identifier: &str, kind: ConfigKind) -> Option<ConfigDocument> {
        let content = self.read_repo_file(identifier, kind.file_name()).await?;
        match serde_json::from_str::<Value>(&content) {
            Ok(Value::Object(document)) => Some(document),
            Ok(_) => {
                debug!(identifier, config = %kind, "config is not a JSON object");
                None
            }
            Err(e) => {
                debug!(identifier, config = %kind, error = %e, "config is not valid JSON");
                None
            }
        }
    }

    async fn get_readme(&self, identifier: &str) -> Option<String> {
        self.read_repo_file(identifier, README_FILE).await
    }

    async fn list_files(&self, identifier: &str) -> Vec<FileEntry> {
        match self.repo(identifier).info().await {
            Ok(info) => info
                .siblings
                .into_iter()
                .map(|sibling| FileEntry::new(sibling.rfilename, None))
                .collect(),
            Err(e) => {
                debug!(identifier, error = %e, "repository info unavailable");
                Vec::new()
            }
        }
    }

    async fn list_spaces(&self, identifier: &str) -> Option<Vec<SpaceRef>> {
        let url = format!(
            "{}/api/spaces?models={}&limit={}",
            self.endpoint, identifier, self.max_spaces
        );

        let response = match self.request(&url).send().await.and_then(|r| r.error_for_status()) {
            Ok(response) => response,
            Err(e) => {
                debug!(identifier, error = %e, "spaces listing unavailable");
                return None;
            }
        };

        match response.json::<Vec<SpaceListing>>().await {
            Ok(listing) => Some(
                listing
                    .into_iter()
                    .take(self.max_spaces)
                    .map(|space| SpaceRef {
                        url: format!("{}/spaces/{}", self.endpoint, space.id),
                        name: space.id,
                    })
                    .collect(),
            ),
            Err(e) => {
                debug!(identifier, error = %e, "undecodable spaces listing");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_downloads_use_configured_endpoint() {
        let cache = TempDir::new().unwrap();
        let config = HubmetaConfig {
            endpoint: "https://mirror.example.com/".to_string(),
            cache_dir: Some(cache.path().to_string_lossy().into_owned()),
            ..Default::default()
        };
        let fetcher = HuggingFaceFetcher::new(&config).unwrap();

        assert_eq!(fetcher.endpoint, "https://mirror.example.com");
        let url = fetcher.repo("org/demo").url("config.json");
        assert!(url.starts_with("https://mirror.example.com/org/demo/resolve/"), "{url}");
    }
}
