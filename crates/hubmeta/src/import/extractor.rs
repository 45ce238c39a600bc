use hubmeta_core::{AssembleOptions, CoreError, NormalizedModelRecord, assemble_with};
use std::sync::Arc;
use tracing::info;

use super::{ImportResult, SourceFetcher, fetch_sources};

/// `extract(identifier) -> NormalizedModelRecord` over a source fetcher
#[derive(Clone)]
pub struct Extractor {
    fetcher: Arc<dyn SourceFetcher>,
    options: AssembleOptions,
}

impl Extractor {
    pub fn new(fetcher: Arc<dyn SourceFetcher>) -> Self {
        Self {
            fetcher,
            options: AssembleOptions::default(),
        }
    }

    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.options = options;
        self
    }

    /// Fetch and normalize one model
    ///
    /// Errors only when the identifier cannot be resolved; all other missing data
    /// shows up as absent fields.
    pub async fn extract(&self, identifier: &str) -> ImportResult<NormalizedModelRecord> {
        self.extract_with_hint(identifier, None).await
    }

    /// Like [`Extractor::extract`], with a license string already known to the
    /// caller
    pub async fn extract_with_hint(
        &self,
        identifier: &str,
        license_hint: Option<&str>,
    ) -> ImportResult<NormalizedModelRecord> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return Err(CoreError::UnresolvableIdentifier.into());
        }

        let mut sources = fetch_sources(self.fetcher.as_ref(), identifier).await?;
        sources.license_hint = license_hint.map(str::to_string);

        let record = assemble_with(&sources, &self.options)?;
        info!(identifier, slug = %record.slug, "model extracted");
        Ok(record)
    }
}
