use async_trait::async_trait;
use hubmeta_core::{ConfigDocument, ConfigKind, FileEntry, ModelSummary, RawModelSources, SpaceRef};
use tracing::{debug, info};

use super::ImportResult;

/// Retrieves the raw artifacts of one model
///
/// Only `get_summary` may fail. Every other artifact is best-effort and comes back
/// absent (or empty) when it cannot be retrieved.
#[async_trait]
pub trait SourceFetcher: Send + Sync {
    /// Structured summary record; an error aborts the import
    async fn get_summary(&self, identifier: &str) -> ImportResult<ModelSummary>;

    /// One of the known config documents
    async fn get_config(&self, identifier: &str, kind: ConfigKind) -> Option<ConfigDocument>;

    /// Free-text readme
    async fn get_readme(&self, identifier: &str) -> Option<String>;

    /// Repository file listing
    async fn list_files(&self, identifier: &str) -> Vec<FileEntry>;

    /// Hosted demo applications using the model
    async fn list_spaces(&self, identifier: &str) -> Option<Vec<SpaceRef>>;
}

/// Gather every artifact for `identifier`
///
/// The summary is fetched first; the remaining fetches run concurrently. The file
/// listing comes from the summary when it carries one.
pub async fn fetch_sources(
    fetcher: &dyn SourceFetcher,
    identifier: &str,
) -> ImportResult<RawModelSources> {
    let summary = fetcher.get_summary(identifier).await?;
    let summary_files = summary.files();

    let files = async {
        if summary_files.is_empty() {
            fetcher.list_files(identifier).await
        } else {
            summary_files
        }
    };

    let (model, generation, tokenizer, readme, files, spaces) = tokio::join!(
        fetcher.get_config(identifier, ConfigKind::Model),
        fetcher.get_config(identifier, ConfigKind::Generation),
        fetcher.get_config(identifier, ConfigKind::Tokenizer),
        fetcher.get_readme(identifier),
        files,
        fetcher.list_spaces(identifier),
    );

    let mut sources = RawModelSources::new(identifier)
        .with_summary(summary)
        .with_files(files);
    for (kind, document) in ConfigKind::ALL.into_iter().zip([model, generation, tokenizer]) {
        if let Some(document) = document {
            sources = sources.with_config(kind, document);
        }
    }
    sources.readme = readme;
    sources.spaces = spaces;

    debug!(
        identifier,
        configs = sources.configs.len(),
        readme = sources.readme.is_some(),
        files = sources.files.len(),
        spaces = ?sources.spaces.as_ref().map(Vec::len),
        "sources fetched"
    );
    info!(identifier, "model sources gathered");
    Ok(sources)
}
