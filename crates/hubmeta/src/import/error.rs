use hubmeta_core::CoreError;
use thiserror::Error;

use crate::storage::StorageError;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Summary unavailable for '{identifier}': {reason}")]
    SummaryUnavailable { identifier: String, reason: String },

    #[error("Extraction failed: {0}")]
    Extraction(#[from] CoreError),

    #[error("Model not found: {0}")]
    NotFound(String),

    #[error("Invalid slug: {0}")]
    InvalidSlug(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Fetcher error: {0}")]
    FetcherError(String),
}

impl ImportError {
    /// The identifier could not be resolved to any model
    pub fn is_unresolvable(&self) -> bool {
        matches!(
            self,
            ImportError::SummaryUnavailable { .. }
                | ImportError::Extraction(CoreError::UnresolvableIdentifier)
        )
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
