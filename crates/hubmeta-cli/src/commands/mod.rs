//! CLI command handlers

pub mod extract;
pub mod records;

pub use extract::{run_extract, run_import};
pub use records::{run_list, run_remove, run_show};

use hubmeta::{
    AssembleOptions, Extractor, HubmetaConfig, HuggingFaceFetcher, LocalStorage,
    ModelImportService, StorageModelRecordRepository,
};
use std::sync::Arc;
use tracing::debug;

use crate::error::CliError;

/// Import service over the hub fetcher and the on-disk record store
pub fn build_service(config: &HubmetaConfig) -> Result<ModelImportService, CliError> {
    let fetcher = HuggingFaceFetcher::new(config)?;
    let extractor = Extractor::new(Arc::new(fetcher)).with_options(AssembleOptions {
        max_spaces: config.max_spaces,
    });

    let storage = Arc::new(LocalStorage::from_config(config));
    debug!(data_dir = %storage.base_path().display(), "record store opened");
    let repository = Arc::new(StorageModelRecordRepository::new(storage));

    Ok(ModelImportService::new(repository, extractor))
}
