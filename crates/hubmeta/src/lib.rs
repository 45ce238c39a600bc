//! # hubmeta
//!
//! Imports model records from a model hub: a [`SourceFetcher`] gathers the raw
//! artifacts, `hubmeta-core` normalizes them and a [`ModelRecordRepository`]
//! keeps the result.

pub mod config;
pub mod import;
pub mod storage;

pub use config::HubmetaConfig;

pub use hubmeta_core::{
    AssembleOptions, CoreError, NormalizedModelRecord, RawModelSources, assemble, assemble_with,
};

pub use import::{
    Extractor, HuggingFaceFetcher, ImportError, ImportResult, InMemoryModelRecordRepository,
    ModelImportService, ModelRecordId, ModelRecordRepository, SourceFetcher,
    StorageModelRecordRepository, StoredModel, fetch_sources,
};

pub use storage::{LocalStorage, Storage, StorageError};
