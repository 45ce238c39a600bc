//! Import layer: fetch raw sources, normalize them, persist the result

pub mod error;
pub mod extractor;
pub mod fetcher;
pub mod huggingface;
pub mod in_memory_repository;
pub mod model;
pub mod repository;
pub mod service;
pub mod storage_repository;

pub use error::{ImportError, ImportResult};
pub use extractor::Extractor;
pub use fetcher::{SourceFetcher, fetch_sources};
pub use huggingface::HuggingFaceFetcher;
pub use in_memory_repository::InMemoryModelRecordRepository;
pub use model::{ModelRecordId, StoredModel};
pub use repository::ModelRecordRepository;
pub use service::ModelImportService;
pub use storage_repository::StorageModelRecordRepository;
