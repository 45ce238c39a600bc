use hubmeta_core::NormalizedModelRecord;
use std::sync::Arc;
use tracing::info;

use super::{Extractor, ImportResult, ModelRecordRepository, StoredModel};

/// Service layer tying extraction to record persistence
#[derive(Clone)]
pub struct ModelImportService {
    repository: Arc<dyn ModelRecordRepository>,
    extractor: Extractor,
}

impl ModelImportService {
    pub fn new(repository: Arc<dyn ModelRecordRepository>, extractor: Extractor) -> Self {
        Self {
            repository,
            extractor,
        }
    }

    /// Extract a model and store the record, replacing any earlier import of the
    /// same slug
    pub async fn import_model(
        &self,
        identifier: &str,
        license_hint: Option<&str>,
    ) -> ImportResult<StoredModel> {
        let record = self.extractor.extract_with_hint(identifier, license_hint).await?;
        let replaced = self.repository.exists(&record.slug).await?;
        let stored = self.repository.upsert(StoredModel::new(record)).await?;
        info!(slug = %stored.slug(), id = %stored.id, replaced, "model imported");
        Ok(stored)
    }

    /// Extract a model without storing it
    pub async fn preview(
        &self,
        identifier: &str,
        license_hint: Option<&str>,
    ) -> ImportResult<NormalizedModelRecord> {
        self.extractor.extract_with_hint(identifier, license_hint).await
    }

    /// List all stored records
    pub async fn list_models(&self) -> ImportResult<Vec<StoredModel>> {
        self.repository.list().await
    }

    /// Get a stored record by slug
    pub async fn get_model(&self, slug: &str) -> ImportResult<StoredModel> {
        self.repository.get_by_slug(slug).await
    }

    /// Delete a stored record
    pub async fn remove_model(&self, slug: &str) -> ImportResult<()> {
        self.repository.delete(slug).await?;
        info!(slug, "model removed");
        Ok(())
    }
}
