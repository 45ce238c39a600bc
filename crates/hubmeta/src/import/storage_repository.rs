use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use super::repository::validate_slug;
use super::{ImportError, ImportResult, ModelRecordRepository, StoredModel};
use crate::storage::{Storage, StorageError};

const RECORDS_DIR: &str = "records";

/// Record store keeping one pretty-printed JSON document per slug
pub struct StorageModelRecordRepository {
    storage: Arc<dyn Storage>,
}

impl StorageModelRecordRepository {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    fn record_path(slug: &str) -> ImportResult<String> {
        validate_slug(slug)?;
        Ok(format!("{}/{}.json", RECORDS_DIR, slug))
    }

    async fn read_record(&self, path: &str) -> ImportResult<StoredModel> {
        let content = self.storage.read(path).await?;
        Ok(serde_json::from_slice(&content)?)
    }
}

#[async_trait]
impl ModelRecordRepository for StorageModelRecordRepository {
    async fn list(&self) -> ImportResult<Vec<StoredModel>> {
        let mut models = Vec::new();
        for path in self.storage.list(RECORDS_DIR).await? {
            if !path.ends_with(".json") {
                continue;
            }
            match self.read_record(&path).await {
                Ok(model) => models.push(model),
                Err(e) => warn!(path, error = %e, "skipping unreadable record"),
            }
        }
        models.sort_by(|a, b| a.slug().cmp(b.slug()));
        Ok(models)
    }

    async fn get_by_slug(&self, slug: &str) -> ImportResult<StoredModel> {
        let path = Self::record_path(slug)?;
        match self.read_record(&path).await {
            Err(ImportError::Storage(StorageError::NotFound(_))) => {
                Err(ImportError::NotFound(slug.to_string()))
            }
            other => other,
        }
    }

    async fn upsert(&self, mut model: StoredModel) -> ImportResult<StoredModel> {
        let path = Self::record_path(model.slug())?;

        if self.storage.exists(&path).await? {
            match self.read_record(&path).await {
                Ok(existing) => model.id = existing.id,
                Err(e) => warn!(path, error = %e, "replacing unreadable record"),
            }
        }

        let content = serde_json::to_vec_pretty(&model)?;
        self.storage.write(&path, &content).await?;
        debug!(path, id = %model.id, "record stored");
        Ok(model)
    }

    async fn delete(&self, slug: &str) -> ImportResult<()> {
        let path = Self::record_path(slug)?;
        match self.storage.delete(&path).await {
            Err(StorageError::NotFound(_)) => Err(ImportError::NotFound(slug.to_string())),
            other => Ok(other?),
        }
    }

    async fn exists(&self, slug: &str) -> ImportResult<bool> {
        let path = Self::record_path(slug)?;
        Ok(self.storage.exists(&path).await?)
    }
}
