use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use super::repository::validate_slug;
use super::{ImportError, ImportResult, ModelRecordRepository, StoredModel};

/// In-memory record store for tests and one-shot runs
pub struct InMemoryModelRecordRepository {
    models: RwLock<HashMap<String, StoredModel>>,
}

impl InMemoryModelRecordRepository {
    pub fn new() -> Self {
        Self {
            models: RwLock::new(HashMap::new()),
        }
    }
}

impl Default for InMemoryModelRecordRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn lock_error(e: impl std::fmt::Display) -> ImportError {
    ImportError::RepositoryError(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl ModelRecordRepository for InMemoryModelRecordRepository {
    async fn list(&self) -> ImportResult<Vec<StoredModel>> {
        let models = self.models.read().map_err(lock_error)?;
        let mut list: Vec<StoredModel> = models.values().cloned().collect();
        list.sort_by(|a, b| a.slug().cmp(b.slug()));
        Ok(list)
    }

    async fn get_by_slug(&self, slug: &str) -> ImportResult<StoredModel> {
        let models = self.models.read().map_err(lock_error)?;
        models
            .get(slug)
            .cloned()
            .ok_or_else(|| ImportError::NotFound(slug.to_string()))
    }

    async fn upsert(&self, mut model: StoredModel) -> ImportResult<StoredModel> {
        validate_slug(model.slug())?;
        let mut models = self.models.write().map_err(lock_error)?;

        if let Some(existing) = models.get(model.slug()) {
            model.id = existing.id.clone();
        }

        models.insert(model.slug().to_string(), model.clone());
        Ok(model)
    }

    async fn delete(&self, slug: &str) -> ImportResult<()> {
        let mut models = self.models.write().map_err(lock_error)?;
        models
            .remove(slug)
            .ok_or_else(|| ImportError::NotFound(slug.to_string()))?;
        Ok(())
    }

    async fn exists(&self, slug: &str) -> ImportResult<bool> {
        let models = self.models.read().map_err(lock_error)?;
        Ok(models.contains_key(slug))
    }
}
