use async_trait::async_trait;

use super::{ImportError, ImportResult, StoredModel};

#[async_trait]
pub trait ModelRecordRepository: Send + Sync {
    /// All stored records, ordered by slug
    async fn list(&self) -> ImportResult<Vec<StoredModel>>;

    /// Get a record by slug
    async fn get_by_slug(&self, slug: &str) -> ImportResult<StoredModel>;

    /// Insert a record, or replace the record stored under the same slug while
    /// keeping its id
    async fn upsert(&self, model: StoredModel) -> ImportResult<StoredModel>;

    /// Delete a record by slug
    async fn delete(&self, slug: &str) -> ImportResult<()>;

    /// Check if a slug is stored
    async fn exists(&self, slug: &str) -> ImportResult<bool>;
}

/// Slugs come from `slugify`, so anything outside `[a-z0-9-]` never names a record
pub(crate) fn validate_slug(slug: &str) -> ImportResult<()> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if valid {
        Ok(())
    } else {
        Err(ImportError::InvalidSlug(slug.to_string()))
    }
}
