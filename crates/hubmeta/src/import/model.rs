use hubmeta_core::NormalizedModelRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable id of a stored record, kept across re-imports
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRecordId(String);

impl ModelRecordId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ModelRecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ModelRecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A normalized record as persisted by the import layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredModel {
    pub id: ModelRecordId,
    pub record: NormalizedModelRecord,
    /// RFC 3339 timestamp of the last import
    pub imported_at: String,
}

impl StoredModel {
    pub fn new(record: NormalizedModelRecord) -> Self {
        Self {
            id: ModelRecordId::new(),
            record,
            imported_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn slug(&self) -> &str {
        &self.record.slug
    }
}
