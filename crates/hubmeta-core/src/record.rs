//! The normalized model record handed to persistence

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::sources::FileEntry;

/// Benchmark name to score
pub type Benchmarks = BTreeMap<String, f64>;

/// Normalized, schema-stable model record
///
/// Every field besides `name` and `slug` is optional. Nested blocks are either
/// populated or absent; absent values are skipped when serialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedModelRecord {
    pub name: String,
    pub slug: String,
    /// Canonical hub identifier the record was extracted from
    pub identifier: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    /// e.g. "7B", "350.0M", "~1.2B" or an exact integer string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub architecture: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tokenizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vocabulary_size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub training_framework: Option<String>,

    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub categories: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub quantized_versions: BTreeSet<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub training_data_sources: Vec<TrainingDataSource>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safetensors: Option<SafetensorsInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_tree: Option<ModelTree>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spaces_using: Option<Vec<SpaceEntry>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coding_benchmarks: Option<Benchmarks>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intelligence_benchmarks: Option<Benchmarks>,

    /// Raw readme, verbatim
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub full_description: Option<String>,
}

/// A dataset the model was trained on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingDataSource {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_count: Option<String>,
    /// Where the entry was found: "readme", "readme_mention" or "tags"
    pub source: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetensorsInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tensor_type: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileEntry>,
}

/// Counts of derived models on the hub
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelTree {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finetunes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merges: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantizations: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceEntry {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Links {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homepage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modelscope: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
}

impl ModelTree {
    pub fn is_empty(&self) -> bool {
        self.finetunes.is_none() && self.merges.is_none() && self.quantizations.is_none()
    }
}

impl Links {
    pub fn is_empty(&self) -> bool {
        self.homepage.is_none()
            && self.api.is_none()
            && self.github.is_none()
            && self.modelscope.is_none()
            && self.contact.is_none()
    }
}

/// Lowercases and replaces every character outside `[a-z0-9-]` with `-`
pub fn slugify(identifier: &str) -> String {
    identifier
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("org/demo-7b"), "org-demo-7b");
        assert_eq!(slugify("Org/Demo_7B.v2"), "org-demo-7b-v2");
        assert_eq!(slugify("  a/b  "), "a-b");
    }

    #[test]
    fn test_slugify_non_ascii() {
        let slug = slugify("org/modèle");
        assert!(
            slug.chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
        );
    }

    #[test]
    fn test_empty_blocks() {
        assert!(ModelTree::default().is_empty());
        assert!(Links::default().is_empty());
        let tree = ModelTree {
            merges: Some(0),
            ..Default::default()
        };
        assert!(!tree.is_empty());
    }
}
