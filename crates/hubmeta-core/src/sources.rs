//! Raw source artifacts gathered for one model before normalization

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// A structured config document (`config.json` and friends)
pub type ConfigDocument = serde_json::Map<String, Value>;

/// The fixed set of config documents the pipeline knows how to read
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigKind {
    /// Primary model config
    Model,
    /// Generation defaults
    Generation,
    /// Tokenizer config
    Tokenizer,
}

impl ConfigKind {
    pub const ALL: [ConfigKind; 3] = [ConfigKind::Model, ConfigKind::Generation, ConfigKind::Tokenizer];

    /// File name of this document inside a model repository
    pub fn file_name(&self) -> &'static str {
        match self {
            ConfigKind::Model => "config.json",
            ConfigKind::Generation => "generation_config.json",
            ConfigKind::Tokenizer => "tokenizer_config.json",
        }
    }
}

impl fmt::Display for ConfigKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.file_name())
    }
}

/// One entry of a repository file listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

impl FileEntry {
    pub fn new(filename: impl Into<String>, size: Option<u64>) -> Self {
        Self {
            filename: filename.into(),
            size,
        }
    }
}

/// A hosted demo application that uses the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceRef {
    pub name: String,
    pub url: String,
}

/// A license value that may be a single string or a list of strings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LicenseField {
    One(String),
    Many(Vec<String>),
}

impl LicenseField {
    /// First non-empty license name
    pub fn first(&self) -> Option<&str> {
        match self {
            LicenseField::One(s) => non_empty(s),
            LicenseField::Many(list) => list.iter().find_map(|s| non_empty(s)),
        }
    }
}

/// Model card front matter as reported by the hub
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardData {
    #[serde(deserialize_with = "lenient")]
    pub license: Option<LicenseField>,
    #[serde(deserialize_with = "lenient")]
    pub license_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub description: Option<String>,
}

/// Model config excerpt embedded in the summary record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    #[serde(deserialize_with = "lenient")]
    pub architectures: Option<Vec<String>>,
    #[serde(deserialize_with = "lenient")]
    pub model_type: Option<String>,
}

/// Safetensors parameter breakdown embedded in the summary record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SafetensorsSummary {
    /// Parameter count per dtype, e.g. `{"BF16": 7241732096}`
    #[serde(deserialize_with = "lenient")]
    pub parameters: BTreeMap<String, u64>,
    #[serde(deserialize_with = "lenient")]
    pub total: Option<u64>,
}

/// Summary sibling (file) entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sibling {
    pub rfilename: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// The structured summary record of a model
///
/// Every field decodes leniently: a value of an unexpected shape reads as absent
/// instead of failing the whole summary.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelSummary {
    #[serde(deserialize_with = "lenient")]
    pub id: Option<String>,
    #[serde(rename = "modelId", deserialize_with = "lenient")]
    pub model_id: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub author: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub license: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub downloads: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub likes: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub tags: Vec<String>,
    #[serde(deserialize_with = "lenient")]
    pub pipeline_tag: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub library_name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub config: Option<SummaryConfig>,
    #[serde(rename = "cardData", alias = "card_data", deserialize_with = "lenient")]
    pub card_data: Option<CardData>,
    #[serde(deserialize_with = "lenient")]
    pub siblings: Vec<Sibling>,
    #[serde(deserialize_with = "lenient")]
    pub safetensors: Option<SafetensorsSummary>,
}

impl ModelSummary {
    /// Canonical id reported by the hub
    pub fn canonical_id(&self) -> Option<&str> {
        self.id
            .as_deref()
            .and_then(non_empty)
            .or_else(|| self.model_id.as_deref().and_then(non_empty))
    }

    /// Model type reported in the embedded config excerpt
    pub fn model_type(&self) -> Option<&str> {
        self.config
            .as_ref()
            .and_then(|c| c.model_type.as_deref())
            .and_then(non_empty)
    }

    /// Siblings converted to a file listing
    pub fn files(&self) -> Vec<FileEntry> {
        self.siblings
            .iter()
            .map(|s| FileEntry::new(s.rfilename.clone(), s.size))
            .collect()
    }
}

/// Every artifact fetched for one identifier
///
/// Any field except `identifier` may be missing; resolvers treat each source as
/// optional.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawModelSources {
    pub identifier: String,
    pub summary: Option<ModelSummary>,
    pub configs: BTreeMap<ConfigKind, ConfigDocument>,
    pub readme: Option<String>,
    pub files: Vec<FileEntry>,
    pub spaces: Option<Vec<SpaceRef>>,
    /// License string known to the caller before this import
    pub license_hint: Option<String>,
}

impl RawModelSources {
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            ..Default::default()
        }
    }

    pub fn with_summary(mut self, summary: ModelSummary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_config(mut self, kind: ConfigKind, document: ConfigDocument) -> Self {
        self.configs.insert(kind, document);
        self
    }

    pub fn with_readme(mut self, readme: impl Into<String>) -> Self {
        self.readme = Some(readme.into());
        self
    }

    pub fn with_files(mut self, files: Vec<FileEntry>) -> Self {
        self.files = files;
        self
    }

    pub fn with_spaces(mut self, spaces: Vec<SpaceRef>) -> Self {
        self.spaces = Some(spaces);
        self
    }

    pub fn with_license_hint(mut self, license: impl Into<String>) -> Self {
        self.license_hint = Some(license.into());
        self
    }

    pub fn config(&self, kind: ConfigKind) -> Option<&ConfigDocument> {
        self.configs.get(&kind)
    }

    /// Readme text, `None` when missing or blank
    pub fn readme(&self) -> Option<&str> {
        self.readme.as_deref().filter(|text| !text.trim().is_empty())
    }

    /// Integer value of the first present key in a config document
    pub fn config_u64(&self, kind: ConfigKind, keys: &[&str]) -> Option<u64> {
        let document = self.config(kind)?;
        keys.iter()
            .find_map(|key| document.get(*key).and_then(value_as_u64))
    }

    /// Non-empty string value of a config key
    pub fn config_str(&self, kind: ConfigKind, key: &str) -> Option<&str> {
        self.config(kind)?
            .get(key)
            .and_then(Value::as_str)
            .and_then(non_empty)
    }
}

/// Lenient integer reading: accepts integers, integral floats and numeric strings
pub fn value_as_u64(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f >= 0.0 && f.fract() == 0.0)
                .map(|f| f as u64)
        }),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Decode a field, falling back to its default when the value has another shape
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).unwrap_or_default())
}

pub(crate) fn non_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() { None } else { Some(trimmed) }
}
