//! Architecture, context length and license resolution

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::{Resolver, capture, capture_u64};
use crate::sources::{ConfigKind, RawModelSources, non_empty};

static CONTEXT_LENGTH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)context\s+length:\s*(\d[\d,]*)").unwrap());
static MAX_LENGTH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)max\s+(?:sequence\s+)?length:\s*(\d[\d,]*)").unwrap());
static TOKENS_CONTEXT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(\d[\d,]*)\s+tokens?\s+context").unwrap());
static LICENSE_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)license:\s*([A-Za-z0-9\-_.]+)").unwrap());

pub const ARCHITECTURE: Resolver<String> = Resolver::new(
    "architecture",
    &[
        ("config_architectures", architecture_from_config_list),
        ("config_model_type", architecture_from_config_type),
        ("summary_model_type", architecture_from_summary_type),
        ("summary_pipeline_tag", architecture_from_pipeline_tag),
    ],
);

pub const CONTEXT_LENGTH: Resolver<u64> = Resolver::new(
    "context_length",
    &[
        ("config_max_position_embeddings", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Model, &["max_position_embeddings"])
        }),
        ("config_max_sequence_length", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Model, &["max_sequence_length"])
        }),
        ("generation_max_new_tokens", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Generation, &["max_new_tokens"])
        }),
        ("config_n_positions", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Model, &["n_positions"])
        }),
        ("config_max_length", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Model, &["max_length"])
        }),
        ("readme_context_length", context_length_from_readme),
    ],
);

pub const LICENSE: Resolver<String> = Resolver::new(
    "license",
    &[
        ("config_license", |s: &RawModelSources| {
            s.config_str(ConfigKind::Model, "license").map(str::to_string)
        }),
        ("summary_license", license_from_summary),
        ("card_data_license", license_from_card_data),
        ("license_hint", |s: &RawModelSources| {
            s.license_hint.as_deref().and_then(non_empty).map(str::to_string)
        }),
        ("readme_label", |s: &RawModelSources| capture(&LICENSE_LABEL, s.readme()?)),
    ],
);

fn architecture_from_config_list(sources: &RawModelSources) -> Option<String> {
    sources
        .config(ConfigKind::Model)?
        .get("architectures")
        .and_then(Value::as_array)
        .and_then(|list| list.first())
        .and_then(Value::as_str)
        .and_then(non_empty)
        .map(str::to_string)
}

fn architecture_from_config_type(sources: &RawModelSources) -> Option<String> {
    sources
        .config_str(ConfigKind::Model, "model_type")
        .map(str::to_string)
}

fn architecture_from_summary_type(sources: &RawModelSources) -> Option<String> {
    sources.summary.as_ref()?.model_type().map(str::to_string)
}

fn architecture_from_pipeline_tag(sources: &RawModelSources) -> Option<String> {
    sources
        .summary
        .as_ref()?
        .pipeline_tag
        .as_deref()
        .and_then(non_empty)
        .map(str::to_string)
}

fn context_length_from_readme(sources: &RawModelSources) -> Option<u64> {
    let readme = sources.readme()?;
    [&*CONTEXT_LENGTH_LABEL, &*MAX_LENGTH_LABEL, &*TOKENS_CONTEXT]
        .into_iter()
        .find_map(|pattern| capture_u64(pattern, readme))
}

fn license_from_summary(sources: &RawModelSources) -> Option<String> {
    sources
        .summary
        .as_ref()?
        .license
        .as_deref()
        .and_then(non_empty)
        .map(str::to_string)
}

/// Card `license`, or `license_name` when the card license is missing or "other"
fn license_from_card_data(sources: &RawModelSources) -> Option<String> {
    let card = sources.summary.as_ref()?.card_data.as_ref()?;
    let license = card.license.as_ref().and_then(|l| l.first());
    let named = card.license_name.as_deref().and_then(non_empty);
    match (license, named) {
        (Some(l), Some(name)) if l.eq_ignore_ascii_case("other") => Some(name.to_string()),
        (Some(l), _) => Some(l.to_string()),
        (None, named) => named.map(str::to_string),
    }
}
