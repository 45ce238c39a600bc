//! Record assembly
//!
//! Runs every resolver independently over the same sources and builds the record
//! in one step. The only cross-field dependency is the safetensors model size,
//! which falls back to the resolved parameter count.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, info};

use crate::error::{CoreError, Result};
use crate::extras::{self, MAX_SPACES};
use crate::record::{NormalizedModelRecord, slugify};
use crate::resolver::{
    ARCHITECTURE, CONTEXT_LENGTH, LICENSE, PARAMETERS, TOKENIZER, TRAINING_FRAMEWORK,
    VOCABULARY_SIZE, quantized_versions, training_data_sources,
};
use crate::section::{self, CODING_BENCHMARKS_HEADING, INTELLIGENCE_BENCHMARKS_HEADING};
use crate::sources::{ConfigKind, RawModelSources, non_empty};

const DESCRIPTION_MAX_CHARS: usize = 500;

static FRONT_MATTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\A\s*---\r?\n.*?\r?\n---[ \t]*(?:\r?\n|\z)").unwrap());

/// Assembly knobs
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Cap on `spaces_using` entries
    pub max_spaces: usize,
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            max_spaces: MAX_SPACES,
        }
    }
}

/// Build a normalized record with default options
pub fn assemble(sources: &RawModelSources) -> Result<NormalizedModelRecord> {
    assemble_with(sources, &AssembleOptions::default())
}

/// Build a normalized record
///
/// Fails only when neither the identifier nor the summary yields a non-empty
/// canonical id.
pub fn assemble_with(
    sources: &RawModelSources,
    options: &AssembleOptions,
) -> Result<NormalizedModelRecord> {
    let identifier = canonical_identifier(sources).ok_or(CoreError::UnresolvableIdentifier)?;
    let name = display_name(&identifier);
    let slug = slugify(&identifier);

    let summary = sources.summary.as_ref();
    let parameters = PARAMETERS.resolve(sources);
    let safetensors = extras::safetensors(sources, parameters.as_deref());
    let readme = sources.readme();

    let record = NormalizedModelRecord {
        developer: developer(sources, &identifier),
        description: description(sources),
        model_type: model_type(sources),
        download_count: summary.and_then(|s| s.downloads),
        likes: summary.and_then(|s| s.likes),
        architecture: ARCHITECTURE.resolve(sources),
        context_length: CONTEXT_LENGTH.resolve(sources),
        license: LICENSE.resolve(sources),
        tokenizer: TOKENIZER.resolve(sources),
        vocabulary_size: VOCABULARY_SIZE.resolve(sources),
        training_framework: TRAINING_FRAMEWORK.resolve(sources),
        categories: categories(sources),
        quantized_versions: quantized_versions(sources),
        training_data_sources: training_data_sources(sources),
        safetensors,
        model_tree: extras::model_tree(sources),
        spaces_using: extras::spaces(sources, options.max_spaces),
        links: extras::links(sources),
        coding_benchmarks: readme
            .and_then(|text| section::benchmarks(text, CODING_BENCHMARKS_HEADING)),
        intelligence_benchmarks: readme
            .and_then(|text| section::benchmarks(text, INTELLIGENCE_BENCHMARKS_HEADING)),
        full_description: sources.readme.clone().filter(|text| !text.is_empty()),
        parameters,
        name,
        slug,
        identifier,
    };

    info!(
        slug = %record.slug,
        parameters = ?record.parameters,
        architecture = ?record.architecture,
        "model record assembled"
    );
    Ok(record)
}

fn canonical_identifier(sources: &RawModelSources) -> Option<String> {
    non_empty(&sources.identifier)
        .or_else(|| sources.summary.as_ref().and_then(|s| s.canonical_id()))
        .map(|id| id.trim_matches('/').to_string())
        .filter(|id| !id.is_empty())
}

/// Last path segment of the identifier
fn display_name(identifier: &str) -> String {
    identifier
        .rsplit('/')
        .find(|segment| !segment.trim().is_empty())
        .unwrap_or(identifier)
        .trim()
        .to_string()
}

fn developer(sources: &RawModelSources, identifier: &str) -> Option<String> {
    sources
        .summary
        .as_ref()
        .and_then(|s| s.author.as_deref())
        .and_then(non_empty)
        .or_else(|| identifier.split_once('/').map(|(owner, _)| owner.trim()))
        .filter(|owner| !owner.is_empty())
        .map(str::to_string)
}

fn model_type(sources: &RawModelSources) -> Option<String> {
    sources
        .summary
        .as_ref()
        .and_then(|s| s.pipeline_tag.as_deref())
        .and_then(non_empty)
        .or_else(|| sources.config_str(ConfigKind::Model, "model_type"))
        .map(str::to_string)
}

fn categories(sources: &RawModelSources) -> BTreeSet<String> {
    let Some(summary) = &sources.summary else {
        return BTreeSet::new();
    };
    summary
        .tags
        .iter()
        .map(String::as_str)
        .chain(summary.pipeline_tag.as_deref())
        .chain(summary.library_name.as_deref())
        .filter_map(non_empty)
        .map(str::to_string)
        .collect()
}

/// First prose paragraph of the readme, else the card description
fn description(sources: &RawModelSources) -> Option<String> {
    let from_readme = sources.readme().and_then(first_paragraph);
    if from_readme.is_some() {
        debug!("description taken from readme");
    }
    from_readme
        .or_else(|| {
            sources
                .summary
                .as_ref()
                .and_then(|s| s.card_data.as_ref())
                .and_then(|c| c.description.as_deref())
                .and_then(non_empty)
                .map(collapse_whitespace)
        })
        .map(|text| truncate_chars(&text, DESCRIPTION_MAX_CHARS))
}

fn first_paragraph(readme: &str) -> Option<String> {
    let body = match FRONT_MATTER.find(readme) {
        Some(m) => &readme[m.end()..],
        None => readme,
    };

    let mut in_code_block = false;
    let mut paragraph: Vec<&str> = Vec::new();
    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
            continue;
        }
        if in_code_block {
            continue;
        }
        if trimmed.is_empty() {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        let is_prose = !(trimmed.starts_with('#')
            || trimmed.starts_with('!')
            || trimmed.starts_with('<')
            || trimmed.starts_with('|')
            || trimmed.starts_with("[!["));
        if is_prose {
            paragraph.push(trimmed);
        } else if !paragraph.is_empty() {
            break;
        }
    }

    if paragraph.is_empty() {
        None
    } else {
        Some(collapse_whitespace(&paragraph.join(" ")))
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((end, _)) => text[..end].trim_end().to_string(),
        None => text.to_string(),
    }
}
