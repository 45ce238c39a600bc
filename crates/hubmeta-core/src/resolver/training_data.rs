//! Training data source extraction
//!
//! Entries are deduplicated by name only. Two different datasets that share a
//! display name collapse into the first one found.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::record::TrainingDataSource;
use crate::section::find_section;
use crate::sources::RawModelSources;

pub const TRAINING_DATA_HEADING: &str = "training data";

const SOURCE_README: &str = "readme";
const SOURCE_MENTION: &str = "readme_mention";
const SOURCE_TAGS: &str = "tags";

/// Dataset names checked as literal substrings of the whole readme
pub const WELL_KNOWN_DATASETS: &[&str] = &[
    "The Pile",
    "Common Crawl",
    "C4",
    "RedPajama",
    "RefinedWeb",
    "SlimPajama",
    "FineWeb",
    "Dolma",
    "The Stack",
    "Wikipedia",
    "BookCorpus",
    "OpenWebText",
    "LAION",
];

static DATASET_LABEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)dataset:[ \t]*([^\n]+)").unwrap());
static TRAINED_ON_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)trained\s+on:[ \t]*([^\n]+)").unwrap());
static TOKEN_BULLET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^[ \t]*[*-][ \t]+([^(\n]+?)[ \t]*\((\d+(?:\.\d+)?[TBKM]?)\s+tokens\)").unwrap()
});

struct Collector {
    entries: Vec<TrainingDataSource>,
}

impl Collector {
    fn push(&mut self, name: &str, token_count: Option<&str>, source: &str) {
        let name = clean_name(name);
        if name.is_empty() || self.entries.iter().any(|e| e.name == name) {
            return;
        }
        self.entries.push(TrainingDataSource {
            name,
            token_count: token_count.map(str::to_string),
            source: source.to_string(),
        });
    }
}

fn clean_name(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '*' || c == '`' || c == '_' || c.is_whitespace())
        .trim_end_matches(['.', ',', ';'])
        .trim()
        .to_string()
}

/// Datasets named in the readme's training data section, well-known dataset
/// mentions, then `dataset:` summary tags
pub fn training_data_sources(sources: &RawModelSources) -> Vec<TrainingDataSource> {
    let mut collector = Collector { entries: Vec::new() };

    if let Some(readme) = sources.readme() {
        if let Some(section) = find_section(readme, TRAINING_DATA_HEADING) {
            for pattern in [&*DATASET_LABEL, &*TRAINED_ON_LABEL] {
                for caps in pattern.captures_iter(section) {
                    if let Some(name) = caps.get(1) {
                        collector.push(name.as_str(), None, SOURCE_README);
                    }
                }
            }
            for caps in TOKEN_BULLET.captures_iter(section) {
                if let Some(name) = caps.get(1) {
                    let tokens = caps.get(2).map(|m| m.as_str());
                    collector.push(name.as_str(), tokens, SOURCE_README);
                }
            }
        }

        for dataset in WELL_KNOWN_DATASETS {
            if readme.contains(dataset) {
                collector.push(dataset, None, SOURCE_MENTION);
            }
        }
    }

    if let Some(summary) = &sources.summary {
        for tag in &summary.tags {
            if let Some(name) = tag.strip_prefix("dataset:") {
                collector.push(name, None, SOURCE_TAGS);
            }
        }
    }

    collector.entries
}
