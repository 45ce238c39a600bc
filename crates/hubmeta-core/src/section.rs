//! Readme section lookup and numeric pair extraction
//!
//! A section starts at a markdown heading whose text begins with the requested
//! phrase (case-insensitive) and ends right before the next heading line or at the
//! end of the document. `#` lines inside fenced code blocks are not headings.
//! Rows that match neither pair pattern are skipped.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, warn};

use crate::record::Benchmarks;

pub const CODING_BENCHMARKS_HEADING: &str = "coding & agentic benchmarks";
pub const INTELLIGENCE_BENCHMARKS_HEADING: &str = "intelligence benchmarks";

/// `| name | 12.3` at any position of a line
static TABLE_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\|\s*([^|\n]+?)\s*\|\s*([-+]?\d+(?:\.\d+)?)").unwrap());

/// `Some Bench: 12.3` or `MMLU: 70`, label ending in a benchmark-ish word
static LABELLED_SCORE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b((?:[A-Za-z][A-Za-z0-9_\-. ]*?)?(?:bench|test|score|metric|gaia|mmlu))\s*:\s*([-+]?\d+(?:\.\d+)?)",
    )
    .unwrap()
});

fn heading_pattern(heading: &str) -> Option<Regex> {
    let words: Vec<String> = heading.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        return None;
    }
    let pattern = format!(r"(?im)^[ \t]*#{{1,6}}[ \t]*{}[^\n]*$", words.join(r"\s+"));
    match Regex::new(&pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(heading, error = %e, "invalid section heading pattern");
            None
        }
    }
}

/// Body of the first section titled `heading`, without the heading line
pub fn find_section<'a>(text: &'a str, heading: &str) -> Option<&'a str> {
    let pattern = heading_pattern(heading)?;
    let start = pattern.find(text)?.end();
    let body = &text[start..];

    let mut offset = 0;
    let mut in_code_block = false;
    for line in body.split_inclusive('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with("```") {
            in_code_block = !in_code_block;
        } else if offset > 0 && !in_code_block && trimmed.starts_with('#') {
            // The heading line's own newline is the first line and never a heading
            return Some(&body[..offset]);
        }
        offset += line.len();
    }
    Some(body)
}

/// Benchmark names: trimmed, markdown emphasis removed, inner whitespace as `_`
pub fn normalize_name(raw: &str) -> String {
    raw.trim_matches(|c: char| c == '*' || c == '`' || c.is_whitespace())
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// All `name -> number` pairs of a block of text; the first occurrence of a name
/// wins
pub fn extract_numeric_pairs(text: &str) -> Benchmarks {
    let mut pairs = Benchmarks::new();

    for line in text.lines() {
        for pattern in [&*TABLE_ROW, &*LABELLED_SCORE] {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let name = normalize_name(name.as_str());
            if !name.chars().any(|c| c.is_alphabetic()) {
                continue;
            }
            let Ok(value) = value.as_str().parse::<f64>() else {
                continue;
            };
            pairs.entry(name).or_insert(value);
        }
    }

    pairs
}

/// Scores found in the section titled `heading`, `None` when there are none
pub fn benchmarks(text: &str, heading: &str) -> Option<Benchmarks> {
    let section = find_section(text, heading)?;
    let pairs = extract_numeric_pairs(section);
    if pairs.is_empty() {
        return None;
    }
    debug!(heading, count = pairs.len(), "benchmarks extracted");
    Some(pairs)
}
