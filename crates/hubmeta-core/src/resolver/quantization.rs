//! Quantized variant detection

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;
use tracing::debug;

use super::capture;
use crate::sources::RawModelSources;

/// Markers looked up in filenames and in the readme, lowercase
pub const QUANTIZATION_MARKERS: &[&str] = &["gguf", "gptq", "awq", "int8", "int4", "fp8", "bf16", "fp16"];

static QUANTIZED_VERSIONS_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)quantized\s+versions?:[ \t]*([^\n]+)").unwrap());

/// Union of markers found in filenames and on the readme's "quantized versions:"
/// line, uppercased
pub fn quantized_versions(sources: &RawModelSources) -> BTreeSet<String> {
    let mut found = BTreeSet::new();

    for file in &sources.files {
        collect_markers(&file.filename, &mut found);
    }

    if let Some(line) = sources
        .readme()
        .and_then(|readme| capture(&QUANTIZED_VERSIONS_LINE, readme))
    {
        collect_markers(&line, &mut found);
    }

    if !found.is_empty() {
        debug!(versions = ?found, "quantized versions detected");
    }
    found
}

fn collect_markers(text: &str, found: &mut BTreeSet<String>) {
    let lowered = text.to_lowercase();
    for marker in QUANTIZATION_MARKERS {
        if lowered.contains(marker) {
            found.insert(marker.to_uppercase());
        }
    }
}
