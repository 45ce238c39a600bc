//! Best-effort scans: safetensors details, model tree counts, links, spaces
//!
//! No strict precedence here beyond "first non-empty wins" per field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

use crate::record::{Links, ModelTree, SafetensorsInfo, SpaceEntry};
use crate::resolver::{capture, capture_u64, first_capture};
use crate::sources::RawModelSources;

pub const MAX_SPACES: usize = 50;
const SPACES_BASE_URL: &str = "https://huggingface.co/spaces";

static MODEL_SIZE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)model\s+size:\s*(\d+(?:\.\d+)?)\s*([bmk])\s*params").unwrap());
static TENSOR_TYPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tensor\s+type:[ \t]*([A-Za-z0-9_][A-Za-z0-9_, \t]*)").unwrap());

/// Filename substrings and the tensor type they imply, in output order
const TENSOR_MARKERS: &[(&[&str], &str)] = &[
    (&["fp32", "f32"], "F32"),
    (&["fp16", "f16"], "FP16"),
    (&["bf16"], "BF16"),
    (&["fp8", "f8", "e4m3"], "F8_E4M3"),
    (&["int8"], "INT8"),
    (&["int4"], "INT4"),
];

static FINETUNES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)finetunes?:\s*(\d+)").unwrap());
static MERGES: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)merges?:\s*(\d+)").unwrap());
static QUANTIZATIONS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)quantizations?:\s*(\d+)").unwrap());

static HOMEPAGE: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)homepage:\s*<?(https?://[^\s)>\]]+)").unwrap(),
        Regex::new(r"(?i)website:\s*<?(https?://[^\s)>\]]+)").unwrap(),
        Regex::new(r"(?i)\[homepage\]\((https?://[^\s)]+)\)").unwrap(),
    ]
});
static API: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)\bapi(?:\s+endpoint)?:\s*<?(https?://[^\s)>\]]+)").unwrap(),
        Regex::new(r"(?i)\[api[^\]]*\]\((https?://[^\s)]+)\)").unwrap(),
    ]
});
static GITHUB: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(https?://github\.com/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)").unwrap());
static MODELSCOPE: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"(https?://(?:www\.)?modelscope\.cn/models/[A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)")
            .unwrap(),
        Regex::new(r"(?i)modelscope:\s*<?(https?://[^\s)>\]]+)").unwrap(),
    ]
});
static CONTACT: Lazy<[Regex; 3]> = Lazy::new(|| {
    [
        Regex::new(r"(?i)contact:\s*<?([A-Za-z0-9_.+\-]+@[A-Za-z0-9\-]+\.[A-Za-z0-9.\-]+)").unwrap(),
        Regex::new(r"(?i)contact:\s*<?(https?://[^\s)>\]]+)").unwrap(),
        Regex::new(r"mailto:([A-Za-z0-9_.+\-]+@[A-Za-z0-9\-]+\.[A-Za-z0-9.\-]+)").unwrap(),
    ]
});
static SPACE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://huggingface\.co/spaces/([A-Za-z0-9_.\-]+/[A-Za-z0-9_.\-]+)").unwrap()
});

/// Safetensors block; `parameters` is the already-resolved parameter count
pub fn safetensors(sources: &RawModelSources, parameters: Option<&str>) -> Option<SafetensorsInfo> {
    let readme = sources.readme();

    let model_size = readme
        .and_then(|text| MODEL_SIZE.captures(text))
        .and_then(|caps| Some(format!("{}{}", caps.get(1)?.as_str(), caps.get(2)?.as_str().to_uppercase())))
        .or_else(|| parameters.map(str::to_string));

    let tensor_type = readme
        .and_then(tensor_type_from_readme)
        .or_else(|| tensor_type_from_files(sources))
        .or_else(|| tensor_type_from_summary(sources));

    let files: Vec<_> = sources
        .files
        .iter()
        .filter(|f| f.filename.ends_with(".safetensors"))
        .cloned()
        .collect();

    if model_size.is_none() && tensor_type.is_none() && files.is_empty() {
        return None;
    }
    Some(SafetensorsInfo {
        model_size,
        tensor_type,
        files,
    })
}

fn tensor_type_from_readme(readme: &str) -> Option<String> {
    let raw = capture(&TENSOR_TYPE, readme)?;
    let tokens: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .collect();
    (!tokens.is_empty()).then(|| tokens.join(" "))
}

fn tensor_type_from_files(sources: &RawModelSources) -> Option<String> {
    let names: Vec<String> = sources.files.iter().map(|f| f.filename.to_lowercase()).collect();
    let found: Vec<&str> = TENSOR_MARKERS
        .iter()
        .filter(|(markers, label)| {
            names.iter().any(|name| {
                // "bf16" must not read as "f16"
                let probe = if *label == "FP16" {
                    name.replace("bf16", "")
                } else {
                    name.clone()
                };
                markers.iter().any(|m| probe.contains(m))
            })
        })
        .map(|(_, label)| *label)
        .collect();
    (!found.is_empty()).then(|| found.join(" "))
}

fn tensor_type_from_summary(sources: &RawModelSources) -> Option<String> {
    let breakdown = &sources.summary.as_ref()?.safetensors.as_ref()?.parameters;
    let dtypes: Vec<&str> = breakdown.keys().map(String::as_str).collect();
    (!dtypes.is_empty()).then(|| dtypes.join(" "))
}

/// Finetune, merge and quantization counts; each one is independent
pub fn model_tree(sources: &RawModelSources) -> Option<ModelTree> {
    let readme = sources.readme()?;
    let tree = ModelTree {
        finetunes: capture_u64(&FINETUNES, readme),
        merges: capture_u64(&MERGES, readme),
        quantizations: capture_u64(&QUANTIZATIONS, readme),
    };
    (!tree.is_empty()).then_some(tree)
}

fn first_link(patterns: &[Regex], text: &str) -> Option<String> {
    let refs: Vec<&Regex> = patterns.iter().collect();
    first_capture(&refs, text).map(|url| url.trim_end_matches(['.', ',', ';', ':']).to_string())
}

pub fn links(sources: &RawModelSources) -> Option<Links> {
    let readme = sources.readme()?;
    let links = Links {
        homepage: first_link(&*HOMEPAGE, readme),
        api: first_link(&*API, readme),
        github: first_link(std::slice::from_ref(&*GITHUB), readme),
        modelscope: first_link(&*MODELSCOPE, readme),
        contact: first_link(&*CONTACT, readme),
    };
    (!links.is_empty()).then_some(links)
}

/// Spaces from the direct listing when it has entries, otherwise space URLs in the
/// readme; at most `max` entries
pub fn spaces(sources: &RawModelSources, max: usize) -> Option<Vec<SpaceEntry>> {
    let listed: Vec<SpaceEntry> = sources
        .spaces
        .iter()
        .flatten()
        .take(max)
        .map(|space| SpaceEntry {
            name: space.name.clone(),
            url: space.url.clone(),
        })
        .collect();
    if !listed.is_empty() {
        return Some(listed);
    }

    let readme = sources.readme()?;
    let mut seen = HashSet::new();
    let scanned: Vec<SpaceEntry> = SPACE_URL
        .captures_iter(readme)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim_end_matches('.').to_string())
        .filter(|name| seen.insert(name.clone()))
        .take(max)
        .map(|name| SpaceEntry {
            url: format!("{}/{}", SPACES_BASE_URL, name),
            name,
        })
        .collect();
    (!scanned.is_empty()).then_some(scanned)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{FileEntry, ModelSummary, SafetensorsSummary, SpaceRef};

    fn files(names: &[&str]) -> Vec<FileEntry> {
        names.iter().map(|n| FileEntry::new(*n, Some(10))).collect()
    }

    #[test]
    fn test_safetensors_from_readme() {
        let sources = RawModelSources::new("a/b")
            .with_readme("Model size: 8.03B params\nTensor type: BF16, F32")
            .with_files(files(&["model-00001-of-00002.safetensors", "config.json"]));
        let info = safetensors(&sources, Some("7.0B")).unwrap();

        assert_eq!(info.model_size.as_deref(), Some("8.03B"));
        assert_eq!(info.tensor_type.as_deref(), Some("BF16 F32"));
        assert_eq!(info.files.len(), 1);
    }

    #[test]
    fn test_safetensors_falls_back_to_parameters_and_files() {
        let sources = RawModelSources::new("a/b")
            .with_files(files(&["model-bf16.safetensors", "model-int4.gguf", "model-f32.bin"]));
        let info = safetensors(&sources, Some("7B")).unwrap();

        assert_eq!(info.model_size.as_deref(), Some("7B"));
        assert_eq!(info.tensor_type.as_deref(), Some("F32 BF16 INT4"));
    }

    #[test]
    fn test_tensor_type_from_summary_breakdown() {
        let summary = ModelSummary {
            safetensors: Some(SafetensorsSummary {
                parameters: [("F32".to_string(), 10), ("BF16".to_string(), 20)].into_iter().collect(),
                total: Some(30),
            }),
            ..Default::default()
        };
        let sources = RawModelSources::new("a/b").with_summary(summary);
        let info = safetensors(&sources, None).unwrap();
        assert_eq!(info.tensor_type.as_deref(), Some("BF16 F32"));
        assert_eq!(info.model_size, None);
    }

    #[test]
    fn test_safetensors_absent() {
        assert_eq!(safetensors(&RawModelSources::new("a/b"), None), None);
    }

    #[test]
    fn test_model_tree_partial() {
        let sources = RawModelSources::new("a/b").with_readme("Finetunes: 12 models\nQuantizations: 30");
        let tree = model_tree(&sources).unwrap();
        assert_eq!(tree.finetunes, Some(12));
        assert_eq!(tree.merges, None);
        assert_eq!(tree.quantizations, Some(30));

        let none = RawModelSources::new("a/b").with_readme("no counts here");
        assert_eq!(model_tree(&none), None);
    }

    #[test]
    fn test_links() {
        let readme = "\
Homepage: https://example.org/model.
API: https://api.example.org/v1
Code lives at https://github.com/org/project, see also
[ModelScope](https://modelscope.cn/models/org/project)
Contact: team@example.org
";
        let links = links(&RawModelSources::new("a/b").with_readme(readme)).unwrap();
        assert_eq!(links.homepage.as_deref(), Some("https://example.org/model"));
        assert_eq!(links.api.as_deref(), Some("https://api.example.org/v1"));
        assert_eq!(links.github.as_deref(), Some("https://github.com/org/project"));
        assert_eq!(
            links.modelscope.as_deref(),
            Some("https://modelscope.cn/models/org/project")
        );
        assert_eq!(links.contact.as_deref(), Some("team@example.org"));
    }

    #[test]
    fn test_links_absent() {
        assert_eq!(links(&RawModelSources::new("a/b").with_readme("plain text")), None);
    }

    #[test]
    fn test_spaces_prefer_listing() {
        let listed: Vec<SpaceRef> = (0..60)
            .map(|i| SpaceRef {
                name: format!("user/space-{i}"),
                url: format!("https://huggingface.co/spaces/user/space-{i}"),
            })
            .collect();
        let sources = RawModelSources::new("a/b")
            .with_spaces(listed)
            .with_readme("https://huggingface.co/spaces/other/demo");
        let spaces = spaces(&sources, MAX_SPACES).unwrap();
        assert_eq!(spaces.len(), 50);
        assert_eq!(spaces[0].name, "user/space-0");
    }

    #[test]
    fn test_spaces_fall_back_to_readme() {
        let sources = RawModelSources::new("a/b").with_spaces(vec![]).with_readme(
            "Try https://huggingface.co/spaces/org/demo or https://huggingface.co/spaces/org/demo.",
        );
        let spaces = spaces(&sources, MAX_SPACES).unwrap();
        assert_eq!(spaces.len(), 1);
        assert_eq!(spaces[0].url, "https://huggingface.co/spaces/org/demo");
    }

    #[test]
    fn test_spaces_absent() {
        assert_eq!(spaces(&RawModelSources::new("a/b"), MAX_SPACES), None);
    }
}
