//! Tokenizer, vocabulary size and training framework resolution

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Resolver, capture, capture_u64, first_capture};
use crate::sources::{ConfigKind, RawModelSources};

static TOKENIZER_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)tokenizer:\s*([A-Za-z0-9\-_]+)").unwrap());
static VOCAB_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)vocab(?:ulary)?\s+size:\s*(\d[\d,]*)").unwrap());
static FRAMEWORK_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)training\s+framework:[ \t]*([^\n]+)").unwrap());
static TRAINED_WITH_LABEL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)trained\s+with:[ \t]*([^\n]+)").unwrap());
static FRAMEWORK_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\b(pytorch|jax|tensorflow|paddlepaddle)\b").unwrap());

/// Library names whose checkpoints are PyTorch unless stated otherwise
const PYTORCH_LIBRARIES: &[&str] = &["transformers"];

pub const TOKENIZER: Resolver<String> = Resolver::new(
    "tokenizer",
    &[
        ("tokenizer_config_class", |s: &RawModelSources| {
            s.config_str(ConfigKind::Tokenizer, "tokenizer_class")
                .map(str::to_string)
        }),
        ("config_tokenizer_class", |s: &RawModelSources| {
            s.config_str(ConfigKind::Model, "tokenizer_class")
                .map(str::to_string)
        }),
        ("readme_label", |s: &RawModelSources| capture(&TOKENIZER_LABEL, s.readme()?)),
    ],
);

pub const VOCABULARY_SIZE: Resolver<u64> = Resolver::new(
    "vocabulary_size",
    &[
        ("tokenizer_config_vocab_size", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Tokenizer, &["vocab_size"])
        }),
        ("config_vocab_size", |s: &RawModelSources| {
            s.config_u64(ConfigKind::Model, &["vocab_size"])
        }),
        ("readme_label", |s: &RawModelSources| capture_u64(&VOCAB_LABEL, s.readme()?)),
    ],
);

pub const TRAINING_FRAMEWORK: Resolver<String> = Resolver::new(
    "training_framework",
    &[
        ("readme_label", framework_from_label),
        ("readme_framework_name", framework_from_name),
        ("library_default", framework_from_library),
    ],
);

fn framework_from_label(sources: &RawModelSources) -> Option<String> {
    let readme = sources.readme()?;
    first_capture(&[&*FRAMEWORK_LABEL, &*TRAINED_WITH_LABEL], readme)
        .map(|value| {
            value
                .trim_matches(|c: char| c == '*' || c == '`' || c == '_' || c.is_whitespace())
                .trim_end_matches(['.', ','])
                .to_string()
        })
        .filter(|value| !value.is_empty())
}

fn framework_from_name(sources: &RawModelSources) -> Option<String> {
    let name = capture(&FRAMEWORK_NAME, sources.readme()?)?;
    let canonical = match name.to_lowercase().as_str() {
        "pytorch" => "PyTorch",
        "jax" => "JAX",
        "tensorflow" => "TensorFlow",
        "paddlepaddle" => "PaddlePaddle",
        _ => return Some(name),
    };
    Some(canonical.to_string())
}

fn framework_from_library(sources: &RawModelSources) -> Option<String> {
    let summary = sources.summary.as_ref()?;
    let library_matches = summary
        .library_name
        .as_deref()
        .is_some_and(|library| PYTORCH_LIBRARIES.iter().any(|l| library.eq_ignore_ascii_case(l)));
    let tag_matches = summary
        .tags
        .iter()
        .any(|tag| PYTORCH_LIBRARIES.iter().any(|l| tag.eq_ignore_ascii_case(l)));

    (library_matches || tag_matches).then(|| "PyTorch".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{ConfigDocument, ModelSummary};
    use serde_json::{Value, json};

    fn doc(value: Value) -> ConfigDocument {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_tokenizer_prefers_tokenizer_config() {
        let sources = RawModelSources::new("a/b")
            .with_config(ConfigKind::Tokenizer, doc(json!({"tokenizer_class": "LlamaTokenizerFast"})))
            .with_config(ConfigKind::Model, doc(json!({"tokenizer_class": "LlamaTokenizer"})));
        assert_eq!(TOKENIZER.resolve(&sources).as_deref(), Some("LlamaTokenizerFast"));

        let readme = RawModelSources::new("a/b").with_readme("Tokenizer: sentencepiece-bpe");
        assert_eq!(TOKENIZER.resolve(&readme).as_deref(), Some("sentencepiece-bpe"));
    }

    #[test]
    fn test_vocabulary_size_chain() {
        let sources = RawModelSources::new("a/b")
            .with_config(ConfigKind::Model, doc(json!({"vocab_size": 32000})));
        assert_eq!(VOCABULARY_SIZE.resolve(&sources), Some(32000));

        let both = sources
            .clone()
            .with_config(ConfigKind::Tokenizer, doc(json!({"vocab_size": 32001})));
        assert_eq!(VOCABULARY_SIZE.resolve(&both), Some(32001));

        let readme = RawModelSources::new("a/b").with_readme("Vocabulary size: 151,936");
        assert_eq!(VOCABULARY_SIZE.resolve(&readme), Some(151_936));

        let short = RawModelSources::new("a/b").with_readme("vocab size: 50257");
        assert_eq!(VOCABULARY_SIZE.resolve(&short), Some(50257));
    }

    #[test]
    fn test_framework_label_wins() {
        let sources = RawModelSources::new("a/b")
            .with_readme("Trained with: **Megatron-LM**\n\nWeights are exported for PyTorch.");
        assert_eq!(TRAINING_FRAMEWORK.resolve(&sources).as_deref(), Some("Megatron-LM"));
    }

    #[test]
    fn test_framework_name_is_canonicalized() {
        let sources = RawModelSources::new("a/b").with_readme("Implemented in jax and flax.");
        assert_eq!(TRAINING_FRAMEWORK.resolve(&sources).as_deref(), Some("JAX"));
    }

    #[test]
    fn test_framework_library_default() {
        let summary = ModelSummary {
            library_name: Some("transformers".to_string()),
            ..Default::default()
        };
        let sources = RawModelSources::new("a/b").with_summary(summary);
        assert_eq!(TRAINING_FRAMEWORK.resolve(&sources).as_deref(), Some("PyTorch"));

        let other = RawModelSources::new("a/b").with_summary(ModelSummary {
            library_name: Some("gguf".to_string()),
            ..Default::default()
        });
        assert_eq!(TRAINING_FRAMEWORK.resolve(&other), None);
    }
}
