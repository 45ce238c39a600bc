//! Parameter count resolution

use once_cell::sync::Lazy;
use regex::Regex;

use super::Resolver;
use crate::sources::{ConfigKind, RawModelSources};

/// Keys that carry an explicit parameter count in a model config
const PARAMETER_COUNT_KEYS: &[&str] = &["num_parameters", "n_parameters", "num_params", "total_params"];
const VOCAB_KEYS: &[&str] = &["vocab_size", "padded_vocab_size"];
const HIDDEN_KEYS: &[&str] = &["hidden_size", "n_embd", "d_model"];
const LAYER_KEYS: &[&str] = &["num_hidden_layers", "n_layer", "num_layers"];

/// Size keywords matched as substrings of the identifier, in priority order
const SIZE_KEYWORDS: &[(&str, &str)] = &[
    ("base", "110M"),
    ("small", "60M"),
    ("tiny", "5M"),
    ("large", "340M"),
    ("xl", "1.5B"),
    ("xxl", "11B"),
];

/// `7b`, `1.5B`, or the per-expert size of a `8x7B` mixture token
static IDENTIFIER_SIZE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[^a-z0-9.]|\dx)(\d+(?:\.\d+)?)b(?:[^a-z0-9]|$)").unwrap()
});

/// Readme phrases and the unit each one implies
static README_SIZE: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    vec![
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*billion\s+parameters").unwrap(), "B"),
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*B\s+parameters").unwrap(), "B"),
        (Regex::new(r"(?i)parameters:\s*(\d+(?:\.\d+)?)\s*B\b").unwrap(), "B"),
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*million\s+parameters").unwrap(), "M"),
        (Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*M\s+parameters").unwrap(), "M"),
        (Regex::new(r"(?i)parameters:\s*(\d+(?:\.\d+)?)\s*M\b").unwrap(), "M"),
    ]
});

pub const PARAMETERS: Resolver<String> = Resolver::new(
    "parameters",
    &[
        ("config_parameter_count", from_config_count),
        ("config_dimensions", from_config_dimensions),
        ("identifier_size_token", from_identifier_token),
        ("identifier_size_keyword", from_identifier_keyword),
        ("readme_phrase", from_readme),
        ("summary_safetensors_total", from_safetensors_total),
    ],
);

/// Render a raw count with a B/M/K unit and one decimal, or as a plain integer
/// below one thousand
pub fn format_parameter_count(count: u64) -> String {
    let n = count as f64;
    if n >= 1e9 {
        format!("{:.1}B", n / 1e9)
    } else if n >= 1e6 {
        format!("{:.1}M", n / 1e6)
    } else if n >= 1e3 {
        format!("{:.1}K", n / 1e3)
    } else {
        count.to_string()
    }
}

fn from_config_count(sources: &RawModelSources) -> Option<String> {
    sources
        .config_u64(ConfigKind::Model, PARAMETER_COUNT_KEYS)
        .filter(|count| *count > 0)
        .map(format_parameter_count)
}

/// vocab * hidden * layers, marked as approximate
fn from_config_dimensions(sources: &RawModelSources) -> Option<String> {
    let vocab = sources.config_u64(ConfigKind::Model, VOCAB_KEYS)?;
    let hidden = sources.config_u64(ConfigKind::Model, HIDDEN_KEYS)?;
    let layers = sources.config_u64(ConfigKind::Model, LAYER_KEYS)?;
    let estimate = vocab.checked_mul(hidden)?.checked_mul(layers)?;
    if estimate == 0 {
        return None;
    }
    Some(format!("~{}", format_parameter_count(estimate)))
}

fn from_identifier_token(sources: &RawModelSources) -> Option<String> {
    IDENTIFIER_SIZE
        .captures(&sources.identifier)
        .and_then(|caps| caps.get(1))
        .map(|m| format!("{}B", m.as_str()))
}

fn from_identifier_keyword(sources: &RawModelSources) -> Option<String> {
    let identifier = sources.identifier.to_lowercase();
    SIZE_KEYWORDS
        .iter()
        .find(|(keyword, _)| identifier.contains(keyword))
        .map(|(_, size)| size.to_string())
}

fn from_readme(sources: &RawModelSources) -> Option<String> {
    let readme = sources.readme()?;
    README_SIZE.iter().find_map(|(pattern, unit)| {
        pattern
            .captures(readme)
            .and_then(|caps| caps.get(1))
            .map(|m| format!("{}{}", m.as_str(), unit))
    })
}

fn from_safetensors_total(sources: &RawModelSources) -> Option<String> {
    sources
        .summary
        .as_ref()?
        .safetensors
        .as_ref()?
        .total
        .filter(|total| *total > 0)
        .map(format_parameter_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::{ConfigDocument, ModelSummary, SafetensorsSummary};
    use serde_json::json;

    fn model_config(value: serde_json::Value) -> ConfigDocument {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_unit_formatting() {
        assert_eq!(format_parameter_count(7_000_000_000), "7.0B");
        assert_eq!(format_parameter_count(350_000_000), "350.0M");
        assert_eq!(format_parameter_count(1_500), "1.5K");
        assert_eq!(format_parameter_count(999), "999");
        assert_eq!(format_parameter_count(0), "0");
    }

    #[test]
    fn test_config_count_beats_identifier_token() {
        let sources = RawModelSources::new("org/demo-13b").with_config(
            ConfigKind::Model,
            model_config(json!({"num_parameters": 7000000000u64})),
        );
        assert_eq!(PARAMETERS.resolve(&sources), Some("7.0B".to_string()));
    }

    #[test]
    fn test_dimensional_estimate_is_approximate() {
        let sources = RawModelSources::new("org/unnamed").with_config(
            ConfigKind::Model,
            model_config(json!({"vocab_size": 32000, "hidden_size": 4096, "num_hidden_layers": 32})),
        );
        // 32000 * 4096 * 32 = 4_194_304_000
        assert_eq!(PARAMETERS.resolve(&sources), Some("~4.2B".to_string()));
    }

    #[test]
    fn test_dimensional_estimate_needs_all_three() {
        let sources = RawModelSources::new("org/unnamed").with_config(
            ConfigKind::Model,
            model_config(json!({"vocab_size": 32000, "hidden_size": 4096})),
        );
        assert_eq!(PARAMETERS.resolve(&sources), None);
    }

    #[test]
    fn test_identifier_token() {
        assert_eq!(
            PARAMETERS.resolve(&RawModelSources::new("org/demo-7b")),
            Some("7B".to_string())
        );
        assert_eq!(
            PARAMETERS.resolve(&RawModelSources::new("org/Model-1.5B-Instruct")),
            Some("1.5B".to_string())
        );
        // "b" inside a word is not a size token
        assert_eq!(from_identifier_token(&RawModelSources::new("org/v2bert")), None);
    }

    #[test]
    fn test_mixture_of_experts_token() {
        assert_eq!(
            PARAMETERS.resolve(&RawModelSources::new("mistralai/Mixtral-8x7B-v0.1")),
            Some("7B".to_string())
        );
        assert_eq!(
            from_identifier_token(&RawModelSources::new("org/MoE-2x1.5b")),
            Some("1.5B".to_string())
        );
    }

    #[test]
    fn test_identifier_keyword() {
        assert_eq!(
            PARAMETERS.resolve(&RawModelSources::new("google-bert/bert-base-uncased")),
            Some("110M".to_string())
        );
        assert_eq!(
            PARAMETERS.resolve(&RawModelSources::new("org/t5-small")),
            Some("60M".to_string())
        );
    }

    #[test]
    fn test_readme_phrases() {
        let billion = RawModelSources::new("org/model")
            .with_readme("This model has 3 billion parameters and was trained on C4.");
        assert_eq!(PARAMETERS.resolve(&billion), Some("3B".to_string()));

        let million =
            RawModelSources::new("org/model").with_readme("A compact 125 million parameters model.");
        assert_eq!(PARAMETERS.resolve(&million), Some("125M".to_string()));

        let labelled = RawModelSources::new("org/model").with_readme("Parameters: 2.7B");
        assert_eq!(PARAMETERS.resolve(&labelled), Some("2.7B".to_string()));
    }

    #[test]
    fn test_safetensors_total_is_last_resort() {
        let summary = ModelSummary {
            safetensors: Some(SafetensorsSummary {
                total: Some(1_235_814_400),
                ..Default::default()
            }),
            ..Default::default()
        };
        let sources = RawModelSources::new("org/model").with_summary(summary);
        assert_eq!(PARAMETERS.resolve(&sources), Some("1.2B".to_string()));
    }

    #[test]
    fn test_no_strategy_succeeds() {
        assert_eq!(PARAMETERS.resolve(&RawModelSources::new("org/model")), None);
    }
}
