use hubmeta_core::{
    AssembleOptions, ConfigDocument, ConfigKind, CoreError, FileEntry, ModelSummary,
    RawModelSources, SpaceRef, assemble, assemble_with,
};
use serde_json::json;

const README: &str = "\
---
license: apache-2.0
---
# Demo 7B

Demo 7B is a   small decoder-only model
built for testing.

Training framework: PyTorch
Homepage: https://demo.example.org
GitHub: https://github.com/org/demo

## Training Data

* FineWeb (2T tokens)

## Coding & Agentic Benchmarks

| HumanEval | 61.0 |

## Intelligence Benchmarks

| MMLU | 64.2 |
";

fn object(value: serde_json::Value) -> ConfigDocument {
    match value {
        serde_json::Value::Object(map) => map,
        _ => panic!("expected an object"),
    }
}

fn full_sources() -> RawModelSources {
    let summary: ModelSummary = serde_json::from_value(json!({
        "id": "org/demo-7b",
        "author": "org",
        "downloads": 1200,
        "likes": 34,
        "tags": ["transformers", "text-generation", "dataset:org/mix"],
        "pipeline_tag": "text-generation",
        "library_name": "transformers",
        "license": "apache-2.0"
    }))
    .unwrap();

    RawModelSources::new("org/demo-7b")
        .with_summary(summary)
        .with_config(
            ConfigKind::Model,
            object(json!({
                "architectures": ["LlamaForCausalLM"],
                "model_type": "llama",
                "max_position_embeddings": 4096,
                "vocab_size": 32000
            })),
        )
        .with_config(
            ConfigKind::Tokenizer,
            object(json!({"tokenizer_class": "LlamaTokenizer"})),
        )
        .with_readme(README)
        .with_files(vec![
            FileEntry::new("config.json", Some(600)),
            FileEntry::new("model-00001-of-00002.safetensors", Some(4_000_000_000)),
            FileEntry::new("demo-7b.Q4_K_M.gguf", None),
        ])
        .with_spaces(vec![SpaceRef {
            name: "org/demo-chat".to_string(),
            url: "https://huggingface.co/spaces/org/demo-chat".to_string(),
        }])
}

#[test]
fn test_minimal_summary_end_to_end() {
    let summary: ModelSummary =
        serde_json::from_value(json!({"author": "org", "license": "mit"})).unwrap();
    let sources = RawModelSources::new("org/demo-7b").with_summary(summary);

    let record = assemble(&sources).unwrap();

    assert_eq!(record.name, "demo-7b");
    assert_eq!(record.slug, "org-demo-7b");
    assert_eq!(record.parameters.as_deref(), Some("7B"));
    assert_eq!(record.license.as_deref(), Some("mit"));
    assert_eq!(record.developer.as_deref(), Some("org"));
}

#[test]
fn test_full_sources() {
    let record = assemble(&full_sources()).unwrap();

    assert_eq!(record.architecture.as_deref(), Some("LlamaForCausalLM"));
    assert_eq!(record.context_length, Some(4096));
    assert_eq!(record.vocabulary_size, Some(32000));
    assert_eq!(record.tokenizer.as_deref(), Some("LlamaTokenizer"));
    assert_eq!(record.license.as_deref(), Some("apache-2.0"));
    assert_eq!(record.training_framework.as_deref(), Some("PyTorch"));
    assert_eq!(record.model_type.as_deref(), Some("text-generation"));
    assert_eq!(record.download_count, Some(1200));
    assert_eq!(record.likes, Some(34));
    assert_eq!(
        record.description.as_deref(),
        Some("Demo 7B is a small decoder-only model built for testing.")
    );
    assert!(record.categories.contains("transformers"));
    assert!(record.quantized_versions.contains("GGUF"));

    let names: Vec<&str> = record
        .training_data_sources
        .iter()
        .map(|s| s.name.as_str())
        .collect();
    assert_eq!(names, vec!["FineWeb", "org/mix"]);

    let safetensors = record.safetensors.as_ref().unwrap();
    assert_eq!(safetensors.files.len(), 1);

    let links = record.links.as_ref().unwrap();
    assert_eq!(links.homepage.as_deref(), Some("https://demo.example.org"));
    assert_eq!(links.github.as_deref(), Some("https://github.com/org/demo"));

    assert_eq!(record.spaces_using.as_ref().map(Vec::len), Some(1));
    assert_eq!(
        record.coding_benchmarks.as_ref().unwrap().get("HumanEval"),
        Some(&61.0)
    );
    assert_eq!(
        record.intelligence_benchmarks.as_ref().unwrap().get("MMLU"),
        Some(&64.2)
    );
    assert_eq!(record.full_description.as_deref(), Some(README));
}

#[test]
fn test_assembly_is_idempotent() {
    let sources = full_sources();
    let first = serde_json::to_string(&assemble(&sources).unwrap()).unwrap();
    let second = serde_json::to_string(&assemble(&sources).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_summary_without_technical_fields_leaves_them_absent() {
    let summary: ModelSummary = serde_json::from_value(json!({
        "id": "org/plain-model",
        "author": "org",
        "downloads": 5,
        "tags": ["text-classification"],
        "cardData": {"license": "mit"}
    }))
    .unwrap();
    let sources = RawModelSources::new("org/plain-model").with_summary(summary);

    let record = assemble(&sources).unwrap();

    assert_eq!(record.name, "plain-model");
    assert_eq!(record.license.as_deref(), Some("mit"));
    assert_eq!(record.download_count, Some(5));
    assert_eq!(record.parameters, None);
    assert_eq!(record.architecture, None);
    assert_eq!(record.context_length, None);
    assert_eq!(record.tokenizer, None);
    assert_eq!(record.vocabulary_size, None);
}

#[test]
fn test_identifier_only_still_yields_record() {
    let record = assemble(&RawModelSources::new("solo-model")).unwrap();

    assert_eq!(record.name, "solo-model");
    assert_eq!(record.slug, "solo-model");
    assert_eq!(record.developer, None);
    assert_eq!(record.license, None);
    assert!(record.categories.is_empty());
    assert!(record.safetensors.is_none());
    assert!(record.links.is_none());

    let json = serde_json::to_value(&record).unwrap();
    let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 3);
}

#[test]
fn test_unresolvable_identifier() {
    let sources = RawModelSources::new("   ").with_summary(ModelSummary::default());
    assert_eq!(assemble(&sources), Err(CoreError::UnresolvableIdentifier));
}

#[test]
fn test_spaces_cap_is_configurable() {
    let spaces = (0..5)
        .map(|i| SpaceRef {
            name: format!("user/space-{i}"),
            url: format!("https://huggingface.co/spaces/user/space-{i}"),
        })
        .collect();
    let sources = RawModelSources::new("org/demo").with_spaces(spaces);

    let record = assemble_with(&sources, &AssembleOptions { max_spaces: 2 }).unwrap();
    assert_eq!(record.spaces_using.map(|s| s.len()), Some(2));
}
