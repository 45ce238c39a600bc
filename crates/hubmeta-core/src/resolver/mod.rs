//! Field resolvers
//!
//! A resolver is an ordered list of named strategies for one output field. Each
//! strategy looks at the full [`RawModelSources`] and either produces a value or
//! passes; the first value wins. Strategies never fail, a missing source simply
//! yields `None`.

pub mod descriptors;
pub mod parameters;
pub mod quantization;
pub mod tokenizer;
pub mod training_data;

use regex::Regex;
use tracing::{debug, trace};

use crate::sources::RawModelSources;

pub use descriptors::{ARCHITECTURE, CONTEXT_LENGTH, LICENSE};
pub use parameters::{PARAMETERS, format_parameter_count};
pub use quantization::quantized_versions;
pub use tokenizer::{TOKENIZER, TRAINING_FRAMEWORK, VOCABULARY_SIZE};
pub use training_data::training_data_sources;

/// One extraction strategy
pub type Strategy<T> = fn(&RawModelSources) -> Option<T>;

/// Ordered fallback chain for a single field
pub struct Resolver<T: 'static> {
    field: &'static str,
    strategies: &'static [(&'static str, Strategy<T>)],
}

impl<T: 'static> Resolver<T> {
    pub const fn new(field: &'static str, strategies: &'static [(&'static str, Strategy<T>)]) -> Self {
        Self { field, strategies }
    }

    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Strategy names in evaluation order
    pub fn strategy_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.iter().map(|(name, _)| *name)
    }

    /// Run the strategies in order and return the first value produced
    pub fn resolve(&self, sources: &RawModelSources) -> Option<T> {
        for (name, strategy) in self.strategies {
            if let Some(value) = strategy(sources) {
                debug!(field = self.field, strategy = *name, "field resolved");
                return Some(value);
            }
        }
        trace!(field = self.field, "no strategy produced a value");
        None
    }
}

/// Trimmed first capture group of the first match, if non-empty
pub(crate) fn capture(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|s| !s.is_empty())
}

/// First capture group parsed as an integer; thousands separators are ignored
pub(crate) fn capture_u64(pattern: &Regex, text: &str) -> Option<u64> {
    capture(pattern, text).and_then(|s| s.replace(',', "").parse().ok())
}

/// Apply the patterns in order and return the first capture
pub(crate) fn first_capture(patterns: &[&Regex], text: &str) -> Option<String> {
    patterns.iter().find_map(|pattern| capture(pattern, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn never(_: &RawModelSources) -> Option<u32> {
        None
    }

    fn one(_: &RawModelSources) -> Option<u32> {
        Some(1)
    }

    fn two(_: &RawModelSources) -> Option<u32> {
        Some(2)
    }

    const CHAIN: Resolver<u32> = Resolver::new("test", &[("never", never), ("one", one), ("two", two)]);

    #[test]
    fn test_first_value_wins() {
        let sources = RawModelSources::new("x");
        assert_eq!(CHAIN.resolve(&sources), Some(1));
        assert_eq!(
            CHAIN.strategy_names().collect::<Vec<_>>(),
            vec!["never", "one", "two"]
        );
    }

    #[test]
    fn test_empty_chain_yields_none() {
        const EMPTY: Resolver<u32> = Resolver::new("empty", &[]);
        assert_eq!(EMPTY.resolve(&RawModelSources::new("x")), None);
    }

    #[test]
    fn test_capture_u64_strips_separators() {
        let pattern = Regex::new(r"n:\s*([\d,]+)").unwrap();
        assert_eq!(capture_u64(&pattern, "n: 128,000"), Some(128_000));
        assert_eq!(capture_u64(&pattern, "m: 1"), None);
    }
}
