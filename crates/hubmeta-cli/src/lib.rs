//! hubmeta CLI library

pub mod commands;
pub mod error;

use error::CliError;
use serde::Serialize;

/// Output format for records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    #[default]
    Json,
    /// TOML document
    Toml,
}

impl OutputFormat {
    pub fn render<T: Serialize>(&self, value: &T) -> Result<String, CliError> {
        match self {
            OutputFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
            }
            OutputFormat::Toml => {
                toml::to_string_pretty(value).map_err(|e| CliError::Output(e.to_string()))
            }
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Toml => write!(f, "toml"),
        }
    }
}
