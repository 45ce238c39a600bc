//! Error types for hubmeta-cli

use hubmeta::ImportError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Import(#[from] ImportError),

    #[error("Output error: {0}")]
    Output(String),
}
