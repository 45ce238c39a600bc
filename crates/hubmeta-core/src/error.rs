//! Error types for hubmeta-core

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Identifier cannot be resolved to a model name")]
    UnresolvableIdentifier,
}

pub type Result<T> = std::result::Result<T, CoreError>;
