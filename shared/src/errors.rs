//! Shared error types for the catalog workspace

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SharedError {
    #[error("Invalid configuration: {field} = {value}")]
    InvalidConfig { field: String, value: String },

    #[error("Unknown type tag: {input}")]
    UnknownType { input: String },

    #[error("Unknown sort key: {input}")]
    UnknownSortKey { input: String },

    #[error("Unknown stat name: {input}")]
    UnknownStat { input: String },

    #[error("Invalid generation: {input} (expected 1-9)")]
    InvalidGeneration { input: String },
}

impl SharedError {
    pub fn config(field: &str, value: impl Into<String>) -> Self {
        SharedError::InvalidConfig {
            field: field.to_string(),
            value: value.into(),
        }
    }
}

pub type SharedResult<T> = Result<T, SharedError>;
