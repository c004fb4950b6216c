//! Parser error types

use thiserror::Error;

/// Parser error
#[derive(Error, Debug)]
pub enum ParseError {
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Missing required field
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// Invalid field value
    #[error("Invalid value for field '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// Invalid condition syntax
    #[error("Invalid condition '{condition}': {message}")]
    InvalidCondition { condition: String, message: String },

    /// Table parsed but is not well formed
    #[error("Invalid decision table: {0}")]
    InvalidTable(#[from] dealsense_core::CoreError),
}

/// Result type for parser operations
pub type Result<T> = std::result::Result<T, ParseError>;
