//! SDK error types

use thiserror::Error;

/// SDK error type
#[derive(Error, Debug)]
pub enum SdkError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Decision table could not be parsed
    #[error("Parser error: {0}")]
    ParseError(#[from] dealsense_parser::ParseError),

    /// Reasoning engine error
    #[error("Runtime error: {0}")]
    RuntimeError(#[from] dealsense_runtime::RuntimeError),

    /// Feature transform failed
    #[error("Transform error: {0}")]
    TransformError(#[from] dealsense_core::TransformError),

    /// Perception model failed
    #[error("Model error: {0}")]
    ModelError(#[from] dealsense_core::ModelError),

    /// Data preparation failed
    #[error("Data preparation error: {0}")]
    PrepError(#[from] dealsense_prep::PrepError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type for SDK operations
pub type Result<T> = std::result::Result<T, SdkError>;
