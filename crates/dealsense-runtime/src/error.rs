//! Runtime error types

use dealsense_core::{CoreError, ValidationError};
use thiserror::Error;

/// Runtime error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuntimeError {
    /// Decision inputs violate a precondition
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Threshold or cutoff outside their allowed range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Decision table is not well formed
    #[error("Invalid decision table: {0}")]
    InvalidTable(String),

    /// Comparison could not be evaluated
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Action could not be delivered to the downstream system
    #[error("Delivery failed: {0}")]
    Delivery(String),
}

impl From<CoreError> for RuntimeError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidTable(msg) => RuntimeError::InvalidTable(msg),
            CoreError::InvalidValue(msg) => RuntimeError::InvalidConfig(msg),
        }
    }
}

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, RuntimeError>;
