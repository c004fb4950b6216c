//! Error types for DealSense Core

use thiserror::Error;

/// Core error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CoreError {
    #[error("Invalid decision table: {0}")]
    InvalidTable(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

/// Caller contract violations on decision inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Win probability outside [0, 1] or NaN
    #[error("Win probability out of range: {value} (expected a value in [0, 1])")]
    ProbabilityOutOfRange { value: f64 },

    /// Required numeric field missing
    #[error("Required field missing: {field}")]
    MissingField { field: String },

    /// Numeric field present but not a finite number
    #[error("Field '{field}' is not a finite number: {value}")]
    NonNumeric { field: String, value: f64 },
}

/// Errors raised by a feature transform
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransformError {
    /// Transform used before it was fitted, or fitted on nothing
    #[error("Transform cannot be fitted on an empty dataset")]
    EmptyDataset,

    /// Numeric column had no observed values at fit time
    #[error("Column '{column}' has no observed values to impute from")]
    NoObservedValues { column: String },

    /// Numeric value present but not finite
    #[error("Column '{column}' holds a non-finite value: {value}")]
    NonFinite { column: String, value: f64 },

    /// Persisted transform could not be read or written
    #[error("Transform serialization error: {0}")]
    Serialization(String),
}

/// Errors raised by a win predictor
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// Feature vector width differs from the model input width
    #[error("Feature dimension mismatch: model expects {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Model produced NaN or infinity
    #[error("Model produced a non-finite output: {0}")]
    NonFiniteOutput(f64),

    /// Training or evaluation on an empty dataset
    #[error("Dataset is empty: {0}")]
    EmptyDataset(String),

    /// Persisted model could not be read or written
    #[error("Model serialization error: {0}")]
    Serialization(String),

    /// Invalid training configuration
    #[error("Invalid training configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, CoreError>;
