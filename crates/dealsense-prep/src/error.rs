//! Data preparation error types

use dealsense_core::TransformError;
use thiserror::Error;

/// Data preparation error
#[derive(Error, Debug)]
pub enum PrepError {
    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV decoding error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// Required column absent from the header row
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// File had a header but no data rows
    #[error("Dataset is empty: no data rows after the header")]
    EmptyDataset,

    /// Not enough rows to fill every partition
    #[error("Not enough rows to split: {rows} rows leave an empty partition")]
    InsufficientData { rows: usize },

    /// Transform fit or apply failed
    #[error("Transform error: {0}")]
    Transform(#[from] TransformError),
}

/// Result type for data preparation
pub type Result<T> = std::result::Result<T, PrepError>;
