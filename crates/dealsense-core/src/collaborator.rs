//! Collaborator traits injected into the decision pipeline
//!
//! The reasoning engine never owns a model or a preprocessor; both are
//! passed in behind these traits so tests can substitute fixed fakes.

use crate::error::{ModelError, TransformError};
use crate::types::{DealRecord, FeatureVector};

/// A previously fitted, deterministic record transform
pub trait FeatureTransform: Send + Sync {
    /// Encode a record as a feature vector
    fn transform(&self, record: &DealRecord) -> Result<FeatureVector, TransformError>;

    /// Width of the vectors this transform produces
    fn output_width(&self) -> usize;
}

/// A model estimating win probability from a feature vector
pub trait WinPredictor: Send + Sync {
    /// Predict a probability in [0, 1]
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}
