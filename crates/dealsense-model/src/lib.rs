//! DealSense perception model
//!
//! A small feed-forward network that turns an encoded deal into a win
//! probability. Training uses binary cross-entropy with Adam and early
//! stopping on validation loss.

pub mod activation;
pub mod evaluation;
pub mod layer;
pub mod network;
pub mod optimizer;
pub mod trainer;

pub use activation::Activation;
pub use evaluation::{binary_cross_entropy, evaluate, EvaluationReport};
pub use layer::DenseLayer;
pub use network::{NetworkConfig, WinNetwork};
pub use optimizer::{Adam, AdamConfig};
pub use trainer::{EpochMetrics, Trainer, TrainingConfig, TrainingHistory};

pub use dealsense_core::ModelError;

/// Result type for model operations
pub type Result<T> = std::result::Result<T, ModelError>;
