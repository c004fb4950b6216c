//! DealSense Core - Core types and definitions for the DealSense pipeline
//!
//! This crate provides the fundamental types used across the DealSense workspace:
//! - Deal records and feature vectors
//! - Decision records and execution outcomes
//! - Decision table AST definitions
//! - Collaborator traits for feature transforms and win predictors
//! - Error types

pub mod ast;
pub mod collaborator;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use collaborator::{FeatureTransform, WinPredictor};
pub use error::{CoreError, ModelError, TransformError, ValidationError};
pub use types::{
    ActionType, Dataset, DealRecord, DecisionRecord, ExecutionOutcome, ExecutionStatus, FeatureVector,
    LabeledDeal,
};
