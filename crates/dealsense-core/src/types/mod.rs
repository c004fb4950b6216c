//! Type system for DealSense
//!
//! This module contains the data model shared by every stage:
//! - Deal records (raw pipeline input)
//! - Feature vectors (transform output, model input)
//! - Decision records and execution outcomes (engine output)

pub mod dataset;
pub mod decision;
pub mod feature;
pub mod record;

pub use dataset::Dataset;
pub use decision::{ActionType, DecisionRecord, ExecutionOutcome, ExecutionStatus};
pub use feature::FeatureVector;
pub use record::{DealRecord, LabeledDeal};
