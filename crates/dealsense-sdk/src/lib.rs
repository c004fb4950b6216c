//! DealSense SDK
//!
//! High-level API wiring the pipeline together: a fitted feature transform
//! observes a deal, the perception model estimates its win probability, the
//! reasoning engine decides the next-best action and the action executor
//! carries it out.

pub mod agent;
pub mod artifacts;
pub mod builder;
pub mod config;
pub mod error;
pub mod training;

// Re-export main types
pub use agent::{AgentReport, DealAgent};
pub use artifacts::{ModelArtifacts, MODEL_FILE, REPORT_FILE, TRANSFORM_FILE};
pub use builder::DealAgentBuilder;
pub use config::AgentConfig;
pub use error::{Result, SdkError};
pub use training::{train_from_csv, train_from_deals, PipelineConfig, TrainingOutcome};

// Re-export commonly used types from dependencies
pub use dealsense_core::{
    ActionType, DealRecord, DecisionRecord, ExecutionOutcome, ExecutionStatus, FeatureTransform,
    WinPredictor,
};
pub use dealsense_runtime::{ActionExecutor, LoggingExecutor, MetricsCollector};
