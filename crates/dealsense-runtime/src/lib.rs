//! DealSense Runtime - Reasoning & Action engine
//!
//! Turns a win probability and the deal it was computed for into a
//! [`DecisionRecord`](dealsense_core::DecisionRecord) by evaluating an
//! ordered decision table, then carries the decision out through an
//! [`ActionExecutor`].

pub mod action;
pub mod context;
pub mod engine;
pub mod error;
pub mod observability;

// Re-export main types
pub use action::{ActionExecutor, LoggingExecutor, MONITORING_MESSAGE};
pub use context::DecisionContext;
pub use engine::{EngineConfig, ReasoningEngine};
pub use error::{Result, RuntimeError};
pub use observability::{Counter, Histogram, Metrics, MetricsCollector};
