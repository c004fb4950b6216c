//! Decision engine module
//!
//! Evaluates the decision table and dispatches the chosen action.

pub mod justification;
mod operators;
pub mod reasoning_engine;

// Re-export for convenience
pub use reasoning_engine::{EngineConfig, ReasoningEngine};
