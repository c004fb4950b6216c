//! Action delivery
//!
//! The seam between a decision and the system that acts on it.

mod executor;

pub use executor::{ActionExecutor, LoggingExecutor, MONITORING_MESSAGE};
