//! Observability module
//!
//! In-process counters and histograms for the decision engine. Metrics are
//! write-only from the engine's point of view and never influence a
//! decision.

pub mod metrics;

pub use metrics::{Counter, Histogram, Metrics, MetricsCollector, DEFAULT_HISTOGRAM_WINDOW};
