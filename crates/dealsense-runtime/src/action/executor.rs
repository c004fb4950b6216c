//! Action executor interface and the default logging executor

use crate::error::Result;
use async_trait::async_trait;
use dealsense_core::DecisionRecord;
use tracing::info;

/// Status text emitted when no intervention is required
pub const MONITORING_MESSAGE: &str = "Monitoring active. No intervention needed.";

/// Delivers an actionable decision to a downstream system (CRM task,
/// pricing service, webhook).
#[async_trait]
pub trait ActionExecutor: Send + Sync {
    /// Deliver the decision, returning a short delivery detail
    async fn deliver(&self, decision: &DecisionRecord) -> Result<String>;

    /// Get the name of this executor
    fn name(&self) -> &str;
}

/// Executor that records actions through `tracing`
#[derive(Debug, Clone, Default)]
pub struct LoggingExecutor;

impl LoggingExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ActionExecutor for LoggingExecutor {
    async fn deliver(&self, decision: &DecisionRecord) -> Result<String> {
        info!("[Action Executed] {}", decision.action_type());
        info!("[Justification] {}", decision.justification());
        Ok(format!("{} dispatched", decision.action_type()))
    }

    fn name(&self) -> &str {
        "logging"
    }
}
