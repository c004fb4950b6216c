//! Deal agent
//!
//! One pass of the observe → perceive → reason → act loop per deal.

use crate::config::AgentConfig;
use crate::error::Result;
use dealsense_core::{
    DealRecord, DecisionRecord, ExecutionOutcome, FeatureTransform, WinPredictor,
};
use dealsense_runtime::engine::justification::format_percent;
use dealsense_runtime::{MetricsCollector, ReasoningEngine};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

/// Decision plus what happened when it was executed
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentReport {
    pub decision: DecisionRecord,
    pub outcome: ExecutionOutcome,
}

/// Agent combining the fitted transform, the predictor and the engine
pub struct DealAgent {
    pub(crate) config: AgentConfig,
    pub(crate) transform: Arc<dyn FeatureTransform>,
    pub(crate) predictor: Arc<dyn WinPredictor>,
    pub(crate) engine: ReasoningEngine,
}

impl DealAgent {
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn engine(&self) -> &ReasoningEngine {
        &self.engine
    }

    pub fn metrics(&self) -> Arc<MetricsCollector> {
        self.engine.metrics()
    }

    /// Observe and perceive: encode the deal and estimate its win probability
    pub fn score(&self, record: &DealRecord) -> Result<f64> {
        let features = self.transform.transform(record)?;
        let probability = self.predictor.predict(&features)?;
        info!(
            "[Observation] Current Win Probability: {}",
            format_percent(probability)
        );
        Ok(probability)
    }

    /// Score the deal and decide, without executing
    pub fn analyze(&self, record: &DealRecord) -> Result<DecisionRecord> {
        let probability = self.score(record)?;
        Ok(self.engine.decide(probability, record)?)
    }

    /// The full loop: score, decide, execute.
    ///
    /// Transform and model errors propagate unchanged; a failed delivery is
    /// reported in the outcome and the decision is still returned.
    pub async fn analyze_and_act(&self, record: &DealRecord) -> Result<AgentReport> {
        let decision = self.analyze(record)?;
        let outcome = self.engine.execute(&decision).await;
        Ok(AgentReport { decision, outcome })
    }
}

impl std::fmt::Debug for DealAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DealAgent")
            .field("config", &self.config)
            .field("engine", &self.engine)
            .finish()
    }
}
