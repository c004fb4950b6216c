//! Scenario replay against fixed probabilities
//!
//! No trained model is needed: each scenario pins the win probability the
//! perception model would have produced and runs the rest of the loop.

use dealsense_core::{
    DealRecord, FeatureTransform, FeatureVector, ModelError, TransformError, WinPredictor,
};
use dealsense_sdk::{AgentConfig, AgentReport, DealAgentBuilder};
use std::sync::Arc;
use tracing::info;

/// One simulated deal
#[derive(Debug, Clone)]
pub struct Scenario {
    pub name: &'static str,
    pub probability: f64,
    pub record: DealRecord,
}

/// The four reference situations: healthy, high-value at risk, low-value at
/// risk, and a deal sitting exactly on the threshold.
pub fn reference_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "healthy enterprise deal",
            probability: 0.75,
            record: DealRecord::new()
                .with_amount(80000.0)
                .with_region("Pacific")
                .with_route("Fields Sales"),
        },
        Scenario {
            name: "high-value deal at risk",
            probability: 0.45,
            record: DealRecord::new()
                .with_amount(80000.0)
                .with_region("Midwest")
                .with_route("Reseller"),
        },
        Scenario {
            name: "small deal at risk",
            probability: 0.45,
            record: DealRecord::new()
                .with_amount(20000.0)
                .with_region("Northeast")
                .with_route("Telesales"),
        },
        Scenario {
            name: "deal on the threshold",
            probability: 0.60,
            record: DealRecord::new()
                .with_amount(100000.0)
                .with_region("Southwest")
                .with_route("Fields Sales"),
        },
    ]
}

/// Predictor returning a pinned probability
#[derive(Debug, Clone, Copy)]
pub struct FixedProbability(pub f64);

impl WinPredictor for FixedProbability {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

/// Transform that ignores the record; the predictor does not look at features
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeatures;

impl FeatureTransform for NoFeatures {
    fn transform(&self, _record: &DealRecord) -> Result<FeatureVector, TransformError> {
        Ok(FeatureVector::new(Vec::new()))
    }

    fn output_width(&self) -> usize {
        0
    }
}

/// Run every scenario through a fresh agent
pub async fn run_scenarios(
    scenarios: &[Scenario],
    config: &AgentConfig,
) -> dealsense_sdk::Result<Vec<(&'static str, AgentReport)>> {
    let mut reports = Vec::with_capacity(scenarios.len());
    for scenario in scenarios {
        info!("--- Scenario: {} ---", scenario.name);
        let agent = DealAgentBuilder::new()
            .with_config(config.clone())
            .with_transform(Arc::new(NoFeatures))
            .with_predictor(Arc::new(FixedProbability(scenario.probability)))
            .build()?;
        let report = agent.analyze_and_act(&scenario.record).await?;
        reports.push((scenario.name, report));
    }
    Ok(reports)
}
