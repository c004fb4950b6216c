//! Agent simulation
//!
//! Runs four deals through the agent with a stand-in perception model that
//! derives the win probability from how long the deal has sat in its stage.
//!
//! ```text
//! cargo run --example agent_simulation
//! ```

use dealsense_core::{
    DealRecord, FeatureTransform, FeatureVector, ModelError, TransformError, WinPredictor,
};
use dealsense_sdk::DealAgentBuilder;
use std::sync::Arc;

/// Encodes days in stage, defaulting to 30 when missing
struct StageAge;

impl FeatureTransform for StageAge {
    fn transform(&self, record: &DealRecord) -> Result<FeatureVector, TransformError> {
        Ok(FeatureVector::new(vec![record
            .elapsed_days_in_sales_stage
            .unwrap_or(30.0)]))
    }

    fn output_width(&self) -> usize {
        1
    }
}

/// Win probability decays with stage age
struct DecayModel;

impl WinPredictor for DecayModel {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let days = features.as_slice()[0];
        Ok(1.0 / (1.0 + (0.08 * (days - 20.0)).exp()))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter("dealsense_sdk=info,dealsense_runtime=info")
        .init();

    let agent = DealAgentBuilder::new()
        .with_transform(Arc::new(StageAge))
        .with_predictor(Arc::new(DecayModel))
        .build()?;

    let deals = [
        ("fresh enterprise deal", DealRecord::new().with_days_in_stage(4.0).with_amount(120000.0)),
        ("stalled enterprise deal", DealRecord::new().with_days_in_stage(35.0).with_amount(120000.0)),
        ("stalled small deal", DealRecord::new().with_days_in_stage(35.0).with_amount(15000.0)),
        ("borderline deal", DealRecord::new().with_days_in_stage(15.0).with_amount(60000.0)),
    ];

    for (name, deal) in &deals {
        println!("\n=== {} ===", name);
        let report = agent.analyze_and_act(deal).await?;
        println!("{}", serde_json::to_string_pretty(&report)?);
    }

    let snapshot = agent.metrics().snapshot();
    println!("\nDecisions by action: {:?}", snapshot.counters);
    Ok(())
}
