//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use dealsense_core::{
    DealRecord, DecisionRecord, FeatureTransform, FeatureVector, ModelError, TransformError,
    WinPredictor,
};
use dealsense_sdk::{ActionExecutor, DealAgent, DealAgentBuilder};
use std::sync::{Arc, Mutex};

/// Predictor returning a fixed probability regardless of input
pub struct FixedPredictor(pub f64);

impl WinPredictor for FixedPredictor {
    fn predict(&self, _features: &FeatureVector) -> Result<f64, ModelError> {
        Ok(self.0)
    }
}

/// Predictor that always fails
pub struct BrokenPredictor;

impl WinPredictor for BrokenPredictor {
    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        Err(ModelError::DimensionMismatch {
            expected: 99,
            actual: features.len(),
        })
    }
}

/// Transform encoding just the deal amount in thousands
pub struct AmountTransform;

impl FeatureTransform for AmountTransform {
    fn transform(&self, record: &DealRecord) -> Result<FeatureVector, TransformError> {
        let amount = record.opportunity_amount_usd.unwrap_or(0.0);
        if !amount.is_finite() {
            return Err(TransformError::NonFinite {
                column: "opportunity_amount_usd".to_string(),
                value: amount,
            });
        }
        Ok(FeatureVector::new(vec![amount / 1000.0]))
    }

    fn output_width(&self) -> usize {
        1
    }
}

/// Executor collecting every delivered decision
#[derive(Default)]
pub struct RecordingExecutor {
    pub delivered: Mutex<Vec<DecisionRecord>>,
}

#[async_trait]
impl ActionExecutor for RecordingExecutor {
    async fn deliver(&self, decision: &DecisionRecord) -> dealsense_runtime::Result<String> {
        self.delivered.lock().unwrap().push(decision.clone());
        Ok("recorded".to_string())
    }

    fn name(&self) -> &str {
        "recording"
    }
}

/// Executor whose downstream system is unavailable
pub struct UnavailableExecutor;

#[async_trait]
impl ActionExecutor for UnavailableExecutor {
    async fn deliver(&self, _decision: &DecisionRecord) -> dealsense_runtime::Result<String> {
        Err(dealsense_runtime::RuntimeError::Delivery(
            "CRM API unreachable".to_string(),
        ))
    }

    fn name(&self) -> &str {
        "unavailable"
    }
}

/// Agent with a fixed probability and the amount transform
pub fn agent_with_probability(p: f64) -> DealAgent {
    DealAgentBuilder::new()
        .with_transform(Arc::new(AmountTransform))
        .with_predictor(Arc::new(FixedPredictor(p)))
        .build()
        .unwrap()
}

pub fn deal(amount: f64) -> DealRecord {
    DealRecord::new()
        .with_amount(amount)
        .with_days_in_stage(12.0)
        .with_days_to_close(30.0)
        .with_subgroup("Exterior Accessories")
        .with_region("Northwest")
        .with_route("Fields Sales")
}
