//! Offline training pipeline
//!
//! CSV export → labeled deals → 70/15/15 split → fitted transform →
//! trained network → held-out evaluation.

use crate::artifacts::{save_report, ModelArtifacts};
use crate::error::Result;
use dealsense_core::LabeledDeal;
use dealsense_model::{
    evaluate, EvaluationReport, NetworkConfig, Trainer, TrainingConfig, TrainingHistory,
    WinNetwork,
};
use dealsense_prep::{load_csv, prepare_split, SplitConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

/// Settings for one training run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub split: SplitConfig,
    pub training: TrainingConfig,
    /// Seed for weight initialisation
    pub init_seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            split: SplitConfig::default(),
            training: TrainingConfig::default(),
            init_seed: 42,
        }
    }
}

/// Everything a training run produces
#[derive(Debug, Clone)]
pub struct TrainingOutcome {
    pub artifacts: ModelArtifacts,
    pub history: TrainingHistory,
    pub report: EvaluationReport,
}

impl TrainingOutcome {
    /// Persist artifacts and the evaluation report into `dir`
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        self.artifacts.save(dir.as_ref())?;
        save_report(dir.as_ref(), &self.report)
    }
}

pub fn train_from_csv(path: impl AsRef<Path>, config: &PipelineConfig) -> Result<TrainingOutcome> {
    let deals = load_csv(path)?;
    train_from_deals(&deals, config)
}

pub fn train_from_deals(deals: &[LabeledDeal], config: &PipelineConfig) -> Result<TrainingOutcome> {
    let prepared = prepare_split(deals, &config.split)?;

    let network_config = NetworkConfig::new(prepared.transform.width()).with_seed(config.init_seed);
    let mut network = WinNetwork::new(&network_config)?;
    let history = Trainer::new(config.training.clone()).fit(
        &mut network,
        &prepared.train,
        &prepared.validation,
    )?;

    let report = evaluate(&network, &prepared.test)?;
    info!("--- Model Performance Report ---");
    info!("Mean Absolute Error (MAE): {:.4}", report.mae);
    info!("Root Mean Squared Error (RMSE): {:.4}", report.rmse);
    info!("Accuracy: {:.4}", report.accuracy);

    Ok(TrainingOutcome {
        artifacts: ModelArtifacts::new(prepared.transform, network),
        history,
        report,
    })
}
