//! Trained artifacts on disk
//!
//! An artifacts directory holds the fitted transform and the network
//! weights, both as JSON, plus the held-out evaluation report.

use crate::error::Result;
use dealsense_model::{EvaluationReport, WinNetwork};
use dealsense_prep::FittedTransform;
use std::path::Path;
use tracing::info;

pub const TRANSFORM_FILE: &str = "transform.json";
pub const MODEL_FILE: &str = "model.json";
pub const REPORT_FILE: &str = "report.json";

/// Fitted transform and trained network, used together at inference
#[derive(Debug, Clone)]
pub struct ModelArtifacts {
    pub transform: FittedTransform,
    pub network: WinNetwork,
}

impl ModelArtifacts {
    pub fn new(transform: FittedTransform, network: WinNetwork) -> Self {
        Self { transform, network }
    }

    /// Write transform and model into `dir`, creating it if needed
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        let dir = dir.as_ref();
        std::fs::create_dir_all(dir)?;
        self.transform.save(dir.join(TRANSFORM_FILE))?;
        self.network.save(dir.join(MODEL_FILE))?;
        info!("Saved model artifacts to {}", dir.display());
        Ok(())
    }

    pub fn load(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        let transform = FittedTransform::load(dir.join(TRANSFORM_FILE))?;
        let network = WinNetwork::load(dir.join(MODEL_FILE))?;
        info!(
            features = transform.width(),
            parameters = network.parameter_count(),
            "Loaded model artifacts from {}",
            dir.display()
        );
        Ok(Self { transform, network })
    }
}

pub fn save_report(dir: impl AsRef<Path>, report: &EvaluationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(dir.as_ref().join(REPORT_FILE), json)?;
    Ok(())
}

pub fn load_report(dir: impl AsRef<Path>) -> Result<EvaluationReport> {
    let json = std::fs::read_to_string(dir.as_ref().join(REPORT_FILE))?;
    Ok(serde_json::from_str(&json)?)
}
