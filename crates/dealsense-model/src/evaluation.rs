//! Loss and evaluation metrics

use crate::network::WinNetwork;
use crate::Result;
use dealsense_core::{Dataset, ModelError};
use serde::{Deserialize, Serialize};

/// Probability clip applied before taking logarithms
pub const EPSILON: f64 = 1e-7;

/// Binary cross-entropy for a single prediction
pub fn binary_cross_entropy(prediction: f64, target: f64) -> f64 {
    let p = prediction.clamp(EPSILON, 1.0 - EPSILON);
    -(target * p.ln() + (1.0 - target) * (1.0 - p).ln())
}

/// Held-out performance of a trained network
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub samples: usize,
    pub loss: f64,
    pub mae: f64,
    pub rmse: f64,
    /// Fraction classified correctly at a 0.5 cut
    pub accuracy: f64,
}

pub fn evaluate(network: &WinNetwork, dataset: &Dataset) -> Result<EvaluationReport> {
    if dataset.is_empty() {
        return Err(ModelError::EmptyDataset("evaluation set is empty".to_string()));
    }

    let predictions = network.predict_batch(&dataset.features)?;
    let n = predictions.len() as f64;
    let mut loss = 0.0;
    let mut abs_err = 0.0;
    let mut sq_err = 0.0;
    let mut correct = 0usize;

    for (p, y) in predictions.iter().zip(&dataset.targets) {
        loss += binary_cross_entropy(*p, *y);
        abs_err += (p - y).abs();
        sq_err += (p - y).powi(2);
        if (*p >= 0.5) == (*y >= 0.5) {
            correct += 1;
        }
    }

    Ok(EvaluationReport {
        samples: predictions.len(),
        loss: loss / n,
        mae: abs_err / n,
        rmse: (sq_err / n).sqrt(),
        accuracy: correct as f64 / n,
    })
}
