//! Encoded dataset shared by preparation and training

use super::feature::FeatureVector;
use serde::{Deserialize, Serialize};

/// Feature vectors with their binary targets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub features: Vec<FeatureVector>,
    pub targets: Vec<f64>,
}

impl Dataset {
    /// Create a dataset; features and targets are paired by index
    pub fn new(features: Vec<FeatureVector>, targets: Vec<f64>) -> Self {
        debug_assert_eq!(features.len(), targets.len());
        Self { features, targets }
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Width of the feature vectors, if any
    pub fn width(&self) -> Option<usize> {
        self.features.first().map(FeatureVector::len)
    }

    /// Share of positive targets
    pub fn positive_rate(&self) -> f64 {
        if self.targets.is_empty() {
            0.0
        } else {
            self.targets.iter().sum::<f64>() / self.targets.len() as f64
        }
    }
}
