//! Median imputation followed by standard scaling

use dealsense_core::TransformError;
use serde::{Deserialize, Serialize};

/// Fitted statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericColumn {
    name: String,
    median: f64,
    mean: f64,
    scale: f64,
}

impl NumericColumn {
    /// Fit on the column's raw values
    ///
    /// Mean and scale are computed after imputation, matching a
    /// impute-then-scale pipeline. A constant column scales by 1.
    pub fn fit(name: &str, values: &[Option<f64>]) -> Result<Self, TransformError> {
        let mut observed = Vec::with_capacity(values.len());
        for value in values.iter().flatten() {
            if !value.is_finite() {
                return Err(TransformError::NonFinite {
                    column: name.to_string(),
                    value: *value,
                });
            }
            observed.push(*value);
        }

        if observed.is_empty() {
            return Err(TransformError::NoObservedValues {
                column: name.to_string(),
            });
        }

        let median = median(&mut observed);
        let imputed: Vec<f64> = values.iter().map(|v| v.unwrap_or(median)).collect();

        let n = imputed.len() as f64;
        let mean = imputed.iter().sum::<f64>() / n;
        let variance = imputed.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let scale = if std > f64::EPSILON { std } else { 1.0 };

        Ok(Self {
            name: name.to_string(),
            median,
            mean,
            scale,
        })
    }

    /// Impute and scale one value
    pub fn encode(&self, value: Option<f64>) -> Result<f64, TransformError> {
        let value = match value {
            Some(v) if !v.is_finite() => {
                return Err(TransformError::NonFinite {
                    column: self.name.clone(),
                    value: v,
                })
            }
            Some(v) => v,
            None => self.median,
        };
        Ok((value - self.mean) / self.scale)
    }

    /// Reject statistics that could not have come from `fit`
    pub(crate) fn check(&self) -> Result<(), TransformError> {
        if !(self.median.is_finite() && self.mean.is_finite()) {
            return Err(TransformError::Serialization(format!(
                "column '{}' has non-finite median or mean",
                self.name
            )));
        }
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(TransformError::Serialization(format!(
                "column '{}' has invalid scale {}",
                self.name, self.scale
            )));
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn median(&self) -> f64 {
        self.median
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }
}

/// Median of a non-empty slice; sorts in place
fn median(values: &mut [f64]) -> f64 {
    values.sort_by(|a, b| a.total_cmp(b));
    let mid = values.len() / 2;
    if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    }
}
