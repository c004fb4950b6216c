//! Column transform
//!
//! Numeric columns are median-imputed then standard-scaled; categorical
//! columns are imputed with a constant `"missing"` category then one-hot
//! encoded. Fitting learns the statistics and category sets from training
//! records; the fitted transform is then applied to any record.

mod categorical;
mod numeric;

pub use categorical::{CategoricalColumn, MISSING_CATEGORY};
pub use numeric::NumericColumn;

use dealsense_core::{DealRecord, FeatureTransform, FeatureVector, TransformError};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Numeric column names, in `DealRecord::numeric_values` order
pub const NUMERIC_COLUMNS: [&str; 4] = [
    "elapsed_days_in_sales_stage",
    "opportunity_amount_usd",
    "total_days_identified_through_closing",
    "ratio_to_benchmark",
];

/// Categorical column names, in `DealRecord::categorical_values` order
pub const CATEGORICAL_COLUMNS: [&str; 3] = ["supplies_subgroup", "region", "route_to_market"];

/// Fits a `FittedTransform` from training records
pub struct ColumnTransformer;

impl ColumnTransformer {
    /// Learn imputation, scaling and category statistics
    pub fn fit(records: &[DealRecord]) -> Result<FittedTransform, TransformError> {
        if records.is_empty() {
            return Err(TransformError::EmptyDataset);
        }

        let numeric = NUMERIC_COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<Option<f64>> =
                    records.iter().map(|r| r.numeric_values()[idx]).collect();
                NumericColumn::fit(name, &values)
            })
            .collect::<Result<Vec<_>, _>>()?;

        let categorical = CATEGORICAL_COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, name)| {
                let values: Vec<Option<&str>> =
                    records.iter().map(|r| r.categorical_values()[idx]).collect();
                CategoricalColumn::fit(name, &values)
            })
            .collect();

        let fitted = FittedTransform {
            numeric,
            categorical,
        };

        tracing::debug!(
            "Fitted column transform on {} records: {} output features",
            records.len(),
            fitted.width()
        );

        Ok(fitted)
    }
}

/// A fitted column transform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FittedTransform {
    numeric: Vec<NumericColumn>,
    categorical: Vec<CategoricalColumn>,
}

impl FittedTransform {
    /// Number of output features
    pub fn width(&self) -> usize {
        self.numeric.len()
            + self
                .categorical
                .iter()
                .map(CategoricalColumn::width)
                .sum::<usize>()
    }

    /// Output feature names, e.g. `ratio_to_benchmark` or `region=Pacific`
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.numeric.iter().map(|c| c.name().to_string()).collect();
        for column in &self.categorical {
            names.extend(column.feature_names());
        }
        names
    }

    pub fn numeric_columns(&self) -> &[NumericColumn] {
        &self.numeric
    }

    pub fn categorical_columns(&self) -> &[CategoricalColumn] {
        &self.categorical
    }

    /// Encode a batch of records
    pub fn transform_many(&self, records: &[DealRecord]) -> Result<Vec<FeatureVector>, TransformError> {
        records.iter().map(|r| self.transform(r)).collect()
    }

    /// Write the fitted transform as JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), TransformError> {
        let file = File::create(path.as_ref())
            .map_err(|e| TransformError::Serialization(e.to_string()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)
            .map_err(|e| TransformError::Serialization(e.to_string()))
    }

    /// Read a fitted transform written by `save`
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TransformError> {
        let file = File::open(path.as_ref())
            .map_err(|e| TransformError::Serialization(e.to_string()))?;
        let fitted: Self = serde_json::from_reader(BufReader::new(file))
            .map_err(|e| TransformError::Serialization(e.to_string()))?;
        fitted.check()?;
        Ok(fitted)
    }

    fn check(&self) -> Result<(), TransformError> {
        if self.numeric.len() != NUMERIC_COLUMNS.len()
            || self.categorical.len() != CATEGORICAL_COLUMNS.len()
        {
            return Err(TransformError::Serialization(format!(
                "expected {} numeric and {} categorical columns, found {} and {}",
                NUMERIC_COLUMNS.len(),
                CATEGORICAL_COLUMNS.len(),
                self.numeric.len(),
                self.categorical.len()
            )));
        }
        for column in &self.numeric {
            column.check()?;
        }
        for column in &self.categorical {
            column.check()?;
        }
        Ok(())
    }
}

impl FeatureTransform for FittedTransform {
    fn transform(&self, record: &DealRecord) -> Result<FeatureVector, TransformError> {
        let mut values = Vec::with_capacity(self.width());

        for (column, value) in self.numeric.iter().zip(record.numeric_values()) {
            values.push(column.encode(value)?);
        }
        for (column, value) in self.categorical.iter().zip(record.categorical_values()) {
            column.encode_into(value, &mut values);
        }

        Ok(FeatureVector::new(values))
    }

    fn output_width(&self) -> usize {
        self.width()
    }
}
