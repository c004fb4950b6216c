//! Constant imputation followed by one-hot encoding

use dealsense_core::TransformError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Category used for missing values
pub const MISSING_CATEGORY: &str = "missing";

/// Fitted categories for one categorical column, in sorted order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalColumn {
    name: String,
    categories: Vec<String>,
}

impl CategoricalColumn {
    /// Collect the sorted set of categories seen at fit time
    pub fn fit(name: &str, values: &[Option<&str>]) -> Self {
        let categories: BTreeSet<&str> = values
            .iter()
            .map(|v| v.unwrap_or(MISSING_CATEGORY))
            .collect();

        Self {
            name: name.to_string(),
            categories: categories.into_iter().map(str::to_string).collect(),
        }
    }

    /// Append the one-hot block for a value; unknown categories are all zeros
    pub fn encode_into(&self, value: Option<&str>, out: &mut Vec<f64>) {
        let value = value.unwrap_or(MISSING_CATEGORY);
        let hit = self
            .categories
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok();

        out.extend((0..self.categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
    }

    /// Categories must be strictly ascending for `encode_into` lookups
    pub(crate) fn check(&self) -> Result<(), TransformError> {
        if self.categories.windows(2).all(|pair| pair[0] < pair[1]) {
            Ok(())
        } else {
            Err(TransformError::Serialization(format!(
                "column '{}' categories are not sorted and unique",
                self.name
            )))
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn width(&self) -> usize {
        self.categories.len()
    }

    /// `column=category` names for the block
    pub fn feature_names(&self) -> Vec<String> {
        self.categories
            .iter()
            .map(|c| format!("{}={}", self.name, c))
            .collect()
    }
}
