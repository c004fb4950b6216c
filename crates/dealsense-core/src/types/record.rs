//! Deal record types
//!
//! A `DealRecord` is one CRM opportunity. Every field is optional because raw
//! exports routinely leave cells blank; the fitted transform imputes them.

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Field name of the deal amount, as reported in validation errors
pub const DEAL_AMOUNT_FIELD: &str = "opportunity_amount_usd";

/// One sales opportunity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DealRecord {
    /// Days the deal has spent in its current sales stage
    #[serde(default)]
    pub elapsed_days_in_sales_stage: Option<f64>,

    /// Deal amount in USD
    #[serde(default)]
    pub opportunity_amount_usd: Option<f64>,

    /// Days from identification through closing
    #[serde(default)]
    pub total_days_identified_through_closing: Option<f64>,

    /// Ratio of the deal to its benchmark
    #[serde(default)]
    pub ratio_to_benchmark: Option<f64>,

    /// Product subgroup
    #[serde(default)]
    pub supplies_subgroup: Option<String>,

    /// Sales region
    #[serde(default)]
    pub region: Option<String>,

    /// Route to market
    #[serde(default)]
    pub route_to_market: Option<String>,
}

impl DealRecord {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set days in stage
    pub fn with_days_in_stage(mut self, days: f64) -> Self {
        self.elapsed_days_in_sales_stage = Some(days);
        self
    }

    /// Set the deal amount
    pub fn with_amount(mut self, amount: f64) -> Self {
        self.opportunity_amount_usd = Some(amount);
        self
    }

    /// Set days from identification to close
    pub fn with_days_to_close(mut self, days: f64) -> Self {
        self.total_days_identified_through_closing = Some(days);
        self
    }

    /// Set the benchmark ratio
    pub fn with_benchmark_ratio(mut self, ratio: f64) -> Self {
        self.ratio_to_benchmark = Some(ratio);
        self
    }

    /// Set the product subgroup
    pub fn with_subgroup(mut self, subgroup: impl Into<String>) -> Self {
        self.supplies_subgroup = Some(subgroup.into());
        self
    }

    /// Set the region
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the route to market
    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route_to_market = Some(route.into());
        self
    }

    /// Deal amount, required to be present and finite
    pub fn deal_amount(&self) -> Result<f64, ValidationError> {
        match self.opportunity_amount_usd {
            None => Err(ValidationError::MissingField {
                field: DEAL_AMOUNT_FIELD.to_string(),
            }),
            Some(value) if !value.is_finite() => Err(ValidationError::NonNumeric {
                field: DEAL_AMOUNT_FIELD.to_string(),
                value,
            }),
            Some(value) => Ok(value),
        }
    }

    /// Numeric columns in transform order
    pub fn numeric_values(&self) -> [Option<f64>; 4] {
        [
            self.elapsed_days_in_sales_stage,
            self.opportunity_amount_usd,
            self.total_days_identified_through_closing,
            self.ratio_to_benchmark,
        ]
    }

    /// Categorical columns in transform order
    pub fn categorical_values(&self) -> [Option<&str>; 3] {
        [
            self.supplies_subgroup.as_deref(),
            self.region.as_deref(),
            self.route_to_market.as_deref(),
        ]
    }
}

/// A deal record paired with its known outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledDeal {
    pub record: DealRecord,
    pub won: bool,
}

impl LabeledDeal {
    pub fn new(record: DealRecord, won: bool) -> Self {
        Self { record, won }
    }

    /// Binary training target
    pub fn target(&self) -> f64 {
        if self.won {
            1.0
        } else {
            0.0
        }
    }
}
