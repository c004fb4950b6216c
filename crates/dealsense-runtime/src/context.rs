//! Decision context
//!
//! The resolved values a single decision is evaluated against.

use dealsense_core::ast::Operand;
use serde::Serialize;

/// Inputs for one evaluation of the decision table
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecisionContext {
    pub probability: f64,
    pub deal_amount: f64,
    pub threshold: f64,
    pub high_value_cutoff: f64,
}

impl DecisionContext {
    pub fn new(probability: f64, deal_amount: f64, threshold: f64, high_value_cutoff: f64) -> Self {
        Self {
            probability,
            deal_amount,
            threshold,
            high_value_cutoff,
        }
    }

    /// Look up the value an operand refers to
    pub fn resolve(&self, operand: &Operand) -> f64 {
        match operand {
            Operand::Probability => self.probability,
            Operand::DealAmount => self.deal_amount,
            Operand::Threshold => self.threshold,
            Operand::HighValueCutoff => self.high_value_cutoff,
            Operand::Literal(value) => *value,
        }
    }
}
