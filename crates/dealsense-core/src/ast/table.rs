//! Decision table AST definitions
//!
//! A decision table is an ordered list of rows. Rows are evaluated top to
//! bottom and the first row whose conditions all hold decides the action.
//! The last row must be the single default (catch-all) row.

use super::operator::Operator;
use crate::error::{CoreError, Result};
use crate::types::ActionType;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// A value a condition can refer to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    /// Model win probability
    Probability,
    /// Deal amount from the record
    DealAmount,
    /// Configured probability threshold
    Threshold,
    /// Configured high-value cutoff
    HighValueCutoff,
    /// Numeric literal
    Literal(f64),
}

impl Operand {
    /// Resolve a name used in condition strings
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "probability" | "win_probability" => Some(Operand::Probability),
            "deal_amount" | "opportunity_amount_usd" => Some(Operand::DealAmount),
            "threshold" => Some(Operand::Threshold),
            "high_value_cutoff" => Some(Operand::HighValueCutoff),
            _ => None,
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Probability => f.write_str("probability"),
            Operand::DealAmount => f.write_str("deal_amount"),
            Operand::Threshold => f.write_str("threshold"),
            Operand::HighValueCutoff => f.write_str("high_value_cutoff"),
            Operand::Literal(v) => write!(f, "{}", v),
        }
    }
}

/// A single comparison, e.g. `probability >= threshold`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub left: Operand,
    pub operator: Operator,
    pub right: Operand,
}

impl Condition {
    pub fn new(left: Operand, operator: Operator, right: Operand) -> Self {
        Self {
            left,
            operator,
            right,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.operator, self.right)
    }
}

/// One row of a decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionRow {
    /// Unique row ID
    pub id: String,

    /// Conditions that must all hold (empty for the default row)
    pub conditions: Vec<Condition>,

    /// Whether this is the catch-all row
    #[serde(default)]
    pub default: bool,

    /// Action recommended when the row fires
    pub action: ActionType,

    /// Justification template
    pub justification: String,
}

impl DecisionRow {
    /// Create a conditional row
    pub fn new(id: impl Into<String>, conditions: Vec<Condition>, action: ActionType) -> Self {
        Self {
            id: id.into(),
            conditions,
            default: false,
            action,
            justification: String::new(),
        }
    }

    /// Create the catch-all row
    pub fn fallback(id: impl Into<String>, action: ActionType) -> Self {
        Self {
            id: id.into(),
            conditions: Vec::new(),
            default: true,
            action,
            justification: String::new(),
        }
    }

    /// Set the justification template
    pub fn with_justification(mut self, justification: impl Into<String>) -> Self {
        self.justification = justification.into();
        self
    }
}

/// Ordered decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTable {
    /// Unique identifier for this table
    pub id: String,

    /// Optional description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Rows in evaluation order
    pub rows: Vec<DecisionRow>,
}

impl DecisionTable {
    /// Create an empty table
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            description: None,
            rows: Vec::new(),
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a row
    pub fn add_row(mut self, row: DecisionRow) -> Self {
        self.rows.push(row);
        self
    }

    /// The built-in deal health table
    ///
    /// Healthy when the probability reaches the threshold (inclusive), a
    /// save-discount for at-risk deals above the high-value cutoff, and
    /// manager escalation for everything else.
    pub fn deal_health() -> Self {
        DecisionTable::new("deal_health")
            .with_description("Next-best action for at-risk deals")
            .add_row(
                DecisionRow::new(
                    "deal_healthy",
                    vec![Condition::new(
                        Operand::Probability,
                        Operator::Ge,
                        Operand::Threshold,
                    )],
                    ActionType::None,
                )
                .with_justification(
                    "Deal health is optimal. No autonomous intervention required.",
                ),
            )
            .add_row(
                DecisionRow::new(
                    "high_value_at_risk",
                    vec![Condition::new(
                        Operand::DealAmount,
                        Operator::Gt,
                        Operand::HighValueCutoff,
                    )],
                    ActionType::AutonomousDiscountTrigger,
                )
                .with_justification(
                    "Probability ({probability}) below threshold for high-value deal. Triggering 5% save-discount.",
                ),
            )
            .add_row(
                DecisionRow::fallback("at_risk_escalation", ActionType::ManagerAlertTask)
                    .with_justification(
                        "Low probability detected. Escalating to Sales Manager for review.",
                    ),
            )
    }

    /// Check the table is total and unambiguous
    ///
    /// Requires at least one row, unique non-empty row ids, exactly one
    /// default row placed last, and conditions on every non-default row.
    pub fn validate(&self) -> Result<()> {
        if self.rows.is_empty() {
            return Err(CoreError::InvalidTable(format!(
                "table '{}' has no rows",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for row in &self.rows {
            if row.id.trim().is_empty() {
                return Err(CoreError::InvalidTable(format!(
                    "table '{}' has a row without an id",
                    self.id
                )));
            }
            if !seen.insert(row.id.as_str()) {
                return Err(CoreError::InvalidTable(format!(
                    "duplicate row id '{}'",
                    row.id
                )));
            }
            if !row.default && row.conditions.is_empty() {
                return Err(CoreError::InvalidTable(format!(
                    "row '{}' has no conditions and is not the default row",
                    row.id
                )));
            }
            for condition in &row.conditions {
                for operand in [condition.left, condition.right] {
                    if let Operand::Literal(v) = operand {
                        if !v.is_finite() {
                            return Err(CoreError::InvalidTable(format!(
                                "row '{}' compares against a non-finite literal",
                                row.id
                            )));
                        }
                    }
                }
            }
        }

        let defaults = self.rows.iter().filter(|r| r.default).count();
        if defaults != 1 {
            return Err(CoreError::InvalidTable(format!(
                "table '{}' must have exactly one default row, found {}",
                self.id, defaults
            )));
        }
        if !self.rows.last().is_some_and(|r| r.default) {
            return Err(CoreError::InvalidTable(format!(
                "default row of table '{}' must be last",
                self.id
            )));
        }

        Ok(())
    }
}

impl Default for DecisionTable {
    fn default() -> Self {
        Self::deal_health()
    }
}
