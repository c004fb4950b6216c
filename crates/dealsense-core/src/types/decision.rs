//! Decision and execution result types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Next-best action recommended for a deal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActionType {
    /// Deal is healthy, keep monitoring
    None,
    /// Apply a save-discount without human involvement
    AutonomousDiscountTrigger,
    /// Open a review task for the sales manager
    ManagerAlertTask,
}

impl ActionType {
    /// Returns true if this action implies an intervention
    pub fn requires_action(&self) -> bool {
        !matches!(self, ActionType::None)
    }

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::None => "NONE",
            ActionType::AutonomousDiscountTrigger => "AUTONOMOUS_DISCOUNT_TRIGGER",
            ActionType::ManagerAlertTask => "MANAGER_ALERT_TASK",
        }
    }

    /// Lower-case name used in decision tables and metric keys
    pub fn key(&self) -> &'static str {
        match self {
            ActionType::None => "none",
            ActionType::AutonomousDiscountTrigger => "autonomous_discount_trigger",
            ActionType::ManagerAlertTask => "manager_alert_task",
        }
    }

    /// Parse a decision table action name (case-insensitive)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "none" => Some(ActionType::None),
            "autonomous_discount_trigger" => Some(ActionType::AutonomousDiscountTrigger),
            "manager_alert_task" => Some(ActionType::ManagerAlertTask),
            _ => None,
        }
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of one reasoning step
///
/// Fields are read-only; `action_required` is derived from `action_type` at
/// construction so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionRecord {
    timestamp: DateTime<Utc>,
    probability: f64,
    action_required: bool,
    action_type: ActionType,
    justification: String,
    rule_id: String,
}

impl DecisionRecord {
    /// Create a decision record stamped with the current time
    pub fn new(
        probability: f64,
        action_type: ActionType,
        justification: impl Into<String>,
        rule_id: impl Into<String>,
    ) -> Self {
        Self {
            timestamp: Utc::now(),
            probability,
            action_required: action_type.requires_action(),
            action_type,
            justification: justification.into(),
            rule_id: rule_id.into(),
        }
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }

    pub fn action_required(&self) -> bool {
        self.action_required
    }

    pub fn action_type(&self) -> ActionType {
        self.action_type
    }

    pub fn justification(&self) -> &str {
        &self.justification
    }

    /// Id of the decision table row that produced this record
    pub fn rule_id(&self) -> &str {
        &self.rule_id
    }
}

/// How an execution attempt ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    /// Intervention emitted to the executor
    Executed,
    /// No intervention required, monitoring record emitted
    Monitoring,
    /// Executor failed; the decision itself still stands
    DeliveryFailed,
}

/// Result of executing a decision record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub status: ExecutionStatus,
    pub action_type: ActionType,
    pub detail: String,
    pub executed_at: DateTime<Utc>,
}

impl ExecutionOutcome {
    pub fn new(status: ExecutionStatus, action_type: ActionType, detail: impl Into<String>) -> Self {
        Self {
            status,
            action_type,
            detail: detail.into(),
            executed_at: Utc::now(),
        }
    }

    /// Returns true unless delivery to the executor failed
    pub fn is_delivered(&self) -> bool {
        !matches!(self.status, ExecutionStatus::DeliveryFailed)
    }
}
