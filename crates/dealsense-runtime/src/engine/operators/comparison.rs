//! Comparison evaluation

use crate::context::DecisionContext;
use crate::error::{Result, RuntimeError};
use dealsense_core::ast::{Condition, DecisionRow};

/// Evaluate one condition against the context
pub(crate) fn evaluate_condition(condition: &Condition, ctx: &DecisionContext) -> Result<bool> {
    let left = ctx.resolve(&condition.left);
    let right = ctx.resolve(&condition.right);

    if !left.is_finite() || !right.is_finite() {
        return Err(RuntimeError::InvalidOperation(format!(
            "Cannot compare {} and {} with {}",
            left, right, condition.operator
        )));
    }

    let result = condition.operator.compare(left, right);
    tracing::debug!(
        "Condition {} ({} {} {}) => {}",
        condition,
        left,
        condition.operator,
        right,
        result
    );
    Ok(result)
}

/// A row fires when it is the default row or all its conditions hold
pub(crate) fn row_matches(row: &DecisionRow, ctx: &DecisionContext) -> Result<bool> {
    if row.default {
        return Ok(true);
    }
    for condition in &row.conditions {
        if !evaluate_condition(condition, ctx)? {
            return Ok(false);
        }
    }
    Ok(true)
}
