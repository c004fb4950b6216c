//! Justification templates
//!
//! Placeholders: `{probability}` and `{threshold}` render as percentages with
//! two decimals, `{deal_amount}` and `{high_value_cutoff}` as plain numbers
//! with two decimals.

use crate::context::DecisionContext;
use crate::error::{Result, RuntimeError};

const PLACEHOLDERS: [&str; 4] = ["probability", "threshold", "deal_amount", "high_value_cutoff"];

/// Format a fraction as a percentage, e.g. `0.45` → `45.00%`
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Render a template against the decision context
pub fn render(template: &str, ctx: &DecisionContext) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                let name = &after[..end];
                match value_for(name, ctx) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(name);
                        out.push('}');
                    }
                }
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// Reject templates that use unknown placeholders
pub fn check_template(template: &str) -> Result<()> {
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            return Err(RuntimeError::InvalidTable(format!(
                "unclosed placeholder in justification '{}'",
                template
            )));
        };
        let name = &after[..end];
        if !PLACEHOLDERS.contains(&name) {
            return Err(RuntimeError::InvalidTable(format!(
                "unknown placeholder '{{{}}}' in justification '{}'",
                name, template
            )));
        }
        rest = &after[end + 1..];
    }
    Ok(())
}

fn value_for(name: &str, ctx: &DecisionContext) -> Option<String> {
    match name {
        "probability" => Some(format_percent(ctx.probability)),
        "threshold" => Some(format_percent(ctx.threshold)),
        "deal_amount" => Some(format!("{:.2}", ctx.deal_amount)),
        "high_value_cutoff" => Some(format!("{:.2}", ctx.high_value_cutoff)),
        _ => None,
    }
}
