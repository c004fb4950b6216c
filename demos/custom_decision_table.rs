//! Custom decision table
//!
//! Loads a stricter table from YAML and compares its decisions with the
//! built-in table for the same probabilities.
//!
//! ```text
//! cargo run --example custom_decision_table
//! ```

use dealsense_core::ast::DecisionTable;
use dealsense_core::DealRecord;
use dealsense_parser::TableParser;
use dealsense_runtime::{EngineConfig, ReasoningEngine};

const ENTERPRISE_TABLE: &str = r#"
decision_table:
  id: enterprise_watch
  description: Escalate every large deal below 80%, discount mid-size ones
  rules:
    - id: large_deal_watch
      when:
        - deal_amount >= 250000
        - probability < 0.8
      action: manager_alert_task
      justification: Large deal at {probability} needs a manager review.
    - id: healthy
      when: probability >= threshold
      action: none
      justification: Deal health is optimal at {probability}.
    - id: mid_size_save
      when: deal_amount > high_value_cutoff
      action: autonomous_discount_trigger
      justification: Saving {deal_amount} deal at {probability} with a 5% discount.
    - id: escalate
      default: true
      action: manager_alert_task
      justification: Low probability detected. Escalating to Sales Manager for review.
"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let custom = TableParser::parse(ENTERPRISE_TABLE)?;
    let builtin = ReasoningEngine::with_table(EngineConfig::default(), DecisionTable::deal_health())?;
    let enterprise = ReasoningEngine::with_table(EngineConfig::default(), custom)?;

    let cases = [(0.70, 300000.0), (0.45, 80000.0), (0.45, 20000.0), (0.90, 500000.0)];
    for (p, amount) in cases {
        let deal = DealRecord::new().with_amount(amount);
        let a = builtin.decide(p, &deal)?;
        let b = enterprise.decide(p, &deal)?;
        println!(
            "p={:.2} amount={:>9.0}  built-in: {:<28} enterprise: {:<28} {}",
            p,
            amount,
            a.action_type().as_str(),
            b.action_type().as_str(),
            b.justification()
        );
    }
    Ok(())
}
