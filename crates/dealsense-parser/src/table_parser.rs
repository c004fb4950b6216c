//! Decision table parser
//!
//! Parses YAML decision table definitions into DecisionTable AST nodes.

use crate::condition_parser::ConditionParser;
use crate::error::{ParseError, Result};
use crate::yaml_parser::YamlParser;
use dealsense_core::ast::{Condition, DecisionRow, DecisionTable};
use dealsense_core::ActionType;
use serde_yaml::Value as YamlValue;

/// Decision table parser
pub struct TableParser;

impl TableParser {
    /// Parse and validate a decision table from YAML string
    pub fn parse(yaml_str: &str) -> Result<DecisionTable> {
        let yaml = YamlParser::parse(yaml_str)?;
        let table = Self::parse_from_yaml(&yaml)?;
        table.validate()?;
        Ok(table)
    }

    /// Parse a decision table from YAML value without validating it
    pub fn parse_from_yaml(yaml: &YamlValue) -> Result<DecisionTable> {
        let table_obj = YamlParser::get_mapping(yaml, "decision_table")?;

        let id = YamlParser::get_string(table_obj, "id")?;
        let description = YamlParser::get_optional_string(table_obj, "description");

        let rows = YamlParser::get_sequence(table_obj, "rules")?
            .iter()
            .map(Self::parse_row)
            .collect::<Result<Vec<_>>>()?;

        Ok(DecisionTable {
            id,
            description,
            rows,
        })
    }

    /// Parse a single row
    fn parse_row(yaml: &YamlValue) -> Result<DecisionRow> {
        let id = YamlParser::get_string(yaml, "id")?;
        let default = YamlParser::get_optional_bool(yaml, "default").unwrap_or(false);

        let conditions = match yaml.get("when") {
            Some(when) => Self::parse_when(when)?,
            None => Vec::new(),
        };

        if default && !conditions.is_empty() {
            return Err(ParseError::InvalidValue {
                field: "when".to_string(),
                message: format!("default row '{}' cannot have conditions", id),
            });
        }

        let action = Self::parse_action(yaml)?;
        let justification = YamlParser::get_optional_string(yaml, "justification")
            .unwrap_or_default();

        Ok(DecisionRow {
            id,
            conditions,
            default,
            action,
            justification,
        })
    }

    /// Parse a `when` clause: one condition string or a list that must all hold
    fn parse_when(when: &YamlValue) -> Result<Vec<Condition>> {
        if let Some(expr) = when.as_str() {
            return Ok(vec![ConditionParser::parse(expr)?]);
        }

        if let Some(items) = when.as_sequence() {
            return items
                .iter()
                .map(|item| {
                    item.as_str()
                        .ok_or_else(|| ParseError::InvalidValue {
                            field: "when".to_string(),
                            message: "condition list items must be strings".to_string(),
                        })
                        .and_then(ConditionParser::parse)
                })
                .collect();
        }

        Err(ParseError::InvalidValue {
            field: "when".to_string(),
            message: "expected a condition string or a list of condition strings".to_string(),
        })
    }

    /// Parse an action
    fn parse_action(yaml: &YamlValue) -> Result<ActionType> {
        let action_str = YamlParser::get_string(yaml, "action")?;

        ActionType::from_key(&action_str).ok_or_else(|| ParseError::InvalidValue {
            field: "action".to_string(),
            message: format!("Unknown action type: {}", action_str),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dealsense_core::ast::{Operand, Operator};

    const DEAL_HEALTH_YAML: &str = r#"
decision_table:
  id: deal_health
  description: Next-best action for at-risk deals
  rules:
    - id: deal_healthy
      when: probability >= threshold
      action: none
      justification: Deal health is optimal. No autonomous intervention required.
    - id: high_value_at_risk
      when: deal_amount > high_value_cutoff
      action: autonomous_discount_trigger
      justification: "Probability ({probability}) below threshold for high-value deal. Triggering 5% save-discount."
    - id: at_risk_escalation
      default: true
      action: manager_alert_task
      justification: Low probability detected. Escalating to Sales Manager for review.
"#;

    #[test]
    fn test_parse_matches_builtin_table() {
        let table = TableParser::parse(DEAL_HEALTH_YAML).unwrap();
        assert_eq!(table, DecisionTable::deal_health());
    }

    #[test]
    fn test_parse_condition_list() {
        let yaml = r#"
decision_table:
  id: tiers
  rules:
    - id: mid_value_watch
      when:
        - probability < threshold
        - deal_amount >= 10000
        - deal_amount <= high_value_cutoff
      action: manager_alert_task
    - id: rest
      default: true
      action: none
"#;

        let table = TableParser::parse(yaml).unwrap();
        assert_eq!(table.rows.len(), 2);

        let conditions = &table.rows[0].conditions;
        assert_eq!(conditions.len(), 3);
        assert_eq!(conditions[1].right, Operand::Literal(10000.0));
        assert_eq!(conditions[2].operator, Operator::Le);
        assert_eq!(table.rows[1].justification, "");
    }

    #[test]
    fn test_unknown_action() {
        let yaml = r#"
decision_table:
  id: bad
  rules:
    - id: rest
      default: true
      action: approve
"#;

        let err = TableParser::parse(yaml).unwrap_err();
        assert!(err.to_string().contains("Unknown action type: approve"));
    }

    #[test]
    fn test_missing_table_key() {
        let err = TableParser::parse("ruleset:\n  id: x\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field } if field == "decision_table"));
    }

    #[test]
    fn test_missing_rules() {
        let err = TableParser::parse("decision_table:\n  id: x\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingField { field } if field == "rules"));
    }

    #[test]
    fn test_default_row_with_condition_rejected() {
        let yaml = r#"
decision_table:
  id: bad
  rules:
    - id: rest
      default: true
      when: probability < 0.5
      action: none
"#;

        assert!(matches!(
            TableParser::parse(yaml),
            Err(ParseError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_table_without_default_fails_validation() {
        let yaml = r#"
decision_table:
  id: partial
  rules:
    - id: healthy
      when: probability >= threshold
      action: none
"#;

        assert!(matches!(
            TableParser::parse(yaml),
            Err(ParseError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_bad_condition_reported() {
        let yaml = r#"
decision_table:
  id: bad
  rules:
    - id: odd
      when: probability ~ threshold
      action: none
    - id: rest
      default: true
      action: none
"#;

        assert!(matches!(
            TableParser::parse(yaml),
            Err(ParseError::InvalidCondition { .. })
        ));
    }
}
