//! Condition string parser
//!
//! Parses condition strings like:
//! - `probability >= threshold`
//! - `deal_amount > high_value_cutoff`
//! - `probability < 0.25`
//! - `deal_amount <= 100_000`

use crate::error::{ParseError, Result};
use dealsense_core::ast::{Condition, Operand, Operator};

/// Condition parser
pub struct ConditionParser;

impl ConditionParser {
    /// Parse a single condition string into a Condition
    pub fn parse(condition: &str) -> Result<Condition> {
        let condition = condition.trim();
        if condition.is_empty() {
            return Err(Self::error(condition, "empty condition"));
        }

        // Two-character operators first to avoid partial matches
        let operators = [
            ("!=", Operator::Ne),
            (">=", Operator::Ge),
            ("<=", Operator::Le),
            ("==", Operator::Eq),
            (">", Operator::Gt),
            ("<", Operator::Lt),
        ];

        for (op_str, op) in operators.iter() {
            if let Some(pos) = condition.find(op_str) {
                let left = condition[..pos].trim();
                let right = condition[pos + op_str.len()..].trim();

                let left = Self::parse_operand(condition, left)?;
                let right = Self::parse_operand(condition, right)?;

                if matches!(left, Operand::Literal(_)) && matches!(right, Operand::Literal(_)) {
                    return Err(Self::error(condition, "compares two literals"));
                }

                return Ok(Condition::new(left, *op, right));
            }
        }

        Err(Self::error(condition, "no comparison operator found"))
    }

    /// Parse an operand: a known name or a numeric literal
    fn parse_operand(condition: &str, token: &str) -> Result<Operand> {
        if token.is_empty() {
            return Err(Self::error(condition, "missing operand"));
        }

        if let Some(operand) = Operand::from_name(token) {
            return Ok(operand);
        }

        let numeric: String = token.chars().filter(|c| *c != '_').collect();
        match numeric.parse::<f64>() {
            Ok(v) if v.is_finite() => Ok(Operand::Literal(v)),
            _ => Err(Self::error(
                condition,
                &format!("unknown operand '{}'", token),
            )),
        }
    }

    fn error(condition: &str, message: &str) -> ParseError {
        ParseError::InvalidCondition {
            condition: condition.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named_operands() {
        let condition = ConditionParser::parse("probability >= threshold").unwrap();
        assert_eq!(condition.left, Operand::Probability);
        assert_eq!(condition.operator, Operator::Ge);
        assert_eq!(condition.right, Operand::Threshold);
    }

    #[test]
    fn test_parse_literal() {
        let condition = ConditionParser::parse("deal_amount > 100_000").unwrap();
        assert_eq!(condition.left, Operand::DealAmount);
        assert_eq!(condition.operator, Operator::Gt);
        assert_eq!(condition.right, Operand::Literal(100000.0));
    }

    #[test]
    fn test_parse_literal_on_left() {
        let condition = ConditionParser::parse("0.25 > probability").unwrap();
        assert_eq!(condition.left, Operand::Literal(0.25));
        assert_eq!(condition.right, Operand::Probability);
    }

    #[test]
    fn test_two_character_operators_win() {
        assert_eq!(ConditionParser::parse("probability <= 0.5").unwrap().operator, Operator::Le);
        assert_eq!(ConditionParser::parse("probability != 0.5").unwrap().operator, Operator::Ne);
        assert_eq!(ConditionParser::parse("probability == 0.5").unwrap().operator, Operator::Eq);
        assert_eq!(ConditionParser::parse("probability < 0.5").unwrap().operator, Operator::Lt);
    }

    #[test]
    fn test_unknown_operand() {
        let err = ConditionParser::parse("region == 5").unwrap_err();
        assert!(err.to_string().contains("unknown operand 'region'"));
    }

    #[test]
    fn test_missing_operator() {
        let err = ConditionParser::parse("probability threshold").unwrap_err();
        assert!(err.to_string().contains("no comparison operator"));
    }

    #[test]
    fn test_empty_condition() {
        assert!(ConditionParser::parse("   ").is_err());
        assert!(ConditionParser::parse("probability >=").is_err());
    }

    #[test]
    fn test_literal_only_rejected() {
        assert!(ConditionParser::parse("1 < 2").is_err());
    }
}
