//! YAML field access
//!
//! Thin accessors over `serde_yaml::Value` that turn absent or mistyped
//! fields of a decision table document into [`ParseError`]s.

use crate::error::{ParseError, Result};
use serde_yaml::Value as YamlValue;

/// Accessors used while walking a decision table document
pub struct YamlParser;

impl YamlParser {
    pub fn parse(yaml_str: &str) -> Result<YamlValue> {
        Ok(serde_yaml::from_str(yaml_str)?)
    }

    /// Required mapping section, e.g. the top-level `decision_table`
    pub fn get_mapping<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a YamlValue> {
        match obj.get(field) {
            Some(value) if value.is_mapping() => Ok(value),
            Some(_) => Err(Self::mistyped(field, "a mapping")),
            None => Err(Self::missing(field)),
        }
    }

    /// Required string field such as a row `id` or `action`
    pub fn get_string(obj: &YamlValue, field: &str) -> Result<String> {
        match obj.get(field) {
            Some(YamlValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(Self::mistyped(field, "a string")),
            None => Err(Self::missing(field)),
        }
    }

    pub fn get_optional_string(obj: &YamlValue, field: &str) -> Option<String> {
        obj.get(field).and_then(|v| v.as_str()).map(str::to_string)
    }

    pub fn get_optional_bool(obj: &YamlValue, field: &str) -> Option<bool> {
        obj.get(field).and_then(|v| v.as_bool())
    }

    /// Required list field, e.g. the table's `rules`
    pub fn get_sequence<'a>(obj: &'a YamlValue, field: &str) -> Result<&'a Vec<YamlValue>> {
        match obj.get(field) {
            Some(YamlValue::Sequence(items)) => Ok(items),
            Some(_) => Err(Self::mistyped(field, "a list")),
            None => Err(Self::missing(field)),
        }
    }

    fn missing(field: &str) -> ParseError {
        ParseError::MissingField {
            field: field.to_string(),
        }
    }

    fn mistyped(field: &str, expected: &str) -> ParseError {
        ParseError::InvalidValue {
            field: field.to_string(),
            message: format!("expected {}", expected),
        }
    }
}
