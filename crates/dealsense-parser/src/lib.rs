//! DealSense Parser - YAML to AST parser for DealSense decision tables
//!
//! This crate converts YAML decision table definitions and condition
//! strings into `dealsense_core::ast` structures.

pub mod condition_parser;
pub mod error;
pub mod table_parser;
pub mod yaml_parser;

// Re-export main parser types
pub use condition_parser::ConditionParser;
pub use error::{ParseError, Result};
pub use table_parser::TableParser;
