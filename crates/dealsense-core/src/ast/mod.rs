//! Abstract Syntax Tree (AST) definitions for DealSense decision tables
//!
//! This module contains the AST node definitions for:
//! - Comparison operators
//! - Conditions and operands
//! - Decision rows and tables

pub mod operator;
pub mod table;

pub use operator::Operator;
pub use table::{Condition, DecisionRow, DecisionTable, Operand};
