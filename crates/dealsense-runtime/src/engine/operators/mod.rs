//! Operator evaluation for decision table conditions

mod comparison;

pub(crate) use comparison::row_matches;
