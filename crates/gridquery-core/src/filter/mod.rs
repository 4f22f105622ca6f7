//! Filter surface: the static operator catalog and the condition
//! compiler that consumes it.

pub mod catalog;
pub mod compile;

pub use catalog::{
    operator_spec, operators_for, ConditionOperator, InputShape, OperatorSpec, ValueKind,
    ValuePattern,
};
pub use compile::{
    compile, escape_for_like, filter_expression, ConditionExpression, ConditionValue,
    FilterExpression, FilterSpec, LogicalOperator,
};
