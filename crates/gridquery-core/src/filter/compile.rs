//! Condition compilation: user filter specifications into normalized
//! condition expressions.
//!
//! Pure and infallible on well-typed input. All legality questions are
//! answered by the catalog; this pass only applies the three rewrites
//! (display-alias attribute, multi-value In/NotIn promotion, match
//! patterns).

use crate::{
    filter::catalog::{ConditionOperator, OperatorSpec, ValuePattern},
    model::ColumnDescriptor,
};
use serde::Serialize;

///
/// FilterSpec
///
/// One user-entered filter line: the column, the chosen catalog row, and
/// the raw values as entered (ordered).
///

#[derive(Clone, Debug)]
pub struct FilterSpec {
    pub column: ColumnDescriptor,
    pub operator: &'static OperatorSpec,
    pub values: Vec<String>,
}

///
/// ConditionValue
///
/// A single scalar when exactly one value is present, otherwise the full
/// ordered sequence (empty included).
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConditionValue {
    Single(String),
    Many(Vec<String>),
}

///
/// ConditionExpression
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConditionExpression {
    pub entity_alias: Option<String>,
    pub attribute: String,
    pub operator: ConditionOperator,
    pub value: ConditionValue,
}

///
/// LogicalOperator
///
/// Serializes as its wire code, like [`ConditionOperator`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum LogicalOperator {
    And = 0,
    Or = 1,
}

impl Serialize for LogicalOperator {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

///
/// FilterExpression
///
/// The compiled filter lines bundled under one conjunction, as handed to
/// the host grid's query assembly.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FilterExpression {
    pub operator: LogicalOperator,
    pub conditions: Vec<ConditionExpression>,
}

/// Compile filter specifications into condition expressions.
#[must_use]
pub fn compile(specs: &[FilterSpec]) -> Vec<ConditionExpression> {
    specs.iter().map(condition).collect()
}

/// Compile and bundle under a conjunction.
#[must_use]
pub fn filter_expression(specs: &[FilterSpec]) -> FilterExpression {
    FilterExpression {
        operator: LogicalOperator::And,
        conditions: compile(specs),
    }
}

fn condition(spec: &FilterSpec) -> ConditionExpression {
    let attribute = attribute_name(&spec.column, spec.operator);
    let operator = operator_code(&spec.column, spec.operator, spec.values.len());
    let mut values = transformed_values(&spec.values, spec.operator.pattern);

    let value = if values.len() == 1 {
        ConditionValue::Single(values.remove(0))
    } else {
        ConditionValue::Many(values)
    };

    ConditionExpression {
        entity_alias: spec.column.entity_alias.clone(),
        attribute,
        operator,
        value,
    }
}

// Enumerable kinds query the display-name shadow attribute for every
// operator except exact equality and the null checks, which work on the
// raw code.
fn attribute_name(column: &ColumnDescriptor, operator: &OperatorSpec) -> String {
    if !column.kind.is_enumerable() {
        return column.logical_name.clone();
    }

    match operator.operator {
        ConditionOperator::Equal
        | ConditionOperator::NotEqual
        | ConditionOperator::Null
        | ConditionOperator::NotNull => column.logical_name.clone(),
        _ => format!("{}name", column.logical_name),
    }
}

// Multi-value equality on enumerable kinds is only legal as a set
// membership test; promote Equal/NotEqual to In/NotIn. No other rewrite
// exists.
fn operator_code(
    column: &ColumnDescriptor,
    operator: &OperatorSpec,
    value_count: usize,
) -> ConditionOperator {
    if column.kind.is_enumerable() && value_count > 1 {
        match operator.operator {
            ConditionOperator::Equal => return ConditionOperator::In,
            ConditionOperator::NotEqual => return ConditionOperator::NotIn,
            _ => {}
        }
    }

    operator.operator
}

fn transformed_values(values: &[String], pattern: Option<ValuePattern>) -> Vec<String> {
    let Some(pattern) = pattern else {
        return values.to_vec();
    };

    values
        .iter()
        .map(|value| {
            let escaped = escape_for_like(value);
            match pattern {
                ValuePattern::Prefix => format!("{escaped}%"),
                ValuePattern::Substring => format!("%{escaped}%"),
                ValuePattern::Suffix => format!("%{escaped}"),
            }
        })
        .collect()
}

/// Escape the three wildcard-significant characters of a LIKE pattern in
/// a single pass, so brackets inserted by one rule are never re-escaped
/// by another.
#[must_use]
pub fn escape_for_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '%' => escaped.push_str("[%]"),
            '_' => escaped.push_str("[_]"),
            '[' => escaped.push_str("[[]"),
            _ => escaped.push(ch),
        }
    }

    escaped
}
