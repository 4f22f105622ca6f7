//! Static operator catalog: which filter operators exist per semantic
//! kind, their wire codes, required input shape, and value-rewrite
//! pattern. Pure data; every compiled condition's legality is defined by
//! these tables.

use crate::types::SemanticKind;
use serde::{Serialize, Serializer};

///
/// ConditionOperator
///
/// Published wire-code enumeration of the remote platform's condition
/// operators. Discriminants are the wire codes; they serialize as plain
/// integers.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u8)]
pub enum ConditionOperator {
    Equal = 0,
    NotEqual = 1,
    GreaterThan = 2,
    LessThan = 3,
    GreaterEqual = 4,
    LessEqual = 5,
    Like = 6,
    NotLike = 7,
    In = 8,
    NotIn = 9,
    Null = 12,
    NotNull = 13,
    Yesterday = 14,
    Today = 15,
    Tomorrow = 16,
    Last7Days = 17,
    Next7Days = 18,
    LastWeek = 19,
    ThisWeek = 20,
    NextWeek = 21,
    LastMonth = 22,
    ThisMonth = 23,
    NextMonth = 24,
    On = 25,
    OnOrBefore = 26,
    OnOrAfter = 27,
    LastYear = 28,
    ThisYear = 29,
    NextYear = 30,
    LastXHours = 31,
    NextXHours = 32,
    LastXDays = 33,
    NextXDays = 34,
    LastXWeeks = 35,
    NextXWeeks = 36,
    LastXMonths = 37,
    NextXMonths = 38,
    LastXYears = 39,
    NextXYears = 40,
    OlderThanXMonths = 53,
    BeginsWith = 54,
    DoesNotBeginWith = 55,
    EndsWith = 56,
    DoesNotEndWith = 57,
    ThisFiscalYear = 58,
    ThisFiscalPeriod = 59,
    NextFiscalYear = 60,
    NextFiscalPeriod = 61,
    LastFiscalYear = 62,
    LastFiscalPeriod = 63,
    LastXFiscalYears = 64,
    LastXFiscalPeriods = 65,
    NextXFiscalYears = 66,
    NextXFiscalPeriods = 67,
    InFiscalYear = 68,
    InFiscalPeriod = 69,
    InFiscalPeriodAndYear = 70,
    InOrBeforeFiscalPeriodAndYear = 71,
    InOrAfterFiscalPeriodAndYear = 72,
    OlderThanXYears = 82,
    OlderThanXWeeks = 83,
    OlderThanXDays = 84,
    OlderThanXHours = 85,
    OlderThanXMinutes = 86,
    ContainValues = 87,
    DoesNotContainValues = 88,
}

impl ConditionOperator {
    /// Wire code as published by the platform enumeration.
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl Serialize for ConditionOperator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

///
/// InputShape
///
/// Which editor the filter UI must render for an operator.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum InputShape {
    None,
    Text,
    Number,
    Date,
    Dropdown,
}

///
/// ValueKind
///
/// Wire type of the operator's operand.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueKind {
    None,
    Text,
    Number,
    Date,
    /// Raw enumerable code (picklist/boolean option value).
    Code,
}

///
/// ValuePattern
///
/// Match-pattern rewrite applied to each raw value before it is shipped.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValuePattern {
    /// `value%`
    Prefix,
    /// `%value%`
    Substring,
    /// `%value`
    Suffix,
}

///
/// OperatorSpec
///
/// One catalog row: display label, wire operator, operand shape, and the
/// optional value pattern.
///

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OperatorSpec {
    pub display_name: &'static str,
    pub operator: ConditionOperator,
    pub value_kind: ValueKind,
    pub input: InputShape,
    pub pattern: Option<ValuePattern>,
}

const fn row(
    display_name: &'static str,
    operator: ConditionOperator,
    value_kind: ValueKind,
    input: InputShape,
) -> OperatorSpec {
    OperatorSpec {
        display_name,
        operator,
        value_kind,
        input,
        pattern: None,
    }
}

const fn matching(
    display_name: &'static str,
    operator: ConditionOperator,
    pattern: ValuePattern,
) -> OperatorSpec {
    OperatorSpec {
        display_name,
        operator,
        value_kind: ValueKind::Text,
        input: InputShape::Text,
        pattern: Some(pattern),
    }
}

const fn bare(display_name: &'static str, operator: ConditionOperator) -> OperatorSpec {
    row(display_name, operator, ValueKind::None, InputShape::None)
}

use ConditionOperator as Op;
use InputShape as Input;
use ValuePattern as Pattern;

/// Operators for plain text columns.
pub static TEXT: &[OperatorSpec] = &[
    row("Equals", Op::Equal, ValueKind::Text, Input::Text),
    row("Does not equal", Op::NotEqual, ValueKind::Text, Input::Text),
    matching("Contains", Op::Like, Pattern::Substring),
    matching("Does not contain", Op::NotLike, Pattern::Substring),
    matching("Begins with", Op::BeginsWith, Pattern::Prefix),
    matching("Does not begin with", Op::DoesNotBeginWith, Pattern::Prefix),
    matching("Ends with", Op::EndsWith, Pattern::Suffix),
    matching("Does not end with", Op::DoesNotEndWith, Pattern::Suffix),
    bare("Contains data", Op::NotNull),
    bare("Does not contain data", Op::Null),
];

/// Fallback operators for text-like columns (guids, files, unknowns).
pub static TEXTLIKE: &[OperatorSpec] = &[
    row("Equals", Op::Equal, ValueKind::Text, Input::Text),
    row("Does not equal", Op::NotEqual, ValueKind::Text, Input::Text),
    bare("Contains data", Op::NotNull),
    bare("Does not contain data", Op::Null),
    matching("Contains", Op::Like, Pattern::Substring),
    matching("Does not contain", Op::NotLike, Pattern::Substring),
    matching("Begins with", Op::BeginsWith, Pattern::Prefix),
    matching("Does not begin with", Op::DoesNotBeginWith, Pattern::Prefix),
    matching("Ends with", Op::EndsWith, Pattern::Suffix),
    matching("Does not end with", Op::DoesNotEndWith, Pattern::Suffix),
];

/// Operators for lookup columns; equality edits pick from records, the
/// matching family runs over the display-name shadow attribute.
pub static LOOKUP: &[OperatorSpec] = &[
    row("Equals", Op::Equal, ValueKind::Text, Input::Dropdown),
    row("Does not equal", Op::NotEqual, ValueKind::Text, Input::Dropdown),
    bare("Contains data", Op::NotNull),
    bare("Does not contain data", Op::Null),
    matching("Contains", Op::Like, Pattern::Substring),
    matching("Does not contain", Op::NotLike, Pattern::Substring),
    matching("Begins with", Op::BeginsWith, Pattern::Prefix),
    matching("Does not begin with", Op::DoesNotBeginWith, Pattern::Prefix),
    matching("Ends with", Op::EndsWith, Pattern::Suffix),
    matching("Does not end with", Op::DoesNotEndWith, Pattern::Suffix),
];

/// Operators for single-select option sets and two-option columns.
pub static OPTIONSET: &[OperatorSpec] = &[
    row("Equals", Op::Equal, ValueKind::Code, Input::Dropdown),
    row("Does not equal", Op::NotEqual, ValueKind::Code, Input::Dropdown),
    bare("Contains data", Op::NotNull),
    bare("Does not contain data", Op::Null),
    matching("Contains", Op::Like, Pattern::Substring),
    matching("Does not contain", Op::NotLike, Pattern::Substring),
    matching("Begins with", Op::BeginsWith, Pattern::Prefix),
    matching("Does not begin with", Op::DoesNotBeginWith, Pattern::Prefix),
    matching("Ends with", Op::EndsWith, Pattern::Suffix),
    matching("Does not end with", Op::DoesNotEndWith, Pattern::Suffix),
];

/// Operators for multi-select option sets.
pub static MULTIOPTIONSET: &[OperatorSpec] = &[
    row("Equals", Op::Equal, ValueKind::Code, Input::Dropdown),
    row("Does not equal", Op::NotEqual, ValueKind::Code, Input::Dropdown),
    row("Contains values", Op::ContainValues, ValueKind::Code, Input::Dropdown),
    row(
        "Does not contain values",
        Op::DoesNotContainValues,
        ValueKind::Code,
        Input::Dropdown,
    ),
    bare("Contains data", Op::NotNull),
    bare("Does not contain data", Op::Null),
];

/// Operators for whole, decimal, and money columns.
pub static NUMBER: &[OperatorSpec] = &[
    row("Equals", Op::Equal, ValueKind::Number, Input::Number),
    row("Does not equal", Op::NotEqual, ValueKind::Number, Input::Number),
    bare("Contains data", Op::NotNull),
    bare("Does not contain data", Op::Null),
    row("Greater than", Op::GreaterThan, ValueKind::Number, Input::Number),
    row(
        "Greater than or equal to",
        Op::GreaterEqual,
        ValueKind::Number,
        Input::Number,
    ),
    row("Less than", Op::LessThan, ValueKind::Number, Input::Number),
    row(
        "Less than or equal to",
        Op::LessEqual,
        ValueKind::Number,
        Input::Number,
    ),
];

/// Operators for datetime columns: absolute dates plus the calendar and
/// fiscal bucket families.
pub static DATE: &[OperatorSpec] = &[
    row("On", Op::On, ValueKind::Date, Input::Date),
    row("On or after", Op::OnOrAfter, ValueKind::Date, Input::Date),
    row("On or before", Op::OnOrBefore, ValueKind::Date, Input::Date),
    bare("Today", Op::Today),
    bare("Yesterday", Op::Yesterday),
    bare("Tomorrow", Op::Tomorrow),
    bare("This week", Op::ThisWeek),
    bare("This month", Op::ThisMonth),
    bare("This year", Op::ThisYear),
    bare("This fiscal period", Op::ThisFiscalPeriod),
    bare("This fiscal year", Op::ThisFiscalYear),
    bare("Next week", Op::NextWeek),
    bare("Next 7 days", Op::Next7Days),
    bare("Next month", Op::NextMonth),
    bare("Next year", Op::NextYear),
    bare("Next fiscal period", Op::NextFiscalPeriod),
    bare("Next fiscal year", Op::NextFiscalYear),
    row("Next X hours", Op::NextXHours, ValueKind::Number, Input::Number),
    row("Next X days", Op::NextXDays, ValueKind::Number, Input::Number),
    row("Next X weeks", Op::NextXWeeks, ValueKind::Number, Input::Number),
    row("Next X months", Op::NextXMonths, ValueKind::Number, Input::Number),
    row("Next X years", Op::NextXYears, ValueKind::Number, Input::Number),
    row(
        "Next X fiscal periods",
        Op::NextXFiscalPeriods,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "Next X fiscal years",
        Op::NextXFiscalYears,
        ValueKind::Number,
        Input::Number,
    ),
    bare("Last week", Op::LastWeek),
    bare("Last 7 days", Op::Last7Days),
    bare("Last month", Op::LastMonth),
    bare("Last year", Op::LastYear),
    bare("Last fiscal period", Op::LastFiscalPeriod),
    bare("Last fiscal year", Op::LastFiscalYear),
    row("Last X hours", Op::LastXHours, ValueKind::Number, Input::Number),
    row("Last X days", Op::LastXDays, ValueKind::Number, Input::Number),
    row("Last X weeks", Op::LastXWeeks, ValueKind::Number, Input::Number),
    row("Last X months", Op::LastXMonths, ValueKind::Number, Input::Number),
    row("Last X years", Op::LastXYears, ValueKind::Number, Input::Number),
    row(
        "Last X fiscal periods",
        Op::LastXFiscalPeriods,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "Last X fiscal years",
        Op::LastXFiscalYears,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "Older than X minutes",
        Op::OlderThanXMinutes,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "Older than X hours",
        Op::OlderThanXHours,
        ValueKind::Number,
        Input::Number,
    ),
    row("Older than X days", Op::OlderThanXDays, ValueKind::Number, Input::Number),
    row(
        "Older than X weeks",
        Op::OlderThanXWeeks,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "Older than X months",
        Op::OlderThanXMonths,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "Older than X years",
        Op::OlderThanXYears,
        ValueKind::Number,
        Input::Number,
    ),
    row("In fiscal year", Op::InFiscalYear, ValueKind::Number, Input::Number),
    row("In fiscal period", Op::InFiscalPeriod, ValueKind::Number, Input::Number),
    row(
        "In fiscal period and year",
        Op::InFiscalPeriodAndYear,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "In or after fiscal period and year",
        Op::InOrAfterFiscalPeriodAndYear,
        ValueKind::Number,
        Input::Number,
    ),
    row(
        "In or before fiscal period and year",
        Op::InOrBeforeFiscalPeriodAndYear,
        ValueKind::Number,
        Input::Number,
    ),
    bare("Contains data (any time)", Op::NotNull),
    bare("Does not contain data", Op::Null),
];

/// Catalog table for a semantic kind.
#[must_use]
pub fn operators_for(kind: SemanticKind) -> &'static [OperatorSpec] {
    match kind {
        SemanticKind::Text => TEXT,
        SemanticKind::Lookup => LOOKUP,
        SemanticKind::Boolean | SemanticKind::Picklist => OPTIONSET,
        SemanticKind::MultiPicklist => MULTIOPTIONSET,
        SemanticKind::DateTime => DATE,
        SemanticKind::Money | SemanticKind::Number => NUMBER,
        _ => TEXTLIKE,
    }
}

/// Find one kind's catalog row for a wire operator.
#[must_use]
pub fn operator_spec(kind: SemanticKind, operator: ConditionOperator) -> Option<&'static OperatorSpec> {
    operators_for(kind).iter().find(|spec| spec.operator == operator)
}
