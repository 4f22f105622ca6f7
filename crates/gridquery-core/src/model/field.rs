use crate::types::SemanticKind;
use serde::{Deserialize, Serialize};

///
/// FieldDescriptor
///
/// Cached runtime metadata for one attribute: the facts condition
/// compilation, editing policy, and join construction need, and nothing
/// the provider returns beyond them.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FieldDescriptor {
    pub logical_name: String,
    pub kind: SemanticKind,
    pub is_updatable: bool,
    pub required_level: i32,
    pub facet: FieldFacet,
}

///
/// FieldFacet
///
/// Kind-specific constraint payload. Exactly one facet shape exists per
/// semantic kind family; kinds without extra constraints carry `None`.
///

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum FieldFacet {
    None,
    Text {
        max_length: i32,
    },
    Numeric {
        precision: i32,
        min: f64,
        max: f64,
    },
    Date {
        behavior: DateBehavior,
        format: DateFormat,
    },
    Lookup {
        targets: Vec<LinkTarget>,
    },
}

///
/// DateBehavior
///
/// Platform datetime storage behavior codes.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[repr(i32)]
pub enum DateBehavior {
    Unspecified = 0,
    UserLocal = 1,
    DateOnly = 2,
    TimeZoneIndependent = 3,
}

impl DateBehavior {
    /// Decode a raw behavior code; unknown codes fall back to
    /// `Unspecified` rather than failing the metadata fill.
    #[must_use]
    pub const fn from_code(code: i32) -> Self {
        match code {
            1 => Self::UserLocal,
            2 => Self::DateOnly,
            3 => Self::TimeZoneIndependent,
            _ => Self::Unspecified,
        }
    }
}

///
/// DateFormat
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum DateFormat {
    DateOnly,
    DateAndTime,
}

impl DateFormat {
    /// Decode the provider's format name; only the literal `date` format
    /// means date-only, everything else renders date and time.
    #[must_use]
    pub fn from_platform_format(format: Option<&str>) -> Self {
        if format == Some("date") {
            Self::DateOnly
        } else {
            Self::DateAndTime
        }
    }
}

///
/// LinkTarget
///
/// One candidate join for a lookup field: the referenced entity plus the
/// from/to attribute pair and the declaring relationship schema name.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct LinkTarget {
    pub entity: String,
    pub from: String,
    pub to: String,
    pub relationship: String,
}
