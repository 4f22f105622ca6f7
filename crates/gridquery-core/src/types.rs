//! Shared vocabulary: semantic field kinds, cache keys, and identifier
//! normalization.
//!
//! Invariants:
//! - Cache keys are lowercased exactly once, at construction.
//! - Platform type-name classification is total; unrecognized names map to
//!   `SemanticKind::Unknown`, never an error.

use derive_more::Display;
use serde::{Deserialize, Serialize};

///
/// SemanticKind
///
/// Coarse classification of a field's platform type. Drives operator
/// availability, metadata facet shape, and condition compilation.
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticKind {
    Boolean,
    DateTime,
    Picklist,
    MultiPicklist,
    Lookup,
    Money,
    Number,
    Text,
    Guid,
    Image,
    File,
    Unknown,
}

impl SemanticKind {
    /// Kinds whose raw value is a code (or reference) that most operators
    /// must query through a display-name shadow attribute.
    #[must_use]
    pub const fn is_enumerable(self) -> bool {
        matches!(
            self,
            Self::Boolean | Self::Lookup | Self::MultiPicklist | Self::Picklist
        )
    }

    /// Kinds that carry a fixed labeled-value list in entity metadata.
    /// Lookups are enumerable for operator purposes but their candidates
    /// come from records, not metadata, so they are excluded here.
    #[must_use]
    pub const fn has_value_list(self) -> bool {
        matches!(self, Self::Boolean | Self::MultiPicklist | Self::Picklist)
    }

    /// Classify a raw platform type name.
    ///
    /// Normalizes (trim, lowercase, strip whitespace), then resolves in
    /// three tiers: exact map, dotted-prefix families, substring fallback.
    #[must_use]
    pub fn from_platform_name(raw: &str) -> Self {
        let key: String = raw
            .trim()
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_lowercase();

        if key.is_empty() {
            return Self::Unknown;
        }

        if let Some(kind) = Self::from_exact(&key) {
            return kind;
        }

        if key.starts_with("dateandtime.") {
            return Self::DateTime;
        }
        if key.starts_with("whole.") {
            return Self::Number;
        }
        if key.starts_with("singleline.") {
            return Self::Text;
        }
        if key.starts_with("lookup.") {
            return Self::Lookup;
        }

        Self::from_fallback(&key)
    }

    fn from_exact(key: &str) -> Option<Self> {
        let kind = match key {
            "dateandtime.dateonly" | "dateandtime.dateandtime" => Self::DateTime,

            "twooptions" | "boolean" => Self::Boolean,

            "picklist" | "optionset" | "status" | "state" | "statusreason" => Self::Picklist,

            "multiselectpicklist" | "multiselectoptionset" => Self::MultiPicklist,

            "lookup" | "lookup.simple" | "lookup.customer" | "lookup.owner"
            | "lookup.partylist" | "lookup.regarding" | "customer" | "owner" | "partylist"
            | "regarding" | "navigationproperty" => Self::Lookup,

            "currency" | "money" => Self::Money,

            "decimal" | "double" | "float" | "fp" | "integer" | "bigint" | "whole.none"
            | "whole.duration" | "whole.timezone" | "whole.language" | "whole.locale" => {
                Self::Number
            }

            "singleline.text" | "singleline.textarea" | "singleline.email"
            | "singleline.phone" | "singleline.url" | "singleline.tickersymbol" | "multiple"
            | "memo" | "string" | "richtext" | "entityname" | "managedproperty"
            | "aliasedvalue" => Self::Text,

            "uniqueidentifier" | "uniqueidentifierattribute" => Self::Guid,

            "file" => Self::File,

            "image" | "imageurl" | "entityimage" => Self::Image,

            _ => return None,
        };

        Some(kind)
    }

    fn from_fallback(key: &str) -> Self {
        if key.contains("dateandtime") || key.contains("date-and-time") {
            return Self::DateTime;
        }

        if key.contains("option") && key.contains("multi") {
            return Self::MultiPicklist;
        }
        if key.contains("option")
            || key.contains("picklist")
            || key.contains("state")
            || key.contains("status")
        {
            return Self::Picklist;
        }
        if key.contains("lookup")
            || key.contains("owner")
            || key.contains("customer")
            || key.contains("partylist")
            || key.contains("regarding")
        {
            return Self::Lookup;
        }
        if key.contains("money") || key.contains("currency") {
            return Self::Money;
        }
        if key.contains("guid") || key.contains("uniqueidentifier") {
            return Self::Guid;
        }
        if key.contains("image") {
            return Self::Image;
        }
        if key.contains("file") || key.contains("attachment") {
            return Self::File;
        }

        if key.contains("decimal")
            || key.contains("double")
            || key.contains("float")
            || key.contains("fp")
            || key.contains("number")
            || key.contains("int")
            || key.contains("whole")
        {
            return Self::Number;
        }
        if key.contains("text")
            || key.contains("string")
            || key.contains("memo")
            || key.contains("singleline")
            || key.contains("multiple")
        {
            return Self::Text;
        }

        Self::Unknown
    }
}

///
/// CacheKey
///
/// Case-insensitive key for entity, attribute, and relationship names.
/// Lowercased once at construction so cache lookups never re-normalize.
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct CacheKey(String);

impl CacheKey {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.trim().to_lowercase())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CacheKey {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Strip enclosing braces from a record or view identifier.
///
/// The platform surfaces ids both as `{GUID}` and bare `GUID`; every id
/// written into a query fragment or store lookup uses the bare form.
#[must_use]
pub fn normalize_record_id(raw: &str) -> String {
    raw.chars().filter(|c| !matches!(c, '{' | '}')).collect()
}
