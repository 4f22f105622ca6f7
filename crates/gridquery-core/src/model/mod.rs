//! Descriptor data model resolved from remote entity metadata.
//!
//! These types are the cached, normalized form of what the metadata
//! provider returns; nothing here fetches or mutates.

pub mod enumerable;
pub mod field;
pub mod primary_key;
pub mod relationship;

pub use enumerable::EnumerableValue;
pub use field::{DateBehavior, DateFormat, FieldDescriptor, FieldFacet, LinkTarget};
pub use primary_key::PrimaryKeyInfo;
pub use relationship::{ManyToManyRelationship, OneToManyRelationship, RelationshipDescriptor};

use crate::types::SemanticKind;
use serde::{Deserialize, Serialize};

///
/// ColumnDescriptor
///
/// A grid column as the host control describes it: logical attribute name,
/// semantic kind, and the join alias when the column comes from a linked
/// entity rather than the grid's own.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub logical_name: String,
    pub kind: SemanticKind,
    pub entity_alias: Option<String>,
}

impl ColumnDescriptor {
    /// Construct a descriptor for a column on the grid's own entity.
    #[must_use]
    pub fn new(logical_name: impl Into<String>, kind: SemanticKind) -> Self {
        Self {
            logical_name: logical_name.into(),
            kind,
            entity_alias: None,
        }
    }

    /// Construct a descriptor for a column surfaced through a join alias.
    #[must_use]
    pub fn aliased(
        logical_name: impl Into<String>,
        kind: SemanticKind,
        entity_alias: impl Into<String>,
    ) -> Self {
        Self {
            logical_name: logical_name.into(),
            kind,
            entity_alias: Some(entity_alias.into()),
        }
    }
}
