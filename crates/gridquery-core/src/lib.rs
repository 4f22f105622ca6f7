//! Core runtime for GridQuery: metadata resolution, relationship
//! traversal, view-definition parsing, and query-fragment composition for
//! an embedded data grid talking to a remote relational data platform.
//!
//! The pipeline composes a declarative query fragment; it never executes
//! queries, holds UI state, or performs writes. A broken relationship or
//! metadata outage widens the subgrid's result set instead of blocking
//! rendering: availability wins over the secondary, relationship-derived
//! constraint.

// public exports are one module level down
pub mod cache;
pub mod compose;
pub mod error;
pub mod filter;
pub mod model;
pub mod provider;
pub mod resolve;
pub mod types;
pub mod view;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// Prelude
///
/// Prelude contains only domain vocabulary. Providers, errors, and the
/// composition entry points are imported explicitly by hosts.
///

pub mod prelude {
    pub use crate::{
        filter::{ConditionExpression, ConditionOperator, FilterSpec, OperatorSpec},
        model::{
            ColumnDescriptor, EnumerableValue, FieldDescriptor, FieldFacet, PrimaryKeyInfo,
            RelationshipDescriptor,
        },
        types::SemanticKind,
    };
}
