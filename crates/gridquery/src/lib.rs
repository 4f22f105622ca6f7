//! GridQuery: query-fragment composition for embedded data grids.
//!
//! ## Crate layout
//! - `core::cache`: lazily-filled per-instance metadata cache.
//! - `core::resolve`: relationship-name resolution with negative caching.
//! - `core::view`: saved-view loading and filter-fragment extraction.
//! - `core::compose`: the subgrid query composer.
//! - `core::filter`: operator catalog and condition compilation.
//!
//! Hosts implement the `core::provider` traits over their platform client
//! and drive `compose` once per grid refresh; the `prelude` mirrors the
//! surface a hosting control touches.

pub use gridquery_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use gridquery_core::{
    cache::MetadataCache,
    compose::{compose, SubgridRequest},
    error::{MetadataFetchError, ProviderError, ViewLoadError},
    resolve::RelationshipResolver,
};

///
/// Host Prelude
///
/// Everything a hosting grid control needs to wire the composer and the
/// filter compiler, in one import.
///

pub mod prelude {
    pub use crate::core::{
        cache::MetadataCache,
        compose::{compose, SubgridRequest},
        error::{MetadataFetchError, ProviderError, ViewLoadError},
        filter::{
            compile, escape_for_like, filter_expression, operators_for, ConditionExpression,
            ConditionOperator, ConditionValue, FilterExpression, FilterSpec, OperatorSpec,
        },
        model::{
            ColumnDescriptor, EnumerableValue, FieldDescriptor, FieldFacet, LinkTarget,
            PrimaryKeyInfo, RelationshipDescriptor,
        },
        provider::{
            AttributeMetadata, EntityMetadata, MetadataProvider, ViewStore, ViewStoreKind,
        },
        resolve::RelationshipResolver,
        types::SemanticKind,
        view::{extract_filter_fragment, load_view_definition},
    };
}
