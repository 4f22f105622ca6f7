//! Collaborator boundary: the remote metadata catalog and the view stores.
//!
//! Hosts implement these traits over their platform client. Everything in
//! this module is the raw, unnormalized shape of a provider response;
//! normalization into cached descriptors happens in `cache` and `resolve`.

use crate::{
    error::ProviderError,
    model::{EnumerableValue, ManyToManyRelationship, OneToManyRelationship},
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

///
/// EntityMetadata
///
/// One entity's schema facts as returned by the metadata provider:
/// requested attribute records, the three relationship collections keyed
/// by schema name, and the primary id/name attribute names.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EntityMetadata {
    pub attributes: Vec<AttributeMetadata>,
    pub one_to_many: Vec<OneToManyRelationship>,
    pub many_to_one: Vec<OneToManyRelationship>,
    pub many_to_many: Vec<ManyToManyRelationship>,
    pub primary_id_attribute: Option<String>,
    pub primary_name_attribute: Option<String>,
}

impl EntityMetadata {
    /// Find an attribute record by logical name, case-insensitively.
    #[must_use]
    pub fn attribute(&self, logical_name: &str) -> Option<&AttributeMetadata> {
        self.attributes
            .iter()
            .find(|attr| attr.logical_name.eq_ignore_ascii_case(logical_name))
    }
}

///
/// AttributeMetadata
///
/// Raw per-attribute record. Constraint fields are optional because the
/// provider only populates the ones meaningful for the attribute's type;
/// facet construction picks what the column's semantic kind needs.
///

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributeMetadata {
    pub logical_name: String,
    pub is_updatable: bool,
    pub required_level: i32,
    pub max_length: Option<i32>,
    pub precision: Option<i32>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub date_behavior: Option<i32>,
    pub format: Option<String>,
    /// Declared lookup target entities; empty means unconstrained.
    pub targets: Vec<String>,
    /// Labeled value set for enumerable attributes; `None` when the
    /// attribute carries no value list.
    pub options: Option<Vec<EnumerableValue>>,
}

///
/// MetadataProvider
///
/// Remote schema catalog. One round trip per call; the cache layer is
/// responsible for never asking twice for the same slot.
///

#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Fetch metadata for `entity`, prefetching the named attributes.
    /// An empty attribute list still returns relationship collections and
    /// primary-key attribute names.
    async fn entity_metadata(
        &self,
        entity: &str,
        attributes: &[String],
    ) -> Result<EntityMetadata, ProviderError>;
}

///
/// ViewStoreKind
///
/// The two stores a saved view may live in; probed in declaration order.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ViewStoreKind {
    Saved,
    User,
}

///
/// ViewStore
///

#[async_trait]
pub trait ViewStore: Send + Sync {
    /// Fetch a view's raw query-definition text. `Ok(None)` is the
    /// not-found outcome and triggers the caller's fallback store probe;
    /// transport failures surface as `Err`.
    async fn query_definition(
        &self,
        kind: ViewStoreKind,
        id: &str,
    ) -> Result<Option<String>, ProviderError>;
}
