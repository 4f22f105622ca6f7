//! Shared stub collaborators for unit tests. Call recording is behind a
//! mutex because provider traits are `Send + Sync`.

use crate::{
    error::ProviderError,
    provider::{AttributeMetadata, EntityMetadata, MetadataProvider, ViewStore, ViewStoreKind},
    types::CacheKey,
};
use async_trait::async_trait;
use std::{
    collections::{BTreeMap, BTreeSet},
    sync::Mutex,
};

///
/// StubMetadataProvider
///

#[derive(Default)]
pub(crate) struct StubMetadataProvider {
    responses: BTreeMap<CacheKey, EntityMetadata>,
    failing: BTreeSet<CacheKey>,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl StubMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entity(mut self, entity: &str, metadata: EntityMetadata) -> Self {
        self.responses.insert(CacheKey::new(entity), metadata);
        self
    }

    pub fn with_failing_entity(mut self, entity: &str) -> Self {
        self.failing.insert(CacheKey::new(entity));
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().expect("stub call log poisoned").len()
    }

    pub fn requested_attributes(&self) -> Vec<Vec<String>> {
        self.calls
            .lock()
            .expect("stub call log poisoned")
            .iter()
            .map(|(_, attrs)| attrs.clone())
            .collect()
    }
}

#[async_trait]
impl MetadataProvider for StubMetadataProvider {
    async fn entity_metadata(
        &self,
        entity: &str,
        attributes: &[String],
    ) -> Result<EntityMetadata, ProviderError> {
        self.calls
            .lock()
            .expect("stub call log poisoned")
            .push((entity.to_string(), attributes.to_vec()));

        let key = CacheKey::new(entity);
        if self.failing.contains(&key) {
            return Err(ProviderError::new(format!(
                "stubbed metadata outage for '{entity}'"
            )));
        }

        self.responses
            .get(&key)
            .cloned()
            .ok_or_else(|| ProviderError::new(format!("no stubbed metadata for '{entity}'")))
    }
}

///
/// StubViewStore
///

#[derive(Default)]
pub(crate) struct StubViewStore {
    saved: BTreeMap<String, String>,
    user: BTreeMap<String, String>,
    failing: BTreeSet<ViewStoreKindKey>,
    calls: Mutex<Vec<(ViewStoreKind, String)>>,
}

type ViewStoreKindKey = u8;

const fn kind_key(kind: ViewStoreKind) -> ViewStoreKindKey {
    match kind {
        ViewStoreKind::Saved => 0,
        ViewStoreKind::User => 1,
    }
}

impl StubViewStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_saved(mut self, id: &str, definition: &str) -> Self {
        self.saved.insert(id.to_string(), definition.to_string());
        self
    }

    pub fn with_user(mut self, id: &str, definition: &str) -> Self {
        self.user.insert(id.to_string(), definition.to_string());
        self
    }

    pub fn with_failing_store(mut self, kind: ViewStoreKind) -> Self {
        self.failing.insert(kind_key(kind));
        self
    }

    pub fn calls(&self) -> Vec<(ViewStoreKind, String)> {
        self.calls.lock().expect("stub call log poisoned").clone()
    }
}

#[async_trait]
impl ViewStore for StubViewStore {
    async fn query_definition(
        &self,
        kind: ViewStoreKind,
        id: &str,
    ) -> Result<Option<String>, ProviderError> {
        self.calls
            .lock()
            .expect("stub call log poisoned")
            .push((kind, id.to_string()));

        if self.failing.contains(&kind_key(kind)) {
            return Err(ProviderError::new("stubbed view store outage"));
        }

        let store = match kind {
            ViewStoreKind::Saved => &self.saved,
            ViewStoreKind::User => &self.user,
        };

        Ok(store.get(id).cloned())
    }
}

///
/// Attribute record builders
///

pub(crate) fn text_attribute(logical_name: &str, max_length: i32) -> AttributeMetadata {
    AttributeMetadata {
        logical_name: logical_name.to_string(),
        is_updatable: true,
        required_level: 0,
        max_length: Some(max_length),
        ..AttributeMetadata::default()
    }
}

pub(crate) fn plain_attribute(logical_name: &str) -> AttributeMetadata {
    AttributeMetadata {
        logical_name: logical_name.to_string(),
        is_updatable: true,
        required_level: 0,
        ..AttributeMetadata::default()
    }
}
