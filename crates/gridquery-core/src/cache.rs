//! Lazily-filled, per-instance metadata cache.
//!
//! Invariants:
//! - Keys are case-insensitive; each missing slot is filled at most once.
//! - Nothing here evicts; cache lifetime equals the hosting instance.
//! - Fills are idempotent keyed writes, safe under re-entry.

use crate::{
    error::{MetadataFetchError, ProviderError},
    model::{
        ColumnDescriptor, DateBehavior, DateFormat, EnumerableValue, FieldDescriptor, FieldFacet,
        LinkTarget, PrimaryKeyInfo,
    },
    provider::{AttributeMetadata, EntityMetadata, MetadataProvider},
    types::{CacheKey, SemanticKind},
};
use std::collections::BTreeMap;

///
/// MetadataCache
///
/// Explicitly constructed and owned by the hosting control instance so
/// concurrent instances cannot cross-contaminate. Field descriptors and
/// enumerable value lists live in separate maps because they come from
/// distinct remote calls that may complete on different refresh cycles.
///

#[derive(Default)]
pub struct MetadataCache {
    fields: BTreeMap<CacheKey, BTreeMap<CacheKey, FieldDescriptor>>,
    value_lists: BTreeMap<CacheKey, BTreeMap<CacheKey, Vec<EnumerableValue>>>,
    primary_keys: BTreeMap<CacheKey, Option<PrimaryKeyInfo>>,
}

impl MetadataCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run both metadata passes for a column set and report whether both
    /// were already complete. Callers polling across refresh cycles use
    /// the flag to detect the cycle on which nothing needed fetching.
    pub async fn ensure_column_metadata<P>(
        &mut self,
        provider: &P,
        entity: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<bool, MetadataFetchError>
    where
        P: MetadataProvider + ?Sized,
    {
        let fields_complete = self.ensure_fields(provider, entity, columns).await?;
        let values_complete = self
            .ensure_enumerable_values(provider, entity, columns)
            .await?;

        Ok(fields_complete && values_complete)
    }

    /// Fetch and cache descriptors for the columns missing from the field
    /// map. Returns `true` when nothing needed fetching.
    pub async fn ensure_fields<P>(
        &mut self,
        provider: &P,
        entity: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<bool, MetadataFetchError>
    where
        P: MetadataProvider + ?Sized,
    {
        let entity_key = CacheKey::new(entity);
        let missing = missing_columns(self.fields.get(&entity_key), columns, |_| true);
        if missing.is_empty() {
            return Ok(true);
        }

        let names: Vec<String> = missing.iter().map(|c| c.logical_name.clone()).collect();
        let metadata = provider
            .entity_metadata(entity, &names)
            .await
            .map_err(|source| MetadataFetchError::new(entity, source))?;

        let slot = self.fields.entry(entity_key).or_default();
        for column in &missing {
            let attr = metadata.attribute(&column.logical_name).ok_or_else(|| {
                MetadataFetchError::new(
                    entity,
                    ProviderError::new(format!(
                        "attribute '{}' missing from metadata response",
                        column.logical_name
                    )),
                )
            })?;

            slot.insert(
                CacheKey::new(&column.logical_name),
                build_descriptor(column, attr, &metadata),
            );
        }

        Ok(false)
    }

    /// Pure lookup; never fetches.
    #[must_use]
    pub fn field(&self, entity: &str, field: &str) -> Option<&FieldDescriptor> {
        self.fields
            .get(&CacheKey::new(entity))?
            .get(&CacheKey::new(field))
    }

    /// Whether a cached field accepts updates; unknown fields are not
    /// updatable.
    #[must_use]
    pub fn is_updatable(&self, entity: &str, field: &str) -> bool {
        self.field(entity, field)
            .is_some_and(|descriptor| descriptor.is_updatable)
    }

    /// Requirement level of a cached field; unknown fields report 0.
    #[must_use]
    pub fn required_level(&self, entity: &str, field: &str) -> i32 {
        self.field(entity, field)
            .map_or(0, |descriptor| descriptor.required_level)
    }

    /// Fetch and cache value lists for the value-list-bearing subset of
    /// `columns`. Same diff/fill contract as [`Self::ensure_fields`];
    /// attributes without a value list fill a permanent empty slot.
    pub async fn ensure_enumerable_values<P>(
        &mut self,
        provider: &P,
        entity: &str,
        columns: &[ColumnDescriptor],
    ) -> Result<bool, MetadataFetchError>
    where
        P: MetadataProvider + ?Sized,
    {
        let entity_key = CacheKey::new(entity);
        let missing = missing_columns(self.value_lists.get(&entity_key), columns, |c| {
            c.kind.has_value_list()
        });
        if missing.is_empty() {
            return Ok(true);
        }

        let names: Vec<String> = missing.iter().map(|c| c.logical_name.clone()).collect();
        let metadata = provider
            .entity_metadata(entity, &names)
            .await
            .map_err(|source| MetadataFetchError::new(entity, source))?;

        let slot = self.value_lists.entry(entity_key).or_default();
        for column in &missing {
            let values = metadata
                .attribute(&column.logical_name)
                .and_then(|attr| attr.options.clone())
                .unwrap_or_default();

            slot.insert(CacheKey::new(&column.logical_name), values);
        }

        Ok(false)
    }

    /// Pure lookup; `None` covers unknown fields and fields cached with
    /// no value list.
    #[must_use]
    pub fn enumerable_values(&self, entity: &str, field: &str) -> Option<&[EnumerableValue]> {
        let values = self
            .value_lists
            .get(&CacheKey::new(entity))?
            .get(&CacheKey::new(field))?;

        if values.is_empty() {
            None
        } else {
            Some(values.as_slice())
        }
    }

    /// Resolve a cached enumerable code to its display label.
    #[must_use]
    pub fn enumerable_label(&self, entity: &str, field: &str, value: i32) -> Option<&str> {
        self.enumerable_values(entity, field)?
            .iter()
            .find(|option| option.value == value)
            .map(|option| option.label.as_str())
    }

    /// Fetch-once primary-key lookup with permanent negative caching for
    /// entities missing an id or name attribute. An empty entity name
    /// short-circuits without touching the provider or the cache.
    pub async fn primary_key_info<P>(
        &mut self,
        provider: &P,
        entity: &str,
    ) -> Result<Option<PrimaryKeyInfo>, MetadataFetchError>
    where
        P: MetadataProvider + ?Sized,
    {
        if entity.trim().is_empty() {
            return Ok(None);
        }

        let entity_key = CacheKey::new(entity);
        if let Some(cached) = self.primary_keys.get(&entity_key) {
            return Ok(cached.clone());
        }

        let metadata = provider
            .entity_metadata(entity, &[])
            .await
            .map_err(|source| MetadataFetchError::new(entity, source))?;

        let info = match (
            metadata.primary_id_attribute,
            metadata.primary_name_attribute,
        ) {
            (Some(id_attribute), Some(name_attribute))
                if !id_attribute.is_empty() && !name_attribute.is_empty() =>
            {
                Some(PrimaryKeyInfo {
                    id_attribute,
                    name_attribute,
                })
            }
            _ => None,
        };

        self.primary_keys.insert(entity_key, info.clone());

        Ok(info)
    }
}

// Columns from `columns` passing `wanted` that have no slot yet.
fn missing_columns<'a, V>(
    slot: Option<&BTreeMap<CacheKey, V>>,
    columns: &'a [ColumnDescriptor],
    wanted: impl Fn(&ColumnDescriptor) -> bool,
) -> Vec<&'a ColumnDescriptor> {
    columns
        .iter()
        .filter(|column| wanted(column))
        .filter(|column| {
            slot.is_none_or(|filled| !filled.contains_key(&CacheKey::new(&column.logical_name)))
        })
        .collect()
}

// Normalize one raw attribute record into a cached descriptor. The facet
// shape follows the column's semantic kind, not the provider record.
fn build_descriptor(
    column: &ColumnDescriptor,
    attr: &AttributeMetadata,
    metadata: &EntityMetadata,
) -> FieldDescriptor {
    let facet = match column.kind {
        SemanticKind::Lookup => FieldFacet::Lookup {
            targets: lookup_targets(&column.logical_name, attr, metadata),
        },
        SemanticKind::Text => FieldFacet::Text {
            max_length: attr.max_length.unwrap_or(0),
        },
        SemanticKind::DateTime => FieldFacet::Date {
            behavior: DateBehavior::from_code(attr.date_behavior.unwrap_or(0)),
            format: DateFormat::from_platform_format(attr.format.as_deref()),
        },
        SemanticKind::Money | SemanticKind::Number => FieldFacet::Numeric {
            precision: attr.precision.unwrap_or(0),
            min: attr.min_value.unwrap_or(0.0),
            max: attr.max_value.unwrap_or(0.0),
        },
        _ => FieldFacet::None,
    };

    FieldDescriptor {
        logical_name: column.logical_name.clone(),
        kind: column.kind,
        is_updatable: attr.is_updatable,
        required_level: attr.required_level,
        facet,
    }
}

// Candidate joins for a lookup field: many-to-one records whose
// referencing attribute is the field itself, restricted to the declared
// targets when the attribute declares any.
fn lookup_targets(
    logical_name: &str,
    attr: &AttributeMetadata,
    metadata: &EntityMetadata,
) -> Vec<LinkTarget> {
    metadata
        .many_to_one
        .iter()
        .filter(|rel| rel.referencing_attribute.eq_ignore_ascii_case(logical_name))
        .filter(|rel| attr.targets.is_empty() || attr.targets.contains(&rel.referenced_entity))
        .map(|rel| LinkTarget {
            entity: rel.referenced_entity.clone(),
            from: rel.referenced_attribute.clone(),
            to: rel.referencing_attribute.clone(),
            relationship: rel.schema_name.clone(),
        })
        .collect()
}
