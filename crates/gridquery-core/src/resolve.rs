//! Relationship resolution with per-name result caching.
//!
//! A resolver failure is never a composition failure: provider faults are
//! logged and reported as "unresolved", and the composer degrades to the
//! view's own fragment.

use crate::{
    model::RelationshipDescriptor,
    provider::{EntityMetadata, MetadataProvider},
    types::CacheKey,
};
use std::collections::BTreeMap;
use tracing::warn;

///
/// RelationshipResolver
///
/// Caches resolution results per relationship schema name, negative
/// results included, so repeated refresh cycles never repeat the remote
/// search.
///

#[derive(Default)]
pub struct RelationshipResolver {
    cache: BTreeMap<CacheKey, Option<RelationshipDescriptor>>,
}

impl RelationshipResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a relationship schema name against the primary entity,
    /// falling back to the secondary entity when the two differ. The
    /// final outcome, `None` included, is cached under the name.
    pub async fn resolve<P>(
        &mut self,
        provider: &P,
        relationship_name: &str,
        primary_entity: &str,
        secondary_entity: &str,
    ) -> Option<RelationshipDescriptor>
    where
        P: MetadataProvider + ?Sized,
    {
        let name = relationship_name.trim();
        if name.is_empty() {
            return None;
        }

        let key = CacheKey::new(name);
        if let Some(cached) = self.cache.get(&key) {
            return cached.clone();
        }

        let mut resolved = lookup(provider, name, primary_entity).await;
        if resolved.is_none() && !primary_entity.eq_ignore_ascii_case(secondary_entity) {
            resolved = lookup(provider, name, secondary_entity).await;
        }

        self.cache.insert(key, resolved.clone());

        resolved
    }
}

// Search one entity's relationship collections for a schema-name match.
// One-to-many and many-to-one records already carry the referenced/
// referencing orientation, so both normalize to the one-to-many shape
// unchanged.
async fn lookup<P>(
    provider: &P,
    relationship_name: &str,
    entity: &str,
) -> Option<RelationshipDescriptor>
where
    P: MetadataProvider + ?Sized,
{
    let metadata = match provider.entity_metadata(entity.trim(), &[]).await {
        Ok(metadata) => metadata,
        Err(err) => {
            warn!(
                relationship = relationship_name,
                entity,
                error = %err,
                "relationship lookup failed; treating as unresolved"
            );
            return None;
        }
    };

    find_in_metadata(&metadata, relationship_name)
}

fn find_in_metadata(
    metadata: &EntityMetadata,
    relationship_name: &str,
) -> Option<RelationshipDescriptor> {
    if let Some(rel) = metadata
        .one_to_many
        .iter()
        .chain(metadata.many_to_one.iter())
        .find(|rel| rel.schema_name.eq_ignore_ascii_case(relationship_name))
    {
        return Some(RelationshipDescriptor::OneToMany(rel.clone()));
    }

    metadata
        .many_to_many
        .iter()
        .find(|rel| rel.schema_name.eq_ignore_ascii_case(relationship_name))
        .map(|rel| RelationshipDescriptor::ManyToMany(rel.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{ManyToManyRelationship, OneToManyRelationship},
        test_support::StubMetadataProvider,
    };

    fn contact_one_to_many() -> OneToManyRelationship {
        OneToManyRelationship {
            schema_name: "account_contacts".to_string(),
            referenced_entity: "account".to_string(),
            referenced_attribute: "accountid".to_string(),
            referencing_entity: "contact".to_string(),
            referencing_attribute: "parentcustomerid".to_string(),
        }
    }

    fn membership_many_to_many() -> ManyToManyRelationship {
        ManyToManyRelationship {
            schema_name: "account_contact_membership".to_string(),
            entity1: "account".to_string(),
            entity2: "contact".to_string(),
            intersect_entity: "account_contact".to_string(),
            entity1_intersect_attribute: "accountid".to_string(),
            entity2_intersect_attribute: "contactid".to_string(),
        }
    }

    #[tokio::test]
    async fn resolves_one_to_many_from_primary_entity() {
        let metadata = EntityMetadata {
            one_to_many: vec![contact_one_to_many()],
            ..EntityMetadata::default()
        };
        let provider = StubMetadataProvider::new().with_entity("account", metadata);
        let mut resolver = RelationshipResolver::new();

        let resolved = resolver
            .resolve(&provider, "account_contacts", "account", "contact")
            .await
            .unwrap();

        assert_eq!(
            resolved,
            RelationshipDescriptor::OneToMany(contact_one_to_many())
        );
    }

    #[tokio::test]
    async fn many_to_one_records_normalize_to_one_to_many() {
        let metadata = EntityMetadata {
            many_to_one: vec![contact_one_to_many()],
            ..EntityMetadata::default()
        };
        let provider = StubMetadataProvider::new().with_entity("contact", metadata);
        let mut resolver = RelationshipResolver::new();

        let resolved = resolver
            .resolve(&provider, "account_contacts", "contact", "contact")
            .await
            .unwrap();

        assert!(!resolved.is_many_to_many());
        assert_eq!(resolved.schema_name(), "account_contacts");
    }

    #[tokio::test]
    async fn falls_back_to_secondary_entity_on_primary_miss() {
        let empty = EntityMetadata::default();
        let with_m2m = EntityMetadata {
            many_to_many: vec![membership_many_to_many()],
            ..EntityMetadata::default()
        };
        let provider = StubMetadataProvider::new()
            .with_entity("account", empty)
            .with_entity("contact", with_m2m);
        let mut resolver = RelationshipResolver::new();

        let resolved = resolver
            .resolve(&provider, "account_contact_membership", "account", "contact")
            .await
            .unwrap();

        assert!(resolved.is_many_to_many());
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn same_primary_and_secondary_probe_only_once() {
        let provider =
            StubMetadataProvider::new().with_entity("account", EntityMetadata::default());
        let mut resolver = RelationshipResolver::new();

        let resolved = resolver
            .resolve(&provider, "missing_relation", "account", "Account")
            .await;

        assert!(resolved.is_none());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn negative_results_are_cached() {
        let provider = StubMetadataProvider::new()
            .with_entity("account", EntityMetadata::default())
            .with_entity("contact", EntityMetadata::default());
        let mut resolver = RelationshipResolver::new();

        for _ in 0..3 {
            let resolved = resolver
                .resolve(&provider, "missing_relation", "account", "contact")
                .await;
            assert!(resolved.is_none());
        }

        // both entities probed exactly once, then the negative cache hit
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn provider_failure_is_unresolved_not_an_error() {
        let provider = StubMetadataProvider::new()
            .with_failing_entity("account")
            .with_entity(
                "contact",
                EntityMetadata {
                    one_to_many: vec![contact_one_to_many()],
                    ..EntityMetadata::default()
                },
            );
        let mut resolver = RelationshipResolver::new();

        // the failing primary probe degrades to the secondary probe
        let resolved = resolver
            .resolve(&provider, "account_contacts", "account", "contact")
            .await;

        assert!(resolved.is_some());
    }

    #[tokio::test]
    async fn empty_relationship_name_resolves_to_none_without_probing() {
        let provider = StubMetadataProvider::new();
        let mut resolver = RelationshipResolver::new();

        assert!(resolver
            .resolve(&provider, "  ", "account", "contact")
            .await
            .is_none());
        assert_eq!(provider.call_count(), 0);
    }
}
