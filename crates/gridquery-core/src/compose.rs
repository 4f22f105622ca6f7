//! Subgrid query composition: the view's own fragment plus the implicit
//! "only rows related to the current parent record" join.
//!
//! Failure semantics: the initial view load is the single caller-facing
//! error path. Every later fault aborts the composition to `Ok(None)` —
//! callers skip relationship-derived filtering and keep the grid alive.
//! Degradations (unresolved relationship, missing primary key) fall back
//! to the view's own fragment unmodified.

use crate::{
    cache::MetadataCache,
    error::{MetadataFetchError, ViewLoadError},
    model::{ManyToManyRelationship, OneToManyRelationship, RelationshipDescriptor},
    provider::{MetadataProvider, ViewStore},
    resolve::RelationshipResolver,
    types::normalize_record_id,
    view::{extract_filter_fragment, load_view_definition},
};
use quick_xml::escape::escape;
use tracing::{debug, warn};
use ulid::Ulid;

///
/// SubgridRequest
///
/// Caller-supplied composition input. Relationship name and form record
/// come from the hosting form; when either is absent the subgrid renders
/// unconstrained by a parent.
///

#[derive(Clone, Debug, Default)]
pub struct SubgridRequest {
    pub view_id: String,
    pub subgrid_entity: String,
    pub relationship_name: Option<String>,
    pub form_entity: Option<String>,
    pub form_record_id: Option<String>,
}

/// Compose the subgrid's query fragment.
///
/// Returns the composed fragment, or `None` when a fault after the view
/// load aborted the composition (skip relationship-derived filtering).
pub async fn compose<P, S>(
    provider: &P,
    store: &S,
    cache: &mut MetadataCache,
    resolver: &mut RelationshipResolver,
    request: &SubgridRequest,
) -> Result<Option<String>, ViewLoadError>
where
    P: MetadataProvider + ?Sized,
    S: ViewStore + ?Sized,
{
    let raw_definition = load_view_definition(store, &request.view_id).await?;
    let view_fragment = extract_filter_fragment(&raw_definition, &request.subgrid_entity);

    let (Some(relationship_name), Some(form_entity), Some(form_record_id)) = (
        non_empty(request.relationship_name.as_deref()),
        non_empty(request.form_entity.as_deref()),
        non_empty(request.form_record_id.as_deref()),
    ) else {
        return Ok(Some(view_fragment));
    };

    let linked = link_to_parent(
        provider,
        cache,
        resolver,
        relationship_name,
        form_entity,
        form_record_id,
        &request.subgrid_entity,
        view_fragment,
    )
    .await;

    match linked {
        Ok(fragment) => Ok(Some(fragment)),
        Err(err) => {
            warn!(
                view_id = %request.view_id,
                relationship = relationship_name,
                error = %err,
                "subgrid composition aborted; relationship filter skipped"
            );
            Ok(None)
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

// Steps 3-6: resolve the relationship and wrap the view fragment in the
// parent-record join. Provider faults bubble up and abort the whole
// composition; schema gaps degrade to the unmodified view fragment.
#[expect(clippy::too_many_arguments, reason = "internal staging function")]
async fn link_to_parent<P>(
    provider: &P,
    cache: &mut MetadataCache,
    resolver: &mut RelationshipResolver,
    relationship_name: &str,
    form_entity: &str,
    form_record_id: &str,
    subgrid_entity: &str,
    view_fragment: String,
) -> Result<String, MetadataFetchError>
where
    P: MetadataProvider + ?Sized,
{
    let Some(relationship) = resolver
        .resolve(provider, relationship_name, form_entity, subgrid_entity)
        .await
    else {
        debug!(
            relationship = relationship_name,
            "relationship unresolved; using the view's own fragment"
        );
        return Ok(view_fragment);
    };

    let Some(form_key) = cache.primary_key_info(provider, form_entity).await? else {
        debug!(
            entity = form_entity,
            "form entity has no primary-key info; using the view's own fragment"
        );
        return Ok(view_fragment);
    };

    let record_id = normalize_record_id(form_record_id);
    let parent_filter = format!(
        r#"<filter><condition attribute="{}" operator="eq" value="{}" /></filter>"#,
        escape(form_key.id_attribute.as_str()),
        escape(record_id.as_str()),
    );
    let suffix = alias_suffix();

    match relationship {
        RelationshipDescriptor::OneToMany(rel) => Ok(one_to_many_fragment(
            &rel,
            &view_fragment,
            &parent_filter,
            &suffix,
        )),
        RelationshipDescriptor::ManyToMany(rel) => {
            // the intersect hop lands on the subgrid's primary key; when
            // the form and subgrid entities coincide the probe is already
            // answered
            let subgrid_key = if form_entity.eq_ignore_ascii_case(subgrid_entity) {
                Some(form_key.clone())
            } else {
                cache.primary_key_info(provider, subgrid_entity).await?
            };
            let Some(subgrid_key) = subgrid_key else {
                debug!(
                    entity = subgrid_entity,
                    "subgrid entity has no primary-key info; using the view's own fragment"
                );
                return Ok(view_fragment);
            };

            Ok(many_to_many_fragment(
                &rel,
                form_entity,
                &form_key.id_attribute,
                &subgrid_key.id_attribute,
                &view_fragment,
                &parent_filter,
                &suffix,
            ))
        }
    }
}

// One join hop from the subgrid's foreign key up to the parent record.
fn one_to_many_fragment(
    rel: &OneToManyRelationship,
    view_fragment: &str,
    parent_filter: &str,
    suffix: &str,
) -> String {
    format!(
        r#"{view_fragment}<link-entity name="{name}" from="{from}" to="{to}" alias="a_{suffix}" link-type="inner">{parent_filter}</link-entity>"#,
        name = escape(rel.referenced_entity.as_str()),
        from = escape(rel.referenced_attribute.as_str()),
        to = escape(rel.referencing_attribute.as_str()),
    )
}

// Two nested hops: subgrid -> intersect entity -> form entity, with the
// parent filter in the innermost join. The orientation bit is computed
// once and reused for both intersect-attribute choices; reversing one of
// them silently yields an always-empty or always-unfiltered grid.
fn many_to_many_fragment(
    rel: &ManyToManyRelationship,
    form_entity: &str,
    form_id_attribute: &str,
    subgrid_id_attribute: &str,
    view_fragment: &str,
    parent_filter: &str,
    suffix: &str,
) -> String {
    let form_is_first = rel.form_is_first(form_entity);

    let outer = format!(
        r#"<link-entity name="{name}" from="{from}" to="{to}" alias="x1_{suffix}" link-type="inner">"#,
        name = escape(rel.intersect_entity.as_str()),
        from = escape(rel.subgrid_side_intersect_attribute(form_is_first)),
        to = escape(subgrid_id_attribute),
    );
    let inner = format!(
        r#"<link-entity name="{name}" from="{from}" to="{to}" alias="x2_{suffix}" link-type="inner">"#,
        name = escape(rel.form_side_entity(form_is_first)),
        from = escape(form_id_attribute),
        to = escape(rel.form_side_intersect_attribute(form_is_first)),
    );

    format!(
        "{outer}{view_fragment}{inner}{parent_filter}</link-entity></link-entity>"
    )
}

// Random 8-character alias suffix, shared by every join generated in one
// composition so generated aliases cannot collide with the view's own.
fn alias_suffix() -> String {
    let ulid = Ulid::new().to_string().to_lowercase();
    ulid[ulid.len() - 8..].to_string()
}
