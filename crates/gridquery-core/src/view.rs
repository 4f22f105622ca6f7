//! Saved-view definition loading and filter-fragment extraction.
//!
//! Loading probes the saved store, then the user store; extraction pulls
//! the grid entity's own direct-child filter and join elements back out
//! of the raw definition. Malformed definitions extract to an empty
//! fragment, never an error.

use crate::{
    error::ViewLoadError,
    provider::{ViewStore, ViewStoreKind},
    types::normalize_record_id,
};
use quick_xml::{
    escape::escape,
    events::{BytesStart, Event},
    Reader,
};
use std::fmt::Write as _;
use tracing::debug;

/// Load a view's raw query definition.
///
/// The id is normalized (braces stripped, lowercased) before the store
/// probes. A store hit with an empty definition counts as not-found so
/// the fallback store still gets its chance.
pub async fn load_view_definition<S>(store: &S, view_id: &str) -> Result<String, ViewLoadError>
where
    S: ViewStore + ?Sized,
{
    let id = normalize_record_id(view_id).to_lowercase();

    for kind in [ViewStoreKind::Saved, ViewStoreKind::User] {
        match store.query_definition(kind, &id).await? {
            Some(definition) if !definition.is_empty() => return Ok(definition),
            _ => {}
        }
    }

    Err(ViewLoadError::NotFound {
        view_id: view_id.to_string(),
    })
}

/// Extract the filter/join fragment belonging to `main_entity`.
///
/// Selects the entity element whose `name` matches case-insensitively,
/// falling back to the sole entity element when exactly one exists
/// (single-entity views tolerate naming mismatches). Only direct-child
/// `filter` and `link-entity` elements are kept; attribute, order, and
/// other elements are dropped. Returns an empty string for empty,
/// malformed, or non-matching input.
#[must_use]
pub fn extract_filter_fragment(raw: &str, main_entity: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let Some(nodes) = parse_document(raw) else {
        debug!(
            entity = main_entity,
            "view definition is not well-formed; extracting empty fragment"
        );
        return String::new();
    };

    let mut entities = Vec::new();
    collect_entity_elements(&nodes, &mut entities);

    let host = entities
        .iter()
        .find(|el| {
            el.attribute("name")
                .is_some_and(|name| name.eq_ignore_ascii_case(main_entity))
        })
        .copied()
        .or_else(|| (entities.len() == 1).then(|| entities[0]));
    let Some(host) = host else {
        return String::new();
    };

    let mut fragment = String::new();
    for child in &host.children {
        if let Node::Element(element) = child {
            let tag = element.name.to_lowercase();
            if tag == "filter" || tag == "link-entity" {
                write_element(&mut fragment, element);
            }
        }
    }

    fragment
}

///
/// Element
///
/// Minimal in-memory element tree; just enough structure to pick an
/// entity element and re-serialize its wanted children.
///

struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<Node>,
}

enum Node {
    Element(Element),
    Text(String),
}

impl Element {
    fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_document(raw: &str) -> Option<Vec<Node>> {
    let mut reader = Reader::from_str(raw);
    let mut roots: Vec<Node> = Vec::new();
    let mut stack: Vec<Element> = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => stack.push(element_from_start(&start)?),
            Ok(Event::Empty(start)) => {
                let element = element_from_start(&start)?;
                attach(Node::Element(element), &mut stack, &mut roots);
            }
            Ok(Event::End(_)) => {
                // the reader has already validated the end-tag pairing
                let element = stack.pop()?;
                attach(Node::Element(element), &mut stack, &mut roots);
            }
            Ok(Event::Text(text)) => {
                let text = text.unescape().ok()?;
                if !text.is_empty() {
                    attach(Node::Text(text.into_owned()), &mut stack, &mut roots);
                }
            }
            Ok(Event::CData(data)) => {
                let text = String::from_utf8_lossy(&data).into_owned();
                attach(Node::Text(text), &mut stack, &mut roots);
            }
            Ok(Event::Eof) => break,
            // declarations, comments, processing instructions
            Ok(_) => {}
            Err(_) => return None,
        }
    }

    if stack.is_empty() {
        Some(roots)
    } else {
        None
    }
}

fn element_from_start(start: &BytesStart<'_>) -> Option<Element> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.ok()?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr.unescape_value().ok()?.into_owned();
        attributes.push((key, value));
    }

    Some(Element {
        name,
        attributes,
        children: Vec::new(),
    })
}

fn attach(node: Node, stack: &mut Vec<Element>, roots: &mut Vec<Node>) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None => roots.push(node),
    }
}

// Document-order collection of every `entity` element, nested included.
fn collect_entity_elements<'a>(nodes: &'a [Node], out: &mut Vec<&'a Element>) {
    for node in nodes {
        if let Node::Element(element) = node {
            if element.name == "entity" {
                out.push(element);
            }
            collect_entity_elements(&element.children, out);
        }
    }
}

fn write_element(out: &mut String, element: &Element) {
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attributes {
        let _ = write!(out, " {key}=\"{}\"", escape(value.as_str()));
    }

    if element.children.is_empty() {
        out.push_str(" />");
        return;
    }

    out.push('>');
    for child in &element.children {
        match child {
            Node::Element(inner) => write_element(out, inner),
            Node::Text(text) => out.push_str(&escape(text.as_str())),
        }
    }
    let _ = write!(out, "</{}>", element.name);
}
