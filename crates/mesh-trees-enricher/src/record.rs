//! Concept records decoded from the remote service.
//!
//! The MeSH RDF service serves the same content in several JSON shapes:
//! labels arrive as plain strings, language-tagged objects or `@graph`
//! entries; tree numbers as a single token, an array, or full URIs. All
//! shape handling lives here, so the rest of the engine sees one record
//! type.

use mesh_trees::TreeNumber;
use serde_json::Value;

use crate::error::{EnrichError, EnrichResult};

/// A decoded MeSH concept record.
///
/// `tree_numbers` is empty both for records that carry no positions and
/// for supplementary records; `mapped_to` then names the preferred mapped
/// descriptor when the record has one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptRecord {
    /// The record's own display label.
    pub label: String,
    /// Normalized tree numbers, in service order.
    pub tree_numbers: Vec<TreeNumber>,
    /// Bare code of the preferred mapped descriptor, if any.
    pub mapped_to: Option<String>,
}

impl ConceptRecord {
    /// Decodes a record from the service's JSON payload.
    ///
    /// A payload without a usable label is rejected; everything else is
    /// optional.
    pub fn from_json(code: &str, data: &Value) -> EnrichResult<Self> {
        let label = extract_label(data).ok_or_else(|| EnrichError::NoLabel(code.to_string()))?;

        Ok(ConceptRecord {
            label,
            tree_numbers: extract_tree_numbers(data),
            mapped_to: extract_mapped_to(data),
        })
    }

    /// Whether the record carries any tree positions.
    pub fn has_tree_numbers(&self) -> bool {
        !self.tree_numbers.is_empty()
    }
}

// ============================================================================
// Shape handling
// ============================================================================

fn extract_label(data: &Value) -> Option<String> {
    if let Some(label) = data.get("label") {
        return string_or_langmap(label);
    }
    if let Some(name) = data.get("name") {
        return string_or_langmap(name);
    }
    let entry = first_graph_entry(data)?;
    string_or_langmap(entry.get("label").or_else(|| entry.get("name"))?)
}

/// Labels arrive as plain strings or as language-tagged objects with
/// `@value` or `en` keys.
fn string_or_langmap(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Object(map) => map
            .get("@value")
            .or_else(|| map.get("en"))
            .and_then(Value::as_str)
            .map(str::to_string),
        _ => None,
    }
}

fn extract_tree_numbers(data: &Value) -> Vec<TreeNumber> {
    let raw = data
        .get("treeNumber")
        .or_else(|| data.get("treeNumbers"))
        .or_else(|| first_graph_entry(data).and_then(|entry| entry.get("treeNumber")));

    match raw {
        Some(Value::String(token)) => vec![TreeNumber::from_token(token)],
        Some(Value::Array(tokens)) => tokens
            .iter()
            .filter_map(Value::as_str)
            .map(TreeNumber::from_token)
            .collect(),
        _ => Vec::new(),
    }
}

fn extract_mapped_to(data: &Value) -> Option<String> {
    let raw = data
        .get("preferredMappedTo")
        .or_else(|| first_graph_entry(data).and_then(|entry| entry.get("preferredMappedTo")))?;

    // A sequence of mappings names the preferred one first
    let first = match raw {
        Value::String(uri) => uri.as_str(),
        Value::Array(uris) => uris.first().and_then(Value::as_str)?,
        _ => return None,
    };

    Some(strip_uri(first).to_string())
}

/// Reduces a descriptor URI to its bare code (`.../mesh/D012345` to `D012345`).
fn strip_uri(uri: &str) -> &str {
    match uri.rfind('/') {
        Some(idx) => &uri[idx + 1..],
        None => uri,
    }
}

fn first_graph_entry(data: &Value) -> Option<&Value> {
    data.get("@graph")
        .and_then(Value::as_array)
        .and_then(|graph| graph.first())
}

// ============================================================================
// Tests
// ============================================================================
