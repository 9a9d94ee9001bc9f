//! Unwrapping of the host platform's item sequences.
//!
//! The host hands over every dataset as a list of items, each carrying its
//! payload under a `json` key:
//!
//! ```json
//! [{ "json": { "id": "w1", "name": "Demo", "nodes": [] } }]
//! ```

use super::definition::Workflow;
use crate::catalog::VersionCatalog;
use crate::error::InputError;
use serde_json::Value;

const PAYLOAD_KEY: &str = "json";

/// Reads the workflows from a `nodesInUse` item sequence.
///
/// Input that is not a list yields no workflows. An item without a payload, or a
/// workflow whose `nodes` field is malformed, fails the whole read.
pub fn workflows_from_items(items: &Value) -> Result<Vec<Workflow>, InputError> {
    let Some(items) = items.as_array() else {
        return Ok(Vec::new());
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item.get(PAYLOAD_KEY) {
            None | Some(Value::Null) => Err(InputError::MissingPayload { index }),
            Some(payload) => Workflow::from_value(payload),
        })
        .collect()
}

/// Reads the catalog from the first item of a `nodeVersions` sequence.
///
/// An empty sequence, or a first item without an object payload, yields an empty
/// catalog.
pub fn catalog_from_items(items: &Value) -> VersionCatalog {
    items
        .get(0)
        .and_then(|first| first.get(PAYLOAD_KEY))
        .map(VersionCatalog::from_value)
        .unwrap_or_default()
}

/// Wraps a payload the way the host expects items to be shaped.
pub fn wrap_item(payload: Value) -> Value {
    let mut item = serde_json::Map::new();
    item.insert(PAYLOAD_KEY.to_string(), payload);
    Value::Object(item)
}
