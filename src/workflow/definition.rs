use crate::catalog::Version;
use crate::error::{InputError, NodeError};
use serde_json::{Map, Value};

pub const UNKNOWN_WORKFLOW: &str = "Unknown Workflow";
pub const UNKNOWN_NODE: &str = "Unknown Node";

/// A workflow as supplied by the host platform. Read-only to the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    /// Host identifier; empty when the host did not provide one.
    pub id: String,
    pub name: String,
    pub nodes: Vec<RawNode>,
}

impl Workflow {
    pub fn new(id: impl Into<String>, name: impl Into<String>, nodes: Vec<NodeInstance>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            nodes: nodes.into_iter().map(RawNode::from).collect(),
        }
    }

    /// Reads a workflow from its JSON payload.
    ///
    /// Missing or falsy `id`, `name` and `nodes` are defaulted. Node entries are
    /// kept raw so that a malformed node only affects itself during analysis. A
    /// truthy `nodes` field that is not a list is an error.
    pub fn from_value(value: &Value) -> Result<Self, InputError> {
        let name = text_or(value.get("name"), UNKNOWN_WORKFLOW);
        let id = text_or(value.get("id"), "");

        let nodes = match value.get("nodes") {
            Some(Value::Array(items)) => items.iter().cloned().map(RawNode).collect(),
            Some(v) if is_truthy(v) => {
                return Err(InputError::MalformedNodes { workflow: name });
            }
            _ => Vec::new(),
        };

        Ok(Self { id, name, nodes })
    }
}

/// A node entry exactly as it appeared in the workflow JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct RawNode(pub Value);

impl RawNode {
    /// Interprets the raw entry as a [`NodeInstance`].
    ///
    /// Entries that are not objects (`"abc"`, `5`, `null`) carry no node at all and
    /// fail with [`NodeError::NotAnObject`], so the analyzer skips them instead of
    /// reporting an unnamed, untyped record.
    pub fn parse(&self) -> Result<NodeInstance, NodeError> {
        let Value::Object(fields) = &self.0 else {
            return Err(NodeError::NotAnObject {
                found: json_kind(&self.0).to_string(),
            });
        };

        let node_type = match fields.get("type") {
            Some(Value::String(s)) => s.clone(),
            Some(other) if is_truthy(other) => {
                return Err(NodeError::InvalidType {
                    found: other.to_string(),
                });
            }
            _ => String::new(),
        };

        Ok(NodeInstance {
            node_type,
            type_version: Version::from_json(fields.get("typeVersion")),
            name: text_or(fields.get("name"), UNKNOWN_NODE),
        })
    }
}

impl From<NodeInstance> for RawNode {
    fn from(node: NodeInstance) -> Self {
        let mut fields = Map::new();
        fields.insert("type".to_string(), Value::String(node.node_type));
        fields.insert("typeVersion".to_string(), node.type_version.to_json());
        fields.insert("name".to_string(), Value::String(node.name));
        RawNode(Value::Object(fields))
    }
}

/// One configured processing step inside a workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeInstance {
    /// Fully-qualified type, e.g. `n8n-nodes-base.set`.
    pub node_type: String,
    pub type_version: Version,
    pub name: String,
}

impl NodeInstance {
    pub fn new(node_type: impl Into<String>, type_version: f64, name: impl Into<String>) -> Self {
        Self {
            node_type: node_type.into(),
            type_version: Version::new(type_version),
            name: name.into(),
        }
    }
}

/// Reads an optional JSON field as display text, falling back to `default` for
/// empty or falsy values.
fn text_or(value: Option<&Value>, default: &str) -> String {
    match value {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(other) if is_truthy(other) && !other.is_string() => other.to_string(),
        _ => default.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0 && !v.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
