use crate::catalog::Version;
use crate::workflow::{NodeInstance, Workflow};
use serde::Serialize;

/// The classification of one node instance, decided once by the analyzer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    /// In the catalog, declared version below the latest.
    Outdated,
    /// In the catalog, declared version at or above the latest.
    Current,
    /// No catalog entry for the resolved type.
    Unmatched,
}

impl NodeStatus {
    /// Whether the node's type was found in the catalog.
    pub fn is_match(self) -> bool {
        !matches!(self, NodeStatus::Unmatched)
    }

    pub fn label(self) -> &'static str {
        match self {
            NodeStatus::Outdated => "Outdated",
            NodeStatus::Current => "Up to date",
            NodeStatus::Unmatched => "Not found",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            NodeStatus::Outdated => "⚠️",
            NodeStatus::Current => "✅",
            NodeStatus::Unmatched => "❓",
        }
    }
}

/// One classified node instance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisRecord {
    pub workflow_name: String,
    pub workflow_id: String,
    /// The resolved type for matched nodes, the raw type string for unmatched ones.
    pub node_type: String,
    pub current_version: f64,
    pub latest_version: f64,
    pub node_name: String,
    #[serde(rename = "match")]
    pub matched: bool,
    pub status: NodeStatus,
}

impl AnalysisRecord {
    /// A record for a node whose resolved type was found in the catalog.
    pub fn matched(
        workflow: &Workflow,
        node: &NodeInstance,
        resolved_type: &str,
        latest: &Version,
        outdated: bool,
    ) -> Self {
        Self {
            workflow_name: workflow.name.clone(),
            workflow_id: workflow.id.clone(),
            node_type: resolved_type.to_string(),
            current_version: node.type_version.value(),
            latest_version: latest.value(),
            node_name: node.name.clone(),
            matched: true,
            status: if outdated {
                NodeStatus::Outdated
            } else {
                NodeStatus::Current
            },
        }
    }

    /// A record for a node with no catalog entry. Keeps the unresolved type and
    /// zeroes both versions.
    pub fn unmatched(workflow: &Workflow, node: &NodeInstance) -> Self {
        Self {
            workflow_name: workflow.name.clone(),
            workflow_id: workflow.id.clone(),
            node_type: node.node_type.clone(),
            current_version: 0.0,
            latest_version: 0.0,
            node_name: node.name.clone(),
            matched: false,
            status: NodeStatus::Unmatched,
        }
    }
}
