//! Common test utilities for building workflows, catalogs and host items.
use nodeaudit::prelude::*;
use nodeaudit::workflow::wrap_item;
use serde_json::{Value, json};

/// The workflow used by the end-to-end examples: one `set` node at version "1".
#[allow(dead_code)]
pub fn demo_workflow_json() -> Value {
    json!({
        "id": "w1",
        "name": "Demo",
        "nodes": [
            { "type": "n8n-nodes-base.set", "typeVersion": "1", "name": "Set Data" }
        ]
    })
}

/// A catalog in which `set` is at version 3.
#[allow(dead_code)]
pub fn demo_catalog_json() -> Value {
    json!({ "set": { "version_info": { "latest_version": 3 } } })
}

/// Wraps workflow payloads as a `nodesInUse` item sequence.
#[allow(dead_code)]
pub fn nodes_in_use(workflows: Vec<Value>) -> Value {
    Value::Array(workflows.into_iter().map(wrap_item).collect())
}

/// Wraps a catalog payload as a `nodeVersions` item sequence.
#[allow(dead_code)]
pub fn node_versions(catalog: Value) -> Value {
    json!([{ "json": catalog }])
}

/// A catalog with a few common node types.
///
/// `httpRequest` 4.2, `set` 3.4, `if` 2.2, `respondWith` 1.1 (the alias key for
/// respond-to-webhook) and `code` with no version info at all.
#[allow(dead_code)]
pub fn mixed_catalog() -> VersionCatalog {
    VersionCatalog::from_value(&json!({
        "httpRequest": { "version_info": { "latest_version": 4.2 } },
        "set": { "version_info": { "latest_version": 3.4 } },
        "if": { "version_info": { "latest_version": 2.2 } },
        "respondWith": { "version_info": { "latest_version": 1.1 } },
        "code": {}
    }))
}

/// Two workflows mixing outdated, current and unknown nodes.
///
/// Billing: httpRequest 3 (outdated), set 3.4 (current), acme.custom (unmatched).
/// Alerts: if 2 (outdated), respondToWebhook 1 (outdated), code 1 (current, latest 0).
#[allow(dead_code)]
pub fn mixed_workflows() -> Vec<Workflow> {
    vec![
        Workflow::new(
            "wf-billing",
            "Billing",
            vec![
                NodeInstance::new("n8n-nodes-base.httpRequest", 3.0, "Fetch invoices"),
                NodeInstance::new("n8n-nodes-base.set", 3.4, "Shape"),
                NodeInstance::new("acme.custom", 1.0, "Acme"),
            ],
        ),
        Workflow::new(
            "wf-alerts",
            "Alerts",
            vec![
                NodeInstance::new("n8n-nodes-base.if", 2.0, "Check"),
                NodeInstance::new("n8n-nodes-base.respondToWebhook", 1.0, "Reply"),
                NodeInstance::new("n8n-nodes-base.code", 1.0, "Script"),
            ],
        ),
    ]
}

/// A minimal `AnalysisRecord` for aggregation and rendering tests.
#[allow(dead_code)]
pub fn record(workflow: &str, id: &str, node: &str, status: NodeStatus) -> AnalysisRecord {
    let (current, latest) = match status {
        NodeStatus::Outdated => (1.0, 2.0),
        NodeStatus::Current => (2.0, 2.0),
        NodeStatus::Unmatched => (0.0, 0.0),
    };
    AnalysisRecord {
        workflow_name: workflow.to_string(),
        workflow_id: id.to_string(),
        node_type: format!("n8n-nodes-base.{node}"),
        current_version: current,
        latest_version: latest,
        node_name: node.to_string(),
        matched: status.is_match(),
        status,
    }
}
