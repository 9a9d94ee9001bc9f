//! Tests for node classification.
mod common;
use common::*;
use nodeaudit::error::{InputError, NodeError};
use nodeaudit::prelude::*;
use nodeaudit::workflow::{UNKNOWN_NODE, UNKNOWN_WORKFLOW};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};

fn node_names(outcome: &AnalysisOutcome) -> Vec<&str> {
    outcome.records.iter().map(|r| r.node_name.as_str()).collect()
}

#[cfg(test)]
mod classification_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_outdated_then_unmatched_and_current_excluded() {
        let outcome = Analyzer::new().analyze(&mixed_workflows(), &mixed_catalog());

        // Outdated in workflow/node order, then unmatched; current nodes dropped.
        assert_eq!(node_names(&outcome), vec!["Fetch invoices", "Check", "Reply", "Acme"]);
        assert_eq!(outcome.current_count, 2);
        assert!(outcome.skipped.is_empty());

        let statuses: Vec<NodeStatus> = outcome.records.iter().map(|r| r.status).collect();
        assert_eq!(
            statuses,
            vec![
                NodeStatus::Outdated,
                NodeStatus::Outdated,
                NodeStatus::Outdated,
                NodeStatus::Unmatched
            ]
        );
    }

    #[test]
    fn test_outdated_record_fields() {
        let outcome = Analyzer::new().analyze(&mixed_workflows(), &mixed_catalog());
        let fetch = &outcome.records[0];

        assert_eq!(fetch.workflow_name, "Billing");
        assert_eq!(fetch.workflow_id, "wf-billing");
        assert_eq!(fetch.node_type, "httpRequest");
        assert_eq!(fetch.current_version, 3.0);
        assert_eq!(fetch.latest_version, 4.2);
        assert!(fetch.matched);
    }

    #[test]
    fn test_unmatched_keeps_raw_type_and_zeroes_versions() {
        let outcome = Analyzer::new().analyze(&mixed_workflows(), &mixed_catalog());
        let acme = outcome.unmatched().next().expect("one unmatched record");

        assert_eq!(acme.node_type, "acme.custom");
        assert_eq!(acme.current_version, 0.0);
        assert_eq!(acme.latest_version, 0.0);
        assert!(!acme.matched);
    }

    #[test]
    fn test_alias_resolution_reaches_catalog() {
        let outcome = Analyzer::new().analyze(&mixed_workflows(), &mixed_catalog());
        let reply = outcome
            .outdated()
            .find(|r| r.node_name == "Reply")
            .expect("respond-to-webhook node is outdated");
        assert_eq!(reply.node_type, "respondWith");
        assert_eq!(reply.latest_version, 1.1);
    }

    #[test]
    fn test_entry_without_version_info_is_a_match() {
        // `code` has no version info, so it is found with latest 0 and counts as current.
        let workflows = vec![Workflow::new(
            "w",
            "W",
            vec![NodeInstance::new("n8n-nodes-base.code", 0.0, "Script")],
        )];
        let outcome = Analyzer::new().analyze(&workflows, &mixed_catalog());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.current_count, 1);
    }

    #[test]
    fn test_include_current_keeps_current_records_between() {
        let outcome = Analyzer::new()
            .include_current(true)
            .analyze(&mixed_workflows(), &mixed_catalog());

        assert_eq!(
            node_names(&outcome),
            vec!["Fetch invoices", "Check", "Reply", "Shape", "Script", "Acme"]
        );
        assert_eq!(outcome.records[3].status, NodeStatus::Current);
        assert!(outcome.records[3].matched);
    }

    #[test]
    fn test_summary_counts() {
        let outcome = Analyzer::new().analyze(&mixed_workflows(), &mixed_catalog());
        let summary = outcome.summary();

        assert_eq!(summary.workflows, 2);
        assert_eq!(summary.nodes, 6);
        assert_eq!(summary.outdated, 3);
        assert_eq!(summary.current, 2);
        assert_eq!(summary.unmatched, 1);
        assert_eq!(summary.skipped, 0);
    }

    #[test]
    fn test_segmented_comparison() {
        let workflow = Workflow::from_value(&json!({
            "id": "w",
            "name": "W",
            "nodes": [{ "type": "n8n-nodes-base.set", "typeVersion": "1.9", "name": "Set" }]
        }))
        .unwrap();
        let catalog = VersionCatalog::from_value(&json!({
            "set": { "version_info": { "latest_version": "1.10" } }
        }));

        let numeric = Analyzer::new().analyze(std::slice::from_ref(&workflow), &catalog);
        assert!(numeric.records.is_empty());

        let segmented = Analyzer::new()
            .with_comparison(VersionComparison::Segmented)
            .analyze(std::slice::from_ref(&workflow), &catalog);
        assert_eq!(segmented.records.len(), 1);
        assert_eq!(segmented.records[0].status, NodeStatus::Outdated);
    }

    #[test]
    fn test_analysis_is_repeatable() {
        let analyzer = Analyzer::new();
        let workflows = mixed_workflows();
        let catalog = mixed_catalog();

        let first = group(analyzer.analyze(&workflows, &catalog).records);
        let second = group(analyzer.analyze(&workflows, &catalog).records);
        assert_eq!(first, second);
    }
}

#[cfg(test)]
mod parsing_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_missing_fields_are_defaulted() {
        let workflow = Workflow::from_value(&json!({
            "nodes": [{ "type": "acme.thing" }, {}]
        }))
        .unwrap();
        assert_eq!(workflow.name, UNKNOWN_WORKFLOW);
        assert_eq!(workflow.id, "");

        let node = workflow.nodes[0].parse().unwrap();
        assert_eq!(node.name, UNKNOWN_NODE);
        assert_eq!(node.type_version.value(), 0.0);

        let empty = workflow.nodes[1].parse().unwrap();
        assert_eq!(empty.node_type, "");
    }

    #[test]
    fn test_falsy_names_fall_back_and_numbers_are_rendered() {
        let workflow = Workflow::from_value(&json!({
            "id": 42,
            "name": "",
            "nodes": [{ "type": "a.b", "name": 7 }, { "type": "a.b", "name": false }]
        }))
        .unwrap();
        assert_eq!(workflow.name, UNKNOWN_WORKFLOW);
        assert_eq!(workflow.id, "42");
        assert_eq!(workflow.nodes[0].parse().unwrap().name, "7");
        assert_eq!(workflow.nodes[1].parse().unwrap().name, UNKNOWN_NODE);
    }

    #[test]
    fn test_malformed_nodes_are_errors() {
        let not_object = RawNode(json!("n8n-nodes-base.set")).parse();
        assert!(matches!(not_object, Err(NodeError::NotAnObject { .. })));

        let bad_type = RawNode(json!({ "type": 12 })).parse();
        assert!(matches!(bad_type, Err(NodeError::InvalidType { .. })));

        // Falsy non-string types are treated as absent.
        let falsy = RawNode(json!({ "type": 0, "name": "Zero" })).parse().unwrap();
        assert_eq!(falsy.node_type, "");
    }

    #[test]
    fn test_malformed_node_is_skipped_and_reported() {
        let workflow = Workflow::from_value(&json!({
            "id": "w1",
            "name": "Mixed",
            "nodes": [
                { "type": "n8n-nodes-base.set", "typeVersion": 1, "name": "Before" },
                null,
                { "type": ["not", "a", "string"], "name": "Broken" },
                { "type": "unknown.node", "name": "After" }
            ]
        }))
        .unwrap();

        let outcome = Analyzer::new().analyze(&[workflow], &mixed_catalog());
        assert_eq!(node_names(&outcome), vec!["Before", "After"]);

        assert_eq!(outcome.skipped.len(), 2);
        assert_eq!(outcome.skipped[0].node_index, 1);
        assert_eq!(outcome.skipped[0].node_name, None);
        assert_eq!(outcome.skipped[1].node_index, 2);
        assert_eq!(outcome.skipped[1].node_name.as_deref(), Some("Broken"));
        assert_eq!(outcome.skipped[1].workflow_name, "Mixed");
        assert_eq!(outcome.summary().nodes, 4);
    }

    #[test]
    fn test_nodes_must_be_a_list() {
        let result = Workflow::from_value(&json!({ "name": "Broken", "nodes": "oops" }));
        assert_eq!(
            result,
            Err(InputError::MalformedNodes {
                workflow: "Broken".to_string()
            })
        );

        let absent = Workflow::from_value(&json!({ "name": "Empty", "nodes": null })).unwrap();
        assert!(absent.nodes.is_empty());
    }

    #[test]
    fn test_falsy_nodes_default_to_empty() {
        for nodes in [json!(false), json!(0), json!("")] {
            let workflow =
                Workflow::from_value(&json!({ "id": "w1", "name": "Demo", "nodes": nodes }))
                    .unwrap();
            assert!(workflow.nodes.is_empty(), "{nodes}");
        }

        // A workflow without nodes does not sink the others.
        let items = nodes_in_use(vec![
            json!({ "id": "w0", "name": "Idle", "nodes": false }),
            demo_workflow_json(),
        ]);
        let output = Audit::new().run(
            Some(&items),
            Some(&node_versions(demo_catalog_json())),
            AuditMode::Structured,
        );
        let value = output.to_value();
        assert_eq!(value["json"]["Demo"][0]["node_name"], json!("Set Data"));
        assert!(value["json"].get("error").is_none());
    }

    #[test]
    fn test_primitive_node_entries_are_skipped() {
        let workflow =
            Workflow::from_value(&json!({ "name": "Odd", "nodes": ["abc", 5] })).unwrap();

        let outcome = Analyzer::new().analyze(&[workflow], &mixed_catalog());
        assert!(outcome.records.is_empty());
        assert_eq!(outcome.skipped.len(), 2);
        assert!(outcome.skipped.iter().all(|s| s.node_name.is_none()));
    }

    #[test]
    fn test_items_input() {
        let items = nodes_in_use(vec![demo_workflow_json()]);
        let catalog = VersionCatalog::from_value(&demo_catalog_json());

        let outcome = Analyzer::new().analyze_items(&items, &catalog).unwrap();
        assert_eq!(outcome.records.len(), 1);

        let not_a_list = Analyzer::new()
            .analyze_items(&json!({ "json": demo_workflow_json() }), &catalog)
            .unwrap();
        assert!(not_a_list.records.is_empty());
        assert_eq!(not_a_list.workflow_count, 0);

        let missing_payload = Analyzer::new().analyze_items(&json!([{ "other": 1 }]), &catalog);
        assert_eq!(missing_payload, Err(InputError::MissingPayload { index: 0 }));
    }

    #[test]
    fn test_into_workflows_from_items() {
        let items: Value = nodes_in_use(vec![demo_workflow_json(), json!({ "name": "Second" })]);
        let workflows = (&items).into_workflows().unwrap();
        assert_eq!(workflows.len(), 2);
        assert_eq!(workflows[0].name, "Demo");
        assert_eq!(workflows[1].nodes.len(), 0);
    }
}
