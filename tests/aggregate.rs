//! Tests for grouping records by workflow.
mod common;
use common::*;
use nodeaudit::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;

#[cfg(test)]
mod grouping_tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_groups_follow_first_appearance() {
        let records = vec![
            record("Beta", "b", "set", NodeStatus::Outdated),
            record("Alpha", "a", "if", NodeStatus::Outdated),
            record("Beta", "b", "code", NodeStatus::Unmatched),
            record("Alpha", "a", "merge", NodeStatus::Unmatched),
        ];

        let grouped = group(records);
        assert_eq!(grouped.names().collect::<Vec<_>>(), vec!["Beta", "Alpha"]);

        let beta: Vec<&str> = grouped
            .get("Beta")
            .unwrap()
            .iter()
            .map(|r| r.node_name.as_str())
            .collect();
        assert_eq!(beta, vec!["set", "code"]);
        assert_eq!(grouped.record_count(), 4);
    }

    #[test]
    fn test_same_name_workflows_share_a_group() {
        let records = vec![
            record("Shared", "first", "set", NodeStatus::Outdated),
            record("Shared", "second", "if", NodeStatus::Outdated),
        ];

        let grouped = group(records);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped.groups()[0].records.len(), 2);
        // The heading links to the first record's workflow.
        assert_eq!(grouped.groups()[0].workflow_id(), "first");
    }

    #[test]
    fn test_empty_input() {
        let grouped = group(Vec::new());
        assert!(grouped.is_empty());
        assert_eq!(grouped.get("anything"), None);
        assert_eq!(serde_json::to_value(&grouped).unwrap(), json!({}));
    }

    #[test]
    fn test_serializes_as_ordered_object() {
        let grouped = group(vec![
            record("Zeta", "z", "set", NodeStatus::Outdated),
            record("Alpha", "a", "if", NodeStatus::Unmatched),
        ]);

        let text = serde_json::to_string(&grouped).unwrap();
        assert!(text.find("Zeta").unwrap() < text.find("Alpha").unwrap());

        let value = serde_json::to_value(&grouped).unwrap();
        assert_eq!(
            value["Zeta"][0],
            json!({
                "workflow_name": "Zeta",
                "workflow_id": "z",
                "node_type": "n8n-nodes-base.set",
                "current_version": 1.0,
                "latest_version": 2.0,
                "node_name": "set",
                "match": true,
                "status": "outdated"
            })
        );
        assert_eq!(value["Alpha"][0]["match"], json!(false));
        let keys: Vec<&String> = value.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["Zeta", "Alpha"]);
    }

    #[test]
    fn test_grouping_drops_nothing() {
        let outcome = Analyzer::new()
            .include_current(true)
            .analyze(&mixed_workflows(), &mixed_catalog());
        let total = outcome.records.len();

        let grouped = group(outcome.records);
        assert_eq!(grouped.record_count(), total);
        for group in &grouped {
            assert!(group.records.iter().all(|r| r.workflow_name == group.name));
        }
    }
}
