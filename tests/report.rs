//! Tests for HTML report rendering.
mod common;
use common::*;
use nodeaudit::prelude::*;
use nodeaudit::report::MISSING_LINK;

fn renderer() -> ReportRenderer {
    ReportRenderer::new("https://automation.example.com")
}

#[cfg(test)]
mod link_tests {
    use super::*;

    #[test]
    fn test_workflow_url() {
        assert_eq!(
            renderer().workflow_url("w1"),
            "https://automation.example.com/workflow/w1"
        );
        assert_eq!(
            ReportRenderer::new("http://localhost:5678/").workflow_url("abc"),
            "http://localhost:5678/workflow/abc"
        );
        assert_eq!(renderer().workflow_url(""), MISSING_LINK);
    }

    #[test]
    fn test_workflow_id_is_one_path_segment() {
        assert_eq!(
            renderer().workflow_url("a/b?c#d"),
            "https://automation.example.com/workflow/a%2Fb%3Fc%23d"
        );
        assert_eq!(
            ReportRenderer::new("https://flows.example.org/n8n/").workflow_url("w 1"),
            "https://flows.example.org/n8n/workflow/w%201"
        );

        let grouped = group(vec![record("Tricky", "x/../y", "set", NodeStatus::Outdated)]);
        let html = renderer().render(&grouped, ReportStyle::Plain);
        assert!(html.contains(r#"href="https://automation.example.com/workflow/x%2F..%2Fy""#));
    }

    #[test]
    fn test_heading_links_to_first_record_workflow() {
        let grouped = group(vec![
            record("Billing", "wf-1", "set", NodeStatus::Outdated),
            record("Billing", "wf-2", "if", NodeStatus::Outdated),
        ]);

        for style in [ReportStyle::Plain, ReportStyle::Cards] {
            let html = renderer().render(&grouped, style);
            assert!(html.contains(r#"href="https://automation.example.com/workflow/wf-1""#));
            assert!(!html.contains("wf-2"));
        }
    }

    #[test]
    fn test_missing_id_uses_placeholder_link() {
        let grouped = group(vec![record("Orphan", "", "set", NodeStatus::Outdated)]);
        let html = renderer().render(&grouped, ReportStyle::Plain);
        assert!(html.contains(r##"href="#""##));
    }
}

#[cfg(test)]
mod content_tests {
    use super::*;

    fn mixed_grouped() -> GroupedResults {
        group(vec![
            record("Ops", "ops", "old", NodeStatus::Outdated),
            record("Ops", "ops", "fresh", NodeStatus::Current),
            record("Ops", "ops", "mystery", NodeStatus::Unmatched),
        ])
    }

    #[test]
    fn test_status_badges_follow_records() {
        for style in [ReportStyle::Plain, ReportStyle::Cards] {
            let html = renderer().render(&mixed_grouped(), style);
            assert_eq!(html.matches("⚠️ Outdated").count(), 1, "{style:?}");
            assert_eq!(html.matches("✅ Up to date").count(), 1, "{style:?}");
            assert_eq!(html.matches("❓ Not found").count(), 1, "{style:?}");
        }
    }

    #[test]
    fn test_status_is_not_recomputed_from_versions() {
        // A record marked current whose numbers would read as outdated keeps its status.
        let mut current = record("Ops", "ops", "pinned", NodeStatus::Current);
        current.current_version = 1.0;
        current.latest_version = 2.0;

        let html = renderer().render(&group(vec![current]), ReportStyle::Plain);
        assert!(html.contains("✅ Up to date"));
        assert!(!html.contains("Outdated"));
    }

    #[test]
    fn test_plain_style_tints_outdated_rows_only() {
        let html = renderer().render(&mixed_grouped(), ReportStyle::Plain);
        assert_eq!(html.matches("background-color: #fff3f3;").count(), 1);
        assert!(html.contains("<th"));
        assert!(!html.contains("Node type"));
    }

    #[test]
    fn test_cards_style_markup() {
        let html = renderer().render(&mixed_grouped(), ReportStyle::Cards);
        assert!(html.starts_with(r#"<div class="container-fluid">"#));
        assert!(html.contains(r#"class="card mb-4""#));
        assert!(html.contains("badge bg-warning text-dark"));
        assert!(html.contains("badge bg-success"));
        assert!(html.contains("badge bg-secondary"));
        assert!(html.contains("Node type"));
        assert!(html.contains("<td>n8n-nodes-base.old</td>"));
    }

    #[test]
    fn test_node_type_column_override() {
        let shown = renderer()
            .with_node_type_column(true)
            .render(&mixed_grouped(), ReportStyle::Plain);
        assert!(shown.contains("Node type"));
        assert!(shown.contains("n8n-nodes-base.old"));

        let hidden = renderer()
            .with_node_type_column(false)
            .render(&mixed_grouped(), ReportStyle::Cards);
        assert!(!hidden.contains("Node type"));
    }

    #[test]
    fn test_versions_use_host_number_format() {
        let mut rec = record("Ops", "ops", "set", NodeStatus::Outdated);
        rec.current_version = 3.0;
        rec.latest_version = 3.4;

        let html = renderer().render(&group(vec![rec]), ReportStyle::Cards);
        assert!(html.contains("<td>3</td>"));
        assert!(html.contains("<td>3.4</td>"));
        assert!(!html.contains("3.0"));
    }

    #[test]
    fn test_text_is_escaped() {
        let mut rec = record("<script>alert(1)</script>", "id\"x", "set", NodeStatus::Outdated);
        rec.node_name = "A & B <i>".to_string();

        let html = renderer().render(&group(vec![rec]), ReportStyle::Plain);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("A &amp; B &lt;i&gt;"));
        assert!(!html.contains(r#"id"x"#));
    }

    #[test]
    fn test_groups_render_in_order() {
        let grouped = group(vec![
            record("Second", "2", "a", NodeStatus::Outdated),
            record("First", "1", "b", NodeStatus::Outdated),
        ]);
        let html = renderer().render(&grouped, ReportStyle::Plain);
        assert!(html.find("Second").unwrap() < html.find("First").unwrap());
    }

    #[test]
    fn test_empty_results() {
        let empty = GroupedResults::default();
        assert_eq!(renderer().render(&empty, ReportStyle::Plain), "");
        assert_eq!(
            renderer().render(&empty, ReportStyle::Cards),
            r#"<div class="container-fluid"></div>"#
        );
    }

    #[test]
    fn test_error_banners() {
        let plain = renderer().render_error("Missing <data>", ReportStyle::Plain);
        assert_eq!(plain, r#"<div style="color: red;">Missing &lt;data&gt;</div>"#);

        let cards = renderer().render_error("Boom", ReportStyle::Cards);
        assert_eq!(cards, r#"<div class="alert alert-danger">Boom</div>"#);
    }
}
