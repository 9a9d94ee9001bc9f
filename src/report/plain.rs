use super::{Heading, ReportSkin, Row};
use crate::analyzer::NodeStatus;
use std::fmt::Write;

const CELL: &str = "border: 1px solid #ddd; padding: 8px;";
const HEADER_CELL: &str = "border: 1px solid #ddd; padding: 8px; text-align: left;";
const OUTDATED_ROW: &str = "background-color: #fff3f3;";

/// Inline-styled headings and tables that render without any stylesheet.
pub struct PlainSkin;

impl ReportSkin for PlainSkin {
    fn shows_node_type(&self) -> bool {
        false
    }

    fn workflow(
        &self,
        out: &mut String,
        heading: &Heading<'_>,
        rows: &[Row<'_>],
        show_type: bool,
    ) {
        let _ = write!(
            out,
            r#"<h2 style="margin: 20px 0 10px 0;"><a href="{}" style="text-decoration: none; color: #333;" target="_blank">{}</a></h2>"#,
            heading.href, heading.title
        );

        out.push_str(r#"<table style="border-collapse: collapse; width: 100%; margin-bottom: 30px;">"#);
        out.push_str(r#"<thead><tr style="background-color: #f5f5f5;">"#);
        let mut header = vec!["Node"];
        if show_type {
            header.push("Node type");
        }
        header.extend(["Current version", "Latest version", "Status"]);
        for title in header {
            let _ = write!(out, r#"<th style="{HEADER_CELL}">{title}</th>"#);
        }
        out.push_str("</tr></thead><tbody>");

        for row in rows {
            let row_style = if row.status == NodeStatus::Outdated {
                OUTDATED_ROW
            } else {
                ""
            };
            let _ = write!(out, r#"<tr style="{row_style}">"#);
            let _ = write!(out, r#"<td style="{CELL}">{}</td>"#, row.node_name);
            if show_type {
                let _ = write!(out, r#"<td style="{CELL}">{}</td>"#, row.node_type);
            }
            let _ = write!(out, r#"<td style="{CELL}">{}</td>"#, row.current_version);
            let _ = write!(out, r#"<td style="{CELL}">{}</td>"#, row.latest_version);
            let _ = write!(
                out,
                r#"<td style="{CELL}">{} {}</td>"#,
                row.status.icon(),
                row.status.label()
            );
            out.push_str("</tr>");
        }

        out.push_str("</tbody></table>");
    }

    fn error_banner(&self, message: &str) -> String {
        format!(r#"<div style="color: red;">{message}</div>"#)
    }
}
