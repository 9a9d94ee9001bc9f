use super::{Heading, ReportSkin, Row};
use crate::analyzer::NodeStatus;
use std::fmt::Write;

/// Bootstrap card per workflow wrapping a striped, hoverable table.
pub struct CardSkin;

impl CardSkin {
    fn badge_class(status: NodeStatus) -> &'static str {
        match status {
            NodeStatus::Outdated => "badge bg-warning text-dark",
            NodeStatus::Current => "badge bg-success",
            NodeStatus::Unmatched => "badge bg-secondary",
        }
    }
}

impl ReportSkin for CardSkin {
    fn shows_node_type(&self) -> bool {
        true
    }

    fn open_document(&self, out: &mut String) {
        out.push_str(r#"<div class="container-fluid">"#);
    }

    fn close_document(&self, out: &mut String) {
        out.push_str("</div>");
    }

    fn workflow(
        &self,
        out: &mut String,
        heading: &Heading<'_>,
        rows: &[Row<'_>],
        show_type: bool,
    ) {
        out.push_str(r#"<div class="card mb-4"><div class="card-header bg-light"><h2 class="h5 mb-0">"#);
        let _ = write!(
            out,
            r#"<a href="{}" class="link-dark link-offset-2 link-underline-opacity-25 link-underline-opacity-100-hover" target="_blank">{}</a>"#,
            heading.href, heading.title
        );
        out.push_str("</h2></div>");

        out.push_str(r#"<div class="card-body p-0"><div class="table-responsive">"#);
        out.push_str(r#"<table class="table table-hover table-striped mb-0"><thead class="table-light"><tr>"#);
        let name_width = if show_type { 30 } else { 60 };
        let _ = write!(out, r#"<th scope="col" style="width: {name_width}%">Node</th>"#);
        if show_type {
            out.push_str(r#"<th scope="col" style="width: 30%">Node type</th>"#);
        }
        out.push_str(r#"<th scope="col" style="width: 10%">Current version</th>"#);
        out.push_str(r#"<th scope="col" style="width: 10%">Latest version</th>"#);
        out.push_str(r#"<th scope="col" style="width: 20%">Status</th>"#);
        out.push_str("</tr></thead><tbody>");

        for row in rows {
            out.push_str("<tr>");
            let _ = write!(out, "<td>{}</td>", row.node_name);
            if show_type {
                let _ = write!(out, "<td>{}</td>", row.node_type);
            }
            let _ = write!(out, "<td>{}</td>", row.current_version);
            let _ = write!(out, "<td>{}</td>", row.latest_version);
            let _ = write!(
                out,
                r#"<td><span class="{}">{} {}</span></td>"#,
                Self::badge_class(row.status),
                row.status.icon(),
                row.status.label()
            );
            out.push_str("</tr>");
        }

        out.push_str("</tbody></table></div></div></div>");
    }

    fn error_banner(&self, message: &str) -> String {
        format!(r#"<div class="alert alert-danger">{message}</div>"#)
    }
}
