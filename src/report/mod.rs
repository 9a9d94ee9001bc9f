//! HTML rendering of grouped analysis results.
//!
//! Every style renders the same data: a heading per workflow linking back to the
//! workflow in the host platform, followed by a table of its records. Styles only
//! differ in markup. Row status is taken verbatim from each record.

use crate::aggregate::{GroupedResults, WorkflowGroup};
use crate::analyzer::{AnalysisRecord, NodeStatus};
use crate::catalog::format_version;
use html_escape::{encode_double_quoted_attribute, encode_text};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use tracing::debug;
use url::Url;

mod cards;
mod plain;

pub use cards::CardSkin;
pub use plain::PlainSkin;

/// Placeholder link for workflows without an id.
pub const MISSING_LINK: &str = "#";

/// The available presentation styles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStyle {
    /// Inline-styled tables; no stylesheet required.
    #[default]
    Plain,
    /// Bootstrap cards with striped tables.
    Cards,
}

impl ReportStyle {
    pub fn skin(self) -> &'static dyn ReportSkin {
        match self {
            ReportStyle::Plain => &PlainSkin,
            ReportStyle::Cards => &CardSkin,
        }
    }
}

/// A workflow heading, already escaped.
pub struct Heading<'a> {
    pub title: Cow<'a, str>,
    pub href: Cow<'a, str>,
}

/// A table row, already escaped and formatted.
pub struct Row<'a> {
    pub node_name: Cow<'a, str>,
    pub node_type: Cow<'a, str>,
    pub current_version: String,
    pub latest_version: String,
    pub status: NodeStatus,
}

impl<'a> Row<'a> {
    fn from_record(record: &'a AnalysisRecord) -> Self {
        Self {
            node_name: encode_text(&record.node_name),
            node_type: encode_text(&record.node_type),
            current_version: format_version(record.current_version),
            latest_version: format_version(record.latest_version),
            status: record.status,
        }
    }
}

/// Defines the markup for one presentation style.
pub trait ReportSkin: Send + Sync {
    /// Whether the full node type column is shown when the renderer does not say.
    fn shows_node_type(&self) -> bool;

    fn open_document(&self, _out: &mut String) {}

    fn close_document(&self, _out: &mut String) {}

    fn workflow(
        &self,
        out: &mut String,
        heading: &Heading<'_>,
        rows: &[Row<'_>],
        show_type: bool,
    );

    /// An inline banner shown instead of the report when the run failed.
    fn error_banner(&self, message: &str) -> String;
}

/// Turns grouped results into an HTML fragment.
#[derive(Debug, Clone)]
pub struct ReportRenderer {
    base_url: String,
    show_node_type: Option<bool>,
}

impl ReportRenderer {
    /// `base_url` is the host platform's address; workflow links are
    /// `{base_url}/workflow/{id}`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            show_node_type: None,
        }
    }

    /// Forces the node type column on or off regardless of style.
    pub fn with_node_type_column(mut self, show: bool) -> Self {
        self.show_node_type = Some(show);
        self
    }

    /// The id is percent-encoded as a single path segment, so `/`, `?` and `#`
    /// inside an id cannot change the link target. A base that is not an absolute
    /// URL is joined as text.
    pub fn workflow_url(&self, workflow_id: &str) -> String {
        if workflow_id.is_empty() {
            return MISSING_LINK.to_string();
        }

        let base = self.base_url.trim_end_matches('/');
        match Url::parse(base) {
            Ok(mut url) if !url.cannot_be_a_base() => {
                if let Ok(mut segments) = url.path_segments_mut() {
                    segments.pop_if_empty().push("workflow").push(workflow_id);
                }
                url.to_string()
            }
            _ => {
                debug!(base_url = %self.base_url, "base url is not absolute");
                format!("{}/workflow/{}", base, workflow_id)
            }
        }
    }

    /// Renders every group in order. Never fails; an empty input yields an empty
    /// document shell.
    pub fn render(&self, grouped: &GroupedResults, style: ReportStyle) -> String {
        let skin = style.skin();
        let show_type = self.show_node_type.unwrap_or_else(|| skin.shows_node_type());
        let mut out = String::new();

        skin.open_document(&mut out);
        for group in grouped {
            self.render_group(skin, &mut out, group, show_type);
        }
        skin.close_document(&mut out);

        debug!(style = ?style, groups = grouped.len(), bytes = out.len(), "rendered report");
        out
    }

    pub fn render_error(&self, message: &str, style: ReportStyle) -> String {
        style.skin().error_banner(&encode_text(message))
    }

    fn render_group(
        &self,
        skin: &dyn ReportSkin,
        out: &mut String,
        group: &WorkflowGroup,
        show_type: bool,
    ) {
        let url = self.workflow_url(group.workflow_id());
        let heading = Heading {
            title: encode_text(&group.name),
            href: Cow::Owned(encode_double_quoted_attribute(&url).into_owned()),
        };
        let rows: Vec<Row<'_>> = group.records.iter().map(Row::from_record).collect();
        skin.workflow(out, &heading, &rows, show_type);
    }
}
