//! End-to-end audit runs over host-shaped inputs.
//!
//! [`Audit`] chains the whole pipeline: unwrap the host items, analyze, group and
//! then either pass the grouped records through or render them as HTML. A run
//! never fails towards its caller; any error becomes an error payload in the
//! requested output shape.

use crate::aggregate::{self, GroupedResults};
use crate::analyzer::{AnalysisOutcome, Analyzer};
use crate::config::AuditConfig;
use crate::error::InputError;
use crate::report::{ReportRenderer, ReportStyle};
use crate::workflow::catalog_from_items;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tracing::{error, info_span};

/// Which output shape a run produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuditMode {
    /// Grouped records as JSON.
    #[default]
    Structured,
    /// An HTML report.
    Report,
}

/// The host-shaped result of a run.
///
/// Serializes as `{ "json": ... }` or `{ "html": ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AuditOutput {
    Structured { json: Value },
    Report { html: String },
}

impl AuditOutput {
    pub fn to_value(&self) -> Value {
        match self {
            AuditOutput::Structured { json } => json!({ "json": json }),
            AuditOutput::Report { html } => json!({ "html": html }),
        }
    }

    /// The document body: pretty JSON for structured output, HTML otherwise.
    pub fn body(&self) -> String {
        match self {
            AuditOutput::Structured { json } => {
                serde_json::to_string_pretty(json).unwrap_or_else(|_| json.to_string())
            }
            AuditOutput::Report { html } => html.clone(),
        }
    }
}

/// A successful run before it is shaped for output.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditRun {
    pub outcome: AnalysisOutcome,
    pub grouped: GroupedResults,
}

/// The configured pipeline.
#[derive(Debug)]
pub struct Audit {
    analyzer: Analyzer,
    renderer: ReportRenderer,
    style: ReportStyle,
}

impl Default for Audit {
    fn default() -> Self {
        Self::from_config(&AuditConfig::default())
    }
}

impl Audit {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        let analyzer = Analyzer::new()
            .with_resolver(config.analysis.resolver())
            .with_comparison(config.analysis.comparison)
            .include_current(config.analysis.include_current);

        let mut renderer = ReportRenderer::new(config.report.base_url.clone());
        if let Some(show) = config.report.show_node_type {
            renderer = renderer.with_node_type_column(show);
        }

        Self {
            analyzer,
            renderer,
            style: config.report.style,
        }
    }

    pub fn analyzer(&self) -> &Analyzer {
        &self.analyzer
    }

    pub fn renderer(&self) -> &ReportRenderer {
        &self.renderer
    }

    pub fn style(&self) -> ReportStyle {
        self.style
    }

    /// Runs the pipeline and shapes the result for `mode`. Never fails.
    pub fn run(
        &self,
        nodes_in_use: Option<&Value>,
        node_versions: Option<&Value>,
        mode: AuditMode,
    ) -> AuditOutput {
        let result = self.try_run(nodes_in_use, node_versions);
        self.shape(&result, mode)
    }

    /// Runs the pipeline up to grouping.
    ///
    /// Absent or `null` inputs give [`InputError::MissingInput`].
    pub fn try_run(
        &self,
        nodes_in_use: Option<&Value>,
        node_versions: Option<&Value>,
    ) -> Result<AuditRun, InputError> {
        let _span = info_span!("audit").entered();

        let (Some(nodes_in_use), Some(node_versions)) =
            (present(nodes_in_use), present(node_versions))
        else {
            return Err(InputError::MissingInput);
        };

        let catalog = catalog_from_items(node_versions);
        let outcome = self.analyzer.analyze_items(nodes_in_use, &catalog)?;
        let grouped = aggregate::group(outcome.records.clone());

        Ok(AuditRun { outcome, grouped })
    }

    /// Shapes a run result, turning errors into the error payload of `mode`.
    pub fn shape(&self, result: &Result<AuditRun, InputError>, mode: AuditMode) -> AuditOutput {
        let run = match result {
            Ok(run) => run,
            Err(e) => return self.failure(&error_message(e), mode),
        };

        match mode {
            AuditMode::Structured => match serde_json::to_value(&run.grouped) {
                Ok(json) => AuditOutput::Structured { json },
                Err(e) => self.failure(&format!("Critical error: {e}"), mode),
            },
            AuditMode::Report => AuditOutput::Report {
                html: self.renderer.render(&run.grouped, self.style),
            },
        }
    }

    fn failure(&self, message: &str, mode: AuditMode) -> AuditOutput {
        error!(reason = message, "audit failed");
        match mode {
            AuditMode::Structured => AuditOutput::Structured {
                json: json!({ "error": message }),
            },
            AuditMode::Report => AuditOutput::Report {
                html: self.renderer.render_error(message, self.style),
            },
        }
    }
}

/// The message placed in an error payload.
pub fn error_message(error: &InputError) -> String {
    match error {
        InputError::MissingInput => error.to_string(),
        other => format!("Critical error: {other}"),
    }
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}
