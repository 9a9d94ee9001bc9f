use crate::audit::{Audit, AuditMode};
use crate::config::AuditConfig;
use crate::report::ReportStyle;
use pyo3::prelude::*;
use serde_json::Value;

fn parse_input(label: &str, json: Option<&str>) -> PyResult<Option<Value>> {
    json.map(|text| {
        serde_json::from_str(text).map_err(|e| {
            PyErr::new::<pyo3::exceptions::PyValueError, _>(format!("{label}: {e}"))
        })
    })
    .transpose()
}

fn parse_style(style: Option<&str>) -> PyResult<ReportStyle> {
    match style {
        None | Some("plain") => Ok(ReportStyle::Plain),
        Some("cards") => Ok(ReportStyle::Cards),
        Some(other) => Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
            "Unknown report style '{other}', expected 'plain' or 'cards'"
        ))),
    }
}

/// Audits workflows for outdated node versions.
///
/// Both inputs are JSON strings shaped the way the host platform hands them
/// over: a list of `{"json": ...}` items.
#[pyclass(name = "NodeAudit")]
struct NodeAuditPy {
    audit: Audit,
}

#[pymethods]
impl NodeAuditPy {
    /// Creates an auditor.
    ///
    /// Args:
    ///     base_url (str | None): Address of the host platform used for workflow
    ///         links. Defaults to http://localhost:5678.
    ///     style (str | None): Report style, "plain" (default) or "cards".
    ///     config_json (str | None): A full JSON config. `base_url` and `style`
    ///         override its values when given.
    ///
    /// Raises:
    ///     ValueError: If the config or the style is invalid.
    #[new]
    #[pyo3(signature = (base_url=None, style=None, config_json=None))]
    fn new(base_url: Option<String>, style: Option<&str>, config_json: Option<&str>) -> PyResult<Self> {
        let mut config = match config_json {
            Some(json) => AuditConfig::from_json_str(json)
                .map_err(|e| PyErr::new::<pyo3::exceptions::PyValueError, _>(e.to_string()))?,
            None => AuditConfig::default(),
        };
        if let Some(base_url) = base_url {
            config = config.with_base_url(base_url);
        }
        if style.is_some() {
            config = config.with_style(parse_style(style)?);
        }

        Ok(NodeAuditPy {
            audit: Audit::from_config(&config),
        })
    }

    /// Analyzes the workflows and returns `{"json": ...}` as a JSON string.
    ///
    /// Failures are reported inside the payload as `{"json": {"error": ...}}`.
    ///
    /// Raises:
    ///     ValueError: If either argument is not valid JSON.
    #[pyo3(signature = (nodes_in_use=None, node_versions=None))]
    fn analyze(&self, nodes_in_use: Option<&str>, node_versions: Option<&str>) -> PyResult<String> {
        self.run(nodes_in_use, node_versions, AuditMode::Structured)
    }

    /// Renders the HTML report and returns `{"html": ...}` as a JSON string.
    ///
    /// Raises:
    ///     ValueError: If either argument is not valid JSON.
    #[pyo3(signature = (nodes_in_use=None, node_versions=None))]
    fn report(&self, nodes_in_use: Option<&str>, node_versions: Option<&str>) -> PyResult<String> {
        self.run(nodes_in_use, node_versions, AuditMode::Report)
    }
}

impl NodeAuditPy {
    fn run(
        &self,
        nodes_in_use: Option<&str>,
        node_versions: Option<&str>,
        mode: AuditMode,
    ) -> PyResult<String> {
        let nodes_in_use = parse_input("nodes_in_use", nodes_in_use)?;
        let node_versions = parse_input("node_versions", node_versions)?;
        let output = self
            .audit
            .run(nodes_in_use.as_ref(), node_versions.as_ref(), mode);
        Ok(output.to_value().to_string())
    }
}

/// Workflow node version audit.
///
/// Python bindings to the nodeaudit Rust library.
#[pymodule]
fn nodeaudit(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<NodeAuditPy>()?;
    Ok(())
}
