//! # nodeaudit - Workflow Node Version Audit
//!
//! **nodeaudit** inspects the workflows of an automation platform, compares the
//! version of every node instance against a catalog of the latest known version of
//! each node type, and reports which nodes are outdated or unknown to the catalog.
//! Results are grouped by workflow and returned either as structured JSON or as an
//! HTML report linking back to each workflow.
//!
//! ## Core Workflow
//!
//! Data flows one way through the pipeline:
//!
//! 1.  **Load**: Read workflows (from host items, or your own format through
//!     `IntoWorkflows`) and a `VersionCatalog`.
//! 2.  **Analyze**: An `Analyzer` resolves each node's type to its catalog key with a
//!     `NodeTypeResolver`, looks it up and classifies the node as outdated, current or
//!     unmatched. Malformed nodes are skipped and reported.
//! 3.  **Group**: `aggregate::group` partitions the records by workflow name.
//! 4.  **Output**: Pass the groups through as JSON, or render them with a
//!     `ReportRenderer` in one of the `ReportStyle`s.
//!
//! `Audit` wires all four steps together from an `AuditConfig` and never fails:
//! errors come back as an error payload in the requested output shape.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nodeaudit::prelude::*;
//! use serde_json::json;
//!
//! fn main() -> Result<()> {
//!     let nodes_in_use = json!([
//!         { "json": {
//!             "id": "w1",
//!             "name": "Invoices",
//!             "nodes": [
//!                 { "type": "n8n-nodes-base.httpRequest", "typeVersion": 3, "name": "Fetch" }
//!             ]
//!         } }
//!     ]);
//!     let node_versions = json!([
//!         { "json": { "httpRequest": { "version_info": { "latest_version": 4.2 } } } }
//!     ]);
//!
//!     // Configure where workflow links point and how the report looks.
//!     let config = AuditConfig::default()
//!         .with_base_url("https://automation.example.com")
//!         .with_style(ReportStyle::Cards);
//!     let audit = Audit::from_config(&config);
//!
//!     // Structured output: { "json": { "Invoices": [ ... ] } }
//!     let structured = audit.run(Some(&nodes_in_use), Some(&node_versions), AuditMode::Structured);
//!     println!("{}", structured.to_value());
//!
//!     // Or work with the typed results directly.
//!     let run = audit.try_run(Some(&nodes_in_use), Some(&node_versions))?;
//!     let summary = run.outcome.summary();
//!     println!("{} outdated, {} unmatched", summary.outdated, summary.unmatched);
//!
//!     let html = audit.renderer().render(&run.grouped, ReportStyle::Plain);
//!     std::fs::write("report.html", html)?;
//!
//!     Ok(())
//! }
//! ```

pub mod aggregate;
pub mod analyzer;
pub mod audit;
pub mod catalog;
pub mod config;
pub mod error;
pub mod prelude;
pub mod report;
pub mod resolver;
pub mod workflow;

#[cfg(feature = "python-bindings")]
mod python;
