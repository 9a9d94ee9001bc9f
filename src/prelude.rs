//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from the nodeaudit
//! crate. Import this module to get access to the core functionality without having to
//! import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use nodeaudit::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog = VersionCatalog::from_file("node_versions.json")?;
//! let workflows: Vec<Workflow> = vec![Workflow::new(
//!     "w1",
//!     "Invoices",
//!     vec![NodeInstance::new("n8n-nodes-base.httpRequest", 3.0, "Fetch")],
//! )];
//!
//! let outcome = Analyzer::new().analyze(&workflows, &catalog);
//! let grouped = group(outcome.records);
//!
//! let html = ReportRenderer::new("http://localhost:5678").render(&grouped, ReportStyle::Plain);
//! println!("{html}");
//! # Ok(())
//! # }
//! ```

// Pipeline
pub use crate::aggregate::{GroupedResults, WorkflowGroup, group};
pub use crate::analyzer::{AnalysisOutcome, AnalysisRecord, AnalysisSummary, Analyzer, NodeStatus};
pub use crate::audit::{Audit, AuditMode, AuditOutput, AuditRun};

// Inputs
pub use crate::catalog::{CatalogEntry, Version, VersionCatalog, VersionComparison, VersionInfo};
pub use crate::resolver::{NodeTypeResolver, ResolverBuilder};
pub use crate::workflow::{IntoWorkflows, NodeInstance, RawNode, Workflow};

// Output and configuration
pub use crate::config::AuditConfig;
pub use crate::report::{ReportRenderer, ReportStyle};

// Error types
pub use crate::error::{CatalogError, InputError, NodeError};

// Result type alias for convenience
pub type Result<T, E = Box<dyn std::error::Error>> = std::result::Result<T, E>;
