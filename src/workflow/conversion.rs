use super::definition::Workflow;
use crate::error::InputError;

/// A trait for custom data models that can be converted into audit-ready `Workflow`s.
///
/// Hosts that do not use the `[{ json: … }]` item layout implement this on their
/// own export format and hand the result straight to the analyzer.
///
/// # Example
///
/// ```rust,no_run
/// use nodeaudit::prelude::*;
/// use nodeaudit::error::InputError;
///
/// struct ExportedStep { kind: String, revision: f64, label: String }
/// struct ExportedPipeline { key: String, title: String, steps: Vec<ExportedStep> }
/// struct ExportedProject { pipelines: Vec<ExportedPipeline> }
///
/// impl IntoWorkflows for ExportedProject {
///     fn into_workflows(self) -> Result<Vec<Workflow>, InputError> {
///         Ok(self
///             .pipelines
///             .into_iter()
///             .map(|p| {
///                 let nodes = p
///                     .steps
///                     .into_iter()
///                     .map(|s| NodeInstance::new(s.kind, s.revision, s.label))
///                     .collect();
///                 Workflow::new(p.key, p.title, nodes)
///             })
///             .collect())
///     }
/// }
/// ```
pub trait IntoWorkflows {
    /// Consumes the object and converts it into workflows.
    fn into_workflows(self) -> Result<Vec<Workflow>, InputError>;
}

impl IntoWorkflows for Vec<Workflow> {
    fn into_workflows(self) -> Result<Vec<Workflow>, InputError> {
        Ok(self)
    }
}

impl IntoWorkflows for &serde_json::Value {
    /// Treats the value as a host item sequence.
    fn into_workflows(self) -> Result<Vec<Workflow>, InputError> {
        super::envelope::workflows_from_items(self)
    }
}
