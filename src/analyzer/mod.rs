use crate::catalog::{VersionCatalog, VersionComparison};
use crate::error::{InputError, NodeError};
use crate::resolver::NodeTypeResolver;
use crate::workflow::{RawNode, Workflow, workflows_from_items};
use itertools::Itertools;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, debug_span, info, warn};

mod record;

pub use record::{AnalysisRecord, NodeStatus};

/// A node that could not be analyzed and contributed no record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedNode {
    pub workflow_name: String,
    /// Position of the node inside its workflow.
    pub node_index: usize,
    pub node_name: Option<String>,
    pub reason: String,
}

/// Counts of each classification produced by one analysis run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AnalysisSummary {
    pub workflows: usize,
    pub nodes: usize,
    pub outdated: usize,
    pub current: usize,
    pub unmatched: usize,
    pub skipped: usize,
}

/// The result of an analysis run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisOutcome {
    /// Outdated records first, then unmatched ones, each in workflow then node order.
    /// Current records sit between the two when the analyzer keeps them.
    pub records: Vec<AnalysisRecord>,
    pub workflow_count: usize,
    pub current_count: usize,
    pub skipped: Vec<SkippedNode>,
}

impl AnalysisOutcome {
    pub fn summary(&self) -> AnalysisSummary {
        let counts = self.records.iter().counts_by(|r| r.status);
        let count = |status: NodeStatus| counts.get(&status).copied().unwrap_or(0);
        let outdated = count(NodeStatus::Outdated);
        let unmatched = count(NodeStatus::Unmatched);

        AnalysisSummary {
            workflows: self.workflow_count,
            nodes: outdated + unmatched + self.current_count + self.skipped.len(),
            outdated,
            current: self.current_count,
            unmatched,
            skipped: self.skipped.len(),
        }
    }

    pub fn outdated(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.with_status(NodeStatus::Outdated)
    }

    pub fn unmatched(&self) -> impl Iterator<Item = &AnalysisRecord> {
        self.with_status(NodeStatus::Unmatched)
    }

    fn with_status(&self, status: NodeStatus) -> impl Iterator<Item = &AnalysisRecord> {
        self.records.iter().filter(move |r| r.status == status)
    }
}

/// Walks workflows, resolves each node's type, looks it up in the catalog and
/// classifies it.
///
/// An `Analyzer` holds no per-run state; the same instance can analyze any number
/// of inputs and always returns the same outcome for the same input.
#[derive(Debug, Default)]
pub struct Analyzer {
    resolver: NodeTypeResolver,
    comparison: VersionComparison,
    include_current: bool,
}

impl Analyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: NodeTypeResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_comparison(mut self, comparison: VersionComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Keep records for up-to-date nodes instead of only counting them.
    pub fn include_current(mut self, include: bool) -> Self {
        self.include_current = include;
        self
    }

    pub fn resolver(&self) -> &NodeTypeResolver {
        &self.resolver
    }

    /// Classifies a single raw node entry.
    ///
    /// Fails only when the entry itself is malformed; missing fields are defaulted.
    pub fn analyze_node(
        &self,
        workflow: &Workflow,
        raw: &RawNode,
        catalog: &VersionCatalog,
    ) -> Result<AnalysisRecord, NodeError> {
        let node = raw.parse()?;
        let resolved = self.resolver.resolve(&node.node_type);

        let record = match catalog.entry(&resolved) {
            Some(entry) => {
                let latest = entry.latest_version();
                let outdated = self.comparison.is_outdated(&node.type_version, &latest);
                AnalysisRecord::matched(workflow, &node, &resolved, &latest, outdated)
            }
            None => AnalysisRecord::unmatched(workflow, &node),
        };

        debug!(
            node = %record.node_name,
            node_type = %node.node_type,
            resolved = %resolved,
            current = record.current_version,
            latest = record.latest_version,
            status = ?record.status,
            "classified node"
        );
        Ok(record)
    }

    /// Analyzes every node of every workflow.
    ///
    /// A node that fails to parse is skipped and listed in
    /// [`AnalysisOutcome::skipped`]; the remaining nodes are still analyzed.
    pub fn analyze(&self, workflows: &[Workflow], catalog: &VersionCatalog) -> AnalysisOutcome {
        let mut outdated = Vec::new();
        let mut current = Vec::new();
        let mut unmatched = Vec::new();
        let mut current_count = 0;
        let mut skipped = Vec::new();

        for workflow in workflows {
            let _span =
                debug_span!("workflow", name = %workflow.name, nodes = workflow.nodes.len())
                    .entered();

            for (node_index, raw) in workflow.nodes.iter().enumerate() {
                match self.analyze_node(workflow, raw, catalog) {
                    Ok(record) => match record.status {
                        NodeStatus::Outdated => outdated.push(record),
                        NodeStatus::Unmatched => unmatched.push(record),
                        NodeStatus::Current => {
                            current_count += 1;
                            if self.include_current {
                                current.push(record);
                            }
                        }
                    },
                    Err(e) => {
                        warn!(workflow = %workflow.name, node_index, error = %e, "skipping node");
                        skipped.push(SkippedNode {
                            workflow_name: workflow.name.clone(),
                            node_index,
                            node_name: raw
                                .0
                                .get("name")
                                .and_then(Value::as_str)
                                .map(str::to_string),
                            reason: e.to_string(),
                        });
                    }
                }
            }
        }

        info!(
            workflows = workflows.len(),
            outdated = outdated.len(),
            current = current_count,
            unmatched = unmatched.len(),
            skipped = skipped.len(),
            "analysis finished"
        );

        let mut records = outdated;
        records.append(&mut current);
        records.append(&mut unmatched);

        AnalysisOutcome {
            records,
            workflow_count: workflows.len(),
            current_count,
            skipped,
        }
    }

    /// Analyzes a host `nodesInUse` item sequence. Input that is not a list gives an
    /// empty outcome.
    pub fn analyze_items(
        &self,
        nodes_in_use: &Value,
        catalog: &VersionCatalog,
    ) -> Result<AnalysisOutcome, InputError> {
        let workflows = workflows_from_items(nodes_in_use)?;
        Ok(self.analyze(&workflows, catalog))
    }
}
