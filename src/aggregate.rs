//! Groups analysis records by the name of their owning workflow.

use crate::analyzer::AnalysisRecord;
use ahash::AHashMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// All records belonging to one workflow name.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowGroup {
    pub name: String,
    pub records: Vec<AnalysisRecord>,
}

impl WorkflowGroup {
    /// The id of the first record; the group's link target.
    pub fn workflow_id(&self) -> &str {
        self.records
            .first()
            .map(|r| r.workflow_id.as_str())
            .unwrap_or("")
    }
}

/// Records partitioned by workflow name, in order of first appearance.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupedResults {
    groups: Vec<WorkflowGroup>,
}

impl GroupedResults {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, workflow_name: &str) -> Option<&[AnalysisRecord]> {
        self.groups
            .iter()
            .find(|g| g.name == workflow_name)
            .map(|g| g.records.as_slice())
    }

    pub fn groups(&self) -> &[WorkflowGroup] {
        &self.groups
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|g| g.name.as_str())
    }

    pub fn record_count(&self) -> usize {
        self.groups.iter().map(|g| g.records.len()).sum()
    }
}

impl<'a> IntoIterator for &'a GroupedResults {
    type Item = &'a WorkflowGroup;
    type IntoIter = std::slice::Iter<'a, WorkflowGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

impl Serialize for GroupedResults {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for group in &self.groups {
            map.serialize_entry(&group.name, &group.records)?;
        }
        map.end()
    }
}

/// Partitions `records` by `workflow_name`.
///
/// Group order follows the first record seen for each name, and records keep their
/// relative order. Workflows that share a name end up in one group. No record is
/// dropped.
pub fn group(records: Vec<AnalysisRecord>) -> GroupedResults {
    let mut index: AHashMap<String, usize> = AHashMap::new();
    let mut groups: Vec<WorkflowGroup> = Vec::new();

    for record in records {
        let slot = *index.entry(record.workflow_name.clone()).or_insert_with(|| {
            groups.push(WorkflowGroup {
                name: record.workflow_name.clone(),
                records: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].records.push(record);
    }

    GroupedResults { groups }
}
