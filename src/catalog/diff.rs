use super::model::{VersionCatalog, VersionInfo};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A node whose version metadata differs between two catalogs.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CatalogChange {
    pub node: String,
    pub old_version: VersionInfo,
    pub new_version: VersionInfo,
    pub timestamp: DateTime<Utc>,
}

/// Lists nodes present in both catalogs whose versions changed, sorted by name.
///
/// Nodes only present on one side are not reported, and `last_updated` is ignored.
pub fn diff_catalogs(
    previous: &VersionCatalog,
    current: &VersionCatalog,
    timestamp: DateTime<Utc>,
) -> Vec<CatalogChange> {
    current
        .sorted_names()
        .into_iter()
        .filter_map(|name| {
            let old = previous.entry(name)?.version_info.clone().unwrap_or_default();
            let new = current.entry(name)?.version_info.clone().unwrap_or_default();
            (!old.same_versions(&new)).then(|| CatalogChange {
                node: name.clone(),
                old_version: old,
                new_version: new,
                timestamp,
            })
        })
        .collect()
}

/// Renders changes as JSON lines, one change per line.
pub fn to_json_lines(changes: &[CatalogChange]) -> Result<String, serde_json::Error> {
    let mut out = String::new();
    for change in changes {
        out.push_str(&serde_json::to_string(change)?);
        out.push('\n');
    }
    Ok(out)
}
