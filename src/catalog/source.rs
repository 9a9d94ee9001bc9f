//! Builds a [`VersionCatalog`] from a local checkout of node source files.
//!
//! Each `*.node.ts` file is read for its declared version (`defaultVersion`, a
//! `version: [..]` array or a plain `version`) and its `name`. Files missing
//! either are skipped.

use super::model::{CatalogEntry, VersionCatalog, VersionInfo};
use super::version::parse_leading_float;
use crate::error::SourceScanError;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fs;
use std::path::Path;
use tracing::{debug, info};
use walkdir::WalkDir;

static DEFAULT_VERSION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"defaultVersion:\s*([\d.]+)").expect("valid regex"));
static VERSION_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"version:\s*\[([\d.,\s]+)\]").expect("valid regex"));
static VERSION_SCALAR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"version:\s*([\d.]+)").expect("valid regex"));
static NODE_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"name:\s*['"]([^'"]+)['"]"#).expect("valid regex"));

const NODE_FILE_SUFFIX: &str = ".node.ts";

/// Directories of the upstream node packages that hold node definitions.
pub const DEFAULT_SCAN_ROOTS: [&str; 2] = [
    "packages/nodes-base/nodes",
    "packages/@n8n/nodes-langchain/nodes",
];

/// A version declaration found in a node source file.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclaredVersion {
    Single(f64),
    Multiple(Vec<f64>),
}

impl DeclaredVersion {
    pub fn into_version_info(self, last_updated: Option<DateTime<Utc>>) -> VersionInfo {
        match self {
            DeclaredVersion::Single(v) => VersionInfo::from_versions(vec![v], last_updated),
            DeclaredVersion::Multiple(vs) => {
                let mut info = VersionInfo::from_versions(vs, last_updated);
                info.is_multi_version = true;
                info
            }
        }
    }
}

/// Extracts the declared version of a node from its source.
///
/// `defaultVersion` wins over `version`; a `version` array is preferred over a
/// scalar `version`.
pub fn extract_version(content: &str) -> Option<DeclaredVersion> {
    if let Some(caps) = DEFAULT_VERSION.captures(content) {
        return parse_leading_float(&caps[1]).map(DeclaredVersion::Single);
    }

    if let Some(caps) = VERSION_ARRAY.captures(content) {
        let versions: Option<Vec<f64>> = caps[1]
            .split(',')
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(parse_leading_float)
            .collect();
        if let Some(versions) = versions.filter(|v| !v.is_empty()) {
            return Some(DeclaredVersion::Multiple(versions));
        }
    }

    VERSION_SCALAR
        .captures(content)
        .and_then(|caps| parse_leading_float(&caps[1]))
        .map(DeclaredVersion::Single)
}

/// Extracts the node's internal name (the catalog key).
pub fn extract_name(content: &str) -> Option<String> {
    NODE_NAME
        .captures(content)
        .map(|caps| caps[1].to_string())
        .filter(|name| !name.is_empty())
}

/// Walks a source tree and collects node versions into a catalog.
#[derive(Debug, Clone)]
pub struct SourceScanner {
    scan_roots: Vec<String>,
}

impl Default for SourceScanner {
    fn default() -> Self {
        Self {
            scan_roots: DEFAULT_SCAN_ROOTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl SourceScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Only files whose relative path contains one of `roots` are scanned.
    /// An empty list accepts every node file.
    pub fn with_roots(mut self, roots: Vec<String>) -> Self {
        self.scan_roots = roots;
        self
    }

    fn accepts(&self, relative: &str) -> bool {
        relative.ends_with(NODE_FILE_SUFFIX)
            && (self.scan_roots.is_empty()
                || self.scan_roots.iter().any(|root| relative.contains(root.as_str())))
    }

    /// Scans `dir` and returns a catalog keyed by the extracted node names.
    pub fn scan(&self, dir: &Path, now: DateTime<Utc>) -> Result<VersionCatalog, SourceScanError> {
        if !dir.is_dir() {
            return Err(SourceScanError::MissingDirectory(dir.display().to_string()));
        }

        let mut catalog = VersionCatalog::new();
        for item in WalkDir::new(dir).sort_by_file_name() {
            let item = item.map_err(|e| SourceScanError::Walk {
                path: dir.display().to_string(),
                message: e.to_string(),
            })?;
            if !item.file_type().is_file() {
                continue;
            }

            let relative = item
                .path()
                .strip_prefix(dir)
                .unwrap_or(item.path())
                .to_string_lossy()
                .replace('\\', "/");
            if !self.accepts(&relative) {
                continue;
            }

            let content = fs::read_to_string(item.path()).map_err(|source| SourceScanError::Io {
                path: relative.clone(),
                source,
            })?;

            let (Some(name), Some(version)) = (extract_name(&content), extract_version(&content))
            else {
                debug!(path = %relative, "skipping node file without name or version");
                continue;
            };

            let stem = item
                .file_name()
                .to_string_lossy()
                .trim_end_matches(NODE_FILE_SUFFIX)
                .to_string();

            debug!(node = %name, path = %relative, ?version, "extracted node version");
            catalog.insert(
                name,
                CatalogEntry {
                    path: Some(relative),
                    name: Some(stem),
                    version_info: Some(version.into_version_info(Some(now))),
                },
            );
        }

        info!(nodes = catalog.len(), dir = %dir.display(), "scanned node sources");
        Ok(catalog)
    }
}
