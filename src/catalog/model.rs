use super::version::Version;
use crate::error::CatalogError;
use ahash::AHashMap;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Version metadata stored for one node type.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct VersionInfo {
    pub latest_version: Version,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub all_versions: Vec<f64>,
    pub is_multi_version: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

impl VersionInfo {
    /// Builds version metadata from a list of declared versions; the latest is the maximum.
    pub fn from_versions(versions: Vec<f64>, last_updated: Option<DateTime<Utc>>) -> Self {
        let latest = versions.iter().copied().fold(0.0_f64, f64::max);
        Self {
            latest_version: Version::new(latest),
            is_multi_version: versions.len() > 1,
            all_versions: versions,
            last_updated,
        }
    }

    /// Compares two infos without looking at `last_updated`.
    pub fn same_versions(&self, other: &VersionInfo) -> bool {
        self.latest_version == other.latest_version
            && self.all_versions == other.all_versions
            && self.is_multi_version == other.is_multi_version
    }

    fn from_value(value: &Value) -> Self {
        let all_versions = value
            .get("all_versions")
            .and_then(Value::as_array)
            .map(|versions| versions.iter().filter_map(Value::as_f64).collect())
            .unwrap_or_default();

        Self {
            latest_version: Version::from_json(value.get("latest_version")),
            all_versions,
            is_multi_version: value
                .get("is_multi_version")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            last_updated: value
                .get("last_updated")
                .and_then(Value::as_str)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

/// A single catalog entry, keyed in the catalog by resolved node type name.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct CatalogEntry {
    /// Source file the version was extracted from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file stem (e.g. `Set` for `Set.node.ts`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_info: Option<VersionInfo>,
}

impl CatalogEntry {
    pub fn with_latest(latest: f64) -> Self {
        Self {
            version_info: Some(VersionInfo::from_versions(vec![latest], None)),
            ..Self::default()
        }
    }

    /// The latest known version; `0` when the entry carries no usable version info.
    pub fn latest_version(&self) -> Version {
        self.version_info
            .as_ref()
            .map(|info| info.latest_version.clone())
            .unwrap_or_default()
    }

    /// Reads an entry from arbitrary JSON. Never fails: a malformed entry is an entry
    /// without version info.
    pub fn from_value(value: &Value) -> Self {
        if !value.is_object() {
            return Self::default();
        }
        Self {
            path: value.get("path").and_then(Value::as_str).map(str::to_string),
            name: value.get("name").and_then(Value::as_str).map(str::to_string),
            version_info: value
                .get("version_info")
                .filter(|info| info.is_object())
                .map(VersionInfo::from_value),
        }
    }
}

/// Lookup structure from resolved node type name to latest known version.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VersionCatalog {
    entries: AHashMap<String, CatalogEntry>,
}

impl VersionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a JSON object. Any other JSON shape yields an empty catalog.
    pub fn from_value(value: &Value) -> Self {
        let entries = value
            .as_object()
            .map(|object| {
                object
                    .iter()
                    .map(|(name, entry)| (name.clone(), CatalogEntry::from_value(entry)))
                    .collect()
            })
            .unwrap_or_default();
        Self { entries }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Load a catalog from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    /// Writes the catalog as pretty-printed JSON, entries sorted by name.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn insert(&mut self, name: impl Into<String>, entry: CatalogEntry) {
        self.entries.insert(name.into(), entry);
    }

    /// Returns the latest version for `type_name`.
    ///
    /// `None` means the type is not in the catalog at all. `Some(0.0)` means it is
    /// present but has no usable version info; both cases are handled differently
    /// by the analyzer.
    pub fn lookup(&self, type_name: &str) -> Option<f64> {
        self.entries
            .get(type_name)
            .map(|entry| entry.latest_version().value())
    }

    pub fn entry(&self, type_name: &str) -> Option<&CatalogEntry> {
        self.entries.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.entries.contains_key(type_name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &CatalogEntry)> {
        self.entries.iter()
    }

    /// Entry names in ascending order.
    pub fn sorted_names(&self) -> Vec<&String> {
        let mut names: Vec<_> = self.entries.keys().collect();
        names.sort();
        names
    }
}

impl Serialize for VersionCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut sorted: Vec<_> = self.entries.iter().collect();
        sorted.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut map = serializer.serialize_map(Some(sorted.len()))?;
        for (name, entry) in sorted {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for VersionCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

impl<K: Into<String>> FromIterator<(K, CatalogEntry)> for VersionCatalog {
    fn from_iter<I: IntoIterator<Item = (K, CatalogEntry)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}
