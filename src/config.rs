//! Audit configuration.
//!
//! Configuration can come from a JSON file, from code through the builder-style
//! setters, or from CLI flags layered on top of either. Every field has a default,
//! so an empty object is a valid config:
//!
//! ```json
//! {
//!   "report": { "base_url": "https://automation.example.com", "style": "cards" },
//!   "analysis": { "comparison": "numeric", "aliases": { "acme.customNode": "custom" } }
//! }
//! ```

use crate::catalog::VersionComparison;
use crate::error::ConfigError;
use crate::report::ReportStyle;
use crate::resolver::{NodeTypeResolver, ResolverBuilder};
use ahash::AHashMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Default address of a locally running host platform.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5678";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuditConfig {
    #[serde(default)]
    pub report: ReportConfig,

    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Report rendering options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Base URL of the host platform; workflow headings link to
    /// `{base_url}/workflow/{id}`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default)]
    pub style: ReportStyle,

    /// Show the full node type column. `None` leaves it to the style.
    #[serde(default)]
    pub show_node_type: Option<bool>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            style: ReportStyle::default(),
            show_node_type: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Analysis options.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub comparison: VersionComparison,

    /// Emit records for up-to-date nodes as well.
    #[serde(default)]
    pub include_current: bool,

    /// Extra aliases, added to (or overriding) the built-in ones.
    #[serde(default)]
    pub aliases: AHashMap<String, String>,

    /// Drop the built-in aliases entirely.
    #[serde(default)]
    pub replace_default_aliases: bool,

    /// Only strip the `n8n-nodes-base.` prefix rather than splitting on the first dot.
    #[serde(default)]
    pub base_package_only: bool,
}

impl AnalysisConfig {
    /// Builds the resolver described by this config.
    pub fn resolver(&self) -> NodeTypeResolver {
        let mut builder = ResolverBuilder::new();
        if self.replace_default_aliases {
            builder = builder.with_alias_table(Default::default());
        }
        for (type_field, catalog_key) in &self.aliases {
            builder = builder.with_alias(type_field, catalog_key);
        }
        if self.base_package_only {
            builder = builder.with_base_package_only();
        }
        builder.build()
    }
}

impl AuditConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a config from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&content)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.report.base_url = base_url.into();
        self
    }

    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.report.style = style;
        self
    }

    pub fn with_comparison(mut self, comparison: VersionComparison) -> Self {
        self.analysis.comparison = comparison;
        self
    }

    pub fn with_node_type_column(mut self, show: bool) -> Self {
        self.report.show_node_type = Some(show);
        self
    }

    pub fn with_current_nodes(mut self, include: bool) -> Self {
        self.analysis.include_current = include;
        self
    }

    pub fn with_alias(mut self, type_field: impl Into<String>, catalog_key: impl Into<String>) -> Self {
        self.analysis.aliases.insert(type_field.into(), catalog_key.into());
        self
    }
}
