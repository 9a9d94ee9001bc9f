use ahash::AHashMap;
use std::borrow::Cow;

/// Defines the contract for one step of node type resolution.
///
/// A strategy returns `Some(name)` when it knows the catalog key for a raw type
/// string, or `None` to let the next strategy in the chain try.
pub trait ResolveStrategy: Send + Sync {
    fn name(&self) -> &str;
    fn resolve<'a>(&'a self, type_field: &'a str) -> Option<Cow<'a, str>>;
}

/// Built-in aliases for node types whose catalog key is unrelated to their own name.
pub const DEFAULT_ALIASES: [(&str, &str); 4] = [
    ("n8n-nodes-base.respondToWebhook", "respondWith"),
    ("n8n-nodes-base.html", "extractionValues"),
    ("@n8n/n8n-nodes-langchain.chatTrigger", "allowFileUploads"),
    ("n8n-nodes-base.wait", "amount"),
];

/// Exact-match overrides from a full type string to a catalog key.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    aliases: AHashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// A table pre-filled with [`DEFAULT_ALIASES`].
    pub fn with_defaults() -> Self {
        DEFAULT_ALIASES.into_iter().collect()
    }

    pub fn insert(&mut self, type_field: impl Into<String>, catalog_key: impl Into<String>) {
        self.aliases.insert(type_field.into(), catalog_key.into());
    }

    pub fn get(&self, type_field: &str) -> Option<&str> {
        self.aliases.get(type_field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for AliasTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            aliases: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl ResolveStrategy for AliasTable {
    fn name(&self) -> &str {
        "alias"
    }

    fn resolve<'a>(&'a self, type_field: &'a str) -> Option<Cow<'a, str>> {
        self.get(type_field).map(Cow::Borrowed)
    }
}

/// Takes everything after the first separator: `n8n-nodes-base.set` becomes `set`.
#[derive(Debug, Clone, Copy)]
pub struct SeparatorSplit {
    separator: char,
}

impl SeparatorSplit {
    pub fn new(separator: char) -> Self {
        Self { separator }
    }
}

impl Default for SeparatorSplit {
    fn default() -> Self {
        Self::new('.')
    }
}

impl ResolveStrategy for SeparatorSplit {
    fn name(&self) -> &str {
        "separator"
    }

    fn resolve<'a>(&'a self, type_field: &'a str) -> Option<Cow<'a, str>> {
        type_field
            .split_once(self.separator)
            .map(|(_, rest)| Cow::Borrowed(rest))
    }
}

/// Takes everything after the first occurrence of a fixed marker such as
/// `n8n-nodes-base.`; types from other packages are left to later strategies.
#[derive(Debug, Clone)]
pub struct MarkerSplit {
    marker: String,
}

impl MarkerSplit {
    pub const BASE_PACKAGE: &'static str = "n8n-nodes-base.";

    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }
}

impl Default for MarkerSplit {
    fn default() -> Self {
        Self::new(Self::BASE_PACKAGE)
    }
}

impl ResolveStrategy for MarkerSplit {
    fn name(&self) -> &str {
        "marker"
    }

    fn resolve<'a>(&'a self, type_field: &'a str) -> Option<Cow<'a, str>> {
        type_field
            .split_once(self.marker.as_str())
            .map(|(_, rest)| Cow::Borrowed(rest))
    }
}

/// Returns the type string unchanged. Always matches.
#[derive(Debug, Clone, Copy, Default)]
pub struct Identity;

impl ResolveStrategy for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn resolve<'a>(&'a self, type_field: &'a str) -> Option<Cow<'a, str>> {
        Some(Cow::Borrowed(type_field))
    }
}
