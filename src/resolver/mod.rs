//! Maps a node's raw type string to the short name used as a catalog key.
//!
//! Resolution runs an ordered chain of [`ResolveStrategy`] implementations and
//! takes the first answer:
//!
//! 1. the alias table (exact match),
//! 2. any custom strategies, in insertion order,
//! 3. the separator split (`n8n-nodes-base.set` → `set`),
//! 4. identity.

use std::borrow::Cow;

mod strategy;

pub use strategy::*;

pub struct NodeTypeResolver {
    strategies: Vec<Box<dyn ResolveStrategy>>,
}

impl Default for NodeTypeResolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for NodeTypeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NodeTypeResolver")
            .field("strategies", &self.strategy_names())
            .finish()
    }
}

impl NodeTypeResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::new()
    }

    /// Resolves a raw type string to its catalog key. Empty input is returned unchanged.
    pub fn resolve<'a>(&'a self, type_field: &'a str) -> Cow<'a, str> {
        if type_field.is_empty() {
            return Cow::Borrowed(type_field);
        }
        self.strategies
            .iter()
            .find_map(|strategy| strategy.resolve(type_field))
            .unwrap_or(Cow::Borrowed(type_field))
    }

    /// Names of the strategies in the order they are tried.
    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }
}

pub struct ResolverBuilder {
    aliases: AliasTable,
    custom: Vec<Box<dyn ResolveStrategy>>,
    split: Box<dyn ResolveStrategy>,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ResolverBuilder {
    pub fn new() -> Self {
        Self {
            aliases: AliasTable::with_defaults(),
            custom: Vec::new(),
            split: Box::new(SeparatorSplit::default()),
        }
    }

    /// Adds or replaces one alias.
    pub fn with_alias(mut self, type_field: &str, catalog_key: &str) -> Self {
        self.aliases.insert(type_field, catalog_key);
        self
    }

    /// Replaces the whole alias table, dropping the built-in aliases.
    pub fn with_alias_table(mut self, aliases: AliasTable) -> Self {
        self.aliases = aliases;
        self
    }

    /// Adds a strategy that runs after the alias table and before the split.
    pub fn with_strategy(mut self, strategy: Box<dyn ResolveStrategy>) -> Self {
        self.custom.push(strategy);
        self
    }

    /// Only strips the `n8n-nodes-base.` package prefix instead of splitting on
    /// any separator.
    pub fn with_base_package_only(mut self) -> Self {
        self.split = Box::new(MarkerSplit::default());
        self
    }

    pub fn build(self) -> NodeTypeResolver {
        let mut strategies: Vec<Box<dyn ResolveStrategy>> =
            Vec::with_capacity(self.custom.len() + 3);
        strategies.push(Box::new(self.aliases));
        strategies.extend(self.custom);
        strategies.push(self.split);
        strategies.push(Box::new(Identity));
        NodeTypeResolver { strategies }
    }
}
