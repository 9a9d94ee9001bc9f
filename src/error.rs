use thiserror::Error;

/// Errors raised while reading the two host inputs into workflows and a catalog.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("Missing required input data for analysis")]
    MissingInput,

    #[error("Workflow item {index} has no 'json' payload")]
    MissingPayload { index: usize },

    #[error("Workflow '{workflow}' has a 'nodes' field that is not a list")]
    MalformedNodes { workflow: String },

    #[error("Failed to parse input JSON: {0}")]
    JsonParseError(String),
}

/// Errors that cause a single node instance to be skipped during analysis.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    #[error("Node entry is not an object (found {found})")]
    NotAnObject { found: String },

    #[error("Node type must be a string, but found '{found}'")]
    InvalidType { found: String },
}

/// Errors that can occur when loading or saving a version catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Could not read catalog file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse catalog JSON: {0}")]
    JsonParseError(#[from] serde_json::Error),
}

/// Errors raised while scanning node source files for version metadata.
#[derive(Error, Debug)]
pub enum SourceScanError {
    #[error("Source directory '{0}' does not exist")]
    MissingDirectory(String),

    #[error("Failed to walk '{path}': {message}")]
    Walk { path: String, message: String },

    #[error("Could not read source file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that can occur when loading an `AuditConfig`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Invalid(#[from] serde_json::Error),
}
