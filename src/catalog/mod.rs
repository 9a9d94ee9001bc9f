pub mod diff;
pub mod model;
pub mod source;
pub mod version;

pub use diff::*;
pub use model::*;
pub use source::{DeclaredVersion, SourceScanner, extract_name, extract_version};
pub use version::*;
