pub mod conversion;
pub mod definition;
pub mod envelope;

pub use conversion::*;
pub use definition::*;
pub use envelope::*;
