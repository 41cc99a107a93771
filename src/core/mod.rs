// Public modules
pub mod error;
pub mod migrate;
pub mod project;

// Re-export common types for convenience
pub use error::{Error, ErrorCode, Result};
