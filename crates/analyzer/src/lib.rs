// In crates/analyzer/src/lib.rs

pub mod error;
pub mod setup;
pub mod types;

// Re-export public types
pub use error::{Error, Result};
pub use setup::SetupAnalyzer;
pub use types::SetupSettings;
