// Library crate - shared data model and analysis passes for the CLI

pub mod dataset;
pub mod extremes;
pub mod filter;
pub mod impact;
pub mod summary;
pub mod types;

// Re-export commonly used types
pub use types::*;
