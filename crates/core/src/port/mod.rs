// Port Layer - Interfaces for external dependencies

pub mod extractor;
pub mod parallelism;

// Re-exports
pub use extractor::{Extractor, LaunchError};
pub use parallelism::ParallelismProbe;
