// mmap-batch Infrastructure - System Adapters
// Implements: Extractor, ParallelismProbe

pub mod parallelism_probe;
pub mod subprocess_extractor;

pub use parallelism_probe::HostParallelismProbe;
pub use subprocess_extractor::SubprocessExtractor;
