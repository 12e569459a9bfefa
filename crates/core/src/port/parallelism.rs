// Host parallelism port
// How many extractions the host can reasonably run at once

/// Parallelism probe port
///
/// Answers with the host's logical CPU count, or `None` when it cannot be
/// determined. Callers own the clamping: the effective concurrency limit is
/// never allowed below 1 (see `Dispatcher::limit_from_probe`).
pub trait ParallelismProbe: Send + Sync {
    fn host_parallelism(&self) -> Option<usize>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;

    /// Mock ParallelismProbe for testing
    pub struct MockParallelismProbe {
        reported: Option<usize>,
    }

    impl MockParallelismProbe {
        /// Probe that reports the given CPU count (0 models a misreporting host)
        pub fn reporting(count: usize) -> Self {
            Self {
                reported: Some(count),
            }
        }

        /// Probe that cannot determine host parallelism at all
        pub fn unavailable() -> Self {
            Self { reported: None }
        }
    }

    impl ParallelismProbe for MockParallelismProbe {
        fn host_parallelism(&self) -> Option<usize> {
            self.reported
        }
    }
}
