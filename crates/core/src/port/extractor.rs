// Extractor Port
// Abstraction over the external extraction binary

use crate::domain::Invocation;
use async_trait::async_trait;
use thiserror::Error;

/// Launch errors
///
/// These cover the launcher's side only (binary missing, permission denied,
/// wait failure). Whatever the extraction itself does after a successful
/// start is out of band and never surfaces here.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error("Spawn failed: {0}")]
    SpawnFailed(String),

    #[error("IO error: {0}")]
    Io(String),
}

/// Extractor trait
///
/// Implementations:
/// - SubprocessExtractor: spawns the real extraction binary
/// - mocks::MockExtractor: instrumented stand-in for tests
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Launch the extraction program for one invocation and wait for the
    /// process to exit. Blocks the calling worker task only, never the
    /// dispatch loop.
    ///
    /// # Errors
    /// - `LaunchError::SpawnFailed` if the binary cannot be started
    /// - `LaunchError::Io` if waiting on the child fails
    async fn run(&self, invocation: &Invocation) -> Result<(), LaunchError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use crate::domain::MapId;
    use std::collections::HashSet;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;
    use std::time::Duration;

    /// One observed launch attempt
    #[derive(Debug, Clone)]
    pub struct RecordedLaunch {
        pub map_id: MapId,
        pub args: Vec<String>,
        /// How many extractions were already executing when this one arrived
        pub live_at_launch: usize,
    }

    /// Mock Extractor for testing
    ///
    /// Records every launch attempt in order and tracks the running maximum
    /// of concurrent executions, so tests can assert the capacity invariant
    /// and the exactly-once property directly.
    pub struct MockExtractor {
        delay: Duration,
        fail_for: HashSet<MapId>,
        launches: Mutex<Vec<RecordedLaunch>>,
        live: AtomicUsize,
        max_live: AtomicUsize,
    }

    impl MockExtractor {
        fn with_parts(delay: Duration, fail_for: HashSet<MapId>) -> Self {
            Self {
                delay,
                fail_for,
                launches: Mutex::new(Vec::new()),
                live: AtomicUsize::new(0),
                max_live: AtomicUsize::new(0),
            }
        }

        /// Every extraction completes as soon as it is polled
        pub fn instant() -> Self {
            Self::with_parts(Duration::ZERO, HashSet::new())
        }

        /// Every extraction takes `delay` of tokio time
        pub fn with_delay(delay: Duration) -> Self {
            Self::with_parts(delay, HashSet::new())
        }

        /// Launches for the given maps fail as if the binary were missing
        pub fn failing_for(map_ids: impl IntoIterator<Item = MapId>) -> Self {
            Self::with_parts(Duration::ZERO, map_ids.into_iter().collect())
        }

        /// All launch attempts observed so far, in order
        pub fn launches(&self) -> Vec<RecordedLaunch> {
            self.launches.lock().unwrap().clone()
        }

        /// Map ids of all launch attempts observed so far, in order
        pub fn launched_ids(&self) -> Vec<MapId> {
            self.launches.lock().unwrap().iter().map(|l| l.map_id).collect()
        }

        /// Extractions executing right now
        pub fn live(&self) -> usize {
            self.live.load(Ordering::Acquire)
        }

        /// Highest number of concurrently executing extractions observed
        pub fn max_live(&self) -> usize {
            self.max_live.load(Ordering::Acquire)
        }
    }

    #[async_trait]
    impl Extractor for MockExtractor {
        async fn run(&self, invocation: &Invocation) -> Result<(), LaunchError> {
            self.launches.lock().unwrap().push(RecordedLaunch {
                map_id: invocation.map_id,
                args: invocation.args.clone(),
                live_at_launch: self.live.load(Ordering::Acquire),
            });

            if self.fail_for.contains(&invocation.map_id) {
                return Err(LaunchError::SpawnFailed(format!(
                    "mock binary missing for map {}",
                    invocation.map_id
                )));
            }

            let live_now = self.live.fetch_add(1, Ordering::AcqRel) + 1;
            self.max_live.fetch_max(live_now, Ordering::AcqRel);

            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            self.live.fetch_sub(1, Ordering::AcqRel);
            Ok(())
        }
    }
}
