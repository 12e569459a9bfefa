//! Dispatcher - drains the work queue under the concurrency cap
//!
//! One control loop, no internal parallelism beyond starting workers. While
//! capacity remains and items remain it pops the next map and spawns a worker
//! task for it; otherwise it sleeps one poll interval and re-checks. The
//! polled condition is the coarse OS-level process count, so a fixed-interval
//! busy poll is the specified baseline here.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinSet;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::application::worker::{self, ExtractionOutcome};
use crate::domain::{MapId, WorkQueue};
use crate::error::Result;
use crate::port::{Extractor, ParallelismProbe};

/// Re-check interval while all worker slots are busy (200ms)
pub const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// What a finished run looked like, for the final banner and for tests
#[derive(Debug, Default)]
pub struct DispatchSummary {
    /// Launch attempts that got a worker
    pub launched: usize,
    /// Extractions whose process ran to exit
    pub completed: usize,
    /// Maps whose binary never started; abandoned, not retried
    pub failed: Vec<MapId>,
}

impl DispatchSummary {
    fn record(&mut self, outcome: ExtractionOutcome) {
        self.launched += 1;
        match outcome.result {
            Ok(()) => self.completed += 1,
            Err(_) => self.failed.push(outcome.map_id),
        }
    }
}

/// Dispatcher drives the whole batch: strict queue order, never more than
/// `limit` live workers at any instant.
pub struct Dispatcher {
    queue: WorkQueue,
    extractor: Arc<dyn Extractor>,
    limit: usize,
    poll_interval: Duration,
    live: Arc<AtomicUsize>,
}

impl Dispatcher {
    pub fn new(queue: WorkQueue, extractor: Arc<dyn Extractor>, limit: usize) -> Self {
        Self {
            queue,
            extractor,
            limit,
            poll_interval: POLL_INTERVAL,
            live: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Override the poll interval (tests tighten it to keep runs fast)
    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Effective concurrency limit for a run: host parallelism clamped to
    /// at least 1. A limit of 0 would leave the loop spinning forever with
    /// nothing ever under the cap, so an unusable probe answer falls back
    /// to serial extraction instead of aborting.
    pub fn limit_from_probe(probe: &dyn ParallelismProbe) -> usize {
        match probe.host_parallelism() {
            Some(count) if count >= 1 => count,
            _ => {
                warn!("Host parallelism unavailable, falling back to a single worker");
                1
            }
        }
    }

    /// Workers currently live, queryable at any time
    pub fn live_workers(&self) -> usize {
        self.live.load(Ordering::Acquire)
    }

    /// Run the batch to completion.
    ///
    /// Returns only after the queue is drained AND every launched worker's
    /// process has exited; the drain loop finishing on its own is not enough
    /// to report completion.
    pub async fn run(mut self) -> Result<DispatchSummary> {
        info!(
            limit = self.limit,
            pending = self.queue.len(),
            "Dispatch loop starting"
        );

        let mut workers: JoinSet<ExtractionOutcome> = JoinSet::new();

        while !self.queue.is_empty() {
            if self.live.load(Ordering::Acquire) < self.limit {
                // Guarded by the loop condition, so this cannot hit EmptyQueue
                let map_id = self.queue.pop_front()?;

                // Slot is claimed before the task runs; the worker releases
                // it when its process has exited
                self.live.fetch_add(1, Ordering::AcqRel);

                info!(map_id, remaining = self.queue.len(), "Starting worker");

                workers.spawn(worker::run_one(
                    Arc::clone(&self.extractor),
                    Arc::clone(&self.live),
                    map_id,
                ));
            } else {
                sleep(self.poll_interval).await;
            }
        }

        // Final join: the queue is empty but extractions are still running
        let mut summary = DispatchSummary::default();
        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(outcome) => summary.record(outcome),
                Err(join_error) => {
                    error!(error = %join_error, "Worker task died before reporting");
                }
            }
        }

        info!(
            launched = summary.launched,
            completed = summary.completed,
            failed = summary.failed.len(),
            "Work queue drained, all workers exited"
        );

        Ok(summary)
    }
}
