// Worker - supervises one extractor invocation to exit

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{Invocation, MapId};
use crate::port::{Extractor, LaunchError};

/// Result of one worker, reported back for the dispatch summary
#[derive(Debug)]
pub struct ExtractionOutcome {
    pub map_id: MapId,
    pub result: Result<(), LaunchError>,
}

/// Releases the worker's slot in the live counter when dropped, so the
/// count stays correct even if the extractor panics or the task is dropped.
struct SlotGuard(Arc<AtomicUsize>);

impl Drop for SlotGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::AcqRel);
    }
}

/// Run one extraction: build the invocation, hand it to the extractor, and
/// wait for the process to exit. Blocks only this task, never the dispatch
/// loop. A launch failure is logged and reported, nothing more; one map's
/// missing binary must not take the rest of the batch down.
pub async fn run_one(
    extractor: Arc<dyn Extractor>,
    live: Arc<AtomicUsize>,
    map_id: MapId,
) -> ExtractionOutcome {
    // The dispatcher already counted this worker in
    let _slot = SlotGuard(live);

    let invocation = Invocation::for_map(map_id);

    info!(map_id, "Extraction started");

    let result = extractor.run(&invocation).await;

    match &result {
        Ok(()) => info!(map_id, "Extraction finished"),
        Err(e) => error!(map_id, error = %e, "Could not run mmap-extractor"),
    }

    ExtractionOutcome { map_id, result }
}
