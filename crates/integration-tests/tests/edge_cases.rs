//! End-to-end edge cases: slot reuse, empty catalog, isolated launch
//! failures, and the probe fallback wired through a real adapter

use std::sync::Arc;
use std::time::Duration;

use mmap_batch_core::application::Dispatcher;
use mmap_batch_core::domain::{MapId, WorkQueue};
use mmap_batch_core::port::extractor::mocks::MockExtractor;
use mmap_batch_core::port::parallelism::mocks::MockParallelismProbe;
use mmap_batch_infra_system::HostParallelismProbe;

fn dispatcher(extractor: Arc<MockExtractor>, catalog: &[MapId], limit: usize) -> Dispatcher {
    Dispatcher::new(WorkQueue::from_catalog(catalog), extractor, limit)
        .with_poll_interval(Duration::from_millis(5))
}

/// Catalog [0, 1, 269] with two slots: 0 and 1 launch immediately, 269 only
/// once one of them has terminated; afterwards everything is completed and
/// nothing is left running
#[tokio::test]
async fn third_map_waits_for_a_free_slot() {
    let extractor = Arc::new(MockExtractor::with_delay(Duration::from_millis(30)));

    let summary = dispatcher(extractor.clone(), &[0, 1, 269], 2)
        .run()
        .await
        .unwrap();

    assert_eq!(extractor.launched_ids(), vec![0, 1, 269]);

    let launches = extractor.launches();
    assert!(
        launches[2].live_at_launch < 2,
        "map 269 entered execution while both slots were still taken"
    );

    assert_eq!(summary.launched, 3);
    assert_eq!(summary.completed, 3);
    assert!(summary.failed.is_empty());
    assert_eq!(extractor.live(), 0);
    assert!(extractor.max_live() <= 2);
}

/// An empty catalog completes immediately: zero launches, nothing joined
#[tokio::test]
async fn empty_catalog_completes_immediately() {
    let extractor = Arc::new(MockExtractor::instant());

    let summary = dispatcher(extractor.clone(), &[], 4).run().await.unwrap();

    assert_eq!(summary.launched, 0);
    assert_eq!(summary.completed, 0);
    assert!(summary.failed.is_empty());
    assert!(extractor.launches().is_empty());
}

/// One map's missing binary is that map's problem alone; every other item
/// still gets its launch attempt
#[tokio::test]
async fn launch_failure_is_isolated_to_its_map() {
    let extractor = Arc::new(MockExtractor::failing_for([5]));
    let catalog: &[MapId] = &[0, 1, 5, 269, 30];

    let summary = dispatcher(extractor.clone(), catalog, 2)
        .run()
        .await
        .unwrap();

    assert_eq!(extractor.launched_ids(), catalog.to_vec());
    assert_eq!(summary.launched, 5);
    assert_eq!(summary.completed, 4);
    assert_eq!(summary.failed, vec![5]);
    assert_eq!(extractor.live(), 0);
}

/// A misreporting probe can only ever soften the limit to 1, never to 0
#[tokio::test]
async fn zero_parallelism_still_extracts_serially() {
    let limit = Dispatcher::limit_from_probe(&MockParallelismProbe::reporting(0));
    assert_eq!(limit, 1);

    let extractor = Arc::new(MockExtractor::with_delay(Duration::from_millis(10)));
    let summary = dispatcher(extractor.clone(), &[0, 1, 269], limit)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.completed, 3);
    assert_eq!(extractor.max_live(), 1);
}

/// The real probe wired through the real adapter always yields a usable limit
#[test]
fn real_host_probe_yields_a_positive_limit() {
    let limit = Dispatcher::limit_from_probe(&HostParallelismProbe::new());
    assert!(limit >= 1);
}
