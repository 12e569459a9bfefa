//! Dispatch invariants over full batch runs
//!
//! All tests run against the instrumented mock extractor on the default
//! single-threaded test runtime, so launch order observed by the mock is the
//! dispatcher's spawn order.

use std::sync::Arc;
use std::time::Duration;

use mmap_batch_core::application::Dispatcher;
use mmap_batch_core::domain::{MapId, WorkQueue};
use mmap_batch_core::port::extractor::mocks::MockExtractor;

/// A representative slice of the real catalog: continents, then large,
/// then medium maps
const CATALOG: &[MapId] = &[0, 1, 533, 509, 469, 329, 229, 30, 409, 349, 109, 70];

fn dispatcher(extractor: Arc<MockExtractor>, catalog: &[MapId], limit: usize) -> Dispatcher {
    Dispatcher::new(WorkQueue::from_catalog(catalog), extractor, limit)
        .with_poll_interval(Duration::from_millis(5))
}

/// At no instant may more extractions execute than the limit allows
#[tokio::test]
async fn live_workers_never_exceed_the_limit() {
    let extractor = Arc::new(MockExtractor::with_delay(Duration::from_millis(20)));

    let summary = dispatcher(extractor.clone(), CATALOG, 3)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.launched, CATALOG.len());
    assert!(
        extractor.max_live() <= 3,
        "observed {} concurrent extractions with limit 3",
        extractor.max_live()
    );
    assert_eq!(extractor.live(), 0, "run reported done with live workers");
}

/// The multiset of launched ids equals the catalog, one launch each
#[tokio::test]
async fn every_catalog_map_is_launched_exactly_once() {
    let extractor = Arc::new(MockExtractor::instant());

    let summary = dispatcher(extractor.clone(), CATALOG, 4)
        .run()
        .await
        .unwrap();

    assert_eq!(summary.completed, CATALOG.len());

    let mut launched = extractor.launched_ids();
    launched.sort_unstable();
    let mut expected = CATALOG.to_vec();
    expected.sort_unstable();
    assert_eq!(launched, expected);
}

/// Items enter execution in strict catalog order, capacity permitting
#[tokio::test]
async fn launch_order_follows_the_catalog() {
    let extractor = Arc::new(MockExtractor::with_delay(Duration::from_millis(10)));

    dispatcher(extractor.clone(), CATALOG, 4).run().await.unwrap();

    assert_eq!(extractor.launched_ids(), CATALOG.to_vec());
}

/// Only map 0 carries the off-mesh input argument; every invocation carries
/// the decimal id first and the silent flag
#[tokio::test]
async fn only_map_zero_gets_the_off_mesh_input() {
    let extractor = Arc::new(MockExtractor::instant());

    dispatcher(extractor.clone(), &[0, 1, 269], 2)
        .run()
        .await
        .unwrap();

    let launches = extractor.launches();
    assert_eq!(launches.len(), 3);

    for launch in launches {
        assert_eq!(launch.args[0], launch.map_id.to_string());
        assert!(launch.args.contains(&"--silent".to_string()));

        let has_off_mesh = launch.args.iter().any(|a| a == "--offMeshInput");
        assert_eq!(
            has_off_mesh,
            launch.map_id == 0,
            "map {} off-mesh argument mismatch",
            launch.map_id
        );
    }
}
