// Application Layer - Dispatch Loop and Workers

pub mod dispatcher;
pub mod worker;

// Re-exports
pub use dispatcher::{DispatchSummary, Dispatcher, POLL_INTERVAL};
pub use worker::ExtractionOutcome;
