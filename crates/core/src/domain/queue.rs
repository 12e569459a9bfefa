// Work Queue Domain Model

use std::collections::VecDeque;

use super::error::{DomainError, Result};
use super::map::MapId;

/// Ordered queue of pending extractions.
///
/// Consumed front-to-back by the dispatcher, one item per launch attempt.
/// Single writer: nothing but the dispatch loop ever touches it, so it needs
/// no synchronization. Items are never re-ordered, re-inserted, deduplicated
/// or prioritized.
#[derive(Debug, Clone)]
pub struct WorkQueue {
    items: VecDeque<MapId>,
}

impl WorkQueue {
    pub fn from_catalog(catalog: &[MapId]) -> Self {
        Self {
            items: catalog.iter().copied().collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Remove the next item.
    ///
    /// # Errors
    /// - `DomainError::EmptyQueue` when the queue is already drained; callers
    ///   must check `is_empty()` first.
    pub fn pop_front(&mut self) -> Result<MapId> {
        self.items.pop_front().ok_or(DomainError::EmptyQueue)
    }
}
