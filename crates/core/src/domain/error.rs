// Domain Error Types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    /// Popping an empty work queue is a dispatcher contract violation, not a
    /// runtime condition. The loop must guard with `is_empty()` first.
    #[error("Pop from empty work queue")]
    EmptyQueue,
}

pub type Result<T> = std::result::Result<T, DomainError>;
