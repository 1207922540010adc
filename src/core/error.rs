//! Error types for dispatch operations.

use thiserror::Error;

use crate::core::Department;

/// Errors produced by dispatch components.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DispatchError {
    /// Event buffer is at capacity; the event was dropped.
    #[error("event buffer full (capacity {capacity})")]
    BufferFull {
        /// Configured buffer capacity.
        capacity: usize,
    },
    /// Department inbound queue stayed full past the routing bound.
    #[error("{department} queue full, routing timed out")]
    RoutingTimeout {
        /// Department whose queue was full.
        department: Department,
    },
    /// Department inbound queue has no receiver any more.
    #[error("{department} queue closed")]
    QueueClosed {
        /// Department whose queue is closed.
        department: Department,
    },
    /// Release would push a pool above its maximum.
    #[error("{department} pool over-released (max {max})")]
    OverRelease {
        /// Department owning the pool.
        department: Department,
        /// Pool maximum.
        max: u32,
    },
    /// Priority outside the accepted range.
    #[error("priority {0} out of range 1..=3")]
    InvalidPriority(u8),
    /// Configuration failed validation.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Application-facing result using anyhow for higher-level contexts.
pub type AppResult<T> = Result<T, anyhow::Error>;
