//! Error type for heap operations
//!
//! Probing for a key that is not in the heap is routine and reported as
//! `None` by the operations themselves; only genuine precondition
//! violations surface as a [`HeapError`].

use thiserror::Error;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HeapError {
    /// `change_key` tried to move a key in the wrong direction for the
    /// heap's configured order (e.g. increasing a key in a min-heap).
    #[error("changing this key would not maintain the heap order")]
    OrderViolation,
    /// `merge` was given a heap constructed with a different ordering.
    #[error("cannot merge heaps with different orderings")]
    IncompatibleOrder,
}
