//! Allocation failures.

use thiserror::Error;

/// The error type for allocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AllocError {
    /// No aligned region of the requested size remains in the resource.
    #[error("out of memory: requested {requested} bytes, {available} bytes available")]
    OutOfMemory {
        /// Size of the rejected request in bytes.
        requested: usize,
        /// Untouched bytes left at the time of the request (before alignment padding).
        available: usize,
    },
    /// A zero-sized block was requested.
    #[error("zero-sized allocation requested")]
    ZeroSized,
    /// The alignment is not a power of two, or size rounded up to it overflows.
    #[error("invalid layout: size {size}, alignment {align}")]
    InvalidLayout {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment in bytes.
        align: usize,
    },
    /// The backing buffer of an arena could not be obtained.
    #[error("failed to acquire a {capacity} byte backing buffer")]
    BufferUnavailable {
        /// Requested arena capacity in bytes.
        capacity: usize,
    },
}

impl AllocError {
    /// Returns `true` if this is an exhaustion error.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, Self::OutOfMemory { .. })
    }
}

/// Failure of a fallible push onto an arena-backed container.
///
/// Either the memory resource could not supply a node, or the closure
/// producing the element failed after the node was obtained. In the latter
/// case the node has already been handed back to the resource.
#[derive(Debug, Error)]
pub enum PushError<E> {
    /// The memory resource refused the node allocation.
    #[error(transparent)]
    Alloc(#[from] AllocError),
    /// Constructing the element failed.
    #[error("element construction failed: {0}")]
    Construct(E),
}

impl<E> PushError<E> {
    /// Returns the construction error, if that is what failed.
    pub fn into_construct(self) -> Option<E> {
        match self {
            Self::Construct(e) => Some(e),
            Self::Alloc(_) => None,
        }
    }
}
