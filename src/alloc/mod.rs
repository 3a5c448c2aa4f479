//! Memory sources for the collections.
//!
//! - `arena`: fixed-capacity bump arena with a block ledger
//! - `heap`: global-allocator resource that really frees
//! - `allocator`: the [`MemoryResource`] trait both implement

pub mod allocator;
pub mod arena;
mod buffer;
pub mod error;
pub mod heap;
pub mod ledger;

pub use allocator::MemoryResource;
pub use arena::{Arena, ArenaStats};
pub use error::{AllocError, PushError};
pub use heap::HeapResource;
pub use ledger::Block;
