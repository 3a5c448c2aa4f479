//! `HeapResource`: a [`MemoryResource`] backed by the global allocator.
//!
//! Unlike [`Arena`](crate::alloc::Arena), deallocation really frees memory.
//! It serves as the general-purpose counterpart for containers that do not
//! need a bounded arena, and as a baseline in benchmarks.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc};

use tracing::warn;

use crate::alloc::allocator::MemoryResource;
use crate::alloc::error::AllocError;

/// A memory resource delegating to `std::alloc`.
///
/// Keeps a count of outstanding blocks so leaks are reported on drop the same
/// way an arena reports them.
#[derive(Debug, Default)]
pub struct HeapResource {
    live: Cell<usize>,
}

impl HeapResource {
    /// Creates a new heap resource with no outstanding blocks.
    pub const fn new() -> Self {
        Self { live: Cell::new(0) }
    }

    /// Number of blocks allocated and not yet deallocated.
    pub fn live_blocks(&self) -> usize {
        self.live.get()
    }
}

// SAFETY: blocks come straight from the global allocator with the requested
// layout, which guarantees validity and disjointness until `dealloc`.
unsafe impl MemoryResource for HeapResource {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError::ZeroSized);
        }
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc(layout) };
        let ptr = NonNull::new(ptr).ok_or(AllocError::OutOfMemory {
            requested: layout.size(),
            available: 0,
        })?;
        self.live.set(self.live.get() + 1);
        Ok(ptr)
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout) {
        dealloc(ptr.as_ptr(), layout);
        self.live.set(self.live.get().saturating_sub(1));
    }
}

impl Drop for HeapResource {
    fn drop(&mut self) {
        let leaked = self.live.get();
        if leaked > 0 {
            warn!(leaked, "heap resource dropped with outstanding blocks");
        }
    }
}
