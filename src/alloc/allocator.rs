//! The memory-source seam shared by every container.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::alloc::error::AllocError;

/// A source of raw memory for containers.
///
/// This plays the role of `std::alloc::Allocator` for the collections in this
/// crate: a container is parameterized over its `MemoryResource` and never
/// touches the general-purpose heap directly.
///
/// Both operations take `&self` so a single resource can back many containers
/// at once. Implementations are single-threaded; nothing here is `Sync`.
///
/// # Safety
/// Containers write their values straight into the returned memory, so an
/// implementor must guarantee that:
///
/// - a successful `allocate(layout)` returns a block valid for reads and
///   writes of `layout.size()` bytes and aligned to `layout.align()`;
/// - that block is disjoint from every other block the resource has handed
///   out and not yet taken back through `deallocate`;
/// - the block stays valid until it is passed to `deallocate` or the resource
///   itself is dropped.
///
/// A resource that breaks any of these turns safe container code into memory
/// corruption, which is why a plain `impl` is rejected:
///
/// ```compile_fail
/// use arena_stack::{AllocError, MemoryResource};
/// use std::alloc::Layout;
/// use std::ptr::NonNull;
///
/// struct Dangling;
///
/// impl MemoryResource for Dangling {
///     fn allocate(&self, _layout: Layout) -> Result<NonNull<u8>, AllocError> {
///         Ok(NonNull::dangling())
///     }
///     unsafe fn deallocate(&self, _ptr: NonNull<u8>, _layout: Layout) {}
/// }
/// ```
pub unsafe trait MemoryResource {
    /// Allocates a block satisfying `layout`.
    ///
    /// # Errors
    /// Returns [`AllocError::OutOfMemory`] if the resource cannot satisfy the
    /// request, or [`AllocError::ZeroSized`] for zero-sized layouts.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Hands a block back to the resource.
    ///
    /// Whether the bytes become available again is up to the resource.
    ///
    /// # Safety
    /// `ptr` must denote a block currently allocated by this resource with the
    /// same `layout`, and must not be used after this call.
    unsafe fn deallocate(&self, ptr: NonNull<u8>, layout: Layout);

    /// Returns `true` if `other` is this very resource instance.
    ///
    /// Identity, not contents: two resources with equal state are still
    /// different resources.
    fn is_same(&self, other: &Self) -> bool
    where
        Self: Sized,
    {
        core::ptr::eq(self, other)
    }
}
