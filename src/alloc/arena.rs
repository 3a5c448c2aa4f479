//! `Arena`: a fixed-capacity bump arena with a block ledger.
//!
//! The arena hands out aligned sub-ranges of one contiguous buffer by
//! advancing an offset cursor. Releasing a block only drops its ledger entry:
//! the cursor never moves backwards, so released bytes are not reused until
//! the arena is [reset](Arena::reset) or dropped. Exhaustion timing therefore
//! depends only on the sequence of allocations, never on releases.
//!
//! Blocks still listed in the ledger when the arena is dropped are reported
//! as a `warn`-level event; this is advisory and never fails.
//!
//! The arena is single-threaded: allocation goes through `&self` via interior
//! mutability and the type is not `Sync`.

use core::alloc::Layout;
use core::cell::{Cell, RefCell};
use core::fmt;
use core::ptr::NonNull;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::alloc::allocator::MemoryResource;
use crate::alloc::buffer::{Buffer, BUFFER_ALIGN};
use crate::alloc::error::AllocError;
use crate::alloc::ledger::{Block, Ledger};

/// A fixed-capacity bump arena over a single contiguous buffer.
///
/// `'buf` is the lifetime of a caller-supplied buffer; arenas that own their
/// buffer are `Arena<'static>`.
pub struct Arena<'buf> {
    buffer: Buffer<'buf>,
    offset: Cell<usize>,
    ledger: RefCell<Ledger>,
}

/// A point-in-time summary of an arena's bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaStats {
    /// Total buffer size in bytes.
    pub capacity: usize,
    /// Bytes consumed by the bump cursor, including alignment padding.
    pub used: usize,
    /// Bytes never handed out.
    pub remaining: usize,
    /// Blocks currently recorded in the ledger.
    pub live_blocks: usize,
    /// Sum of the sizes of those blocks.
    pub live_bytes: usize,
    /// Whether the arena frees its buffer on drop.
    pub owned: bool,
}

impl Arena<'static> {
    /// Alignment guaranteed for the start of a self-allocated buffer.
    pub const BUFFER_ALIGN: usize = BUFFER_ALIGN;

    /// Creates an arena owning a freshly allocated buffer of `capacity` bytes.
    ///
    /// A capacity of zero allocates nothing; every request then fails with
    /// [`AllocError::OutOfMemory`].
    ///
    /// # Errors
    /// Returns [`AllocError::InvalidLayout`] if `capacity` cannot be described
    /// as a layout, or [`AllocError::BufferUnavailable`] if the global
    /// allocator refuses the buffer.
    pub fn new(capacity: usize) -> Result<Self, AllocError> {
        Ok(Self::with_buffer(Buffer::owned(capacity)?))
    }
}

impl<'buf> Arena<'buf> {
    /// Creates an arena over an externally owned buffer.
    ///
    /// The arena borrows `buffer` exclusively for `'buf` and never frees it.
    /// Alignment is computed against the real addresses, so the slice may
    /// start at any alignment.
    pub fn from_buffer(buffer: &'buf mut [u8]) -> Self {
        Self::with_buffer(Buffer::borrowed(buffer))
    }

    fn with_buffer(buffer: Buffer<'buf>) -> Self {
        Self {
            buffer,
            offset: Cell::new(0),
            ledger: RefCell::new(Ledger::default()),
        }
    }

    /// Carves a block of `size` bytes aligned to `align` out of the arena.
    ///
    /// The block starts at the first suitably aligned address at or after the
    /// cursor. On success the cursor moves to the end of the block and the
    /// block is appended to the ledger. On failure nothing changes.
    ///
    /// # Errors
    /// - [`AllocError::ZeroSized`] if `size` is zero.
    /// - [`AllocError::InvalidLayout`] if `align` is not a power of two.
    /// - [`AllocError::OutOfMemory`] if the aligned block does not fit.
    pub fn allocate(&self, size: usize, align: usize) -> Result<Block, AllocError> {
        let layout = Layout::from_size_align(size, align)
            .map_err(|_| AllocError::InvalidLayout { size, align })?;
        self.allocate_layout(layout)
    }

    /// Like [`allocate`](Self::allocate), taking a [`Layout`].
    ///
    /// # Errors
    /// See [`allocate`](Self::allocate).
    pub fn allocate_layout(&self, layout: Layout) -> Result<Block, AllocError> {
        if layout.size() == 0 {
            return Err(AllocError::ZeroSized);
        }

        let capacity = self.buffer.len();
        let offset = self.offset.get();
        let available = capacity - offset;
        let out_of_memory = AllocError::OutOfMemory {
            requested: layout.size(),
            available,
        };

        let cursor = self.buffer.base().as_ptr().wrapping_add(offset);
        let padding = cursor.align_offset(layout.align());
        let Some(end) = padding
            .checked_add(layout.size())
            .filter(|needed| *needed <= available)
        else {
            debug!(
                size = layout.size(),
                align = layout.align(),
                available,
                "arena exhausted"
            );
            return Err(out_of_memory);
        };

        let block = Block::new(offset + padding, layout.size());
        self.offset.set(offset + end);
        self.ledger.borrow_mut().record(block);
        trace!(
            offset = block.offset(),
            size = block.size(),
            align = layout.align(),
            "arena allocate"
        );
        Ok(block)
    }

    /// Drops the first ledger entry starting where `block` starts.
    ///
    /// The cursor is left alone: the bytes are not made available again.
    /// Releasing a block the ledger does not know about (already released, or
    /// from another arena) is a silent no-op.
    pub fn release(&self, block: Block) {
        self.release_offset(block.offset());
    }

    fn release_offset(&self, offset: usize) {
        match self.ledger.borrow_mut().remove_first(offset) {
            Some(block) => trace!(offset, size = block.size(), "arena release"),
            None => trace!(offset, "arena release of unknown block ignored"),
        }
    }

    /// Returns the address of `block`, or `None` if it lies outside the buffer.
    pub fn address(&self, block: Block) -> Option<NonNull<u8>> {
        if block.end() > self.buffer.len() {
            return None;
        }
        // SAFETY: offset is within the buffer, checked above.
        Some(unsafe { NonNull::new_unchecked(self.buffer.base().as_ptr().add(block.offset())) })
    }

    /// Maps an address back to its offset if it points into the buffer.
    fn offset_of(&self, ptr: NonNull<u8>) -> Option<usize> {
        let base = self.buffer.base().as_ptr() as usize;
        let offset = (ptr.as_ptr() as usize).checked_sub(base)?;
        (offset < self.buffer.len()).then_some(offset)
    }

    /// Total size of the buffer in bytes.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Bytes consumed by the cursor so far, including alignment padding.
    #[inline]
    pub fn used(&self) -> usize {
        self.offset.get()
    }

    /// Bytes never handed out (`capacity - used`).
    #[inline]
    pub fn remaining(&self) -> usize {
        self.capacity() - self.used()
    }

    /// Number of blocks currently recorded in the ledger.
    pub fn live_blocks(&self) -> usize {
        self.ledger.borrow().len()
    }

    /// Sum of the sizes of the blocks currently recorded in the ledger.
    pub fn live_bytes(&self) -> usize {
        self.ledger.borrow().total_bytes()
    }

    /// Snapshot of the ledger, oldest allocation first.
    pub fn ledger(&self) -> Vec<Block> {
        self.ledger.borrow().entries().to_vec()
    }

    /// Whether the arena frees its buffer when dropped.
    pub fn is_owned(&self) -> bool {
        self.buffer.is_owned()
    }

    /// Returns `true` if `other` is this very arena.
    pub fn is_same(&self, other: &Self) -> bool {
        core::ptr::eq(self, other)
    }

    /// Returns a summary of the arena's state.
    pub fn stats(&self) -> ArenaStats {
        let ledger = self.ledger.borrow();
        ArenaStats {
            capacity: self.capacity(),
            used: self.used(),
            remaining: self.remaining(),
            live_blocks: ledger.len(),
            live_bytes: ledger.total_bytes(),
            owned: self.is_owned(),
        }
    }

    /// Rewinds the cursor to the start of the buffer and forgets every block.
    ///
    /// Exclusive access guarantees no container still borrows the arena.
    /// Outstanding ledger entries are reported the same way a drop reports
    /// them.
    pub fn reset(&mut self) {
        self.report_leaks("arena reset with outstanding blocks");
        self.ledger.get_mut().clear();
        self.offset.set(0);
    }

    fn report_leaks(&self, message: &'static str) {
        let ledger = self.ledger.borrow();
        if !ledger.is_empty() {
            warn!(
                leaked = ledger.len(),
                bytes = ledger.total_bytes(),
                "{message}"
            );
        }
    }
}

// SAFETY: every block lies inside the buffer, which lives as long as the
// arena. The cursor only moves forward, so no two blocks handed out before a
// reset overlap, and `reset` takes `&mut self`, so nothing borrowing the arena
// can still hold a block.
unsafe impl MemoryResource for Arena<'_> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let block = self.allocate_layout(layout)?;
        // SAFETY: a block just carved from this arena lies within the buffer.
        Ok(unsafe { NonNull::new_unchecked(self.buffer.base().as_ptr().add(block.offset())) })
    }

    unsafe fn deallocate(&self, ptr: NonNull<u8>, _layout: Layout) {
        match self.offset_of(ptr) {
            Some(offset) => self.release_offset(offset),
            None => trace!("arena release of foreign pointer ignored"),
        }
    }

    fn is_same(&self, other: &Self) -> bool {
        Arena::is_same(self, other)
    }
}

impl PartialEq for Arena<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.is_same(other)
    }
}

impl Eq for Arena<'_> {}

impl fmt::Debug for Arena<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("used", &self.used())
            .field("live_blocks", &self.live_blocks())
            .field("owned", &self.is_owned())
            .finish()
    }
}

impl Drop for Arena<'_> {
    fn drop(&mut self) {
        self.report_leaks("arena dropped with outstanding blocks");
    }
}

// SAFETY: the buffer is either owned or exclusively borrowed, so moving the
// arena to another thread moves sole access with it. Not `Sync`: the cursor
// and ledger are unsynchronized.
unsafe impl Send for Arena<'_> {}
