//! Ordered record of the blocks an arena currently considers allocated.
//!
//! The ledger never feeds space back to the allocator. It exists so the arena
//! can report leaked blocks at teardown and so callers can inspect what is
//! still outstanding.

use serde::{Deserialize, Serialize};

/// A handle to a block carved out of an [`Arena`](crate::alloc::Arena).
///
/// `offset` is relative to the start of the arena's buffer. The handle is
/// plain data: holding it keeps nothing alive, and releasing it twice is
/// harmless (the second release finds no entry).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    offset: usize,
    size: usize,
}

impl Block {
    pub(crate) const fn new(offset: usize, size: usize) -> Self {
        Self { offset, size }
    }

    /// Byte offset of the block from the start of the arena buffer.
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Length of the block in bytes.
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Offset one past the last byte of the block.
    pub const fn end(&self) -> usize {
        self.offset.saturating_add(self.size)
    }
}

#[derive(Debug, Default)]
pub(crate) struct Ledger {
    entries: Vec<Block>,
}

impl Ledger {
    pub(crate) fn record(&mut self, block: Block) {
        self.entries.push(block);
    }

    /// Removes the first entry starting at `offset`, in ledger order.
    ///
    /// The size is not consulted. Returns `None` when nothing matches.
    pub(crate) fn remove_first(&mut self, offset: usize) -> Option<Block> {
        let pos = self.entries.iter().position(|b| b.offset == offset)?;
        Some(self.entries.remove(pos))
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn total_bytes(&self) -> usize {
        self.entries.iter().map(Block::size).sum()
    }

    pub(crate) fn entries(&self) -> &[Block] {
        &self.entries
    }

    pub(crate) fn clear(&mut self) {
        self.entries.clear();
    }
}
