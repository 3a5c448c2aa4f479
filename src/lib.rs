//! # `arena-stack` - Ledgered Bump Arena and Arena-Backed Collections
//!
//! A fixed-capacity memory arena over one contiguous buffer, plus containers
//! that take all of their node storage from it instead of the general heap.
//!
//! ## Memory Model
//!
//! ### Arena
//! - **Bump allocation**: blocks are carved from the buffer by advancing an
//!   offset cursor to the next suitably aligned address. The cursor never
//!   moves backwards.
//! - **Ledger**: every live block is recorded in allocation order. Releasing a
//!   block removes its first matching entry and nothing else; the bytes are
//!   not reused until the arena is reset or dropped.
//! - **Leak diagnostics**: blocks still in the ledger when the arena goes away
//!   are reported through `tracing` at `warn` level.
//! - **Buffers**: either allocated and freed by the arena, or borrowed from the
//!   caller for the arena's lifetime.
//!
//! ### Containers
//! - **Resource-parameterized**: [`Stack`] is generic over any
//!   [`MemoryResource`]; [`Arena`] and [`HeapResource`] both qualify.
//! - **Shared resources**: containers borrow their resource, so one arena can
//!   back many containers of different element types at once.
//! - **No leaks on failure**: a failed push hands its node back to the
//!   resource before the error reaches the caller.
//!
//! ## Thread Safety
//!
//! Nothing here synchronizes. `Arena` is `Send` but not `Sync`; containers
//! borrowing it are neither.
//!
//! ## Example
//!
//! ```rust
//! use arena_stack::{Arena, Stack};
//!
//! let arena = Arena::new(1024)?;
//!
//! {
//!     let mut ints = Stack::new(&arena);
//!     for v in [10, 20, 30, 40, 50] {
//!         ints.push(v)?;
//!     }
//!     assert_eq!(ints.len(), 5);
//!     assert_eq!(ints.top(), Some(&50));
//!     assert_eq!(ints.iter().copied().collect::<Vec<_>>(), [50, 40, 30, 20, 10]);
//! }
//!
//! // The stack released its blocks, but the cursor does not move back.
//! assert_eq!(arena.live_blocks(), 0);
//! assert!(arena.used() > 0);
//! # Ok::<(), arena_stack::AllocError>(())
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod alloc;
pub mod collections;

pub use alloc::{AllocError, Arena, ArenaStats, Block, HeapResource, MemoryResource, PushError};
pub use collections::Stack;

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;
    use core::ptr::NonNull;

    // A node's `next` link is a single pointer thanks to the `NonNull` niche.
    assert!(mem::size_of::<Option<NonNull<u8>>>() == mem::size_of::<usize>());

    // Self-allocated buffers satisfy the alignment of every primitive type.
    assert!(Arena::BUFFER_ALIGN >= mem::align_of::<u128>());
    assert!(Arena::BUFFER_ALIGN.is_power_of_two());

    // Block handles stay two words.
    assert!(mem::size_of::<Block>() == 2 * mem::size_of::<usize>());
};
