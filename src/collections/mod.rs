//! Containers whose storage comes from a [`MemoryResource`](crate::alloc::MemoryResource).
//!
//! - `stack`: singly-linked LIFO stack

pub mod stack;

pub use stack::Stack;
