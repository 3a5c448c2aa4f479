//! `Stack`: a singly-linked LIFO stack whose nodes live in a [`MemoryResource`].
//!
//! Every node is obtained from, and handed back to, the resource the stack was
//! created with; the general heap is never touched. The resource is borrowed,
//! so one [`Arena`] can back any number of stacks (of any element types) as
//! long as it outlives them.
//!
//! Traversal runs from the most recently pushed element down to the oldest.
//!
//! # Example
//!
//! ```rust
//! use arena_stack::{Arena, Stack};
//!
//! let arena = Arena::new(1024)?;
//! let mut stack = Stack::new(&arena);
//! for v in [10, 20, 30] {
//!     stack.push(v)?;
//! }
//! assert_eq!(stack.top(), Some(&30));
//! assert_eq!(stack.iter().copied().collect::<Vec<_>>(), [30, 20, 10]);
//! # Ok::<(), arena_stack::AllocError>(())
//! ```

mod iter;

pub use iter::{IntoIter, Iter, IterMut};

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::NonNull;

use crate::alloc::{AllocError, Arena, MemoryResource, PushError};

type Link<T> = Option<NonNull<Node<T>>>;

struct Node<T> {
    value: T,
    next: Link<T>,
}

/// A LIFO stack drawing node storage from a borrowed memory resource.
///
/// Not `Clone`: a deep copy would need a second round of node allocations
/// from a resource that never reclaims space, so it is left to the caller.
pub struct Stack<'r, T, R: MemoryResource = Arena<'static>> {
    top: Link<T>,
    len: usize,
    resource: &'r R,
    _marker: PhantomData<T>,
}

impl<'r, 'buf, T> Stack<'r, T, Arena<'buf>> {
    /// Creates an empty stack backed by `arena`.
    pub fn new(arena: &'r Arena<'buf>) -> Self {
        Self::new_in(arena)
    }
}

impl<'r, T, R: MemoryResource> Stack<'r, T, R> {
    /// Creates an empty stack backed by `resource`.
    pub fn new_in(resource: &'r R) -> Self {
        Self {
            top: None,
            len: 0,
            resource,
            _marker: PhantomData,
        }
    }

    /// Layout of one node as requested from the resource.
    ///
    /// An arena of capacity `C` holds at most `C / node_layout().size()`
    /// nodes of this stack.
    pub const fn node_layout() -> Layout {
        Layout::new::<Node<T>>()
    }

    /// The resource this stack allocates from.
    pub fn resource(&self) -> &'r R {
        self.resource
    }

    /// Returns `true` if both stacks draw from the same resource instance.
    pub fn shares_resource_with<U>(&self, other: &Stack<'_, U, R>) -> bool {
        self.resource.is_same(other.resource)
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the stack holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.top.is_none()
    }

    /// Pushes `value` onto the stack.
    ///
    /// # Errors
    /// Returns the resource's error, typically [`AllocError::OutOfMemory`],
    /// when no node can be allocated. The stack is unchanged in that case.
    pub fn push(&mut self, value: T) -> Result<(), AllocError> {
        let node = self.allocate_node()?;
        self.link(node, value);
        Ok(())
    }

    /// Pushes the value produced by `make`, which may fail.
    ///
    /// The node is allocated before `make` runs. If `make` returns an error
    /// or panics, the node is handed back to the resource before the failure
    /// propagates and the stack is left exactly as it was.
    ///
    /// # Errors
    /// [`PushError::Alloc`] if no node could be allocated (`make` is not
    /// called), [`PushError::Construct`] if `make` failed.
    pub fn try_push_with<E, F>(&mut self, make: F) -> Result<(), PushError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let node = self.allocate_node()?;
        let guard = NodeGuard {
            resource: self.resource,
            node,
        };
        let value = make().map_err(PushError::Construct)?;
        let node = guard.disarm();
        self.link(node, value);
        Ok(())
    }

    /// Removes the top element and returns it, or `None` if the stack is empty.
    ///
    /// The node's block goes back to the resource.
    pub fn pop(&mut self) -> Option<T> {
        let node = self.top?;
        // SAFETY: `node` is a live node owned by this stack; it is unlinked
        // before its storage is released and never read again.
        let Node { value, next } = unsafe { node.as_ptr().read() };
        self.top = next;
        self.len -= 1;
        // SAFETY: the node is unlinked and its value was moved out above.
        unsafe { self.release_node(node) };
        Some(value)
    }

    /// Returns a reference to the top element, or `None` if empty.
    #[inline]
    pub fn top(&self) -> Option<&T> {
        // SAFETY: live nodes stay valid while `self` is borrowed.
        self.top.map(|node| unsafe { &(*node.as_ptr()).value })
    }

    /// Returns a mutable reference to the top element, or `None` if empty.
    #[inline]
    pub fn top_mut(&mut self) -> Option<&mut T> {
        // SAFETY: `&mut self` gives exclusive access to every node.
        self.top.map(|node| unsafe { &mut (*node.as_ptr()).value })
    }

    /// Pops every element, returning each node to the resource.
    pub fn clear(&mut self) {
        while self.pop().is_some() {}
    }

    /// Moves the contents out, leaving `self` empty but still usable.
    ///
    /// The returned stack shares `self`'s resource. This is the counterpart
    /// of a moving constructor that leaves its source valid:
    /// `let b = a.take();` gives `b` all of `a`'s nodes and `a.len() == 0`.
    #[must_use = "dropping the taken stack releases all of its nodes"]
    pub fn take(&mut self) -> Self {
        Self {
            top: self.top.take(),
            len: mem::replace(&mut self.len, 0),
            resource: self.resource,
            _marker: PhantomData,
        }
    }

    /// Replaces the contents of `self` with those of `source`.
    ///
    /// `self`'s own nodes are released to its resource first; then `self`
    /// takes over `source`'s nodes and resource, and `source` is left empty.
    pub fn assign_from(&mut self, source: &mut Self) {
        self.clear();
        self.resource = source.resource;
        self.top = source.top.take();
        self.len = mem::replace(&mut source.len, 0);
    }

    /// Returns an iterator from the top element down to the oldest one.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.top, self.len)
    }

    /// Returns an iterator of mutable references, top element first.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.top, self.len)
    }

    fn allocate_node(&self) -> Result<NonNull<Node<T>>, AllocError> {
        self.resource
            .allocate(Self::node_layout())
            .map(NonNull::cast::<Node<T>>)
    }

    fn link(&mut self, node: NonNull<Node<T>>, value: T) {
        // SAFETY: freshly allocated with `Node<T>`'s layout and not yet
        // initialized.
        unsafe {
            node.as_ptr().write(Node {
                value,
                next: self.top,
            });
        }
        self.top = Some(node);
        self.len += 1;
    }

    /// # Safety
    /// `node` must have been allocated by `allocate_node` on this resource and
    /// its contents must already be moved out or dropped.
    unsafe fn release_node(&self, node: NonNull<Node<T>>) {
        self.resource.deallocate(node.cast(), Self::node_layout());
    }
}

/// Hands an uninitialized node back to its resource unless disarmed.
struct NodeGuard<'r, T, R: MemoryResource> {
    resource: &'r R,
    node: NonNull<Node<T>>,
}

impl<T, R: MemoryResource> NodeGuard<'_, T, R> {
    fn disarm(self) -> NonNull<Node<T>> {
        let node = self.node;
        mem::forget(self);
        node
    }
}

impl<T, R: MemoryResource> Drop for NodeGuard<'_, T, R> {
    fn drop(&mut self) {
        // SAFETY: the node was allocated with this layout and never
        // initialized.
        unsafe {
            self.resource
                .deallocate(self.node.cast(), Layout::new::<Node<T>>());
        }
    }
}

impl<T, R: MemoryResource> Drop for Stack<'_, T, R> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: fmt::Debug, R: MemoryResource> fmt::Debug for Stack<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, R: MemoryResource> IntoIterator for &'a Stack<'_, T, R> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, R: MemoryResource> IntoIterator for &'a mut Stack<'_, T, R> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'r, T, R: MemoryResource> IntoIterator for Stack<'r, T, R> {
    type Item = T;
    type IntoIter = IntoIter<'r, T, R>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}
