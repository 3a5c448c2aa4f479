use core::iter::FusedIterator;
use core::marker::PhantomData;

use super::{Link, Stack};
use crate::alloc::MemoryResource;

/// Iterator over shared references, most recently pushed first.
///
/// A clone resumes from the same position; call [`Stack::iter`] again to
/// start over from the top.
pub struct Iter<'a, T> {
    next: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iter<'a, T> {
    pub(super) fn new(top: Link<T>, len: usize) -> Self {
        Self {
            next: top,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: the stack is borrowed for 'a, so every reachable node is
        // live and not mutated.
        let node = unsafe { &*node.as_ptr() };
        self.next = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            next: self.next,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Iterator over mutable references, most recently pushed first.
pub struct IterMut<'a, T> {
    next: Link<T>,
    remaining: usize,
    _marker: PhantomData<&'a mut T>,
}

impl<'a, T> IterMut<'a, T> {
    pub(super) fn new(top: Link<T>, len: usize) -> Self {
        Self {
            next: top,
            remaining: len,
            _marker: PhantomData,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let node = self.next?;
        // SAFETY: the stack is mutably borrowed for 'a and each node is
        // yielded exactly once, so the references never alias.
        let node = unsafe { &mut *node.as_ptr() };
        self.next = node.next;
        self.remaining -= 1;
        Some(&mut node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

/// Consuming iterator: pops elements in LIFO order.
///
/// Each node is returned to the resource as its element is yielded; whatever
/// is left when the iterator is dropped is cleared the same way.
pub struct IntoIter<'r, T, R: MemoryResource> {
    stack: Stack<'r, T, R>,
}

impl<'r, T, R: MemoryResource> IntoIter<'r, T, R> {
    pub(super) fn new(stack: Stack<'r, T, R>) -> Self {
        Self { stack }
    }
}

impl<T, R: MemoryResource> Iterator for IntoIter<'_, T, R> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.stack.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.stack.len()))
    }
}

impl<T, R: MemoryResource> ExactSizeIterator for IntoIter<'_, T, R> {}

impl<T, R: MemoryResource> FusedIterator for IntoIter<'_, T, R> {}
