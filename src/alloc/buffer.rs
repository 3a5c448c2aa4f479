//! Backing storage for an [`Arena`](crate::alloc::Arena).
//!
//! A buffer is either allocated (and later freed) by the arena itself, or
//! borrowed from the caller for the arena's lifetime and never freed.

use core::alloc::Layout;
use core::marker::PhantomData;
use core::ptr::NonNull;
use std::alloc::{alloc, dealloc};

use crate::alloc::error::AllocError;

/// Alignment of self-allocated buffers.
pub(crate) const BUFFER_ALIGN: usize = 16;

pub(crate) enum Buffer<'buf> {
    /// Allocated from the global heap; freed on drop.
    Owned { ptr: NonNull<u8>, layout: Layout },
    /// Supplied by the caller; left untouched on drop.
    Borrowed {
        ptr: NonNull<u8>,
        len: usize,
        _marker: PhantomData<&'buf mut [u8]>,
    },
    /// Zero capacity. Nothing was allocated.
    Empty,
}

impl Buffer<'static> {
    pub(crate) fn owned(capacity: usize) -> Result<Self, AllocError> {
        if capacity == 0 {
            return Ok(Self::Empty);
        }
        let layout = Layout::from_size_align(capacity, BUFFER_ALIGN).map_err(|_| {
            AllocError::InvalidLayout {
                size: capacity,
                align: BUFFER_ALIGN,
            }
        })?;
        // SAFETY: layout has non-zero size.
        let ptr = unsafe { alloc(layout) };
        let ptr = NonNull::new(ptr).ok_or(AllocError::BufferUnavailable { capacity })?;
        Ok(Self::Owned { ptr, layout })
    }
}

impl<'buf> Buffer<'buf> {
    pub(crate) fn borrowed(slice: &'buf mut [u8]) -> Self {
        let len = slice.len();
        Self::Borrowed {
            ptr: NonNull::from(slice).cast::<u8>(),
            len,
            _marker: PhantomData,
        }
    }

    /// Start address of the buffer. Dangling (but aligned) when empty.
    #[inline]
    pub(crate) fn base(&self) -> NonNull<u8> {
        match self {
            Self::Owned { ptr, .. } | Self::Borrowed { ptr, .. } => *ptr,
            Self::Empty => NonNull::dangling(),
        }
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        match self {
            Self::Owned { layout, .. } => layout.size(),
            Self::Borrowed { len, .. } => *len,
            Self::Empty => 0,
        }
    }

    pub(crate) fn is_owned(&self) -> bool {
        !matches!(self, Self::Borrowed { .. })
    }
}

impl Drop for Buffer<'_> {
    fn drop(&mut self) {
        if let Self::Owned { ptr, layout } = self {
            // SAFETY: allocated in `owned` with exactly this layout.
            unsafe { dealloc(ptr.as_ptr(), *layout) };
        }
    }
}
