// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use alloc::alloc::{Layout, alloc, dealloc, handle_alloc_error};
use core::marker::PhantomData;
use core::mem::{self, MaybeUninit};
use core::ops::{Index, IndexMut};
use core::ptr::NonNull;

use crate::error::AllocError;

/// An owned block of uninitialized memory with room for `capacity` values of `T`.
///
/// `RawStorage` only manages bytes. Slots are [`MaybeUninit<T>`]: writing a value
/// into a slot constructs it, and the caller must drop every value it placed
/// before the storage goes away, because dropping a `RawStorage` frees the
/// block without running any destructor.
///
/// # Example
///
/// ```rust
/// use stowage_raw::RawStorage;
///
/// let mut small = RawStorage::<String>::allocate(1);
/// let mut large = RawStorage::<String>::allocate(8);
///
/// small.swap(&mut large);
/// assert_eq!(small.capacity(), 8);
///
/// // Ownership transfer leaves the source empty
/// let taken = small.take();
/// assert_eq!(taken.capacity(), 8);
/// assert_eq!(small.capacity(), 0);
/// ```
pub struct RawStorage<T> {
    ptr: NonNull<T>,
    capacity: usize,
    _marker: PhantomData<T>,
}

// SAFETY: RawStorage<T> owns its block exactly like a Box<[T]> would.
unsafe impl<T: Send> Send for RawStorage<T> {}
// SAFETY: shared access only hands out shared slot references.
unsafe impl<T: Sync> Sync for RawStorage<T> {}

impl<T> core::fmt::Debug for RawStorage<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RawStorage")
            .field("ptr", &self.ptr)
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl<T> RawStorage<T> {
    /// Creates an empty storage. Does not allocate.
    pub const fn new() -> Self {
        Self {
            ptr: NonNull::dangling(),
            capacity: 0,
            _marker: PhantomData,
        }
    }

    /// Allocates uninitialized room for `capacity` values of `T`.
    ///
    /// A capacity of 0 returns an empty storage without calling the allocator.
    ///
    /// # Panics
    ///
    /// Panics with `"capacity overflow"` if the byte size does not fit in a layout.
    /// Allocator exhaustion is fatal and routed to [`handle_alloc_error`].
    pub fn allocate(capacity: usize) -> Self {
        let Some(layout) = Self::layout_for(capacity) else {
            capacity_overflow()
        };

        match Self::allocate_with(layout, capacity) {
            Some(storage) => storage,
            None => handle_alloc_error(layout),
        }
    }

    /// Fallible counterpart of [`allocate`](Self::allocate).
    ///
    /// # Errors
    ///
    /// - [`AllocError::CapacityOverflow`] if the byte size does not fit in a layout.
    /// - [`AllocError::OutOfMemory`] if the allocator returns null.
    pub fn try_allocate(capacity: usize) -> Result<Self, AllocError> {
        let layout = Self::layout_for(capacity).ok_or(AllocError::CapacityOverflow)?;

        Self::allocate_with(layout, capacity).ok_or(AllocError::OutOfMemory {
            size: layout.size(),
            align: layout.align(),
        })
    }

    #[inline]
    fn layout_for(capacity: usize) -> Option<Layout> {
        Layout::array::<T>(capacity).ok()
    }

    fn allocate_with(layout: Layout, capacity: usize) -> Option<Self> {
        if capacity == 0 {
            return Some(Self::new());
        }

        // Zero-sized T: every slot lives at the dangling address.
        if layout.size() == 0 {
            return Some(Self {
                ptr: NonNull::dangling(),
                capacity,
                _marker: PhantomData,
            });
        }

        // SAFETY: layout has a non-zero size.
        let raw = unsafe { alloc(layout) };

        NonNull::new(raw.cast::<T>()).map(|ptr| Self {
            ptr,
            capacity,
            _marker: PhantomData,
        })
    }

    /// Returns the number of slots (not bytes) in the block.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns `true` if the storage has no slots.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.capacity == 0
    }

    /// Returns the base address of the block.
    ///
    /// For an empty storage this is a dangling, well-aligned pointer that must
    /// not be dereferenced.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.ptr.as_ptr()
    }

    /// Returns the mutable base address of the block.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.ptr.as_ptr()
    }

    /// Returns the address of slot `offset`.
    ///
    /// `offset == capacity` is allowed and yields the one-past-end address.
    /// Computing the address is always safe; dereferencing it is only valid for
    /// `offset < capacity`.
    #[inline]
    pub fn ptr_at(&self, offset: usize) -> *const T {
        debug_assert!(
            offset <= self.capacity,
            "RawStorage::ptr_at: offset {offset} > capacity {}",
            self.capacity
        );
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Returns the mutable address of slot `offset`. See [`ptr_at`](Self::ptr_at).
    #[inline]
    pub fn ptr_at_mut(&mut self, offset: usize) -> *mut T {
        debug_assert!(
            offset <= self.capacity,
            "RawStorage::ptr_at_mut: offset {offset} > capacity {}",
            self.capacity
        );
        self.ptr.as_ptr().wrapping_add(offset)
    }

    /// Views every slot of the block as possibly-uninitialized memory.
    #[inline]
    pub fn as_uninit_slice(&self) -> &[MaybeUninit<T>] {
        // SAFETY: the block spans `capacity` slots, and MaybeUninit<T> has no
        // validity requirement on its contents.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// Mutable counterpart of [`as_uninit_slice`](Self::as_uninit_slice).
    #[inline]
    pub fn as_uninit_slice_mut(&mut self) -> &mut [MaybeUninit<T>] {
        // SAFETY: see as_uninit_slice; &mut self guarantees exclusivity.
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr().cast(), self.capacity) }
    }

    /// Transfers ownership of the block out of `self`, leaving `self` empty.
    ///
    /// No element destructors run: values living in the block move with it.
    #[inline]
    pub fn take(&mut self) -> Self {
        mem::replace(self, Self::new())
    }

    /// Exchanges the blocks of `self` and `other`.
    #[inline]
    pub fn swap(&mut self, other: &mut Self) {
        mem::swap(&mut self.ptr, &mut other.ptr);
        mem::swap(&mut self.capacity, &mut other.capacity);
    }
}

impl<T> Default for RawStorage<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for RawStorage<T> {
    type Output = MaybeUninit<T>;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.as_uninit_slice()[index]
    }
}

impl<T> IndexMut<usize> for RawStorage<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.as_uninit_slice_mut()[index]
    }
}

impl<T> Drop for RawStorage<T> {
    fn drop(&mut self) {
        if self.capacity == 0 || mem::size_of::<T>() == 0 {
            return;
        }

        // The same layout was validated when the block was allocated.
        if let Some(layout) = Self::layout_for(self.capacity) {
            // SAFETY: ptr was returned by alloc(layout) and has not been freed.
            unsafe { dealloc(self.ptr.as_ptr().cast(), layout) }
        }
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}
