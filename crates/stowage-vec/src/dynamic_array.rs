// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::iter;
use core::mem::{self, MaybeUninit};
use core::ptr;
use core::slice;

use stowage_raw::{AllocError, RawStorage};

use crate::error::DynamicArrayError;
use crate::reserve::ReserveHint;
use crate::transfer;

/// Test behaviour for injecting failures in `DynamicArray` reallocations.
///
/// This is only available with the `test_utils` feature and allows users
/// to test how their code reacts to allocation failure on the fallible surface
/// ([`DynamicArray::try_push`], [`DynamicArray::try_reserve_exact`]).
///
/// The behaviour is sticky - once set, it remains active until changed.
///
/// # Example
///
/// ```rust
/// // test_utils feature required in dev-dependencies
/// #[cfg(test)]
/// mod tests {
///     use stowage_vec::{DynamicArray, DynamicArrayBehaviour};
///
///     #[test]
///     fn test_handles_grow_failure() {
///         let mut array = DynamicArray::new();
///         array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);
///
///         assert!(array.try_push(1u8).is_err());
///         assert_eq!(array.capacity(), 0);
///     }
/// }
/// ```
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicArrayBehaviour {
    /// Normal behaviour - no injected failures.
    None,
    /// Every fallible reallocation reports `AllocError::OutOfMemory`.
    FailAtGrow,
}

#[cfg(any(test, feature = "test_utils"))]
impl Default for DynamicArrayBehaviour {
    fn default() -> Self {
        Self::None
    }
}

/// A growable array of `T` built over a [`RawStorage<T>`].
///
/// Exactly the first [`len`](Self::len) slots of the storage hold live values;
/// the rest of the block is uninitialized. Appending to a full array doubles its
/// capacity (starting at 1), which keeps the total relocation work linear in
/// the number of appends.
///
/// # Panic Safety
///
/// Constructors that run user code (`Default`, `Clone`, closures) are guarded:
/// if one panics, every value constructed so far by that operation is dropped
/// and the array keeps its previous contents. During growth the new value is
/// constructed in the new block before anything is relocated, so a panic there
/// leaves the old block fully intact.
///
/// # Example
///
/// ```rust
/// use stowage_vec::DynamicArray;
///
/// let mut array = DynamicArray::new();
/// array.push(1);
/// array.push(2);
/// array.push(3);
///
/// let at = array.insert(1, 99);
/// assert_eq!(array[at], 99);
/// assert_eq!(array, [1, 99, 2, 3]);
///
/// array.erase(0);
/// array.pop_last();
/// assert_eq!(array, [99, 2]);
/// ```
pub struct DynamicArray<T> {
    storage: RawStorage<T>,
    len: usize,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: DynamicArrayBehaviour,
}

impl<T> DynamicArray<T> {
    #[inline]
    fn from_parts(storage: RawStorage<T>, len: usize) -> Self {
        debug_assert!(len <= storage.capacity());

        Self {
            storage,
            len,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: DynamicArrayBehaviour::None,
        }
    }

    /// Builds an array with room for exactly `capacity` values and fills it
    /// from `values`. Values beyond `capacity` are never requested.
    fn from_trusted_iter<I>(capacity: usize, values: I) -> Self
    where
        I: Iterator<Item = T>,
    {
        let mut storage = RawStorage::allocate(capacity);

        // SAFETY: the fresh block has `capacity` uninitialized slots and
        // `take` never yields more than that.
        let len = unsafe { transfer::construct_from(storage.as_mut_ptr(), values.take(capacity)) };

        Self::from_parts(storage, len)
    }

    /// Creates an empty array. Does not allocate.
    pub const fn new() -> Self {
        Self {
            storage: RawStorage::new(),
            len: 0,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: DynamicArrayBehaviour::None,
        }
    }

    /// Creates an empty array with room for `capacity` values.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::from_parts(RawStorage::allocate(capacity), 0)
    }

    /// Creates an empty array pre-sized by a [`ReserveHint`].
    pub fn with_reserved(hint: ReserveHint) -> Self {
        Self::with_capacity(hint.capacity())
    }

    /// Creates an array of `len` default values; capacity equals `len`.
    ///
    /// If `T::default()` panics, the values built so far are dropped before
    /// the panic continues.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage_vec::DynamicArray;
    ///
    /// let array: DynamicArray<u8> = DynamicArray::with_len(3);
    /// assert_eq!(array, [0, 0, 0]);
    /// assert_eq!(array.capacity(), 3);
    /// ```
    pub fn with_len(len: usize) -> Self
    where
        T: Default,
    {
        Self::from_trusted_iter(len, iter::repeat_with(T::default))
    }

    /// Creates an array of `len` clones of `value`; capacity equals `len`.
    pub fn from_elem(value: T, len: usize) -> Self
    where
        T: Clone,
    {
        Self::from_trusted_iter(len, iter::repeat_with(|| value.clone()))
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no live element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots available before a reallocation.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.storage.capacity()
    }

    /// Returns the number of uninitialized slots after the live prefix.
    #[inline]
    pub fn spare_capacity(&self) -> usize {
        self.capacity() - self.len
    }

    /// Returns the uninitialized tail of the block.
    ///
    /// Values written here become live only after a matching
    /// [`set_len`](Self::set_len).
    pub fn spare_capacity_mut(&mut self) -> &mut [MaybeUninit<T>] {
        let len = self.len;
        &mut self.storage.as_uninit_slice_mut()[len..]
    }

    /// Forces the number of live elements to `new_len`.
    ///
    /// # Safety
    ///
    /// - `new_len` must not exceed [`capacity`](Self::capacity).
    /// - Slots `[old_len, new_len)` must have been initialized.
    /// - When shrinking, the caller takes over the slots `[new_len, old_len)`.
    #[inline]
    pub unsafe fn set_len(&mut self, new_len: usize) {
        debug_assert!(new_len <= self.capacity());
        self.len = new_len;
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are live and the pointer is non-null and aligned
        // even for an empty storage.
        unsafe { slice::from_raw_parts(self.storage.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: see as_slice; &mut self guarantees exclusivity.
        unsafe { slice::from_raw_parts_mut(self.storage.as_mut_ptr(), self.len) }
    }

    /// Returns the base address of the block.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.storage.as_ptr()
    }

    /// Returns the mutable base address of the block.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.storage.as_mut_ptr()
    }

    /// Returns the `begin..end` address pair spanning exactly the live prefix.
    #[inline]
    pub fn as_ptr_range(&self) -> core::ops::Range<*const T> {
        self.as_slice().as_ptr_range()
    }

    /// Checked access: returns the element at `index` or a descriptive range error.
    ///
    /// # Errors
    ///
    /// Returns [`DynamicArrayError::OutOfRange`] if `index >= len`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use stowage_vec::{DynamicArray, DynamicArrayError, dyn_array};
    ///
    /// let array = dyn_array![10, 20];
    /// assert_eq!(array.at(1), Ok(&20));
    /// assert_eq!(
    ///     array.at(2),
    ///     Err(DynamicArrayError::OutOfRange { index: 2, len: 2 })
    /// );
    /// ```
    pub fn at(&self, index: usize) -> Result<&T, DynamicArrayError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(DynamicArrayError::OutOfRange { index, len })
    }

    /// Mutable counterpart of [`at`](Self::at).
    ///
    /// # Errors
    ///
    /// Returns [`DynamicArrayError::OutOfRange`] if `index >= len`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, DynamicArrayError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(DynamicArrayError::OutOfRange { index, len })
    }

    /// Capacity after the next growth step: `max(1, 2 * capacity)`.
    #[inline]
    fn grown_capacity(&self) -> Option<usize> {
        match self.capacity() {
            0 => Some(1),
            capacity => capacity.checked_mul(2),
        }
    }

    fn grow_storage(&self) -> RawStorage<T> {
        match self.grown_capacity() {
            Some(capacity) => RawStorage::allocate(capacity),
            None => capacity_overflow(),
        }
    }

    fn try_allocate(&self, capacity: usize) -> Result<RawStorage<T>, AllocError> {
        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, DynamicArrayBehaviour::FailAtGrow) {
            return Err(AllocError::OutOfMemory {
                size: capacity.saturating_mul(mem::size_of::<T>()),
                align: mem::align_of::<T>(),
            });
        }

        RawStorage::try_allocate(capacity)
    }

    /// Relocates the live prefix into `new_storage` and adopts it.
    ///
    /// With `gap = Some(at)`, slot `at` of the new block is skipped: elements
    /// `[0, at)` keep their offsets and `[at, len)` shift up by one. The old
    /// block only holds moved-from slots afterwards and is freed without
    /// running destructors.
    fn relocate_into(&mut self, mut new_storage: RawStorage<T>, gap: Option<usize>) {
        debug_assert!(new_storage.capacity() >= self.len + usize::from(gap.is_some()));

        let src = self.storage.as_ptr();
        let dst = new_storage.as_mut_ptr();

        // SAFETY: [0, len) are live in the old block, the new block has room
        // for them (plus the gap), and the two blocks are distinct.
        unsafe {
            match gap {
                None => transfer::relocate(src, dst, self.len),
                Some(at) => {
                    debug_assert!(at <= self.len);
                    transfer::relocate(src, dst, at);
                    transfer::relocate(src.add(at), dst.add(at + 1), self.len - at);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_capacity = self.storage.capacity(),
            new_capacity = new_storage.capacity(),
            len = self.len,
            "dynamic array reallocated"
        );

        self.storage = new_storage;
    }

    /// Constructs the value produced by `f` at slot `index` of `new_storage`,
    /// then relocates the old elements around it and adopts the new block.
    fn emplace_into<F>(&mut self, index: usize, mut new_storage: RawStorage<T>, f: F)
    where
        F: FnOnce() -> T,
    {
        // A panic in `f` only frees `new_storage`; nothing was relocated yet.
        let value = f();

        // SAFETY: index <= len < new capacity, and the slot is uninitialized.
        unsafe { new_storage.ptr_at_mut(index).write(value) };

        self.relocate_into(new_storage, Some(index));
        self.len += 1;
    }

    /// Grows the capacity to exactly `new_capacity`. No-op if it is not larger.
    ///
    /// Existing elements are moved into the new block; their addresses change.
    ///
    /// # Panics
    ///
    /// Panics on capacity overflow; allocator exhaustion is fatal.
    pub fn reserve_exact(&mut self, new_capacity: usize) {
        if new_capacity <= self.capacity() {
            return;
        }

        let new_storage = RawStorage::allocate(new_capacity);
        self.relocate_into(new_storage, None);
    }

    /// Fallible counterpart of [`reserve_exact`](Self::reserve_exact).
    ///
    /// # Errors
    ///
    /// Returns [`DynamicArrayError::Alloc`] if the block cannot be allocated.
    /// The array is left unchanged.
    pub fn try_reserve_exact(&mut self, new_capacity: usize) -> Result<(), DynamicArrayError> {
        if new_capacity <= self.capacity() {
            return Ok(());
        }

        let new_storage = self.try_allocate(new_capacity)?;
        self.relocate_into(new_storage, None);

        Ok(())
    }

    /// Makes room for `additional` more values, keeping amortized doubling.
    pub(crate) fn reserve_for(&mut self, additional: usize) {
        if additional <= self.spare_capacity() {
            return;
        }

        let Some(required) = self.len.checked_add(additional) else {
            capacity_overflow()
        };
        let doubled = self.grown_capacity().unwrap_or(required);

        self.reserve_exact(required.max(doubled));
    }

    /// Appends `value`, doubling the capacity when the array is full.
    pub fn push(&mut self, value: T) {
        self.push_with(|| value);
    }

    /// Appends the value produced by `f` and returns a reference to it.
    ///
    /// When the array is full, `f` runs after the new block is allocated but
    /// before any element is relocated: if it panics, the array is unchanged.
    pub fn push_with<F>(&mut self, f: F) -> &mut T
    where
        F: FnOnce() -> T,
    {
        let index = self.len;

        if self.len == self.capacity() {
            let new_storage = self.grow_storage();
            self.emplace_into(index, new_storage, f);
        } else {
            let value = f();
            // SAFETY: len < capacity, so slot `len` is in bounds and uninitialized.
            unsafe { self.storage.ptr_at_mut(index).write(value) };
            self.len += 1;
        }

        // SAFETY: slot `index` was just constructed and is within [0, len).
        unsafe { &mut *self.storage.ptr_at_mut(index) }
    }

    /// Appends `value`, reporting allocation failure instead of aborting.
    ///
    /// # Errors
    ///
    /// Returns [`DynamicArrayError::Alloc`] if growth is needed and fails. The
    /// array is unchanged and `value` is dropped.
    pub fn try_push(&mut self, value: T) -> Result<(), DynamicArrayError> {
        let index = self.len;

        if self.len == self.capacity() {
            let capacity = self.grown_capacity().ok_or(AllocError::CapacityOverflow)?;
            let new_storage = self.try_allocate(capacity)?;
            self.emplace_into(index, new_storage, || value);
        } else {
            // SAFETY: len < capacity, so slot `len` is in bounds and uninitialized.
            unsafe { self.storage.ptr_at_mut(index).write(value) };
            self.len += 1;
        }

        Ok(())
    }

    /// Appends clones of every element of `values`.
    ///
    /// If a clone panics, the clones made so far are dropped and the length is
    /// unchanged.
    pub fn extend_from_slice(&mut self, values: &[T])
    where
        T: Clone,
    {
        self.reserve_for(values.len());

        let end = self.storage.ptr_at_mut(self.len);
        // SAFETY: reserve_for left at least values.len() uninitialized slots at `end`.
        let written = unsafe { transfer::construct_from(end, values.iter().cloned()) };
        self.len += written;
    }

    /// Drops the last element.
    ///
    /// # Panics
    ///
    /// Panics if the array is empty. Use [`pop`](Self::pop) when emptiness is
    /// not known.
    pub fn pop_last(&mut self) {
        assert!(self.len > 0, "DynamicArray::pop_last: array is empty");

        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range.
        unsafe { ptr::drop_in_place(self.storage.ptr_at_mut(self.len)) }
    }

    /// Removes and returns the last element, or `None` if empty.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;
        // SAFETY: slot `len` was live and is now outside the live range.
        Some(unsafe { self.storage.ptr_at(self.len).read() })
    }

    /// Inserts `value` at `index`, shifting `[index, len)` one slot toward the
    /// tail. Returns `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert(&mut self, index: usize, value: T) -> usize {
        self.insert_with(index, || value)
    }

    /// Inserts the value produced by `f` at `index`. Returns `index`.
    ///
    /// `index == len` behaves exactly like [`push_with`](Self::push_with). When
    /// the array is full, the value is constructed directly into its final
    /// slot of the new block and the old elements are relocated around it.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub fn insert_with<F>(&mut self, index: usize, f: F) -> usize
    where
        F: FnOnce() -> T,
    {
        assert!(
            index <= self.len,
            "DynamicArray::insert: index {index} > len {}",
            self.len
        );

        if index == self.len {
            self.push_with(f);
            return index;
        }

        if self.len == self.capacity() {
            let new_storage = self.grow_storage();
            self.emplace_into(index, new_storage, f);
            return index;
        }

        let value = f();
        let at = self.storage.ptr_at_mut(index);

        // SAFETY: len < capacity, so [index + 1, len + 1) fits; after the
        // shift slot `index` is moved-from and gets the new value.
        unsafe {
            transfer::relocate_within(at, at.add(1), self.len - index);
            at.write(value);
        }
        self.len += 1;

        index
    }

    /// Removes and returns the element at `index`, shifting `[index + 1, len)`
    /// one slot toward the head.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "DynamicArray::remove: index {index} >= len {}",
            self.len
        );

        let at = self.storage.ptr_at_mut(index);

        // SAFETY: index < len; the removed value is read out before the tail
        // closes the gap, so every slot stays owned exactly once.
        unsafe {
            let removed = at.read();
            transfer::relocate_within(at.add(1), at, self.len - index - 1);
            self.len -= 1;
            removed
        }
    }

    /// Drops the element at `index` and closes the gap.
    ///
    /// Returns the position following the removed element: the index of the
    /// element that took its place, or `len` if the last element was removed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn erase(&mut self, index: usize) -> usize {
        drop(self.remove(index));
        index
    }

    /// Removes the element at `index` by moving the last element into its place.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub fn swap_remove(&mut self, index: usize) -> T {
        assert!(
            index < self.len,
            "DynamicArray::swap_remove: index {index} >= len {}",
            self.len
        );

        let last = self.len - 1;
        self.as_mut_slice().swap(index, last);
        self.len = last;

        // SAFETY: slot `last` was live and is now outside the live range.
        unsafe { self.storage.ptr_at(last).read() }
    }

    /// Drops every element past `new_len`. Capacity is unchanged.
    pub fn truncate(&mut self, new_len: usize) {
        if new_len >= self.len {
            return;
        }

        let tail = ptr::slice_from_raw_parts_mut(self.storage.ptr_at_mut(new_len), self.len - new_len);
        // Shrink first: a panicking destructor must not cause a double drop.
        self.len = new_len;

        // SAFETY: the tail slots were live and are now outside the live range.
        unsafe { ptr::drop_in_place(tail) }
    }

    /// Drops every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    ///
    /// Shrinking drops the tail and keeps the capacity. Growing reserves exactly
    /// `new_len` slots first; the length only changes once every new value is
    /// constructed.
    pub fn resize(&mut self, new_len: usize)
    where
        T: Default,
    {
        self.resize_with(new_len, T::default);
    }

    /// Resizes to `new_len`, filling new slots with values produced by `f`.
    ///
    /// If `f` panics, the values produced so far are dropped and the contents
    /// are as before (capacity may already have grown).
    pub fn resize_with<F>(&mut self, new_len: usize, f: F)
    where
        F: FnMut() -> T,
    {
        if new_len <= self.len {
            self.truncate(new_len);
            return;
        }

        self.reserve_exact(new_len);

        let additional = new_len - self.len;
        let end = self.storage.ptr_at_mut(self.len);

        // SAFETY: reserve_exact guarantees `additional` uninitialized slots at `end`.
        let written = unsafe { transfer::construct_from(end, iter::repeat_with(f).take(additional)) };
        self.len += written;
    }

    /// Exchanges storage and length with `other`. Never constructs, drops or fails.
    pub fn swap_with(&mut self, other: &mut Self) {
        self.storage.swap(&mut other.storage);
        mem::swap(&mut self.len, &mut other.len);
    }

    /// Moves the contents out, leaving `self` with length 0 and capacity 0.
    pub fn take(&mut self) -> Self {
        let mut taken = Self::new();
        taken.swap_with(self);
        taken
    }

    /// Returns an iterator over shared references to the live elements.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references to the live elements.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// Hands the storage and length to the owning iterator.
    pub(crate) fn into_raw_parts(self) -> (RawStorage<T>, usize) {
        let mut this = mem::ManuallyDrop::new(self);
        (this.storage.take(), this.len)
    }

    /// Changes the test behaviour for this array.
    ///
    /// This is only available with the `test_utils` feature and allows injecting
    /// failures for testing error handling paths.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: DynamicArrayBehaviour) {
        self.behaviour = behaviour;
    }
}

impl<T> Default for DynamicArray<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for DynamicArray<T> {
    /// Copies every element into a new block of capacity `len`.
    ///
    /// If a clone panics, the clones made so far are dropped.
    fn clone(&self) -> Self {
        Self::from_trusted_iter(self.len, self.iter().cloned())
    }

    /// Reuses the existing block when it is large enough; otherwise clones into
    /// a fresh array and swaps it in, leaving `self` untouched on panic.
    fn clone_from(&mut self, source: &Self) {
        if source.len > self.capacity() {
            let mut fresh = source.clone();
            self.swap_with(&mut fresh);
            return;
        }

        self.truncate(source.len);

        let common = self.len;
        self.as_mut_slice().clone_from_slice(&source[..common]);
        self.extend_from_slice(&source[common..]);
    }
}

impl<T> Drop for DynamicArray<T> {
    fn drop(&mut self) {
        // SAFETY: [0, len) are live; the storage frees the block afterwards.
        unsafe { ptr::drop_in_place(self.as_mut_slice() as *mut [T]) }
    }
}

#[cold]
#[inline(never)]
fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}
