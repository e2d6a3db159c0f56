// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Opaque request to pre-size a new [`DynamicArray`](crate::DynamicArray).
///
/// Only produced by [`reserve`] and only consumed by
/// [`DynamicArray::with_reserved`](crate::DynamicArray::with_reserved) (or the
/// equivalent `From` conversion). No element is constructed.
#[derive(Debug, PartialEq, Eq)]
pub struct ReserveHint {
    capacity: usize,
}

impl ReserveHint {
    /// Returns the requested capacity.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Builds a [`ReserveHint`] for `capacity` slots.
///
/// # Example
///
/// ```rust
/// use stowage_vec::{DynamicArray, reserve};
///
/// let array: DynamicArray<u32> = DynamicArray::with_reserved(reserve(64));
///
/// assert_eq!(array.len(), 0);
/// assert_eq!(array.capacity(), 64);
/// ```
pub fn reserve(capacity: usize) -> ReserveHint {
    ReserveHint { capacity }
}
