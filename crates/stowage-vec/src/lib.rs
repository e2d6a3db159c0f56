// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable array with amortized doubling and panic-safe relocation.
//!
//! `DynamicArray<T>` owns a [`RawStorage<T>`](stowage_raw::RawStorage) plus a
//! count of live elements. The storage only manages bytes; every construction,
//! drop and relocation of elements happens here.
//!
//! # Core Guarantees
//!
//! - **Live prefix**: slots `[0, len)` hold live values, `[len, capacity)` are
//!   uninitialized and never read, assigned or dropped.
//! - **Amortized growth**: a full array grows to `max(1, 2 * capacity)`.
//! - **Panic safety**: a panicking `Default`, `Clone` or constructor closure
//!   drops exactly the values built so far; growth never relocates anything
//!   before the new element exists.
//! - **Checked and unchecked access**: indexing panics on a bad index,
//!   [`DynamicArray::at`] returns [`DynamicArrayError::OutOfRange`] instead.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use stowage_vec::{DynamicArray, dyn_array};
//!
//! let mut array = dyn_array![1, 2, 3];
//! assert_eq!(array.len(), 3);
//!
//! array.insert(1, 99);
//! array.erase(0);
//! array.pop_last();
//!
//! assert_eq!(array, [99, 2]);
//!
//! let copy = array.clone();
//! assert_eq!(copy, array);
//! assert!(copy < dyn_array![100]);
//! ```
//!
//! # Example: Growth
//!
//! ```rust
//! use stowage_vec::DynamicArray;
//!
//! let mut array = DynamicArray::new();
//! let mut capacities = Vec::new();
//!
//! for i in 0..5 {
//!     array.push(i);
//!     capacities.push(array.capacity());
//! }
//!
//! assert_eq!(capacities, [1, 2, 4, 4, 8]);
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject allocation failures:
//!
//! ```toml
//! [dev-dependencies]
//! stowage-vec = { version = "*", features = ["test_utils"] }
//! ```
//!
//! Then use [`DynamicArrayBehaviour`] on the fallible surface
//! ([`DynamicArray::try_push`], [`DynamicArray::try_reserve_exact`]).
//!
//! # Tracing
//!
//! With the `tracing` feature every reallocation emits a `TRACE` event carrying
//! the old capacity, the new capacity and the length.

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod dynamic_array;
mod error;
mod into_iter;
mod reserve;
mod traits;
mod transfer;

#[cfg(test)]
mod tests;

pub use dynamic_array::DynamicArray;
pub use error::DynamicArrayError;
pub use into_iter::IntoIter;
pub use reserve::{ReserveHint, reserve};

#[cfg(any(test, feature = "test_utils"))]
pub use dynamic_array::DynamicArrayBehaviour;

/// Creates a [`DynamicArray`] from a literal list, like `vec!`.
///
/// - `dyn_array![]` is empty.
/// - `dyn_array![a, b, c]` holds the listed values; capacity equals the count.
/// - `dyn_array![value; n]` holds `n` clones of `value`.
///
/// # Example
///
/// ```rust
/// use stowage_vec::dyn_array;
///
/// let listed = dyn_array!["a", "b"];
/// assert_eq!(listed.capacity(), 2);
///
/// let repeated = dyn_array![0u8; 4];
/// assert_eq!(repeated, [0, 0, 0, 0]);
/// ```
#[macro_export]
macro_rules! dyn_array {
    () => {
        $crate::DynamicArray::new()
    };
    ($value:expr; $len:expr) => {
        $crate::DynamicArray::from_elem($value, $len)
    };
    ($($value:expr),+ $(,)?) => {
        $crate::DynamicArray::from([$($value),+])
    };
}
