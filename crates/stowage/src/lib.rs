// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! <p align="center"><em>Growable arrays over raw typed storage.</em></p>
//!
//! ---
//!
//! Stowage splits a dynamic array into two layers:
//!
//! - [`RawStorage<T>`](raw::RawStorage) owns an uninitialized block of `T`
//!   slots. It allocates, frees and exposes addresses, and never constructs or
//!   drops an element.
//! - [`DynamicArray<T>`] owns a `RawStorage<T>` plus the number of live
//!   elements, and does every construction, drop and relocation itself.
//!
//! # Features
//!
//! - **Amortized doubling**: a full array grows to `max(1, 2 * capacity)`
//! - **Panic safety**: a panicking `Default`, `Clone` or constructor closure
//!   leaves the array as it was, and every value built so far is dropped
//! - **Checked access**: [`DynamicArray::at`] reports a bad index as an error
//! - **`no_std` compatible**: only `alloc` is required
//!
//! # Quick Start
//!
//! ```rust
//! use stowage::{DynamicArray, dyn_array, reserve};
//!
//! let mut array = DynamicArray::new();
//! array.push(1);
//! array.push(2);
//! array.push(3);
//!
//! array.insert(1, 99);
//! assert_eq!(array, [1, 99, 2, 3]);
//!
//! array.erase(0);
//! array.pop_last();
//! assert_eq!(array, [99, 2]);
//!
//! // Literal lists and pre-sized construction
//! let listed = dyn_array!["a", "b", "c"];
//! assert_eq!(listed.capacity(), 3);
//!
//! let sized: DynamicArray<u64> = reserve(16).into();
//! assert!(sized.is_empty());
//! assert_eq!(sized.capacity(), 16);
//!
//! // Checked access
//! assert!(array.at(5).is_err());
//! ```
//!
//! # Raw storage
//!
//! ```rust
//! use stowage::raw::RawStorage;
//!
//! let mut storage = RawStorage::<u32>::allocate(4);
//! storage[0].write(7);
//!
//! // SAFETY: slot 0 was just written.
//! assert_eq!(unsafe { storage[0].assume_init_read() }, 7);
//! ```
//!
//! # Feature flags
//!
//! - `test_utils`: exposes `DynamicArrayBehaviour` to inject allocation
//!   failures on the fallible surface.
//! - `tracing`: emits a `TRACE` event on every reallocation.
//!
//! # License
//!
//! GPL-3.0-only

#![cfg_attr(not(test), no_std)]

pub use stowage_raw as raw;
pub use stowage_vec as vec;

pub use stowage_raw::{AllocError, RawStorage};
pub use stowage_vec::{
    DynamicArray, DynamicArrayError, IntoIter, ReserveHint, dyn_array, reserve,
};

#[cfg(feature = "test_utils")]
pub use stowage_vec::DynamicArrayBehaviour;
