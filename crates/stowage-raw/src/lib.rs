// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Owning handle over a block of uninitialized, typed memory.
//!
//! `RawStorage<T>` owns exactly one contiguous block sized for a fixed number of
//! `T` slots. It knows nothing about object lifetime: it never constructs,
//! drops, clones or moves elements. Whoever places values in the block is
//! responsible for dropping them before the storage is released.
//!
//! # Core Guarantees
//!
//! - **No zero-size allocations**: a capacity of 0 (or a zero-sized `T`) never
//!   touches the allocator.
//! - **No in-place resize**: capacity only changes by allocating a new storage
//!   and transferring ownership.
//! - **Release on every path**: the block is freed on drop, including while
//!   unwinding, without running any element destructor.
//! - **Not clonable**: duplicating elements requires element-level semantics,
//!   which live one layer up.
//!
//! # Example
//!
//! ```rust
//! use stowage_raw::RawStorage;
//!
//! let mut storage = RawStorage::<u32>::allocate(4);
//! assert_eq!(storage.capacity(), 4);
//!
//! storage[0].write(7);
//!
//! // SAFETY: slot 0 was written right above.
//! let value = unsafe { storage[0].assume_init_read() };
//! assert_eq!(value, 7);
//! ```
//!
//! # Example: Fallible Allocation
//!
//! ```rust
//! use stowage_raw::{AllocError, RawStorage};
//!
//! fn example() -> Result<(), AllocError> {
//!     let storage = RawStorage::<u64>::try_allocate(16)?;
//!     assert_eq!(storage.capacity(), 16);
//!
//!     assert_eq!(
//!         RawStorage::<u64>::try_allocate(usize::MAX).unwrap_err(),
//!         AllocError::CapacityOverflow
//!     );
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

mod error;
mod raw_storage;

#[cfg(test)]
mod tests;

pub use error::AllocError;
pub use raw_storage::RawStorage;
