// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stowage-vec.

use stowage_raw::AllocError;
use thiserror::Error;

/// Errors reported by the checked and fallible surface of [`DynamicArray`](crate::DynamicArray).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum DynamicArrayError {
    /// Checked access with an index outside the live range.
    #[error("index out of range: index {index} >= size {len}")]
    OutOfRange {
        /// Requested index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },

    /// A reallocation could not be satisfied. The array is left unchanged.
    #[error("allocation failed: {0}")]
    Alloc(#[from] AllocError),
}
