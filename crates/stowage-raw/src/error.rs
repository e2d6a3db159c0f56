// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stowage-raw.

use thiserror::Error;

/// Errors reported by the fallible allocation surface of [`RawStorage`](crate::RawStorage).
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// The requested capacity does not fit in a valid layout
    /// (byte size overflows `usize` or exceeds `isize::MAX`).
    #[error("capacity overflow: requested layout exceeds isize::MAX bytes")]
    CapacityOverflow,

    /// The global allocator could not satisfy the request.
    #[error("out of memory: failed to allocate {size} bytes (align {align})")]
    OutOfMemory {
        /// Requested size in bytes.
        size: usize,
        /// Requested alignment in bytes.
        align: usize,
    },
}
