// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Element relocation and guarded construction.
//!
//! Moving a value in Rust is a bitwise copy that cannot fail, so the transfer
//! policy (prefer a non-failing move, fall back to copy) always resolves to a
//! move. Every path that relocates elements (reserve, growth on push, growth on
//! insert, gap shifting on insert and erase) goes through the two primitives
//! below. Clones only happen where the caller asked for copies.

use core::mem;
use core::ptr;

/// Moves `count` live values from `src` into the uninitialized slots at `dst`.
///
/// Afterwards the source slots are logically uninitialized: they must be
/// neither read nor dropped.
///
/// # Safety
///
/// - `src` must point to `count` live values.
/// - `dst` must be valid for `count` writes.
/// - The two ranges must not overlap.
#[inline]
pub(crate) unsafe fn relocate<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded to the caller.
    unsafe { ptr::copy_nonoverlapping(src, dst, count) }
}

/// Moves `count` live values from `src` to `dst` inside the same block.
///
/// The ranges may overlap; the move behaves as if the values were first copied
/// out and then written back, which is what opening or closing a one-slot gap
/// requires.
///
/// # Safety
///
/// - `src` must point to `count` live values.
/// - `dst` must be valid for `count` writes.
/// - Slots of `dst` that do not overlap `src` must be uninitialized or
///   already moved-from.
#[inline]
pub(crate) unsafe fn relocate_within<T>(src: *const T, dst: *mut T, count: usize) {
    // SAFETY: forwarded to the caller.
    unsafe { ptr::copy(src, dst, count) }
}

/// Drops the values constructed so far if a construction loop unwinds.
struct PartialInit<T> {
    start: *mut T,
    initialized: usize,
}

impl<T> Drop for PartialInit<T> {
    fn drop(&mut self) {
        // SAFETY: exactly `initialized` values were written from `start`.
        unsafe {
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(
                self.start,
                self.initialized,
            ))
        }
    }
}

/// Writes every value yielded by `values` into consecutive slots starting at
/// `dst` and returns how many were written.
///
/// If producing a value panics, the values already written are dropped in
/// order before the panic continues, so the slots are left uninitialized.
///
/// # Safety
///
/// `dst` must be valid for as many writes as `values` yields, and those slots
/// must be uninitialized.
pub(crate) unsafe fn construct_from<T, I>(dst: *mut T, values: I) -> usize
where
    I: Iterator<Item = T>,
{
    let mut guard = PartialInit {
        start: dst,
        initialized: 0,
    };

    for value in values {
        // SAFETY: the caller guarantees room for every yielded value.
        unsafe { guard.start.add(guard.initialized).write(value) };
        guard.initialized += 1;
    }

    let written = guard.initialized;
    mem::forget(guard);
    written
}
