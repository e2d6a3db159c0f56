// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for Stowage crates.
//!
//! - [`Probe`]: an element type that records every construction and drop on a
//!   per-thread [`LifeCycle`] ledger, and can be armed to panic on the n-th
//!   construction.
//! - [`index_permutations`]: exhaustive orderings for insert/erase sequences.
//!
//! ## License
//!
//! GPL-3.0-only

mod permutations;
mod probe;

#[cfg(test)]
mod tests;

pub use permutations::index_permutations;
pub use probe::{LifeCycle, PROBE_PANIC, Probe};
