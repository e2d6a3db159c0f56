// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Lifetime accounting for container tests.

use std::cell::Cell;
use std::marker::PhantomData;

/// Panic payload raised by an armed [`Probe`] construction.
pub const PROBE_PANIC: &str = "probe: injected construction failure";

thread_local! {
    static CONSTRUCTED: Cell<usize> = const { Cell::new(0) };
    static DROPPED: Cell<usize> = const { Cell::new(0) };
    static FAIL_AFTER: Cell<Option<usize>> = const { Cell::new(None) };
}

/// Per-thread ledger of [`Probe`] constructions and drops.
///
/// Each test runs on its own thread, so ledgers never mix. Creating a
/// `LifeCycle` resets the ledger and disarms any pending failure.
///
/// # Example
///
/// ```
/// use stowage_test_utils::{LifeCycle, Probe};
///
/// let life = LifeCycle::begin();
/// let probe = Probe::new(7);
/// let copy = probe.clone();
///
/// assert_eq!(life.constructed(), 2);
/// drop(probe);
/// drop(copy);
/// assert_eq!(life.live(), 0);
/// ```
#[derive(Debug)]
pub struct LifeCycle {
    _thread_bound: PhantomData<*const ()>,
}

impl LifeCycle {
    /// Resets the ledger of the current thread.
    pub fn begin() -> Self {
        CONSTRUCTED.set(0);
        DROPPED.set(0);
        FAIL_AFTER.set(None);

        Self {
            _thread_bound: PhantomData,
        }
    }

    /// Number of probes constructed (`new`, `default`, `clone`) since `begin`.
    pub fn constructed(&self) -> usize {
        CONSTRUCTED.get()
    }

    /// Number of probes dropped since `begin`.
    pub fn dropped(&self) -> usize {
        DROPPED.get()
    }

    /// Probes currently alive.
    pub fn live(&self) -> usize {
        self.constructed() - self.dropped()
    }

    /// Lets `successes` more constructions through, then panics once with
    /// [`PROBE_PANIC`] and disarms itself.
    pub fn fail_after(&self, successes: usize) {
        FAIL_AFTER.set(Some(successes));
    }

    /// Cancels a pending failure.
    pub fn disarm(&self) {
        FAIL_AFTER.set(None);
    }
}

fn record_construction() {
    match FAIL_AFTER.get() {
        Some(0) => {
            FAIL_AFTER.set(None);
            std::panic::panic_any(PROBE_PANIC);
        }
        Some(remaining) => FAIL_AFTER.set(Some(remaining - 1)),
        None => {}
    }

    CONSTRUCTED.set(CONSTRUCTED.get() + 1);
}

/// An element whose constructions and drops are counted by [`LifeCycle`].
///
/// `new`, `default` and `clone` are constructions and may panic when the
/// ledger is armed with [`LifeCycle::fail_after`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Probe {
    value: u32,
}

impl Probe {
    /// Constructs a probe holding `value`.
    pub fn new(value: u32) -> Self {
        record_construction();
        Self { value }
    }

    /// Returns the payload.
    pub fn value(&self) -> u32 {
        self.value
    }
}

impl Default for Probe {
    fn default() -> Self {
        Self::new(0)
    }
}

impl Clone for Probe {
    fn clone(&self) -> Self {
        Self::new(self.value)
    }
}

impl Drop for Probe {
    fn drop(&mut self) {
        DROPPED.set(DROPPED.get() + 1);
    }
}
