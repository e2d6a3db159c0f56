// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::{LifeCycle, PROBE_PANIC, Probe};

#[test]
fn test_begin_resets_ledger() {
    let life = LifeCycle::begin();
    let _a = Probe::new(1);
    let _b = Probe::default();
    assert_eq!(life.constructed(), 2);

    let life = LifeCycle::begin();
    assert_eq!(life.constructed(), 0);
    assert_eq!(life.dropped(), 0);
}

#[test]
fn test_counts_clone_and_drop() {
    let life = LifeCycle::begin();

    let original = Probe::new(5);
    let copy = original.clone();

    assert_eq!(copy.value(), 5);
    assert_eq!(life.constructed(), 2);
    assert_eq!(life.live(), 2);

    drop(original);
    drop(copy);

    assert_eq!(life.dropped(), 2);
    assert_eq!(life.live(), 0);
}

#[test]
fn test_fail_after_panics_once() {
    let life = LifeCycle::begin();
    life.fail_after(2);

    let first = Probe::new(1);
    let second = Probe::new(2);
    let third = catch_unwind(|| Probe::new(3));

    let payload = third.expect_err("third construction should panic");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&PROBE_PANIC));

    // Disarmed after firing
    let fourth = Probe::new(4);

    assert_eq!(life.constructed(), 3);
    drop((first, second, fourth));
    assert_eq!(life.live(), 0);
}

#[test]
fn test_disarm() {
    let life = LifeCycle::begin();
    life.fail_after(0);
    life.disarm();

    let result = catch_unwind(AssertUnwindSafe(Probe::default));

    assert!(result.is_ok());
    assert_eq!(life.constructed(), 1);
}
