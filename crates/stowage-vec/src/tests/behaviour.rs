// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use stowage_raw::AllocError;

use crate::{DynamicArray, DynamicArrayBehaviour, DynamicArrayError, dyn_array};

#[test]
fn test_behaviour_default_is_none() {
    assert_eq!(DynamicArrayBehaviour::default(), DynamicArrayBehaviour::None);
}

#[test]
fn test_fail_at_grow_try_push_on_empty() {
    let mut array: DynamicArray<u64> = DynamicArray::new();
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    let result = array.try_push(1);

    assert_eq!(
        result,
        Err(DynamicArrayError::Alloc(AllocError::OutOfMemory {
            size: 8,
            align: 8,
        }))
    );
    assert_eq!(array.len(), 0);
    assert_eq!(array.capacity(), 0);
}

#[test]
fn test_fail_at_grow_try_push_when_full_leaves_array_unchanged() {
    let mut array = dyn_array![1u32, 2, 3];
    let base = array.as_ptr();
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    let result = array.try_push(4);

    assert!(matches!(
        result,
        Err(DynamicArrayError::Alloc(AllocError::OutOfMemory { .. }))
    ));
    assert_eq!(array, [1, 2, 3]);
    assert_eq!(array.capacity(), 3);
    assert_eq!(array.as_ptr(), base);
}

#[test]
fn test_fail_at_grow_does_not_affect_spare_capacity() {
    let mut array: DynamicArray<u8> = DynamicArray::with_capacity(2);
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    array.try_push(1).expect("Failed to try_push(..)");
    array.try_push(2).expect("Failed to try_push(..)");

    assert!(array.try_push(3).is_err());
    assert_eq!(array, [1, 2]);
}

#[test]
fn test_fail_at_grow_try_reserve_exact() {
    let mut array = dyn_array![1u16, 2];
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    let result = array.try_reserve_exact(16);

    assert_eq!(
        result,
        Err(DynamicArrayError::Alloc(AllocError::OutOfMemory {
            size: 32,
            align: 2,
        }))
    );
    assert_eq!(array.capacity(), 2);

    // A request that fits needs no allocation and succeeds.
    array
        .try_reserve_exact(2)
        .expect("Failed to try_reserve_exact(..)");
}

#[test]
fn test_behaviour_is_sticky_until_reset() {
    let mut array: DynamicArray<u8> = DynamicArray::new();
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    assert!(array.try_push(1).is_err());
    assert!(array.try_push(1).is_err());

    array.change_behaviour(DynamicArrayBehaviour::None);

    array.try_push(1).expect("Failed to try_push(..)");
    assert_eq!(array, [1]);
    assert_eq!(array.capacity(), 1);
}

#[test]
fn test_fail_at_grow_leaves_infallible_surface_alone() {
    let mut array: DynamicArray<u8> = DynamicArray::new();
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    array.push(1);
    array.reserve_exact(8);

    assert_eq!(array, [1]);
    assert_eq!(array.capacity(), 8);
}
