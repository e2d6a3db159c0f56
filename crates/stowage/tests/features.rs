// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Runs the growth paths with the `test_utils` and `tracing` features enabled
//! on the array crate.

use stowage::{AllocError, DynamicArray, DynamicArrayError, dyn_array};
use stowage_vec::DynamicArrayBehaviour;

#[test]
fn test_growth_paths_with_reallocation_events() {
    let mut array = DynamicArray::new();

    for i in 0..64u32 {
        array.push(i);
    }
    array.insert(0, 100);
    array.reserve_exact(1_000);
    array.extend(0..10);

    assert_eq!(array.len(), 75);
    assert_eq!(array.capacity(), 1_000);
    assert_eq!(array[0], 100);
}

#[test]
fn test_injected_grow_failure_through_facade_types() {
    let mut array = dyn_array![1u8, 2];
    array.change_behaviour(DynamicArrayBehaviour::FailAtGrow);

    let result = array.try_push(3);

    assert_eq!(
        result,
        Err(DynamicArrayError::Alloc(AllocError::OutOfMemory {
            size: 4,
            align: 1,
        }))
    );
    assert_eq!(array, [1, 2]);

    array.change_behaviour(DynamicArrayBehaviour::None);
    array.try_push(3).expect("Failed to try_push(..)");
    assert_eq!(array, [1, 2, 3]);
}
