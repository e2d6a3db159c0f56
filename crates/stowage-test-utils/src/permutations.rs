// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Permutation utilities for exhaustive testing.

/// Rearranges `indices` into the next lexicographic permutation.
///
/// Returns `false` (leaving `indices` untouched) once the last one is reached.
fn next_permutation(indices: &mut [usize]) -> bool {
    let Some(pivot) = indices.windows(2).rposition(|pair| pair[0] < pair[1]) else {
        return false;
    };

    let Some(successor) = (pivot + 1..indices.len())
        .rev()
        .find(|&i| indices[i] > indices[pivot])
    else {
        return false;
    };

    indices.swap(pivot, successor);
    indices[pivot + 1..].reverse();
    true
}

/// Calls `callback` with every permutation of `[0, 1, ..., len - 1]` in
/// lexicographic order.
///
/// # Example
/// ```
/// use stowage_test_utils::index_permutations;
///
/// let mut seen = Vec::new();
/// index_permutations(3, |perm| seen.push(perm.to_vec()));
///
/// assert_eq!(seen.len(), 6); // 3! = 6
/// assert_eq!(seen[0], [0, 1, 2]);
/// assert_eq!(seen[5], [2, 1, 0]);
/// ```
pub fn index_permutations<F>(len: usize, mut callback: F)
where
    F: FnMut(&[usize]),
{
    let mut indices: Vec<usize> = (0..len).collect();

    loop {
        callback(&indices);

        if !next_permutation(&mut indices) {
            break;
        }
    }
}
