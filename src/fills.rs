//! Partial-fill secret-index validation.
//!
//! A partial-fill order with `parts_amount = N` splits `[0, making_amount]`
//! into N equal-width buckets plus a dedicated bucket for the exact-100%
//! fill, and commits to one secret per bucket. A fill must consume the
//! secret whose bucket the new cumulative amount lands in, and indices may
//! only ever move forward: once a secret is spent on one chain it is public,
//! so reusing it would let anyone replay the unlock.

use crate::constants::UNUSED_INDEX;

/// Returns whether `index` is the admissible secret index for a fill that
/// brings the cumulative filled amount to `cumulative`.
///
/// Rules, for `S = making_amount` and `N = parts_amount`:
/// - `index <= N`;
/// - strictly greater than `last_used_index`, unless that still holds the
///   [`UNUSED_INDEX`] sentinel;
/// - `index == N` exactly when `cumulative == S` (the reserved last leaf);
/// - otherwise `cumulative` must land in bucket `index`, i.e.
///   `index * S / N <= cumulative < (index + 1) * S / N`.
///
/// Bucket bounds are compared cross-multiplied in `u128`
/// (`k * S <= cumulative * N < (k + 1) * S`), so boundaries are exact even
/// when `S` is not divisible by `N`.
pub fn is_valid_fill_index(
    making_amount: u64,
    parts_amount: u8,
    last_used_index: u8,
    index: u8,
    cumulative: u64,
) -> bool {
    if index > parts_amount {
        return false;
    }
    if last_used_index != UNUSED_INDEX && index <= last_used_index {
        return false;
    }

    let s = making_amount as u128;
    let n = parts_amount as u128;
    let c = cumulative as u128;
    let k = index as u128;

    if index == parts_amount {
        return c == s;
    }
    k * s <= c * n && c * n < (k + 1) * s
}

#[cfg(test)]
mod tests {
    use super::*;

    const S: u64 = 1_000_000_000;
    const N: u8 = 4;

    fn first(index: u8, cumulative: u64) -> bool {
        is_valid_fill_index(S, N, UNUSED_INDEX, index, cumulative)
    }

    #[test]
    fn first_fill_matches_its_bucket() {
        assert!(first(0, 100_000_000)); // [0%, 25%)
        assert!(first(1, 400_000_000)); // [25%, 50%)
        assert!(first(3, 750_000_000)); // [75%, 100%)
        assert!(!first(0, 400_000_000));
        assert!(!first(2, 400_000_000));
    }

    #[test]
    fn bucket_lower_bound_is_inclusive() {
        // Cumulative exactly at k*S/N falls in bucket k, not k-1.
        assert!(first(1, 250_000_000));
        assert!(!first(0, 250_000_000));
    }

    #[test]
    fn full_fill_requires_the_reserved_last_index() {
        assert!(first(N, S));
        assert!(!first(N - 1, S));
        assert!(!first(N, S - 1));
    }

    #[test]
    fn indices_progress_strictly() {
        assert!(!is_valid_fill_index(S, N, 1, 1, 600_000_000));
        assert!(!is_valid_fill_index(S, N, 1, 0, 600_000_000));
        assert!(is_valid_fill_index(S, N, 1, 2, 600_000_000));
    }

    #[test]
    fn index_above_parts_rejected() {
        assert!(!first(N + 1, S));
    }

    #[test]
    fn indivisible_amounts_use_exact_bounds() {
        // S = 10, N = 3: buckets are [0, 10/3), [10/3, 20/3), [20/3, 10).
        assert!(is_valid_fill_index(10, 3, UNUSED_INDEX, 0, 3)); // 3*3=9 < 10
        assert!(is_valid_fill_index(10, 3, UNUSED_INDEX, 1, 4)); // 10 <= 12 < 20
        assert!(!is_valid_fill_index(10, 3, UNUSED_INDEX, 0, 4));
        assert!(is_valid_fill_index(10, 3, UNUSED_INDEX, 2, 7)); // 20 <= 21 < 30
        assert!(is_valid_fill_index(10, 3, UNUSED_INDEX, 3, 10));
    }
}
