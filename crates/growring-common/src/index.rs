//! Circular index arithmetic over a slot count `cap`.
//!
//! All helpers return a value in `[0, cap)` given an input index already
//! in that range, and never overflow or underflow, even for capacities
//! close to `usize::MAX`. `cap` must be non-zero.

/// Index of the slot after `idx`.
#[inline(always)]
pub const fn wrap_inc(idx: usize, cap: usize) -> usize {
    debug_assert!(idx < cap);
    if idx + 1 == cap { 0 } else { idx + 1 }
}

/// Index of the slot before `idx`.
#[inline(always)]
pub const fn wrap_dec(idx: usize, cap: usize) -> usize {
    debug_assert!(idx < cap);
    if idx == 0 { cap - 1 } else { idx - 1 }
}

/// Index of the slot `offset` positions after `base`.
#[inline(always)]
pub const fn wrap_offset(base: usize, offset: usize, cap: usize) -> usize {
    debug_assert!(base < cap);
    let offset = offset % cap;
    // Same as `(base + offset) % cap` without the intermediate sum.
    if offset >= cap - base {
        offset - (cap - base)
    } else {
        base + offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inc_wraps_at_end() {
        assert_eq!(wrap_inc(0, 4), 1);
        assert_eq!(wrap_inc(2, 4), 3);
        assert_eq!(wrap_inc(3, 4), 0);
    }

    #[test]
    fn test_inc_capacity_1() {
        assert_eq!(wrap_inc(0, 1), 0);
    }

    #[test]
    fn test_dec_wraps_at_start() {
        assert_eq!(wrap_dec(3, 4), 2);
        assert_eq!(wrap_dec(0, 4), 3);
        assert_eq!(wrap_dec(0, 1), 0);
    }

    #[test]
    fn test_offset_matches_modulo() {
        for cap in 1..10usize {
            for base in 0..cap {
                for offset in 0..(3 * cap) {
                    assert_eq!(wrap_offset(base, offset, cap), (base + offset) % cap);
                }
            }
        }
    }

    #[test]
    fn test_offset_near_usize_max() {
        let cap = usize::MAX;
        assert_eq!(wrap_offset(cap - 1, 1, cap), 0);
        assert_eq!(wrap_offset(cap - 1, 2, cap), 1);
        assert_eq!(wrap_offset(cap - 2, 1, cap), cap - 1);
    }

    #[test]
    fn test_inc_dec_inverse() {
        for cap in 1..8usize {
            for idx in 0..cap {
                assert_eq!(wrap_dec(wrap_inc(idx, cap), cap), idx);
                assert_eq!(wrap_inc(wrap_dec(idx, cap), cap), idx);
            }
        }
    }
}
