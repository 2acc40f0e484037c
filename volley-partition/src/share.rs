//! Numeric share distribution.
//!
//! Two primitives underpin every phase split: an integer split that
//! preserves the total exactly, and a continuous split for quantities
//! where fractional shares are meaningful (ramp endpoints).

/// Splits an integer total into `workers` shares summing exactly to
/// `total`, as evenly as possible.
///
/// Largest-remainder allocation with a deterministic tie-break: when
/// the total does not divide evenly, lower-indexed workers get the
/// extra unit. When `total < workers` the load is concentrated on the
/// first `total` workers instead of being spread fractionally; the
/// remaining workers get 0.
///
/// The shares must sum to `total` exactly; load is never silently lost
/// or fabricated.
///
/// # Panics
///
/// Panics if `workers` is 0, or if the shares fail to sum to `total`.
#[must_use]
pub fn distribute(total: u64, workers: u32) -> Vec<u64> {
    assert!(workers > 0, "cannot distribute across zero workers");
    let mut shares = vec![0_u64; workers as usize];
    if total < u64::from(workers) {
        #[allow(clippy::cast_possible_truncation)] // total < workers, fits usize
        for share in shares.iter_mut().take(total as usize) {
            *share = 1;
        }
    } else {
        let base = total / u64::from(workers);
        #[allow(clippy::cast_possible_truncation)] // remainder < workers, fits usize
        let remainder = (total % u64::from(workers)) as usize;
        for (worker, share) in shares.iter_mut().enumerate() {
            *share = if worker < remainder { base + 1 } else { base };
        }
    }

    let allocated: u64 = shares.iter().sum();
    assert_eq!(allocated, total, "shares must sum to the original total");
    shares
}

/// Splits a continuous total into `workers` equal shares of
/// `total / workers` each.
///
/// Used where the quantity is a rate for which uneven integer
/// remainders are not meaningful. The shares sum to `total` up to
/// floating-point precision; there is no special case for
/// `total < workers`.
///
/// # Panics
///
/// Panics if `workers` is 0.
#[must_use]
pub fn distribute_even(total: f64, workers: u32) -> Vec<f64> {
    assert!(workers > 0, "cannot distribute across zero workers");
    vec![total / f64::from(workers); workers as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_distribute_preserves_total() {
        for total in 0..=200 {
            for workers in 1..=32 {
                let shares = distribute(total, workers);
                assert_eq!(shares.len(), workers as usize);
                assert_eq!(shares.iter().sum::<u64>(), total, "{total} across {workers}");
            }
        }
    }

    #[test]
    fn test_distribute_scarce_load_concentrates_on_prefix() {
        assert_eq!(distribute(1, 4), vec![1, 0, 0, 0]);
        assert_eq!(distribute(3, 5), vec![1, 1, 1, 0, 0]);
        assert_eq!(distribute(4, 4), vec![1, 1, 1, 1]);
    }

    #[test]
    fn test_distribute_remainder_goes_to_lowest_indices() {
        assert_eq!(distribute(20, 3), vec![7, 7, 6]);
        assert_eq!(distribute(61, 4), vec![16, 15, 15, 15]);
        assert_eq!(distribute(10, 2), vec![5, 5]);
    }

    #[test]
    fn test_distribute_zero_total() {
        assert_eq!(distribute(0, 3), vec![0, 0, 0]);
    }

    #[test]
    fn test_distribute_single_worker() {
        assert_eq!(distribute(42, 1), vec![42]);
    }

    #[test]
    #[should_panic(expected = "zero workers")]
    fn test_distribute_rejects_zero_workers() {
        let _ = distribute(10, 0);
    }

    #[test]
    fn test_distribute_even_equal_shares() {
        let shares = distribute_even(10.0, 5);
        assert_eq!(shares, vec![2.0; 5]);
        assert!((shares.iter().sum::<f64>() - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_distribute_even_fractional() {
        let shares = distribute_even(10.0, 3);
        assert_eq!(shares.len(), 3);
        for share in &shares {
            assert!((share - 10.0 / 3.0).abs() < f64::EPSILON);
        }
    }

    #[test]
    fn test_distribute_even_no_scarcity_rule() {
        // Unlike the integer split, a small total is still spread evenly.
        assert_eq!(distribute_even(1.0, 4), vec![0.25; 4]);
    }
}
