//! Tolerance comparison primitives used by every check
//!
//! Pure, deterministic, CPU-bound. The one probabilistic comparison in the
//! pipeline — text equivalence — lives behind the [`SimilarityScorer`]
//! port instead, so it can be swapped for any scorer without touching
//! validation logic.
//!
//! [`SimilarityScorer`]: crate::ports::SimilarityScorer

use crate::error::RangeError;

/// Near-equality for pay rates.
///
/// True iff both rates are present and `|a - b| <= tolerance`. An absent
/// operand compares unequal so the caller is forced into a review verdict
/// rather than a silent pass. Operands are expected non-negative.
pub fn rates_equal(a: Option<f64>, b: Option<f64>, tolerance: f64) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => (a - b).abs() <= tolerance,
        _ => false,
    }
}

/// Inclusive range containment.
///
/// Fails with [`RangeError`] when `low > high` — that is an invariant
/// violation in the caller's data, not a falsy answer.
pub fn in_range(value: f64, low: f64, high: f64) -> Result<bool, RangeError> {
    if low > high {
        return Err(RangeError { low, high });
    }
    Ok(value >= low && value <= high)
}

/// Canonical `$XX.XX` presentation for a rate, `NOT FOUND` when absent.
pub fn format_rate(rate: Option<f64>) -> String {
    match rate {
        Some(r) => format!("${:.2}", r),
        None => "NOT FOUND".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_equal_within_tolerance() {
        assert!(rates_equal(Some(14.75), Some(14.75), 0.01));
        assert!(rates_equal(Some(14.75), Some(14.76), 0.01));
        assert!(rates_equal(Some(14.76), Some(14.75), 0.01));
    }

    #[test]
    fn test_rates_unequal_beyond_tolerance() {
        assert!(!rates_equal(Some(14.75), Some(14.77), 0.01));
        assert!(!rates_equal(Some(12.50), Some(14.75), 0.01));
    }

    #[test]
    fn test_rates_equal_absent_operand_is_false() {
        assert!(!rates_equal(None, Some(14.75), 0.01));
        assert!(!rates_equal(Some(14.75), None, 0.01));
        assert!(!rates_equal(None, None, 0.01));
    }

    #[test]
    fn test_in_range_inclusive_bounds() {
        assert!(in_range(14.75, 14.75, 15.0).unwrap());
        assert!(in_range(15.0, 14.75, 15.0).unwrap());
        assert!(in_range(14.9, 14.75, 15.0).unwrap());
        assert!(!in_range(14.74, 14.75, 15.0).unwrap());
        assert!(!in_range(15.01, 14.75, 15.0).unwrap());
    }

    #[test]
    fn test_in_range_rejects_inverted_bounds() {
        let err = in_range(14.0, 15.0, 14.0).unwrap_err();
        assert_eq!(err, RangeError {
            low: 15.0,
            high: 14.0
        });
    }

    #[test]
    fn test_format_rate() {
        assert_eq!(format_rate(Some(14.75)), "$14.75");
        assert_eq!(format_rate(Some(15.0)), "$15.00");
        assert_eq!(format_rate(None), "NOT FOUND");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: near-equality is symmetric at every tolerance.
        #[test]
        fn rates_equal_symmetric(a in 0.0f64..100.0, b in 0.0f64..100.0) {
            prop_assert_eq!(
                rates_equal(Some(a), Some(b), 0.01),
                rates_equal(Some(b), Some(a), 0.01)
            );
        }

        /// Property: a rate is always equal to itself.
        #[test]
        fn rates_equal_reflexive(a in 0.0f64..100.0) {
            prop_assert!(rates_equal(Some(a), Some(a), 0.01));
        }

        /// Property: verdict agrees with the raw difference.
        #[test]
        fn rates_equal_matches_difference(a in 0.0f64..100.0, b in 0.0f64..100.0) {
            prop_assert_eq!(rates_equal(Some(a), Some(b), 0.01), (a - b).abs() <= 0.01);
        }

        /// Property: both endpoints of any well-formed range are contained.
        #[test]
        fn in_range_contains_endpoints(low in 0.0f64..50.0, span in 0.0f64..50.0) {
            let high = low + span;
            prop_assert!(in_range(low, low, high).unwrap());
            prop_assert!(in_range(high, low, high).unwrap());
        }

        /// Property: strictly inverted bounds always fail.
        #[test]
        fn in_range_rejects_inversion(low in 1.0f64..50.0, below in 0.001f64..1.0) {
            let high = low - below;
            prop_assert!(in_range(low, low, high).is_err());
        }
    }
}
