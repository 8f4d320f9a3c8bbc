use crate::{CoreError, CoreResult};

/// Floating point type used throughout system
pub type Real = f64;

/// Absolute + relative tolerance pair for float comparisons.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

impl Tolerances {
    /// Loose tolerance for values that went through an iterative property solve.
    pub const PROPERTY: Tolerances = Tolerances {
        abs: 1e-6,
        rel: 1e-6,
    };
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> CoreResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite { what, value: v })
    }
}

/// Clamp a value between min and max.
///
/// Unlike `f64::clamp` this never panics when `min > max`; `max` wins.
pub fn clamp(value: Real, min: Real, max: Real) -> Real {
    if value < min {
        max.min(min)
    } else if value > max {
        max
    } else {
        value
    }
}

/// `n` points spaced evenly in log10 between `start` and `end` (both inclusive).
///
/// Returns an empty vector when either bound is non-positive or `n == 0`.
pub fn log_space(start: Real, end: Real, n: usize) -> Vec<Real> {
    if n == 0 || start <= 0.0 || end <= 0.0 {
        return Vec::new();
    }
    if n == 1 {
        return vec![start];
    }
    let (lo, hi) = (start.log10(), end.log10());
    let step = (hi - lo) / (n - 1) as Real;
    (0..n)
        .map(|i| {
            if i == n - 1 {
                end
            } else {
                10.0_f64.powf(lo + step * i as Real)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nearly_equal_basic() {
        let tol = Tolerances {
            abs: 1e-12,
            rel: 1e-9,
        };
        assert!(nearly_equal(1.0, 1.0 + 1e-12, tol));
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn ensure_finite_detects_nan() {
        let err = ensure_finite(Real::NAN, "test").unwrap_err();
        let msg = format!("{err}");
        assert!(msg.contains("Non-finite"));
    }

    #[test]
    fn clamp_prefers_upper_bound_when_inverted() {
        assert_eq!(clamp(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp(-1.0, 0.0, 10.0), 0.0);
        assert_eq!(clamp(11.0, 0.0, 10.0), 10.0);
        assert_eq!(clamp(3.0, 8.0, 4.0), 4.0);
        assert_eq!(clamp(6.0, 8.0, 4.0), 4.0);
        assert_eq!(clamp(9.0, 8.0, 4.0), 4.0);
    }

    #[test]
    fn log_space_hits_both_ends() {
        let pts = log_space(10.0, 1000.0, 3);
        assert_eq!(pts.len(), 3);
        assert!(nearly_equal(pts[0], 10.0, Tolerances::default()));
        assert!(nearly_equal(pts[1], 100.0, Tolerances::default()));
        assert_eq!(pts[2], 1000.0);
    }

    #[test]
    fn log_space_rejects_non_positive() {
        assert!(log_space(0.0, 10.0, 5).is_empty());
        assert!(log_space(1.0, 10.0, 0).is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn log_space_is_monotonic(
            start in 1.0_f64..1e4,
            span in 1.01_f64..100.0,
            n in 2_usize..120,
        ) {
            let end = start * span;
            let pts = log_space(start, end, n);
            prop_assert_eq!(pts.len(), n);
            prop_assert!(pts.windows(2).all(|w| w[0] < w[1]));
            prop_assert!(nearly_equal(pts[0], start, Tolerances::default()));
        }
    }
}
