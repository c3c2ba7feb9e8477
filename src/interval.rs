//! Shared types for proportion confidence intervals.

use serde::{Deserialize, Serialize};

use crate::error::{RakottError, Result};

/// Default two-sided significance level (95% interval).
pub const DEFAULT_ALPHA: f64 = 0.05;

/// A confidence interval expressed as offsets from a point estimate.
///
/// `low` and `high` are distances, not bounds: the interval around an
/// estimate `p` is `[p - low, p + high]`. Both offsets are non-negative and
/// the bounds stay inside `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceInterval {
    /// Distance from the estimate down to the lower bound
    pub low: f64,
    /// Distance from the estimate up to the upper bound
    pub high: f64,
}

impl ConfidenceInterval {
    /// Builds offsets from absolute bounds around `estimate`.
    ///
    /// Bounds landing on the wrong side of the estimate are pulled onto it,
    /// and bounds are kept inside `[0, 1]`.
    pub(crate) fn from_bounds(estimate: f64, lower: f64, upper: f64) -> Self {
        let lower = lower.clamp(0.0, estimate);
        let upper = upper.clamp(estimate, 1.0);
        Self {
            low: estimate - lower,
            high: upper - estimate,
        }
    }

    /// Absolute lower bound around `estimate`.
    pub fn lower(&self, estimate: f64) -> f64 {
        estimate - self.low
    }

    /// Absolute upper bound around `estimate`.
    pub fn upper(&self, estimate: f64) -> f64 {
        estimate + self.high
    }

    /// Total width of the interval.
    pub fn width(&self) -> f64 {
        self.low + self.high
    }
}

/// Checks that `alpha` lies in the open interval (0, 1).
pub(crate) fn validate_alpha(alpha: f64) -> Result<()> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(RakottError::InvalidAlpha(alpha))
    }
}

/// Percentile `q` (in `[0, 100]`) of an ascending sorted slice.
///
/// Interpolates linearly between the two closest ranks, so `q = 0` and
/// `q = 100` return the minimum and maximum.
pub(crate) fn percentile(sorted: &[f64], q: f64) -> f64 {
    debug_assert!(!sorted.is_empty());
    let rank = (q / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    sorted[lo] + (sorted[hi] - sorted[lo]) * (rank - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_percentile_interpolates() {
        let data = [1.0, 2.0, 3.0, 4.0];
        assert_abs_diff_eq!(percentile(&data, 0.0), 1.0);
        assert_abs_diff_eq!(percentile(&data, 100.0), 4.0);
        assert_abs_diff_eq!(percentile(&data, 50.0), 2.5, epsilon = 1e-12);
        assert_abs_diff_eq!(percentile(&data, 25.0), 1.75, epsilon = 1e-12);
    }

    #[test]
    fn test_percentile_single_value() {
        assert_abs_diff_eq!(percentile(&[7.0], 2.5), 7.0);
    }

    #[test]
    fn test_validate_alpha() {
        assert!(validate_alpha(0.05).is_ok());
        assert!(validate_alpha(0.0).is_err());
        assert!(validate_alpha(1.0).is_err());
        assert!(validate_alpha(-0.1).is_err());
        assert!(validate_alpha(f64::NAN).is_err());
    }

    #[test]
    fn test_from_bounds_clamps_to_estimate() {
        let ci = ConfidenceInterval::from_bounds(0.3, 0.35, 0.32);
        assert_eq!(ci.low, 0.0);
        assert_abs_diff_eq!(ci.high, 0.02, epsilon = 1e-12);

        let ci = ConfidenceInterval::from_bounds(0.5, 0.4, 0.7);
        assert_abs_diff_eq!(ci.lower(0.5), 0.4, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.upper(0.5), 0.7, epsilon = 1e-12);
        assert_abs_diff_eq!(ci.width(), 0.3, epsilon = 1e-12);
    }
}
