//! Jeffreys interval for a binomial proportion.
//!
//! The Jeffreys prior Beta(1/2, 1/2) combined with a binomial likelihood of
//! `x` successes in `n` trials gives the posterior Beta(x + 1/2, n - x + 1/2).
//! The equal-tailed interval takes the `alpha/2` and `1 - alpha/2` quantiles
//! of that posterior, with the lower bound fixed at 0 when `x = 0` and the
//! upper bound fixed at 1 when `x = n`.
//!
//! See <https://en.wikipedia.org/wiki/Binomial_proportion_confidence_interval#Jeffreys_interval>.

use statrs::distribution::{Beta, ContinuousCDF};
use tracing::debug;

use crate::error::{RakottError, Result};
use crate::interval::{validate_alpha, ConfidenceInterval};

/// Jeffreys confidence interval for `successes` out of `trials`.
///
/// Returns offsets from the point estimate `successes / trials`.
///
/// # Errors
///
/// * `InvalidTrials` when `trials == 0` (the estimate is undefined)
/// * `InvalidSuccesses` when `successes > trials`
/// * `InvalidAlpha` when `alpha` is not in (0, 1)
///
/// # Example
///
/// ```rust
/// use rakott::jeffreys_interval;
///
/// let ci = jeffreys_interval(10, 0, 0.05).unwrap();
/// assert_eq!(ci.low, 0.0);
/// ```
pub fn jeffreys_interval(trials: u64, successes: u64, alpha: f64) -> Result<ConfidenceInterval> {
    if trials == 0 {
        return Err(RakottError::InvalidTrials(trials));
    }
    if successes > trials {
        return Err(RakottError::InvalidSuccesses { successes, trials });
    }
    validate_alpha(alpha)?;

    let n = trials as f64;
    let x = successes as f64;
    let estimate = x / n;

    let posterior =
        Beta::new(x + 0.5, n - x + 0.5).map_err(|e| RakottError::Distribution(e.to_string()))?;

    let lower = if successes == 0 {
        0.0
    } else {
        beta_quantile(&posterior, alpha / 2.0, Tail::Lower)
    };
    let upper = if successes == trials {
        1.0
    } else {
        beta_quantile(&posterior, alpha / 2.0, Tail::Upper)
    };

    debug!(trials, successes, alpha, lower, upper, "jeffreys interval");

    Ok(ConfidenceInterval::from_bounds(estimate, lower, upper))
}

#[derive(Debug, Clone, Copy)]
enum Tail {
    Lower,
    Upper,
}

/// Point `q` where the chosen tail of `dist` holds probability `p`.
///
/// Bisects `[0, 1]` until the bracket can no longer be split in `f64`. The
/// upper tail is solved on `sf` directly so `1 - p` never loses digits.
fn beta_quantile(dist: &Beta, p: f64, tail: Tail) -> f64 {
    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    // Halving down to the smallest subnormal takes under 1100 steps
    for _ in 0..1100 {
        let mid = 0.5 * (lo + hi);
        if mid <= lo || mid >= hi {
            break;
        }
        let below = match tail {
            Tail::Lower => dist.cdf(mid) < p,
            Tail::Upper => dist.sf(mid) > p,
        };
        if below {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}
