//! Parametric bootstrap interval for binomial proportions.
//!
//! Each observed proportion `p` measured over `n` trials is resampled as
//! Binomial(n, p) counts. The empirical `100·alpha/2` and `100·(1 - alpha/2)`
//! percentiles of those counts, rescaled by `n`, bound the interval.
//!
//! Randomness comes from the caller's generator, so a seeded RNG gives
//! reproducible intervals.

use rand::Rng;
use rand_distr::{Binomial, Distribution};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{RakottError, Result};
use crate::interval::{percentile, validate_alpha, ConfidenceInterval, DEFAULT_ALPHA};

/// Default number of bootstrap resamples.
pub const DEFAULT_RESAMPLES: usize = 10_000;

/// Largest trial count accepted; counts up to 2^53 are exact in `f64`.
pub const MAX_TRIALS: u64 = 1 << 53;

/// Configuration for the bootstrap interval estimator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Two-sided significance level, in (0, 1)
    pub alpha: f64,
    /// Number of binomial draws per proportion
    pub resamples: usize,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            resamples: DEFAULT_RESAMPLES,
        }
    }
}

impl BootstrapConfig {
    /// Creates a validated configuration
    pub fn new(alpha: f64, resamples: usize) -> Result<Self> {
        let config = Self { alpha, resamples };
        config.validate()?;
        Ok(config)
    }

    /// Sets the significance level
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    /// Sets the number of resamples
    pub fn with_resamples(mut self, resamples: usize) -> Self {
        self.resamples = resamples;
        self
    }

    fn validate(&self) -> Result<()> {
        validate_alpha(self.alpha)?;
        if self.resamples == 0 {
            return Err(RakottError::InvalidResamples(self.resamples));
        }
        Ok(())
    }
}

/// Bootstrap confidence intervals for a set of proportions sharing `trials`.
///
/// Every entry of `proportions` is treated as its own binomial probability
/// and gets its own interval, in input order.
///
/// # Errors
///
/// * `InvalidTrials` when `trials == 0` or `trials > MAX_TRIALS`
/// * `InvalidProportion` when an entry is outside `[0, 1]`
/// * `InvalidResamples` / `InvalidAlpha` for a bad configuration
///
/// # Example
///
/// ```rust
/// use rakott::{bootstrap_interval, BootstrapConfig};
/// use rand::SeedableRng;
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
/// let config = BootstrapConfig::default().with_resamples(2_000);
/// let intervals = bootstrap_interval(&[0.2, 0.5], 40, &config, &mut rng).unwrap();
/// assert_eq!(intervals.len(), 2);
/// ```
pub fn bootstrap_interval<R: Rng + ?Sized>(
    proportions: &[f64],
    trials: u64,
    config: &BootstrapConfig,
    rng: &mut R,
) -> Result<Vec<ConfidenceInterval>> {
    if trials == 0 || trials > MAX_TRIALS {
        return Err(RakottError::InvalidTrials(trials));
    }
    config.validate()?;
    if let Some((index, &value)) = proportions
        .iter()
        .enumerate()
        .find(|(_, p)| !(0.0..=1.0).contains(*p))
    {
        return Err(RakottError::InvalidProportion { index, value });
    }

    debug!(
        entries = proportions.len(),
        trials,
        resamples = config.resamples,
        alpha = config.alpha,
        "bootstrap interval"
    );

    let mut counts = vec![0.0; config.resamples];
    proportions
        .iter()
        .map(|&p| resample_interval(p, trials, config, &mut counts, rng))
        .collect()
}

/// Bootstrap confidence interval for a single proportion.
pub fn bootstrap_interval_single<R: Rng + ?Sized>(
    proportion: f64,
    trials: u64,
    config: &BootstrapConfig,
    rng: &mut R,
) -> Result<ConfidenceInterval> {
    let mut intervals = bootstrap_interval(&[proportion], trials, config, rng)?;
    intervals
        .pop()
        .ok_or_else(|| RakottError::ComputationError("no interval produced".to_string()))
}

fn resample_interval<R: Rng + ?Sized>(
    proportion: f64,
    trials: u64,
    config: &BootstrapConfig,
    counts: &mut [f64],
    rng: &mut R,
) -> Result<ConfidenceInterval> {
    let binomial =
        Binomial::new(trials, proportion).map_err(|e| RakottError::Distribution(e.to_string()))?;

    for slot in counts.iter_mut() {
        *slot = binomial.sample(rng) as f64;
    }
    counts.sort_unstable_by(|a, b| a.total_cmp(b));

    let n = trials as f64;
    let lower = percentile(counts, 100.0 * config.alpha / 2.0) / n;
    let upper = percentile(counts, 100.0 * (1.0 - config.alpha / 2.0)) / n;
    trace!(proportion, lower, upper, "resampled bounds");

    Ok(ConfidenceInterval::from_bounds(proportion, lower, upper))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_default_config() {
        let config = BootstrapConfig::default();
        assert_abs_diff_eq!(config.alpha, 0.05);
        assert_eq!(config.resamples, 10_000);
    }

    #[test]
    fn test_config_validation() {
        assert!(BootstrapConfig::new(0.1, 100).is_ok());
        assert!(matches!(
            BootstrapConfig::new(0.1, 0),
            Err(RakottError::InvalidResamples(0))
        ));
        assert!(matches!(
            BootstrapConfig::new(1.5, 100),
            Err(RakottError::InvalidAlpha(_))
        ));
    }

    #[test]
    fn test_seeded_runs_are_reproducible() {
        let config = BootstrapConfig::default().with_resamples(1_000);
        let mut a = ChaCha8Rng::seed_from_u64(42);
        let mut b = ChaCha8Rng::seed_from_u64(42);
        let first = bootstrap_interval(&[0.3, 0.6], 50, &config, &mut a).unwrap();
        let second = bootstrap_interval(&[0.3, 0.6], 50, &config, &mut b).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_degenerate_proportions() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let config = BootstrapConfig::default().with_resamples(500);
        let intervals = bootstrap_interval(&[0.0, 1.0], 20, &config, &mut rng).unwrap();
        assert_eq!(intervals[0], ConfidenceInterval { low: 0.0, high: 0.0 });
        assert_eq!(intervals[1], ConfidenceInterval { low: 0.0, high: 0.0 });
    }

    #[test]
    fn test_offsets_are_non_negative() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let config = BootstrapConfig::default().with_resamples(2_000);
        let props = [0.05, 0.25, 0.5, 0.75, 0.95];
        let intervals = bootstrap_interval(&props, 30, &config, &mut rng).unwrap();
        for (p, ci) in props.iter().zip(&intervals) {
            assert!(ci.low >= 0.0);
            assert!(ci.high >= 0.0);
            assert!(ci.lower(*p) >= -1e-12);
            assert!(ci.upper(*p) <= 1.0 + 1e-12);
        }
    }

    #[test]
    fn test_empty_input_gives_no_intervals() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let intervals =
            bootstrap_interval(&[], 10, &BootstrapConfig::default(), &mut rng).unwrap();
        assert!(intervals.is_empty());
    }

    #[test]
    fn test_invalid_inputs() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        let config = BootstrapConfig::default();
        assert!(matches!(
            bootstrap_interval(&[0.5], 0, &config, &mut rng),
            Err(RakottError::InvalidTrials(0))
        ));
        assert!(matches!(
            bootstrap_interval(&[0.5], u64::MAX, &config, &mut rng),
            Err(RakottError::InvalidTrials(u64::MAX))
        ));
        assert!(matches!(
            bootstrap_interval(&[0.5], MAX_TRIALS + 1, &config, &mut rng),
            Err(RakottError::InvalidTrials(_))
        ));
        assert!(matches!(
            bootstrap_interval(&[0.5, 1.2], 10, &config, &mut rng),
            Err(RakottError::InvalidProportion { index: 1, .. })
        ));
        assert!(matches!(
            bootstrap_interval(&[f64::NAN], 10, &config, &mut rng),
            Err(RakottError::InvalidProportion { index: 0, .. })
        ));
        assert!(matches!(
            bootstrap_interval(&[0.5], 10, &config.with_resamples(0), &mut rng),
            Err(RakottError::InvalidResamples(0))
        ));
    }

    #[test]
    fn test_largest_trial_count_samples() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let config = BootstrapConfig::default().with_resamples(200);
        let ci = bootstrap_interval_single(0.5, MAX_TRIALS, &config, &mut rng).unwrap();
        assert!(ci.low >= 0.0 && ci.high >= 0.0);
        assert!(ci.width() < 1e-6);
    }

    #[test]
    fn test_single_matches_batch() {
        let config = BootstrapConfig::default().with_resamples(1_000);
        let mut a = ChaCha8Rng::seed_from_u64(9);
        let mut b = ChaCha8Rng::seed_from_u64(9);
        let single = bootstrap_interval_single(0.4, 25, &config, &mut a).unwrap();
        let batch = bootstrap_interval(&[0.4], 25, &config, &mut b).unwrap();
        assert_eq!(single, batch[0]);
    }
}
