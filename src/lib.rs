//! # rakott
//!
//! Small numerical helpers for analysis scripts: confidence intervals for
//! binomial proportions and Savitzky-Golay smoothing.
//!
//! ## Features
//!
//! - Jeffreys interval (closed-form Bayesian interval for a proportion)
//! - Parametric bootstrap interval for one or many proportions, driven by a
//!   caller-supplied random number generator
//! - Savitzky-Golay smoothing and differentiation with pseudo-inverse kernels
//! - CSV column loading and day-stamp formatting for scripts
//!
//! Intervals are returned as offsets `(low, high)` from the point estimate,
//! ready for asymmetric error bars.
//!
//! ## Example
//!
//! ```rust
//! use rakott::{jeffreys_interval, savitzky_golay};
//!
//! let ci = jeffreys_interval(100, 50, 0.05).unwrap();
//! assert!(ci.low > 0.0 && ci.high > 0.0);
//!
//! let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];
//! let smoothed = savitzky_golay(&data, 5, 2, 0, 1.0).unwrap();
//! assert_eq!(smoothed.len(), data.len());
//! ```

mod bootstrap;
mod coefficients;
mod csv_utils;
mod dates;
mod error;
mod filter;
mod interval;
mod jeffreys;

pub use bootstrap::{
    bootstrap_interval, bootstrap_interval_single, BootstrapConfig, DEFAULT_RESAMPLES, MAX_TRIALS,
};
pub use coefficients::{compute_coefficients, CoefficientCache};
pub use csv_utils::{read_column_from_reader, read_csv_column, read_csv_column_by_index};
pub use dates::{day_stamp, today_stamp};
pub use error::{RakottError, Result};
pub use filter::{BoundaryMode, FilterConfig, SavitzkyGolayFilter};
pub use interval::{ConfidenceInterval, DEFAULT_ALPHA};
pub use jeffreys::jeffreys_interval;

/// Smooths or differentiates `y` with a Savitzky-Golay filter.
///
/// Uses the default [`BoundaryMode::Reflect`] padding, so the output has the
/// same length as `y`.
///
/// # Arguments
///
/// * `y` - The input signal, evenly spaced
/// * `window_size` - Size of the filter window (odd, at least `order + 2`)
/// * `order` - Degree of the fitted polynomial
/// * `deriv` - Derivative order (0 for smoothing)
/// * `rate` - Sampling rate; derivatives are scaled by `rate^deriv`
pub fn savitzky_golay(
    y: &[f64],
    window_size: usize,
    order: usize,
    deriv: usize,
    rate: f64,
) -> Result<Vec<f64>> {
    let mut filter = SavitzkyGolayFilter::new(window_size, order)?;
    filter.apply_derivative(y, deriv, rate)
}

/// Computes the first derivative of the input data using Savitzky-Golay differentiation.
///
/// # Arguments
///
/// * `data` - The input signal data
/// * `window_size` - The size of the filter window (must be odd)
/// * `order` - The order of the polynomial (`window_size >= order + 2`)
///
/// # Returns
///
/// A Result containing the derivative data per sample or an error
pub fn derivative(data: &[f64], window_size: usize, order: usize) -> Result<Vec<f64>> {
    savitzky_golay(data, window_size, order, 1, 1.0)
}
