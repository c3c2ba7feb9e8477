use ahash::AHashMap;
use nalgebra::DMatrix;
use tracing::debug;

use crate::error::{RakottError, Result};

/// Relative cutoff for small singular values in the pseudo-inverse.
const PINV_RCOND: f64 = 1e-15;

/// Checks the window/order pair used by every Savitzky-Golay entry point.
pub(crate) fn validate_window(window_size: usize, order: usize) -> Result<()> {
    if window_size % 2 == 0 {
        return Err(RakottError::InvalidWindowSize(window_size));
    }
    // window_size >= order + 2, written to avoid overflow; window_size is odd here
    if order >= window_size - 1 {
        return Err(RakottError::InvalidPolynomialOrder { order, window_size });
    }
    Ok(())
}

/// Computes the Savitzky-Golay convolution kernel for one derivative order.
///
/// A polynomial of degree `order` is fitted by least squares to a window of
/// `window_size` samples centred on zero. Row `deriv` of the Moore-Penrose
/// pseudo-inverse of the design matrix `[k^0, k^1, ..., k^order]`,
/// `k = -half_window..=half_window`, maps the window onto the `deriv`-th
/// polynomial coefficient. Scaling by `rate^deriv * deriv!` turns that into
/// the derivative in sample-rate units.
///
/// The returned kernel is correlated with the signal: element `j` weights
/// sample `center - half_window + j`.
///
/// # Arguments
///
/// * `window_size` - Size of the moving window (odd, positive)
/// * `order` - Degree of the fitted polynomial (`window_size >= order + 2`)
/// * `deriv` - Derivative order (0 for smoothing, must not exceed `order`)
/// * `rate` - Sampling rate used to scale derivatives
pub fn compute_coefficients(
    window_size: usize,
    order: usize,
    deriv: usize,
    rate: f64,
) -> Result<Vec<f64>> {
    let row = pseudo_inverse_row(window_size, order, deriv)?;
    Ok(scale_kernel(&row, deriv, rate))
}

/// Unscaled pseudo-inverse row for `deriv`.
fn pseudo_inverse_row(window_size: usize, order: usize, deriv: usize) -> Result<Vec<f64>> {
    validate_window(window_size, order)?;
    if deriv > order {
        return Err(RakottError::InvalidDerivative { deriv, order });
    }

    let half_window = ((window_size - 1) / 2) as f64;
    let design = DMatrix::<f64>::from_fn(window_size, order + 1, |i, j| {
        (i as f64 - half_window).powi(j as i32)
    });

    let svd = design.svd(true, true);
    let cutoff = PINV_RCOND * svd.singular_values.max();
    let pinv = svd
        .pseudo_inverse(cutoff)
        .map_err(|e| RakottError::ComputationError(e.to_string()))?;

    debug!(window_size, order, deriv, "computed savitzky-golay kernel");

    Ok(pinv.row(deriv).iter().copied().collect())
}

fn scale_kernel(row: &[f64], deriv: usize, rate: f64) -> Vec<f64> {
    let factorial = (1..=deriv).fold(1.0, |acc, k| acc * k as f64);
    let scale = rate.powi(deriv as i32) * factorial;
    row.iter().map(|c| c * scale).collect()
}

/// Per-filter cache of pseudo-inverse rows keyed by `(window_size, order, deriv)`.
///
/// Rows are stored before rate scaling so one entry serves every rate.
#[derive(Debug, Default)]
pub struct CoefficientCache {
    rows: AHashMap<(usize, usize, usize), Vec<f64>>,
}

impl CoefficientCache {
    /// Creates an empty coefficient cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the rate-scaled kernel, computing and caching the row if needed
    pub fn get_coefficients(
        &mut self,
        window_size: usize,
        order: usize,
        deriv: usize,
        rate: f64,
    ) -> Result<Vec<f64>> {
        let key = (window_size, order, deriv);
        if !self.rows.contains_key(&key) {
            let row = pseudo_inverse_row(window_size, order, deriv)?;
            self.rows.insert(key, row);
        }
        Ok(scale_kernel(&self.rows[&key], deriv, rate))
    }

    /// Number of cached rows
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true when nothing has been cached yet
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
