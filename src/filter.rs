use serde::{Deserialize, Serialize};

use crate::coefficients::{validate_window, CoefficientCache};
use crate::error::{RakottError, Result};

/// Boundary handling strategies for the Savitzky-Golay filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Reflect around the edge sample, keeping the pad on the edge's near side:
    /// `y[0] - |y[i] - y[0]|` on the left, `y[n-1] + |y[n-1-i] - y[n-1]|` on the right
    #[default]
    Reflect,
    /// Pad with mirrored values (edge sample not repeated)
    Mirror,
    /// Repeat the edge sample
    Nearest,
    /// Wrap around (circular boundary)
    Wrap,
}

/// Configuration for the Savitzky-Golay filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Size of the filter window (must be odd)
    pub window_size: usize,
    /// Order of the polynomial to fit
    pub order: usize,
    /// Boundary handling strategy
    #[serde(default)]
    pub boundary_mode: BoundaryMode,
}

impl FilterConfig {
    /// Creates a new filter configuration with validation
    pub fn new(window_size: usize, order: usize) -> Result<Self> {
        validate_window(window_size, order)?;
        Ok(Self {
            window_size,
            order,
            boundary_mode: BoundaryMode::default(),
        })
    }

    /// Sets the boundary handling mode
    pub fn with_boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.boundary_mode = mode;
        self
    }

    fn half_window(&self) -> usize {
        (self.window_size - 1) / 2
    }
}

/// A Savitzky-Golay filter for signal smoothing and differentiation.
pub struct SavitzkyGolayFilter {
    config: FilterConfig,
    cache: CoefficientCache,
}

impl SavitzkyGolayFilter {
    /// Creates a new Savitzky-Golay filter with the specified parameters.
    ///
    /// # Arguments
    ///
    /// * `window_size` - Size of the filter window (odd, positive)
    /// * `order` - Order of the polynomial to fit (`window_size >= order + 2`)
    ///
    /// # Example
    ///
    /// ```rust
    /// use rakott::SavitzkyGolayFilter;
    ///
    /// let filter = SavitzkyGolayFilter::new(5, 2).expect("Valid parameters");
    /// assert!(SavitzkyGolayFilter::new(4, 2).is_err());
    /// ```
    pub fn new(window_size: usize, order: usize) -> Result<Self> {
        let config = FilterConfig::new(window_size, order)?;
        Ok(Self::with_config_unchecked(config))
    }

    /// Creates a filter with custom configuration
    pub fn with_config(config: FilterConfig) -> Result<Self> {
        validate_window(config.window_size, config.order)?;
        Ok(Self::with_config_unchecked(config))
    }

    fn with_config_unchecked(config: FilterConfig) -> Self {
        Self {
            config,
            cache: CoefficientCache::new(),
        }
    }

    /// Sets the boundary handling mode
    pub fn with_boundary_mode(mut self, mode: BoundaryMode) -> Self {
        self.config.boundary_mode = mode;
        self
    }

    /// Applies the Savitzky-Golay filter to smooth the input data.
    ///
    /// # Example
    ///
    /// ```rust
    /// use rakott::SavitzkyGolayFilter;
    ///
    /// let data = vec![1.0, 2.0, 3.0, 4.0, 5.0, 4.0, 3.0, 2.0, 1.0];
    /// let mut filter = SavitzkyGolayFilter::new(5, 2).expect("Valid parameters");
    /// let smoothed = filter.apply(&data).unwrap();
    /// assert_eq!(smoothed.len(), data.len());
    /// ```
    pub fn apply(&mut self, data: &[f64]) -> Result<Vec<f64>> {
        self.apply_derivative(data, 0, 1.0)
    }

    /// Applies the Savitzky-Golay filter to compute derivatives of the input data.
    ///
    /// # Arguments
    ///
    /// * `data` - The input signal data
    /// * `deriv` - Order of derivative to compute (0 smooths, 1 for first derivative, etc.)
    /// * `rate` - Sampling rate; the output is scaled by `rate^deriv`
    ///
    /// # Returns
    ///
    /// A vector of the same length as `data`
    pub fn apply_derivative(&mut self, data: &[f64], deriv: usize, rate: f64) -> Result<Vec<f64>> {
        let half_window = self.config.half_window();
        if data.len() <= half_window {
            return Err(RakottError::InsufficientData {
                got: data.len(),
                need: half_window + 1,
            });
        }

        let coeffs =
            self.cache
                .get_coefficients(self.config.window_size, self.config.order, deriv, rate)?;
        let padded = pad_signal(data, half_window, self.config.boundary_mode);

        Ok(convolve_valid(&padded, &coeffs))
    }

    /// Returns the filter configuration
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }
}

/// Extends `data` by `half_window` samples on each side.
///
/// Callers guarantee `data.len() > half_window`.
fn pad_signal(data: &[f64], half_window: usize, mode: BoundaryMode) -> Vec<f64> {
    let n = data.len();
    let first = data[0];
    let last = data[n - 1];
    let mut padded = Vec::with_capacity(n + 2 * half_window);

    // Left pad, outermost sample first
    for i in (1..=half_window).rev() {
        padded.push(match mode {
            BoundaryMode::Reflect => first - (data[i] - first).abs(),
            BoundaryMode::Mirror => data[i],
            BoundaryMode::Nearest => first,
            BoundaryMode::Wrap => data[n - i],
        });
    }

    padded.extend_from_slice(data);

    // Right pad, innermost sample first
    for i in 1..=half_window {
        padded.push(match mode {
            BoundaryMode::Reflect => last + (data[n - 1 - i] - last).abs(),
            BoundaryMode::Mirror => data[n - 1 - i],
            BoundaryMode::Nearest => last,
            BoundaryMode::Wrap => data[i - 1],
        });
    }

    padded
}

/// Valid-mode convolution of the reversed kernel with `padded`.
fn convolve_valid(padded: &[f64], coeffs: &[f64]) -> Vec<f64> {
    padded
        .windows(coeffs.len())
        .map(|window| window.iter().zip(coeffs).map(|(x, c)| x * c).sum::<f64>())
        .collect()
}
