use thiserror::Error;

/// Error types for interval estimation and Savitzky-Golay filter operations
#[derive(Error, Debug)]
pub enum RakottError {
    /// Window size must be odd and at least 1
    #[error("Invalid window size: {0}. Window size must be odd and at least 1")]
    InvalidWindowSize(usize),

    /// Window too small to fit a polynomial of the requested order
    #[error("Invalid polynomial order: {order}. Window size ({window_size}) must be at least order + 2")]
    InvalidPolynomialOrder {
        /// Requested polynomial degree
        order: usize,
        /// Requested window size
        window_size: usize,
    },

    /// Derivative order higher than the fitted polynomial
    #[error("Invalid derivative order: {deriv}. Must not exceed polynomial order ({order})")]
    InvalidDerivative {
        /// Requested derivative order
        deriv: usize,
        /// Polynomial degree of the filter
        order: usize,
    },

    /// Input data is too short for the specified window size
    #[error("Insufficient data: got {got} points, need at least {need}")]
    InsufficientData {
        /// Number of samples provided
        got: usize,
        /// Minimum number of samples required
        need: usize,
    },

    /// Mathematical computation error (e.g. SVD failure)
    #[error("Computation error: {0}")]
    ComputationError(String),

    /// Number of trials must be positive (and at most 2^53 for resampling)
    #[error("Invalid number of trials: {0}. Must be positive (at most 2^53 when resampling)")]
    InvalidTrials(u64),

    /// Successes outside `0..=trials`
    #[error("Invalid number of successes: {successes} with {trials} trials")]
    InvalidSuccesses {
        /// Reported successes
        successes: u64,
        /// Reported trials
        trials: u64,
    },

    /// Significance level outside the open interval (0, 1)
    #[error("Invalid confidence width: alpha = {0}. Must be in (0, 1)")]
    InvalidAlpha(f64),

    /// Proportion outside [0, 1]
    #[error("Invalid proportion at index {index}: {value}. Must be in [0, 1]")]
    InvalidProportion {
        /// Position of the offending entry
        index: usize,
        /// The offending value
        value: f64,
    },

    /// Bootstrap needs at least one resample
    #[error("Invalid number of resamples: {0}. Must be positive")]
    InvalidResamples(usize),

    /// Distribution could not be constructed from its parameters
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Requested CSV column does not exist
    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    /// CSV reading failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for rakott operations
pub type Result<T> = std::result::Result<T, RakottError>;
