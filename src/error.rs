//! Error types for approximation and model selection
//!
//! This module defines the failures that can surface while fitting models
//! to a point set, along with a convenient `Result` alias.
//!
//! Per-model problems caused by sparse data (too few usable points after a
//! model filters its domain) are not errors: they produce a NaN-flagged
//! [`crate::ModelFit`] instead. Everything listed here is surfaced to the caller.

/// Errors that can occur while approximating a point set.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Cannot perform a fit because there is no data.
    #[error("No data available for fitting")]
    NoData,

    /// The x and y inputs of a fit do not have the same length.
    #[error("Mismatched inputs: {x_len} x-values but {y_len} y-values")]
    MismatchedInputs {
        /// Number of x values
        x_len: usize,
        /// Number of y values (or weights)
        y_len: usize,
    },

    /// A weight passed to a weighted fit is negative or not finite.
    #[error("Weight at index {0} must be finite and non-negative")]
    InvalidWeight(usize),

    /// Cannot compute a least-squares fit because the normal equations are singular
    ///
    /// Usually, the x-values are repeated or collinear for the requested degree, or there are
    /// not more points than coefficients.
    #[error(
        "Normal equations (MᵗM) are singular; the x-values may be degenerate or too few for the degree. [n: {n}, k: {k}]"
    )]
    SingularMatrix {
        /// Number of data points
        n: usize,
        /// Number of coefficients
        k: usize,
    },

    /// A model cannot be applied to the data because of its domain.
    ///
    /// Logarithmic and power models need strictly positive x (and y, for power).
    #[error("{model} model cannot be fit: {reason}")]
    DomainViolation {
        /// Name of the rejected model
        model: &'static str,
        /// Why the data falls outside the model's domain
        reason: &'static str,
    },

    /// Every applicable model produced a non-finite standard deviation.
    #[error("None of the fitted models produced a finite standard deviation")]
    NoViableModel,

    /// No model is applicable to a dataset this small.
    #[error("Too few points for any model: got {got}, need at least {min}")]
    TooFewPoints {
        /// Number of points supplied
        got: usize,
        /// Minimum required
        min: usize,
    },

    /// A model name could not be recognized.
    #[error("Unknown model `{0}`; expected one of linear, quadratic, cubic, exponential, logarithmic, power")]
    UnknownModel(String),

    /// The dataset size falls outside the bound enforced by the caller.
    #[error("Expected between {min} and {max} points, got {got}")]
    PointCount {
        /// Number of points supplied
        got: usize,
        /// Lower bound (inclusive)
        min: usize,
        /// Upper bound (inclusive)
        max: usize,
    },

    /// A numeric value could not be cast to the target type. This is usually a custom type much smaller than f64/f32
    #[error("Failed to cast value to target type")]
    CastFailed,

    /// Reading or writing a point file or report failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A JSON point file could not be decoded, or an outcome could not be encoded.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result type for approximation
pub type Result<T> = std::result::Result<T, Error>;
