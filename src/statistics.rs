//! Functions for scoring fitted models and describing point sets
//!
//! # Model Fit / Regression Diagnostics
//! - [`PredictionMetrics`]: Predicted values, signed errors, standard deviation and R² of one model over a point set.
//! - [`r_squared`]: Proportion of variance explained by a set of predictions. Higher is better (≤ 1).
//! - [`standard_deviation`]: Root of the mean squared error over the finite predictions. Lower is better.
//!
//! # Descriptive Statistics
//! - [`mean`]: Arithmetic mean of a dataset.
//! - [`pearson_correlation`]: Strength of the linear relationship between x and y.
//!
//! # Undefined predictions
//!
//! Some models cannot be evaluated everywhere (a logarithm at `x ≤ 0`, for instance).
//! Those predictions are NaN. They are reported as NaN errors, and are excluded from
//! the squared error sum and from the count used for the standard deviation. The total
//! variance is always taken over every observed value.
//!
//! # Examples
//!
//! ```rust
//! use approxfit::{statistics::r_squared, Point};
//!
//! let y = vec![1.0, 2.0, 3.0];
//! let y_fit = vec![1.1, 1.9, 3.05];
//!
//! let r2 = r_squared(y.iter().copied(), y_fit.iter().copied());
//! println!("R² = {r2}");
//! ```
use crate::{point::Point, value::Value};

/// Below this magnitude the denominator of [`pearson_correlation`] is treated as zero.
pub const CORRELATION_TOLERANCE: f64 = 1e-10;

/// Computes the arithmetic mean of a sequence of values.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// Mean = (Σ x_i) / N
/// ```
/// </div>
///
/// # Returns
/// The arithmetic mean of all elements in `data`, or NaN if the iterator yields no elements.
///
/// # Examples
/// ```rust
/// let values = vec![1.0, 2.0, 3.0];
/// let m = approxfit::statistics::mean(values.into_iter());
/// assert_eq!(m, 2.0);
/// ```
pub fn mean<T: Value>(data: impl Iterator<Item = T>) -> T {
    let mut sum = T::zero();
    let mut count = T::zero();
    for value in data {
        sum += value;
        count += T::one();
    }
    sum / count
}

/// Calculate the R-squared value for a set of predictions.
///
/// R-squared tells you how well the model explains the data:
/// - `1` means the model explains all the variation.
/// - `0` means the model is no better than predicting the mean.
/// - Negative values are possible for models worse than the mean.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// R² = 1 - (SS_res / SS_tot)
/// where
///   SS_res = Σ (y_fit_i - y_i)²   over finite y_fit_i only
///   SS_tot = Σ (y_i - y_mean)²    over all y_i
/// ```
/// When every `y_i` is identical (`SS_tot = 0`), R² is `1` for a perfect fit and NaN otherwise.
/// </div>
///
/// # Parameters
/// - `y`: The actual (observed) values.
/// - `y_fit`: The predicted values from the model.
///
/// # Example
/// ```rust
/// # use approxfit::statistics::r_squared;
/// let y: Vec<f64> = vec![5.0, 5.0, 5.0];
/// assert_eq!(r_squared(y.iter().copied(), y.iter().copied()), 1.0);
/// assert!(r_squared(y.iter().copied(), [5.0, 5.0, 6.0].into_iter()).is_nan());
/// ```
pub fn r_squared<T: Value>(y: impl Iterator<Item = T>, y_fit: impl Iterator<Item = T>) -> T {
    let y: Vec<T> = y.collect();
    let y_mean = mean(y.iter().copied());

    let mut sse = T::zero();
    let mut sst = T::zero();
    for (&actual, predicted) in y.iter().zip(y_fit) {
        if predicted.is_real() {
            sse += Value::powi(predicted - actual, 2);
        }
        sst += Value::powi(actual - y_mean, 2);
    }

    r_squared_from_sums(sse, sst)
}

/// R² from precomputed residual and total sums of squares.
///
/// Zero total variance yields `1` when `sse` is also zero, and NaN otherwise.
pub fn r_squared_from_sums<T: Value>(sse: T, sst: T) -> T {
    if sst > T::zero() {
        T::one() - sse / sst
    } else if sse == T::zero() {
        T::one()
    } else {
        T::nan()
    }
}

/// Root of the mean squared error over `valid` finite predictions.
///
/// Returns NaN when no prediction was finite.
pub fn standard_deviation<T: Value>(sse: T, valid: usize) -> T {
    if valid == 0 {
        return T::nan();
    }
    (sse / T::from_positive_int(valid)).sqrt()
}

/// Computes the Pearson correlation coefficient between the x and y coordinates.
///
/// Values near `1` or `-1` indicate a strong linear relationship, values near `0` a weak one.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// r = (nΣxy − ΣxΣy) / √((nΣx² − (Σx)²)(nΣy² − (Σy)²))
/// ```
/// If the denominator is below [`CORRELATION_TOLERANCE`] (constant x or y, or no data), `0` is returned.
/// </div>
///
/// # Example
/// ```rust
/// # use approxfit::{statistics::pearson_correlation, Point};
/// let points: Vec<Point> = (1..=8).map(|i| Point::new(f64::from(i), 2.0 * f64::from(i))).collect();
/// assert!((pearson_correlation(&points) - 1.0).abs() < 1e-9);
/// ```
pub fn pearson_correlation<T: Value>(points: &[Point<T>]) -> T {
    let n = T::from_positive_int(points.len());

    let (mut sum_x, mut sum_y, mut sum_xy, mut sum_x2, mut sum_y2) =
        (T::zero(), T::zero(), T::zero(), T::zero(), T::zero());
    for p in points {
        sum_x += p.x;
        sum_y += p.y;
        sum_xy += p.x * p.y;
        sum_x2 += p.x * p.x;
        sum_y2 += p.y * p.y;
    }

    // Rounding can push a zero variance term slightly negative
    let var_x = nalgebra::RealField::max(n * sum_x2 - sum_x * sum_x, T::zero());
    let var_y = nalgebra::RealField::max(n * sum_y2 - sum_y * sum_y, T::zero());

    let numerator = n * sum_xy - sum_x * sum_y;
    let denominator = (var_x * var_y).sqrt();

    let tolerance = T::try_cast(CORRELATION_TOLERANCE).unwrap_or_else(|_| T::epsilon());
    if !denominator.is_real() || Value::abs(denominator) < tolerance {
        return T::zero();
    }

    numerator / denominator
}

/// Per-point predictions and goodness-of-fit metrics of one model over a point set.
///
/// Predictions and errors are aligned index-for-index with the points they were computed from.
/// A NaN prediction yields a NaN error and does not contribute to the squared error sum.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionMetrics<T: Value = f64> {
    /// Model output at each point
    pub predicted: Vec<T>,

    /// Signed error `predicted - actual` at each point
    pub errors: Vec<T>,

    /// Root mean squared error over finite predictions
    pub standard_deviation: T,

    /// Coefficient of determination
    pub r_squared: T,
}

impl<T: Value> PredictionMetrics<T> {
    /// Evaluates `model` at every point and scores the result.
    ///
    /// ```rust
    /// # use approxfit::{statistics::PredictionMetrics, Point};
    /// let points = [Point::new(1.0, 2.0), Point::new(2.0, 4.0), Point::new(-1.0, 0.0)];
    /// let metrics = PredictionMetrics::new(&points, |x| if x > 0.0 { 2.0 * x } else { f64::NAN });
    ///
    /// assert_eq!(metrics.errors[0], 0.0);
    /// assert!(metrics.errors[2].is_nan());
    /// assert_eq!(metrics.standard_deviation, 0.0);
    /// ```
    pub fn new(points: &[Point<T>], model: impl Fn(T) -> T) -> Self {
        let y_mean = mean(points.iter().map(|p| p.y));

        let mut predicted = Vec::with_capacity(points.len());
        let mut errors = Vec::with_capacity(points.len());
        let mut sse = T::zero();
        let mut sst = T::zero();
        let mut valid = 0;

        for p in points {
            let y_fit = model(p.x);
            predicted.push(y_fit);

            if y_fit.is_real() {
                let error = y_fit - p.y;
                errors.push(error);
                sse += error * error;
                valid += 1;
            } else {
                errors.push(T::nan());
            }

            sst += Value::powi(p.y - y_mean, 2);
        }

        Self {
            predicted,
            errors,
            standard_deviation: standard_deviation(sse, valid),
            r_squared: r_squared_from_sums(sse, sst),
        }
    }

    /// Metrics for a model that could not be fit: NaN everywhere, one entry per point.
    pub fn undefined(n: usize) -> Self {
        Self {
            predicted: vec![T::nan(); n],
            errors: vec![T::nan(); n],
            standard_deviation: T::nan(),
            r_squared: T::nan(),
        }
    }

    /// Number of points with a finite prediction
    pub fn valid_count(&self) -> usize {
        self.errors.iter().filter(|e| e.is_real()).count()
    }
}
