//! Approximation models
//!
//! Six model shapes are supported, named by [`ModelKind`]:
//!
//! | Model       | Equation                  | Fitted as                     |
//! |-------------|---------------------------|-------------------------------|
//! | Linear      | `y = a + b·x`             | degree 1 polynomial           |
//! | Quadratic   | `y = a + b·x + c·x²`      | degree 2 polynomial           |
//! | Cubic       | `y = a + b·x + c·x² + d·x³` | degree 3 polynomial         |
//! | Exponential | `y = a·e^(b·x)`           | line through `(x, ln y)`      |
//! | Logarithmic | `y = a + b·ln(x)`         | line through `(ln x, y)`      |
//! | Power       | `y = a·x^b`               | line through `(ln x, ln y)`   |
//!
//! Each shape implements [`Approximation`], which describes how raw points map onto a
//! polynomial least-squares problem and how the solved coefficients map back. Fitting is a
//! pure function of the points and returns an immutable [`ModelFit`].
//!
//! # Unfitted models
//! A model whose domain filter leaves too few points to solve for its coefficients is not an
//! error. The returned [`ModelFit`] has NaN coefficients and metrics, and one NaN prediction
//! and error per input point. Check [`ModelFit::is_fitted`].
//!
//! ```rust
//! use approxfit::{ModelKind, Point};
//!
//! let points: Vec<Point> = (1..=8).map(|i| Point::new(f64::from(i), 2.0 * f64::from(i))).collect();
//! let fit = ModelKind::Linear.fit(&points).unwrap();
//!
//! assert!((fit.r_squared() - 1.0).abs() < 1e-12);
//! assert!((fit.evaluate(10.0) - 20.0).abs() < 1e-9);
//! ```
use std::ops::RangeInclusive;

use crate::{
    display::DEFAULT_PRECISION,
    error::{Error, Result},
    point::Point,
    solver,
    statistics::PredictionMetrics,
    value::{SteppedValues, Value},
};

pub(crate) mod exponential;
pub use exponential::ExponentialModel;

pub(crate) mod logarithmic;
pub use logarithmic::{LogarithmicModel, LOG_DOMAIN_FLOOR};

pub(crate) mod polynomial;
pub use polynomial::PolynomialModel;

pub(crate) mod power;
pub use power::PowerModel;

/// The closed set of supported model shapes, in canonical order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    /// `y = a + b·x`
    Linear,

    /// `y = a + b·x + c·x²`
    Quadratic,

    /// `y = a + b·x + c·x² + d·x³`
    Cubic,

    /// `y = a·e^(b·x)`
    Exponential,

    /// `y = a + b·ln(x)`
    Logarithmic,

    /// `y = a·x^b`
    Power,
}

impl ModelKind {
    /// Every model, in canonical order. Ties during model selection go to the earlier entry.
    pub const ALL: [ModelKind; 6] = [
        ModelKind::Linear,
        ModelKind::Quadratic,
        ModelKind::Cubic,
        ModelKind::Exponential,
        ModelKind::Logarithmic,
        ModelKind::Power,
    ];

    /// Human-readable name
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::Linear => "Linear",
            ModelKind::Quadratic => "Quadratic",
            ModelKind::Cubic => "Cubic",
            ModelKind::Exponential => "Exponential",
            ModelKind::Logarithmic => "Logarithmic",
            ModelKind::Power => "Power",
        }
    }

    /// Symbolic equation, with letters in place of coefficients
    #[must_use]
    pub fn formula(self) -> &'static str {
        match self {
            ModelKind::Linear => "y = a + b·x",
            ModelKind::Quadratic => "y = a + b·x + c·x²",
            ModelKind::Cubic => "y = a + b·x + c·x² + d·x³",
            ModelKind::Exponential => "y = a·e^(b·x)",
            ModelKind::Logarithmic => "y = a + b·ln(x)",
            ModelKind::Power => "y = a·x^b",
        }
    }

    /// Degree of the polynomial solved for this model after linearization
    #[must_use]
    pub fn degree(self) -> usize {
        match self {
            ModelKind::Quadratic => 2,
            ModelKind::Cubic => 3,
            _ => 1,
        }
    }

    /// Number of coefficients in a fitted model
    #[must_use]
    pub fn coefficient_count(self) -> usize {
        self.degree() + 1
    }

    /// Smallest dataset this model is attempted on
    #[must_use]
    pub fn min_points(self) -> usize {
        self.coefficient_count()
    }

    /// Whether this model can be fit to a dataset with the given shape.
    ///
    /// - Every model needs at least [`ModelKind::min_points`] points.
    /// - Exponential needs at least two points with `y > 0`.
    /// - Logarithmic needs every `x > 0`.
    /// - Power needs every `x > 0` and every `y > 0`.
    #[must_use]
    pub fn is_applicable(self, domain: &DomainSummary) -> bool {
        if domain.len < self.min_points() {
            return false;
        }

        match self {
            ModelKind::Exponential => domain.positive_y >= 2,
            ModelKind::Logarithmic => !domain.any_nonpositive_x,
            ModelKind::Power => !domain.any_nonpositive_x && !domain.any_nonpositive_y,
            _ => true,
        }
    }

    /// Fits this model to a point set.
    ///
    /// Metrics are always computed over every input point, even when the model only
    /// fits a filtered subset (e.g. exponential ignores `y ≤ 0`).
    ///
    /// # Errors
    /// - [`Error::NoData`] if `points` is empty.
    /// - [`Error::DomainViolation`] for a logarithmic fit with any `x ≤ 0`.
    /// - [`Error::SingularMatrix`] if the usable x-values are degenerate for the model.
    pub fn fit<T: Value>(self, points: &[Point<T>]) -> Result<ModelFit<T>> {
        fit_points(self.approximation(), points, None)
    }

    /// Fits this model by weighted least squares, one weight per point.
    ///
    /// Weights apply to the linearized problem, so for log-linearized models they
    /// weigh errors in `ln y` rather than `y`.
    ///
    /// # Errors
    /// Same as [`ModelKind::fit`], plus:
    /// - [`Error::MismatchedInputs`] if `weights` does not match the number of points.
    /// - [`Error::InvalidWeight`] for a negative or non-finite weight.
    pub fn fit_weighted<T: Value>(self, points: &[Point<T>], weights: &[T]) -> Result<ModelFit<T>> {
        fit_points(self.approximation(), points, Some(weights))
    }

    /// Evaluates this model shape with the given coefficients.
    ///
    /// Returns NaN where the model is undefined, when the coefficients are NaN, or when
    /// there are not exactly [`ModelKind::coefficient_count`] of them.
    pub fn evaluate<T: Value>(self, coefficients: &[T], x: T) -> T {
        if coefficients.len() != self.coefficient_count() {
            return T::nan();
        }
        self.approximation().evaluate(coefficients, x)
    }

    /// The linearization strategy behind this model
    #[must_use]
    pub fn approximation<T: Value>(self) -> &'static dyn Approximation<T> {
        match self {
            ModelKind::Linear => &PolynomialModel::LINEAR,
            ModelKind::Quadratic => &PolynomialModel::QUADRATIC,
            ModelKind::Cubic => &PolynomialModel::CUBIC,
            ModelKind::Exponential => &ExponentialModel,
            ModelKind::Logarithmic => &LogarithmicModel,
            ModelKind::Power => &PowerModel,
        }
    }
}

impl std::fmt::Display for ModelKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ModelKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        ModelKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| Error::UnknownModel(s.to_string()))
    }
}

/// A model shape that can be fit by polynomial least squares after a change of variables.
///
/// Implemented by exactly one type per [`ModelKind`]; reach them through
/// [`ModelKind::approximation`].
pub trait Approximation<T: Value>: std::fmt::Debug + Send + Sync {
    /// Which model this is
    fn kind(&self) -> ModelKind;

    /// Degree of the polynomial solved in the linearized space
    fn degree(&self) -> usize {
        1
    }

    /// Rejects a whole dataset this model cannot be applied to.
    ///
    /// # Errors
    /// Returns [`Error::DomainViolation`] when the dataset is outside the model's domain.
    fn check_domain(&self, _points: &[Point<T>]) -> Result<()> {
        Ok(())
    }

    /// Maps a raw point into the linearized space, or `None` to leave it out of the fit.
    fn linearize(&self, point: Point<T>) -> Option<Point<T>>;

    /// Maps polynomial coefficients from the linearized space back to model coefficients.
    fn recover(&self, linear: Vec<T>) -> Vec<T> {
        linear
    }

    /// Evaluates the model at `x`, or NaN where it is undefined.
    fn evaluate(&self, coefficients: &[T], x: T) -> T;

    /// Renders the equation with the given coefficients substituted.
    fn format_equation(&self, coefficients: &[T], precision: usize) -> String;
}

fn fit_points<T: Value>(
    model: &dyn Approximation<T>,
    points: &[Point<T>],
    weights: Option<&[T]>,
) -> Result<ModelFit<T>> {
    if points.is_empty() {
        return Err(Error::NoData);
    }

    if let Some(weights) = weights {
        if weights.len() != points.len() {
            return Err(Error::MismatchedInputs {
                x_len: points.len(),
                y_len: weights.len(),
            });
        }
        if let Some(i) = weights.iter().position(|&w| !w.is_real() || w < T::zero()) {
            return Err(Error::InvalidWeight(i));
        }
    }

    model.check_domain(points)?;

    let mut x = Vec::with_capacity(points.len());
    let mut y = Vec::with_capacity(points.len());
    let mut w = Vec::with_capacity(points.len());
    for (i, &point) in points.iter().enumerate() {
        if let Some(linear) = model.linearize(point) {
            x.push(linear.x);
            y.push(linear.y);
            if let Some(weights) = weights {
                w.push(weights[i]);
            }
        }
    }

    let degree = model.degree();
    if x.len() <= degree {
        return Ok(ModelFit::unfitted(model.kind(), points.len()));
    }

    let linear = match weights {
        Some(_) => solver::weighted_polynomial_fit(&x, &y, &w, degree)?,
        None => solver::polynomial_fit(&x, &y, degree)?,
    };
    let coefficients = model.recover(linear);

    let metrics = PredictionMetrics::new(points, |x| model.evaluate(&coefficients, x));
    Ok(ModelFit::new(model.kind(), coefficients, metrics))
}

/// Dataset properties that decide which models apply, computed in one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DomainSummary {
    /// Number of points
    pub len: usize,

    /// Number of points with `y > 0`
    pub positive_y: usize,

    /// True if some point has `x ≤ 0`
    pub any_nonpositive_x: bool,

    /// True if some point has `y ≤ 0`
    pub any_nonpositive_y: bool,
}

impl DomainSummary {
    /// Summarizes a point set
    pub fn new<T: Value>(points: &[Point<T>]) -> Self {
        points.iter().fold(
            Self {
                len: points.len(),
                ..Self::default()
            },
            |mut summary, p| {
                if p.y > T::zero() {
                    summary.positive_y += 1;
                } else {
                    summary.any_nonpositive_y = true;
                }
                if p.x <= T::zero() || p.x.is_nan() {
                    summary.any_nonpositive_x = true;
                }
                summary
            },
        )
    }

    /// Models that can be fit to this dataset, in canonical order
    #[must_use]
    pub fn applicable(&self) -> Vec<ModelKind> {
        ModelKind::ALL
            .into_iter()
            .filter(|kind| kind.is_applicable(self))
            .collect()
    }
}

/// A model fitted to a point set, with its per-point predictions and metrics.
///
/// Predicted values and errors are aligned index-for-index with the points the model was
/// fit on. Immutable once created.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ModelFit<T: Value = f64> {
    kind: ModelKind,
    coefficients: Vec<T>,
    predicted: Vec<T>,
    errors: Vec<T>,
    standard_deviation: T,
    r_squared: T,
}

impl<T: Value> ModelFit<T> {
    fn new(kind: ModelKind, coefficients: Vec<T>, metrics: PredictionMetrics<T>) -> Self {
        Self {
            kind,
            coefficients,
            predicted: metrics.predicted,
            errors: metrics.errors,
            standard_deviation: metrics.standard_deviation,
            r_squared: metrics.r_squared,
        }
    }

    /// A model that could not be fit to `n` points: NaN coefficients, predictions and metrics.
    #[must_use]
    pub fn unfitted(kind: ModelKind, n: usize) -> Self {
        Self::new(
            kind,
            vec![T::nan(); kind.coefficient_count()],
            PredictionMetrics::undefined(n),
        )
    }

    /// Which model this is
    pub fn kind(&self) -> ModelKind {
        self.kind
    }

    /// Human-readable model name
    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    /// Fitted coefficients `[a, b, …]` in the order of [`ModelKind::formula`]
    pub fn coefficients(&self) -> &[T] {
        &self.coefficients
    }

    /// False if the model could not be fit and its coefficients are NaN
    pub fn is_fitted(&self) -> bool {
        self.coefficients.iter().all(|c| c.is_real())
    }

    /// Evaluates the fitted model at `x`. NaN where the model is undefined.
    pub fn evaluate(&self, x: T) -> T {
        self.kind.evaluate(&self.coefficients, x)
    }

    /// Root mean squared error over the points with a finite prediction.
    ///
    /// This is the criterion used to pick the best model. NaN if the model is unfitted.
    pub fn standard_deviation(&self) -> T {
        self.standard_deviation
    }

    /// Coefficient of determination over the fitted points.
    ///
    /// `1` is a perfect fit. For data where every `y` is identical, this is `1` for an
    /// exact fit and NaN otherwise.
    pub fn r_squared(&self) -> T {
        self.r_squared
    }

    /// Model output at each input point
    pub fn predicted_values(&self) -> &[T] {
        &self.predicted
    }

    /// Signed error `predicted - actual` at each input point
    pub fn errors(&self) -> &[T] {
        &self.errors
    }

    /// Coefficients as `[c0, c1, …]` with six decimals
    ///
    /// ```rust
    /// # use approxfit::{ModelKind, Point};
    /// let points = [Point::new(0.0, 1.0), Point::new(1.0, 3.0), Point::new(2.0, 5.0)];
    /// let fit = ModelKind::Linear.fit(&points).unwrap();
    /// assert_eq!(fit.coefficients_as_text(), "[1.000000, 2.000000]");
    /// ```
    pub fn coefficients_as_text(&self) -> String {
        let parts: Vec<String> = self
            .coefficients
            .iter()
            .map(|&c| {
                // Keep tiny rounding noise from printing as -0.000000
                let c = if Value::abs(c) < T::epsilon() { T::zero() } else { c };
                crate::display::format_value(c, 6)
            })
            .collect();
        format!("[{}]", parts.join(", "))
    }

    /// The equation with fitted coefficients substituted
    pub fn equation(&self) -> String {
        self.equation_with_precision(DEFAULT_PRECISION)
    }

    /// The equation with fitted coefficients substituted, at a chosen precision
    pub fn equation_with_precision(&self, precision: usize) -> String {
        if !self.is_fitted() {
            return format!("{} (not fitted)", self.kind.formula());
        }

        self.kind
            .approximation()
            .format_equation(&self.coefficients, precision)
    }

    /// Samples the fitted model over a range, e.g. to draw it.
    ///
    /// Points where the model is undefined are left out.
    pub fn sample(&self, range: RangeInclusive<T>, step: T) -> Vec<Point<T>> {
        SteppedValues::new(range, step)
            .map(|x| Point::new(x, self.evaluate(x)))
            .filter(Point::is_finite)
            .collect()
    }
}

impl<T: Value> std::fmt::Display for ModelFit<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name(), self.equation())
    }
}
