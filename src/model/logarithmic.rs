use super::{Approximation, ModelKind};
use crate::{
    display::{format_equation, Term},
    error::{Error, Result},
    point::Point,
    value::Value,
};

/// Smallest `x` at which a fitted logarithmic model is evaluated. Below it the prediction is NaN.
pub const LOG_DOMAIN_FLOOR: f64 = 1e-9;

/// Logarithmic model `y = a + b·ln(x)`, fit as a line through `(ln x, y)`.
///
/// Unlike the exponential and power models, a non-positive `x` anywhere in the data
/// rejects the whole fit with [`Error::DomainViolation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogarithmicModel;

impl<T: Value> Approximation<T> for LogarithmicModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Logarithmic
    }

    fn check_domain(&self, points: &[Point<T>]) -> Result<()> {
        if points.iter().any(|p| p.x <= T::zero() || p.x.is_nan()) {
            return Err(Error::DomainViolation {
                model: ModelKind::Logarithmic.name(),
                reason: "every x must be strictly positive",
            });
        }
        Ok(())
    }

    fn linearize(&self, point: Point<T>) -> Option<Point<T>> {
        Some(Point::new(point.x.ln(), point.y))
    }

    fn evaluate(&self, coefficients: &[T], x: T) -> T {
        let &[a, b] = coefficients else {
            return T::nan();
        };
        let floor = T::try_cast(LOG_DOMAIN_FLOOR).unwrap_or_else(|_| T::epsilon());
        if x <= floor || x.is_nan() {
            return T::nan();
        }
        a + b * x.ln()
    }

    fn format_equation(&self, coefficients: &[T], precision: usize) -> String {
        let terms = [
            Term::with_coefficient(coefficients[0], "", precision),
            Term::with_coefficient(coefficients[1], "ln(x)", precision),
        ];
        format_equation(terms.into_iter().flatten().collect())
    }
}
