use super::{Approximation, ModelKind};
use crate::{
    display::{format_equation, format_signed, Term},
    point::Point,
    value::Value,
};

/// Exponential model `y = a·e^(b·x)`.
///
/// Fit as a line through `(x, ln y)`, so only points with `y > 0` take part in the fit.
/// The intercept of that line is `ln a` and the slope is `b`.
///
/// Points with `y ≤ 0` are skipped rather than rejected: with fewer than two positive
/// values left, the model is returned unfitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExponentialModel;

impl<T: Value> Approximation<T> for ExponentialModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Exponential
    }

    fn linearize(&self, point: Point<T>) -> Option<Point<T>> {
        (point.y > T::zero()).then(|| Point::new(point.x, point.y.ln()))
    }

    fn recover(&self, linear: Vec<T>) -> Vec<T> {
        vec![linear[0].exp(), linear[1]]
    }

    fn evaluate(&self, coefficients: &[T], x: T) -> T {
        let &[a, b] = coefficients else {
            return T::nan();
        };
        if a.is_nan() || b.is_nan() {
            return T::nan();
        }
        a * (b * x).exp()
    }

    fn format_equation(&self, coefficients: &[T], precision: usize) -> String {
        let exponent = format!("e^({}·x)", format_signed(coefficients[1], precision));
        format_equation(
            Term::with_coefficient(coefficients[0], &exponent, precision)
                .into_iter()
                .collect(),
        )
    }
}
