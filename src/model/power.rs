use super::{Approximation, ModelKind};
use crate::{
    display::{format_equation, format_signed, Term},
    point::Point,
    value::Value,
};

/// Power model `y = a·x^b`, fit as a line through `(ln x, ln y)`.
///
/// Points with `x ≤ 0` or `y ≤ 0` are left out of the fit. The model is undefined for `x ≤ 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerModel;

impl<T: Value> Approximation<T> for PowerModel {
    fn kind(&self) -> ModelKind {
        ModelKind::Power
    }

    fn linearize(&self, point: Point<T>) -> Option<Point<T>> {
        (point.x > T::zero() && point.y > T::zero()).then(|| Point::new(point.x.ln(), point.y.ln()))
    }

    fn recover(&self, linear: Vec<T>) -> Vec<T> {
        vec![linear[0].exp(), linear[1]]
    }

    fn evaluate(&self, coefficients: &[T], x: T) -> T {
        let &[a, b] = coefficients else {
            return T::nan();
        };
        if x <= T::zero() || x.is_nan() || a.is_nan() || b.is_nan() {
            return T::nan();
        }
        a * x.powf(b)
    }

    fn format_equation(&self, coefficients: &[T], precision: usize) -> String {
        let power = format!("x^({})", format_signed(coefficients[1], precision));
        format_equation(
            Term::with_coefficient(coefficients[0], &power, precision)
                .into_iter()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, assert_nan, point::points_from_pairs};

    #[test]
    fn test_exact_recovery() {
        let points: Vec<Point> = (1..=8)
            .map(|i| {
                let x = f64::from(i);
                Point::new(x, 0.5 * x.powf(1.7))
            })
            .collect();
        let fit = ModelKind::Power.fit(&points).unwrap();
        assert_all_close!(fit.coefficients(), [0.5, 1.7], tol = 1e-10);
        assert_close!(fit.r_squared(), 1.0, tol = 1e-10);
        assert_eq!(fit.equation(), "y = 0.5000·x^(1.7000)");
    }

    #[test]
    fn test_filters_nonpositive_points() {
        let points = points_from_pairs::<f64>(&[
            (-1.0, 5.0),
            (1.0, 3.0),
            (2.0, 12.0),
            (3.0, 27.0),
            (4.0, -2.0),
        ]);
        let subset = points_from_pairs::<f64>(&[(1.0, 3.0), (2.0, 12.0), (3.0, 27.0)]);

        let fit = ModelKind::Power.fit(&points).unwrap();
        let subset_fit = ModelKind::Power.fit(&subset).unwrap();
        assert_all_close!(fit.coefficients(), subset_fit.coefficients(), tol = 1e-12);
        assert_all_close!(fit.coefficients(), [3.0, 2.0], tol = 1e-10);

        // No prediction at x = -1, but x = 4 is still scored
        assert_nan!(fit.predicted_values()[0]);
        assert_nan!(fit.errors()[0]);
        assert_close!(fit.errors()[4], 50.0, tol = 1e-8);
        assert_close!(fit.standard_deviation(), (2500.0f64 / 4.0).sqrt(), tol = 1e-6);
    }

    #[test]
    fn test_too_few_positive_points() {
        let points = points_from_pairs::<f64>(&[(-1.0, 5.0), (2.0, 3.0), (3.0, -1.0)]);
        let fit = ModelKind::Power.fit(&points).unwrap();
        assert!(!fit.is_fitted());
        assert_eq!(fit.errors().len(), 3);
    }

    #[test]
    fn test_evaluate() {
        let eval = |x: f64| ModelKind::Power.evaluate(&[2.0, 0.5], x);
        assert_close!(eval(4.0), 4.0);
        assert_nan!(eval(0.0));
        assert_nan!(eval(-4.0));
        assert_nan!(ModelKind::Power.evaluate(&[f64::NAN, 0.5], 4.0));
        assert_nan!(PowerModel.evaluate(&[2.0f64], 4.0));
    }

    #[test]
    fn test_inverse_equation() {
        let points = points_from_pairs::<f64>(&[(1.0, 1.0), (2.0, 0.5), (4.0, 0.25)]);
        let fit = ModelKind::Power.fit(&points).unwrap();
        assert_eq!(fit.equation(), "y = x^(-1.0000)");
    }
}
