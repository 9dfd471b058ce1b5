use super::{Approximation, ModelKind};
use crate::{display, point::Point, solver, value::Value};

/// Linear, quadratic and cubic models: an ordinary polynomial fit with no change of variables.
///
/// Coefficients are in ascending powers, `[c₀, c₁, …]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PolynomialModel {
    kind: ModelKind,
    degree: usize,
}

impl PolynomialModel {
    /// `y = a + b·x`
    pub const LINEAR: Self = Self {
        kind: ModelKind::Linear,
        degree: 1,
    };

    /// `y = a + b·x + c·x²`
    pub const QUADRATIC: Self = Self {
        kind: ModelKind::Quadratic,
        degree: 2,
    };

    /// `y = a + b·x + c·x² + d·x³`
    pub const CUBIC: Self = Self {
        kind: ModelKind::Cubic,
        degree: 3,
    };
}

impl<T: Value> Approximation<T> for PolynomialModel {
    fn kind(&self) -> ModelKind {
        self.kind
    }

    fn degree(&self) -> usize {
        self.degree
    }

    fn linearize(&self, point: Point<T>) -> Option<Point<T>> {
        Some(point)
    }

    fn evaluate(&self, coefficients: &[T], x: T) -> T {
        if coefficients.len() != self.degree + 1 {
            return T::nan();
        }
        solver::evaluate_polynomial(coefficients, x)
    }

    fn format_equation(&self, coefficients: &[T], precision: usize) -> String {
        display::format_polynomial(coefficients, precision)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::{assert_all_close, assert_close, error::Error, point::points_from_pairs};

    fn doubled() -> Vec<Point> {
        (1..=8).map(|i| Point::new(f64::from(i), 2.0 * f64::from(i))).collect()
    }

    #[test]
    fn test_linear_perfect() {
        let fit = ModelKind::Linear.fit(&doubled()).unwrap();
        assert_all_close!(fit.coefficients(), [0.0, 2.0], tol = 1e-10);
        assert_close!(fit.r_squared(), 1.0, tol = 1e-12);
        assert_close!(fit.standard_deviation(), 0.0, tol = 1e-10);
        assert_eq!(fit.predicted_values().len(), 8);
        assert!(fit.errors().iter().all(|e| e.abs() < 1e-10));
    }

    #[test]
    fn test_quadratic() {
        let points: Vec<Point> = (-3..=4)
            .map(|i| {
                let x = f64::from(i);
                Point::new(x, 1.5 - x + 0.5 * x * x)
            })
            .collect();
        let fit = ModelKind::Quadratic.fit(&points).unwrap();
        assert_all_close!(fit.coefficients(), [1.5, -1.0, 0.5], tol = 1e-9);
        assert_eq!(fit.equation(), "y = 1.5000 - x + 0.5000·x²");
    }

    #[test]
    fn test_cubic_beats_line_on_cubic_data() {
        let points: Vec<Point> = (1..=10)
            .map(|i| {
                let x = f64::from(i);
                Point::new(x, x * x * x - 4.0 * x)
            })
            .collect();
        let cubic = ModelKind::Cubic.fit(&points).unwrap();
        let linear = ModelKind::Linear.fit(&points).unwrap();

        assert_all_close!(cubic.coefficients(), [0.0, -4.0, 0.0, 1.0], tol = 1e-7);
        assert!(cubic.standard_deviation() < linear.standard_deviation());
        assert!(cubic.r_squared() > linear.r_squared());
        assert_close!(cubic.evaluate(2.0), 0.0, tol = 1e-7);
    }

    #[test]
    fn test_residuals() {
        // Best line through (0,0), (1,2), (2,1) is y = 0.5 + 0.5x
        let points = points_from_pairs::<f64>(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0)]);
        let fit = ModelKind::Linear.fit(&points).unwrap();
        assert_all_close!(fit.coefficients(), [0.5, 0.5], tol = 1e-12);
        assert_all_close!(fit.errors(), [0.5, -1.0, 0.5], tol = 1e-12);
        assert_close!(fit.standard_deviation(), 0.5f64.sqrt(), tol = 1e-12);
        assert_close!(fit.r_squared(), 0.25, tol = 1e-12);
    }

    #[test]
    fn test_too_few_points() {
        let points = points_from_pairs::<f64>(&[(1.0, 1.0), (2.0, 3.0), (3.0, 2.0)]);
        let fit = ModelKind::Cubic.fit(&points).unwrap();
        assert!(!fit.is_fitted());
        assert_eq!(fit.errors().len(), 3);
        assert!(fit.standard_deviation().is_nan());
    }

    #[test]
    fn test_degenerate_x() {
        let points = points_from_pairs::<f64>(&[(1.0, 1.0), (1.0, 2.0), (1.0, 3.0), (1.0, 4.0)]);
        for kind in [ModelKind::Linear, ModelKind::Quadratic, ModelKind::Cubic] {
            let err = kind.fit(&points).unwrap_err();
            assert!(matches!(err, Error::SingularMatrix { n: 4, .. }), "{kind}: {err}");
        }
    }
}
