//! Plain-text report of a [`RegressionOutcome`]
//!
//! The report lists the input points, every fitted model with its equation and metrics,
//! the Pearson correlation, a verdict on the best model's R² ([`FitQuality`]), and a
//! per-point breakdown of the best model.
//!
//! ```rust
//! use approxfit::{calculate_all, report::Report, Point};
//!
//! let points: Vec<Point> = (1..=8).map(|i| Point::new(f64::from(i), 3.0 * f64::from(i) - 1.0)).collect();
//! let outcome = calculate_all(&points).unwrap();
//!
//! let text = Report::new(&points, &outcome).to_string();
//! assert!(text.contains(&format!("Best model: {}", outcome.best().name())));
//! assert!(text.contains("Excellent fit"));
//! ```
use std::fmt::{self, Display, Formatter};

use crate::{display::format_value, point::Point, regression::RegressionOutcome, value::Value};

/// R² at or above which a fit is [`FitQuality::Excellent`]
pub const EXCELLENT_R_SQUARED: f64 = 0.95;

/// R² at or above which a fit is [`FitQuality::Good`]
pub const GOOD_R_SQUARED: f64 = 0.85;

/// R² at or above which a fit is [`FitQuality::Satisfactory`]
pub const SATISFACTORY_R_SQUARED: f64 = 0.7;

/// Decimals used for numbers in the report
const PRECISION: usize = 6;

/// Verbal interpretation of an R² value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitQuality {
    /// `R² ≥ 0.95`
    Excellent,

    /// `0.85 ≤ R² < 0.95`
    Good,

    /// `0.7 ≤ R² < 0.85`
    Satisfactory,

    /// `R² < 0.7`, or R² is undefined
    Weak,
}

impl FitQuality {
    /// Classifies an R² value. NaN is [`FitQuality::Weak`].
    ///
    /// ```rust
    /// # use approxfit::report::FitQuality;
    /// assert_eq!(FitQuality::from_r_squared(0.97), FitQuality::Excellent);
    /// assert_eq!(FitQuality::from_r_squared(0.7), FitQuality::Satisfactory);
    /// assert_eq!(FitQuality::from_r_squared(f64::NAN), FitQuality::Weak);
    /// ```
    pub fn from_r_squared<T: Value>(r_squared: T) -> Self {
        let at_least = |threshold: f64| T::try_cast(threshold).is_ok_and(|t| r_squared >= t);

        if at_least(EXCELLENT_R_SQUARED) {
            Self::Excellent
        } else if at_least(GOOD_R_SQUARED) {
            Self::Good
        } else if at_least(SATISFACTORY_R_SQUARED) {
            Self::Satisfactory
        } else {
            Self::Weak
        }
    }

    /// Short description including the R² band
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent fit (R² ≥ 0.95)",
            Self::Good => "Good fit (0.85 ≤ R² < 0.95)",
            Self::Satisfactory => "Satisfactory fit (0.7 ≤ R² < 0.85)",
            Self::Weak => "Weak fit (R² < 0.7)",
        }
    }
}

impl Display for FitQuality {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// A printable summary of a regression over a point set.
///
/// `points` must be the same points the outcome was computed from.
#[derive(Debug, Clone, Copy)]
pub struct Report<'a, T: Value = f64> {
    points: &'a [Point<T>],
    outcome: &'a RegressionOutcome<T>,
}

impl<'a, T: Value> Report<'a, T> {
    /// Creates a report over `points` and the outcome computed from them
    pub fn new(points: &'a [Point<T>], outcome: &'a RegressionOutcome<T>) -> Self {
        Self { points, outcome }
    }

    fn write_points(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Input points:")?;
        writeln!(f, "{:>14}  {:>14}", "x", "y")?;
        for p in self.points {
            writeln!(
                f,
                "{:>14}  {:>14}",
                format_value(p.x, PRECISION),
                format_value(p.y, PRECISION)
            )?;
        }
        writeln!(f)
    }

    fn write_models(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coefficients:")?;
        for model in self.outcome.models() {
            writeln!(f, "{:<12} {}", model.name(), model.coefficients_as_text())?;
            writeln!(f, "{:<12} {}", "", model.equation())?;
        }
        writeln!(f)?;

        writeln!(f, "{:<12} {:>14}  {:>14}", "Model", "σ", "R²")?;
        writeln!(f, "{}", "-".repeat(42))?;
        for model in self.outcome.models() {
            writeln!(
                f,
                "{:<12} {:>14}  {:>14}",
                model.name(),
                format_value(model.standard_deviation(), PRECISION),
                format_value(model.r_squared(), PRECISION)
            )?;
        }
        writeln!(f)
    }

    fn write_best_details(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let best = self.outcome.best();
        writeln!(f, "Details for {}:", best.name())?;
        writeln!(f, "{:>12}  {:>12}  {:>12}  {:>12}", "x", "y", "φ(x)", "error")?;
        writeln!(f, "{}", "-".repeat(54))?;

        let rows = self
            .points
            .iter()
            .zip(best.predicted_values())
            .zip(best.errors());
        for ((p, &predicted), &error) in rows {
            writeln!(
                f,
                "{:>12}  {:>12}  {:>12}  {:>12}",
                format_value(p.x, 4),
                format_value(p.y, 4),
                format_value(predicted, 4),
                format_value(error, 4)
            )?;
        }
        Ok(())
    }
}

impl<T: Value> Display for Report<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Approximation report")?;
        writeln!(f, "====================")?;
        writeln!(f, "Points: {}", self.points.len())?;
        writeln!(f)?;

        self.write_points(f)?;

        writeln!(f, "Best model: {}", self.outcome.best().name())?;
        writeln!(f)?;

        self.write_models(f)?;

        writeln!(
            f,
            "Pearson correlation: {}",
            format_value(self.outcome.correlation(), PRECISION)
        )?;
        writeln!(f, "R² interpretation: {}", self.outcome.quality())?;
        writeln!(f)?;

        self.write_best_details(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{calculate_all, calculate_with, point::points_from_pairs, ModelKind};

    #[test]
    fn test_quality_thresholds() {
        assert_eq!(FitQuality::from_r_squared(1.0), FitQuality::Excellent);
        assert_eq!(FitQuality::from_r_squared(0.95), FitQuality::Excellent);
        assert_eq!(FitQuality::from_r_squared(0.9499), FitQuality::Good);
        assert_eq!(FitQuality::from_r_squared(0.85), FitQuality::Good);
        assert_eq!(FitQuality::from_r_squared(0.8), FitQuality::Satisfactory);
        assert_eq!(FitQuality::from_r_squared(0.69), FitQuality::Weak);
        assert_eq!(FitQuality::from_r_squared(-3.0), FitQuality::Weak);
        assert_eq!(FitQuality::from_r_squared(f64::NAN), FitQuality::Weak);
        assert_eq!(FitQuality::from_r_squared(0.96f32), FitQuality::Excellent);
    }

    #[test]
    fn test_quality_display() {
        assert_eq!(FitQuality::Good.to_string(), "Good fit (0.85 ≤ R² < 0.95)");
        assert_eq!(serde_json::to_string(&FitQuality::Weak).unwrap(), r#""weak""#);
    }

    #[test]
    fn test_report_sections() {
        let points: Vec<Point> = (1..=8)
            .map(|i| Point::new(f64::from(i), 2.0 * f64::from(i)))
            .collect();
        let outcome = calculate_all(&points).unwrap();
        let text = Report::new(&points, &outcome).to_string();

        assert!(text.starts_with("Approximation report\n"));
        assert!(text.contains("Points: 8\n"));
        assert!(text.contains(&format!("Best model: {}\n", outcome.best().name())));
        assert!(text.contains("Pearson correlation: 1.000000\n"));
        assert!(text.contains("R² interpretation: Excellent fit (R² ≥ 0.95)\n"));
        assert!(text.contains(&format!("Details for {}:", outcome.best().name())));

        for kind in ModelKind::ALL {
            assert!(text.contains(kind.name()), "missing {kind}");
        }

        // Title, count, listing, best, coefficients, metrics, correlation, verdict, details
        let order = [
            "Points:",
            "Input points:",
            "Best model:",
            "Coefficients:",
            "Model ",
            "Pearson correlation:",
            "R² interpretation:",
            "Details for",
        ];
        let positions: Vec<usize> = order.iter().map(|s| text.find(s).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
    }

    #[test]
    fn test_report_negative_values() {
        // (2, -3) makes the point listing include a negative y
        let points = points_from_pairs::<f64>(&[(1.0, 2.0), (2.0, -3.0), (3.0, 8.0), (4.0, 16.0)]);
        let outcome =
            calculate_with(&points, &[ModelKind::Linear, ModelKind::Exponential]).unwrap();
        let text = Report::new(&points, &outcome).to_string();
        assert!(text.contains("-3.000000"));
        assert!(text.contains("Exponential"));
    }

    #[test]
    fn test_report_weak_fit() {
        let points = points_from_pairs::<f64>(&[
            (1.0, 1.0),
            (2.0, -1.0),
            (3.0, 1.0),
            (4.0, -1.0),
            (5.0, 1.0),
        ]);
        let outcome = calculate_with(&points, &[ModelKind::Linear]).unwrap();
        assert_eq!(outcome.quality(), FitQuality::Weak);

        let text = Report::new(&points, &outcome).to_string();
        assert!(text.contains("Weak fit (R² < 0.7)"));
        assert_eq!(text.lines().filter(|l| l.starts_with("Linear")).count(), 2);
    }
}
