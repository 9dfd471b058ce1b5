//! Fitting every applicable model to a point set and picking the best one
//!
//! [`calculate_all`] is the main entry point. It:
//! 1. Summarizes the dataset once ([`DomainSummary`]) and skips models whose domain or
//!    minimum size the data does not meet. Skipped models do not appear in the outcome.
//! 2. Fits each remaining model to the same, unmodified points.
//! 3. Computes the Pearson correlation of the raw points.
//! 4. Picks the model with the lowest finite standard deviation. Ties go to the model that
//!    comes first in [`ModelKind::ALL`].
//!
//! Nothing is cached between calls. The [`RegressionOutcome`] is handed back to the caller.
//!
//! ```rust
//! use approxfit::{calculate_all, ModelKind, Point};
//!
//! let points: Vec<Point> = (1..=8).map(|i| {
//!     let x = f64::from(i);
//!     Point::new(x, 1.0 + 0.5 * x * x)
//! }).collect();
//!
//! let outcome = calculate_all(&points).unwrap();
//! assert_eq!(outcome.models().len(), 6);
//! assert!(outcome.best().standard_deviation() < 1e-9);
//! ```
use std::collections::BTreeSet;

use crate::{
    error::{Error, Result},
    model::{DomainSummary, ModelFit, ModelKind},
    point::Point,
    report::FitQuality,
    statistics::pearson_correlation,
    value::Value,
};

/// Every applicable model fitted to one point set, with the best one marked.
///
/// Models are stored in canonical order. An outcome always holds at least one model, and
/// the best model always has a finite standard deviation.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct RegressionOutcome<T: Value = f64> {
    models: Vec<ModelFit<T>>,
    best: usize,
    correlation: T,
}

impl<T: Value> RegressionOutcome<T> {
    /// The model with the lowest standard deviation
    pub fn best(&self) -> &ModelFit<T> {
        &self.models[self.best]
    }

    /// Position of the best model in [`RegressionOutcome::models`]
    pub fn best_index(&self) -> usize {
        self.best
    }

    /// Fitted models, in canonical order
    pub fn models(&self) -> &[ModelFit<T>] {
        &self.models
    }

    /// The fit for a given model, if it was applicable to the data
    pub fn model(&self, kind: ModelKind) -> Option<&ModelFit<T>> {
        self.models.iter().find(|m| m.kind() == kind)
    }

    /// Pearson correlation between x and y of the raw points
    pub fn correlation(&self) -> T {
        self.correlation
    }

    /// How well the best model explains the data, judged by its R²
    pub fn quality(&self) -> FitQuality {
        FitQuality::from_r_squared(self.best().r_squared())
    }
}

/// Fits all six models where applicable and selects the best.
///
/// # Errors
/// - [`Error::NoData`] if `points` is empty.
/// - [`Error::TooFewPoints`] if no model applies (fewer than two points).
/// - [`Error::SingularMatrix`] if a fit fails on degenerate x-values.
/// - [`Error::NoViableModel`] if no fitted model has a finite standard deviation.
pub fn calculate_all<T: Value>(points: &[Point<T>]) -> Result<RegressionOutcome<T>> {
    calculate_with(points, &ModelKind::ALL)
}

/// Like [`calculate_all`], but only considers the given candidates.
///
/// Candidates are fitted in canonical order whatever order they are given in, and
/// duplicates are ignored.
///
/// ```rust
/// use approxfit::{calculate_with, ModelKind, Point};
///
/// let points = [Point::new(1.0, 2.0), Point::new(2.0, 4.1), Point::new(3.0, 5.9)];
/// let outcome = calculate_with(&points, &[ModelKind::Power, ModelKind::Linear]).unwrap();
///
/// assert_eq!(outcome.models()[0].kind(), ModelKind::Linear);
/// assert_eq!(outcome.models()[1].kind(), ModelKind::Power);
/// ```
///
/// # Errors
/// Same as [`calculate_all`]. [`Error::TooFewPoints`] is also returned when none of the
/// candidates apply to the data.
pub fn calculate_with<T: Value>(
    points: &[Point<T>],
    candidates: &[ModelKind],
) -> Result<RegressionOutcome<T>> {
    if points.is_empty() {
        return Err(Error::NoData);
    }

    let domain = DomainSummary::new(points);
    let candidates: BTreeSet<ModelKind> = candidates.iter().copied().collect();
    let applicable: Vec<ModelKind> = candidates
        .into_iter()
        .filter(|kind| kind.is_applicable(&domain))
        .collect();

    if applicable.is_empty() {
        return Err(Error::TooFewPoints {
            got: points.len(),
            min: ModelKind::Linear.min_points(),
        });
    }

    let models = applicable
        .into_iter()
        .map(|kind| kind.fit(points))
        .collect::<Result<Vec<_>>>()?;

    let correlation = pearson_correlation(points);

    let best = select_best(models.iter().map(ModelFit::standard_deviation))
        .ok_or(Error::NoViableModel)?;

    Ok(RegressionOutcome {
        models,
        best,
        correlation,
    })
}

/// Index of the lowest finite score. The first of equal scores wins.
fn select_best<T: Value>(scores: impl Iterator<Item = T>) -> Option<usize> {
    let mut best: Option<(usize, T)> = None;
    for (i, score) in scores.enumerate() {
        if !score.is_real() {
            continue;
        }

        match best {
            Some((_, lowest)) if score >= lowest => {}
            _ => best = Some((i, score)),
        }
    }

    best.map(|(i, _)| i)
}
