//! # approxfit
//! ## Find the curve that fits your points
//!
//! Given a handful of `(x, y)` measurements, this crate fits six classic model shapes by least
//! squares and tells you which one describes the data best:
//!
//! | Model       | Equation                    |
//! |-------------|-----------------------------|
//! | Linear      | `y = a + b·x`               |
//! | Quadratic   | `y = a + b·x + c·x²`        |
//! | Cubic       | `y = a + b·x + c·x² + d·x³` |
//! | Exponential | `y = a·e^(b·x)`             |
//! | Logarithmic | `y = a + b·ln(x)`           |
//! | Power       | `y = a·x^b`                 |
//!
//! The simplest use-case is to hand a point set to [`calculate_all`]:
//! ```rust
//! use approxfit::{calculate_all, ModelKind, Point};
//!
//! let points: Vec<Point> = (1..=8).map(|i| {
//!     let x = f64::from(i);
//!     Point::new(x, 2.0 * (0.3 * x).exp())
//! }).collect();
//!
//! let outcome = calculate_all(&points).unwrap();
//! assert_eq!(outcome.best().kind(), ModelKind::Exponential);
//! println!("{}", outcome.best()); // Exponential: y = 2.0000·e^(0.3000·x)
//! ```
//!
//! # Core Concepts
//! - A [`Point`] is one observation. Point sets are plain slices and are never modified.
//! - A [`ModelKind`] names one of the six shapes. [`ModelKind::fit`] fits a single shape and
//!   returns an immutable [`ModelFit`] with coefficients, per-point predictions and errors,
//!   standard deviation and R².
//!     - Exponential, logarithmic and power models are fit as straight lines after taking logarithms,
//!       so they only use points inside their domain. Their metrics still cover every point.
//! - [`calculate_all`] fits every shape the data allows, computes the Pearson correlation and
//!   picks the model with the lowest standard deviation as a [`RegressionOutcome`].
//! - A [`report::Report`] renders an outcome as plain text, and [`io`] loads and saves point files.
//!
//! # Implementation Details
//!
//! Every shape reduces to a polynomial least-squares problem, solved from the normal equations
//! with `nalgebra`'s LU decomposition. A singular system is an error rather than a silent
//! pseudo-inverse. See [`solver`].
//!
//! The library itself never prints or logs from the fitting path. Problems are returned as
//! [`Error`]s, and models that cannot be fit to sparse data come back NaN-flagged.
//!
//! # Testing utilities
//!
//! Assertion macros for floating-point results and fitted models live in [`test`].
//!
#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::needless_range_loop)] // The worst clippy lint
#![allow(clippy::cast_precision_loss)] // I don't care about this one
#![allow(clippy::similar_names)] //       Clippy does not get to decide what names are similar
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]


pub mod display;
pub mod error;
pub mod io;
pub mod model;
pub mod point;
pub mod regression;
pub mod report;
pub mod solver;
pub mod statistics;
pub mod value;

pub use error::{Error, Result};
pub use model::{Approximation, DomainSummary, ModelFit, ModelKind};
pub use point::Point;
pub use regression::{calculate_all, calculate_with, RegressionOutcome};
pub use report::{FitQuality, Report};

pub use nalgebra;
