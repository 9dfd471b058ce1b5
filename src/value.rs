//! Numeric types and iteration utilities for approximations.
//!
//! This module defines the [`Value`] trait, which abstracts the numeric
//! types that can be used for fitting and evaluating models, ensuring
//! compatibility with nalgebra, floating-point operations, and formatting.
//!
//! # Traits
//!
//! - [`Value`]: Extends `FloatCore`, `Scalar`, and `ComplexField` to provide:
//!   - `try_cast` for safe type conversion with error handling.
//!   - `powi` and `abs` without method ambiguity.
//! - [`CoordExt`]: Column access over point sequences.
//!
//! # Iterators
//!
//! - [`SteppedValues`]: A floating-point range iterator with a specified step,
//!   useful for sampling a fitted model for a chart.
//!
//! # Example
//!
//! ```rust
//! use approxfit::value::{SteppedValues, Value};
//!
//! // Create a range of f64 values from 0.0 to 1.0 in steps of 0.1
//! let range = SteppedValues::new(0.0..=1.0, 0.1);
//! for x in range {
//!     println!("{x}");
//! }
//!
//! let squared = Value::powi(1.5f64, 2);
//! assert_eq!(squared, 2.25);
//! ```
use std::ops::{Range, RangeInclusive};

use crate::{error::Error, point::Point};

/// Numeric type for points, coefficients and metrics
pub trait Value:
    nalgebra::Scalar
    + nalgebra::ComplexField<RealField = Self>
    + nalgebra::RealField
    + num_traits::float::FloatCore
    + std::fmt::LowerExp
{
    /// Tries to cast a value to the target type
    ///
    /// # Errors
    /// Returns an error if the cast fails
    fn try_cast<U: num_traits::NumCast>(n: U) -> Result<Self, Error> {
        num_traits::cast(n).ok_or(Error::CastFailed)
    }

    /// Converts the value to `usize`
    fn as_usize(&self) -> Option<usize> {
        num_traits::cast(*self)
    }

    /// Raises the value to the power of an integer
    #[must_use]
    fn powi(self, n: i32) -> Self {
        nalgebra::ComplexField::powi(self, n)
    }

    /// Get the absolute value for a numeric type
    #[must_use]
    fn abs(self) -> Self {
        nalgebra::ComplexField::abs(self)
    }

    /// True for values that are neither NaN nor infinite
    fn is_real(self) -> bool {
        num_traits::float::FloatCore::is_finite(self)
    }

    /// Converts a `usize` to the target numeric type.
    ///
    /// Results in `infinity` if the value is out of range.
    #[must_use]
    fn from_positive_int(n: usize) -> Self {
        Self::try_cast(n).unwrap_or(Self::infinity())
    }
}

impl<T> Value for T where
    T: nalgebra::Scalar
        + nalgebra::ComplexField<RealField = Self>
        + nalgebra::RealField
        + num_traits::float::FloatCore
        + std::fmt::LowerExp
{
}

/// Iterator over a range of floating-point values with a specified step.
///
/// This iterator yields values starting from `start` up to and including `end`,
/// incrementing by `step` on each iteration. A non-positive step yields nothing.
pub struct SteppedValues<T: Value> {
    range: RangeInclusive<T>,
    step: T,
    index: T,
}
impl<T: Value> SteppedValues<T> {
    /// Creates a new iterator over stepped values in a range
    ///
    /// Will yield values starting from `range.start` up to and including `range.end`
    pub fn new(range: RangeInclusive<T>, step: T) -> Self {
        Self {
            range,
            step,
            index: T::zero(),
        }
    }

    /// Returns the number of values remaining in the iterator
    pub fn len(&self) -> usize {
        if self.step <= T::zero() {
            return 0;
        }

        let value = *self.range.start() + self.index * self.step;
        if value > *self.range.end() {
            return 0;
        }

        let remaining = *self.range.end() - value;
        let steps = remaining / self.step;
        steps.as_usize().map_or(0, |s| s + 1)
    }

    /// Returns true if the iterator is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
impl<T: Value> Iterator for SteppedValues<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step <= T::zero() {
            return None;
        }

        let value = *self.range.start() + self.index * self.step;
        if value <= *self.range.end() {
            self.index += T::one();
            Some(value)
        } else {
            None
        }
    }
}

/// Extension trait for accessing the `x` and `y` columns of a point sequence.
///
/// # Examples
///
/// ```
/// # use approxfit::{Point, value::CoordExt};
/// let data = vec![Point::new(1.5, -2.0), Point::new(2.0, 3.0), Point::new(0.0, 1.0)];
/// assert_eq!(data.y(), vec![-2.0, 3.0, 1.0]);
/// assert_eq!(data.x_range(), Some(0.0..=2.0));
/// ```
pub trait CoordExt<T: Value> {
    /// Returns an iterator over the x-coordinates.
    fn x_iter(&self) -> impl Iterator<Item = T>;

    /// Returns an iterator over the y-coordinates.
    fn y_iter(&self) -> impl Iterator<Item = T>;

    /// Returns the x-coordinates.
    fn x(&self) -> Vec<T> {
        self.x_iter().collect()
    }

    /// Returns the y-coordinates.
    fn y(&self) -> Vec<T> {
        self.y_iter().collect()
    }

    /// Returns the inclusive range spanned by the x-coordinates.
    fn x_range(&self) -> Option<RangeInclusive<T>> {
        span(self.x_iter()).map(|r| r.start..=r.end)
    }

    /// Returns the inclusive range spanned by the y-coordinates.
    fn y_range(&self) -> Option<RangeInclusive<T>> {
        span(self.y_iter()).map(|r| r.start..=r.end)
    }
}

fn span<T: Value>(values: impl Iterator<Item = T>) -> Option<Range<T>> {
    values
        .fold(None, |acc: Option<(T, T)>, v| {
            Some(match acc {
                Some((min, max)) => (
                    nalgebra::RealField::min(min, v),
                    nalgebra::RealField::max(max, v),
                ),
                None => (v, v),
            })
        })
        .map(|(start, end)| start..end)
}

impl<T: Value> CoordExt<T> for [Point<T>] {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.y)
    }
}
impl<T: Value> CoordExt<T> for Vec<Point<T>> {
    fn x_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.x)
    }

    fn y_iter(&self) -> impl Iterator<Item = T> {
        self.iter().map(|p| p.y)
    }
}
