//! Utilities for displaying fitted equations and numbers
//!
//! This module turns coefficient vectors into human-readable equations such as
//! `y = 2.0000 - 3.0000·x + 0.5000·x²` or `y = 1.5000·e^(0.3000·x)`.
//!
//! # Key Concepts
//! - **[`Term`]**: A single additive term with a sign and body.
//! - **[`Sign`]**: Tracks whether a term is positive or negative.
//! - [`format_equation`]: Joins terms into `"y = ..."`.
//!
//! # Helpers
//! - [`format_coefficient`]: Formats a numeric coefficient, skipping zeros.
//! - [`format_variable`]: Raises a variable name to a superscript power.
//! - [`format_value`]: Fixed-precision number for tables, with `NaN` spelled out.
#![allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]

use std::fmt::Write;

use crate::value::Value;

pub mod unicode;

/// Default precision for coefficients in equations
pub const DEFAULT_PRECISION: usize = 4;

/// Default range in which scientific notation is not used
#[must_use]
pub fn default_fixed_range<T: Value>() -> Option<std::ops::Range<T>> {
    const RANGE: std::ops::Range<f64> = 1e-3..1e4;
    let s = T::try_cast(RANGE.start).ok()?;
    let e = T::try_cast(RANGE.end).ok()?;
    Some(s..e)
}

/// Represents the sign of an equation term.
///
/// Used when formatting equations to determine how a term
/// should be connected to the rest of the expression (e.g., with `+` or `-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sign {
    /// Positive sign (`+` when displayed).
    Positive,

    /// Negative sign (`-` when displayed).
    Negative,
}

impl Sign {
    /// Determines the sign from a numeric coefficient.
    ///
    /// NaN is treated as positive.
    ///
    /// # Example
    /// ```
    /// # use approxfit::display::Sign;
    /// assert_eq!(Sign::from_coef(3.0), Sign::Positive);
    /// assert_eq!(Sign::from_coef(-2.0), Sign::Negative);
    /// ```
    pub fn from_coef<T: Value>(coef: T) -> Self {
        if coef < T::zero() {
            Self::Negative
        } else {
            Self::Positive
        }
    }

    /// Returns the character representation of the sign.
    #[must_use]
    pub fn char(&self) -> char {
        match self {
            Sign::Positive => '+',
            Sign::Negative => '-',
        }
    }
}

/// A single additive term of an equation for display purposes.
///
/// A `Term` combines the **sign** and the **formatted body** of a component
/// (e.g., `"2.0000·x²"`, `"3.1400"`, `"x"`). Terms are assembled into a full
/// equation by [`format_equation`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    /// The sign of the term (positive or negative).
    pub sign: Sign,

    /// The body of the term, without its sign.
    pub body: String,
}

impl Term {
    /// Creates a new term with the given sign and body.
    ///
    /// # Example
    /// ```
    /// # use approxfit::display::{Term, Sign};
    /// let term = Term::new(Sign::Negative, "3x²".to_string());
    /// assert_eq!(term.sign, Sign::Negative);
    /// assert_eq!(term.body, "3x²");
    /// ```
    #[must_use]
    pub fn new(sign: Sign, body: String) -> Self {
        Self { sign, body }
    }

    /// Builds the term `coef·variable`, or `None` if the coefficient rounds away.
    ///
    /// A unit coefficient on a non-constant term is left implicit.
    pub fn with_coefficient<T: Value>(coef: T, variable: &str, precision: usize) -> Option<Self> {
        let is_constant = variable.is_empty();
        let coef_str = format_coefficient(coef, !is_constant, precision)?;
        let body = match (coef_str.is_empty(), is_constant) {
            (true, _) => variable.to_string(),
            (false, true) => coef_str,
            (false, false) => format!("{coef_str}·{variable}"),
        };
        Some(Self::new(Sign::from_coef(coef), body))
    }
}

/// Writes `y = <terms>` into a string.
///
/// # Behavior
/// - The first term is written without a leading `+`.
/// - Subsequent terms are prepended with `+` or `-` depending on the sign.
/// - An empty term list renders as `y = 0`.
///
/// # Example
/// ```
/// # use approxfit::display::{format_equation, Sign, Term};
/// let terms = vec![
///     Term::new(Sign::Negative, "2".into()),
///     Term::new(Sign::Positive, "x".into()),
/// ];
/// assert_eq!(format_equation(terms), "y = -2 + x");
/// ```
#[must_use]
pub fn format_equation(mut terms: Vec<Term>) -> String {
    let mut buffer = String::from("y = ");
    if terms.is_empty() {
        buffer.push('0');
        return buffer;
    }

    // Extract the first term to avoid leading '+'
    let first = terms.remove(0);
    if first.sign == Sign::Negative {
        buffer.push(first.sign.char());
    }
    buffer.push_str(&first.body);

    for term in terms {
        write!(buffer, " {} {}", term.sign.char(), term.body).ok();
    }

    buffer
}

/// Formats `c₀ + c₁·x + c₂·x² + …` in ascending powers.
///
/// # Example
/// ```
/// # use approxfit::display::format_polynomial;
/// assert_eq!(format_polynomial(&[2.0, -3.0, 0.5], 2), "y = 2.00 - 3.00·x + 0.50·x²");
/// assert_eq!(format_polynomial(&[0.0, 1.0], 2), "y = x");
/// ```
#[must_use]
pub fn format_polynomial<T: Value>(coefficients: &[T], precision: usize) -> String {
    let terms = coefficients
        .iter()
        .enumerate()
        .filter_map(|(power, &coef)| {
            let variable = format_variable("x", power as i32);
            Term::with_coefficient(coef, &variable, precision)
        })
        .collect();
    format_equation(terms)
}

/// Formats a numeric coefficient for display in an equation term.
///
/// - Returns `None` if the coefficient is zero or effectively zero (≤ epsilon).
/// - Returns an empty string when `implicit_unit` is set and the value prints as `1`.
/// - Formats as a decimal if the absolute value is between `1e-3` and `1e4`.
/// - Formats in scientific notation otherwise.
/// - The sign is not included; see [`Sign::from_coef`].
///
/// # Example
/// ```
/// # use approxfit::display::format_coefficient;
/// assert_eq!(format_coefficient(0.0, true, 2), None);
/// assert_eq!(format_coefficient(-2.5, true, 2), Some("2.50".to_string()));
/// assert_eq!(format_coefficient(1e5, true, 2), Some("1.00e5".to_string()));
/// assert_eq!(format_coefficient(1.0, true, 2), Some(String::new()));
/// ```
pub fn format_coefficient<T: Value>(
    coef: T,
    implicit_unit: bool,
    precision: usize,
) -> Option<String> {
    let abs = Value::abs(coef);

    if coef == T::zero() || abs <= T::epsilon() {
        return None;
    }

    let sci_cutoff = default_fixed_range();
    let formatted = unicode::float(abs, sci_cutoff, precision);

    // Anything that prints as 1 is a unit coefficient
    if implicit_unit && formatted == format!("{:.precision$}", 1.0) {
        return Some(String::new());
    }

    Some(formatted)
}

/// Formats `base` raised to an integer power.
///
/// Power 0 is an empty string and power 1 is `base` unchanged.
///
/// ```
/// # use approxfit::display::format_variable;
/// assert_eq!(format_variable("x", 0), "");
/// assert_eq!(format_variable("x", 1), "x");
/// assert_eq!(format_variable("x", 2), "x²");
/// ```
#[must_use]
pub fn format_variable(base: &str, exp: i32) -> String {
    match exp {
        0 => String::new(),
        1 => base.to_string(),
        _ => format!("{base}{}", unicode::superscript_exponent(exp)),
    }
}

/// Formats a coefficient with its sign, as used inside exponents.
///
/// # Example
/// ```
/// # use approxfit::display::format_signed;
/// assert_eq!(format_signed(-0.25, 2), "-0.25");
/// assert_eq!(format_signed(1.0, 2), "1.00");
/// assert_eq!(format_signed(0.0, 2), "0");
/// ```
#[must_use]
pub fn format_signed<T: Value>(coef: T, precision: usize) -> String {
    match format_coefficient(coef, false, precision) {
        Some(body) if Sign::from_coef(coef) == Sign::Negative => format!("-{body}"),
        Some(body) => body,
        None => "0".to_string(),
    }
}

/// Formats a value with fixed precision, spelling out non-finite values.
///
/// # Example
/// ```
/// # use approxfit::display::format_value;
/// assert_eq!(format_value(1.23456, 4), "1.2346");
/// assert_eq!(format_value(f64::NAN, 4), "NaN");
/// ```
#[must_use]
pub fn format_value<T: Value>(value: T, precision: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else {
        format!("{value:.precision$}")
    }
}
