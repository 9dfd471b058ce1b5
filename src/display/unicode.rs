//! Unicode formatting utilities for equations
use std::ops::Range;

use crate::value::Value;

/// Format a floating point number as a string
///
/// Values inside `fixed_range` use fixed-point notation, everything else (including NaN) uses
/// scientific notation.
pub fn float<T: Value>(n: T, fixed_range: Option<Range<T>>, precision: usize) -> String {
    match fixed_range {
        Some(range) if range.contains(&n) => format!("{n:.precision$}"),
        _ => format!("{n:.precision$e}"),
    }
}

/// Writes an integer exponent in superscript digits, e.g. `-12` as `⁻¹²`
#[must_use]
pub fn superscript_exponent(exp: i32) -> String {
    const DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

    let abs = exp.unsigned_abs().to_string();
    let digits = abs
        .bytes()
        .map(|b| DIGITS[usize::from(b - b'0')]);

    if exp < 0 {
        std::iter::once('⁻').chain(digits).collect()
    } else {
        digits.collect()
    }
}
