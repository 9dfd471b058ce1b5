//! Loading and saving point sets and reports
//!
//! # Point file format
//! One point per line, `x` then `y`:
//! ```text
//! # comment
//! 1.0, 2.5
//! 2.0 4.1
//! 3,0; 6,2
//! 4,5 8,75
//! ```
//! - Values are separated by a comma, a semicolon or whitespace.
//! - A decimal comma is accepted wherever it is unambiguous. A line of four comma-separated
//!   fields such as `1,5,2,25` is read as the pair `(1.5, 2.25)`.
//! - Blank lines and lines starting with `#` are ignored.
//! - Lines that do not hold two finite numbers are skipped, recorded in
//!   [`ParsedPoints::skipped`] and logged. They never abort the load.
//!
//! Files with a `.json` extension are read as JSON instead, either `[{"x": 1, "y": 2}, …]`
//! or `[[1, 2], …]`.
use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{error::Result, point::Point, report::Report, value::Value};

/// Decimals written per coordinate by [`write_points`]
pub const SAVE_PRECISION: usize = 6;

/// Why a line of a point file was not loaded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    /// The line holds fewer than two values.
    #[error("expected two values")]
    TooFewValues,

    /// A value is not a number.
    #[error("`{0}` is not a number")]
    InvalidNumber(String),

    /// A value is NaN or infinite, or does not fit the target type.
    #[error("values must be finite")]
    NonFinite,
}

/// A line of a point file that was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,

    /// The line as read, without its line terminator
    pub content: String,

    /// What was wrong with it
    pub reason: SkipReason,
}

/// Points read from a file, and the lines that were skipped along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedPoints<T: Value = f64> {
    /// Points in file order
    pub points: Vec<Point<T>>,

    /// Malformed lines, in file order
    pub skipped: Vec<SkippedLine>,
}

impl<T: Value> Default for ParsedPoints<T> {
    fn default() -> Self {
        Self {
            points: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T: Value> ParsedPoints<T> {
    fn push_line(&mut self, number: usize, line: &str) {
        match parse_line(line) {
            Ok(Some(point)) => self.points.push(point),
            Ok(None) => {}
            Err(reason) => {
                log::warn!("Skipping line {number} ({line:?}): {reason}");
                self.skipped.push(SkippedLine {
                    line: number,
                    content: line.to_string(),
                    reason,
                });
            }
        }
    }
}

/// Parses the text of a point file.
///
/// ```rust
/// # use approxfit::io::parse_points;
/// let parsed = parse_points::<f64>("1, 2\n# note\n2,5; 3,5\nbad line\n");
/// assert_eq!(parsed.points.len(), 2);
/// assert_eq!(parsed.points[1].x, 2.5);
/// assert_eq!(parsed.skipped[0].line, 4);
/// ```
pub fn parse_points<T: Value>(text: &str) -> ParsedPoints<T> {
    let mut parsed = ParsedPoints::default();
    for (i, line) in text.lines().enumerate() {
        parsed.push_line(i + 1, line);
    }
    parsed
}

/// Reads a point file from any buffered reader.
///
/// # Errors
/// Returns [`crate::Error::Io`] if reading fails. Malformed lines are not errors.
pub fn read_points<T: Value>(reader: impl BufRead) -> Result<ParsedPoints<T>> {
    let mut parsed = ParsedPoints::default();
    for (i, line) in reader.lines().enumerate() {
        parsed.push_line(i + 1, &line?);
    }
    Ok(parsed)
}

/// Loads a point file from disk. Files ending in `.json` are read as JSON.
///
/// # Errors
/// - [`crate::Error::Io`] if the file cannot be read.
/// - [`crate::Error::Json`] if a JSON file is malformed.
/// - [`crate::Error::CastFailed`] if a JSON value does not fit `T`.
pub fn load_points<T: Value>(path: impl AsRef<Path>) -> Result<ParsedPoints<T>> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let parsed = if is_json {
        let text = std::fs::read_to_string(path)?;
        ParsedPoints {
            points: parse_json_points(&text)?,
            skipped: Vec::new(),
        }
    } else {
        read_points(BufReader::new(File::open(path)?))?
    };

    log::debug!(
        "Loaded {} points from {} ({} lines skipped)",
        parsed.points.len(),
        path.display(),
        parsed.skipped.len()
    );
    Ok(parsed)
}

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum JsonPoint {
    Object { x: f64, y: f64 },
    Pair([f64; 2]),
}

/// Parses a JSON array of points, as objects `{"x": .., "y": ..}` or pairs `[x, y]`.
///
/// ```rust
/// # use approxfit::io::parse_json_points;
/// let points = parse_json_points::<f64>(r#"[{"x": 1, "y": 2}, [3, 4.5]]"#).unwrap();
/// assert_eq!(points[1].y, 4.5);
/// ```
///
/// # Errors
/// - [`crate::Error::Json`] if the text is not such an array.
/// - [`crate::Error::CastFailed`] if a value does not fit `T`.
pub fn parse_json_points<T: Value>(text: &str) -> Result<Vec<Point<T>>> {
    let raw: Vec<JsonPoint> = serde_json::from_str(text)?;
    raw.into_iter()
        .map(|p| {
            let (x, y) = match p {
                JsonPoint::Object { x, y } => (x, y),
                JsonPoint::Pair([x, y]) => (x, y),
            };
            Ok(Point::new(T::try_cast(x)?, T::try_cast(y)?))
        })
        .collect()
}

/// Writes points as `x, y` lines with six decimals.
///
/// ```rust
/// # use approxfit::{io::write_points, Point};
/// let mut out = Vec::new();
/// write_points(&mut out, &[Point::new(1.0, -2.5)]).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "1.000000, -2.500000\n");
/// ```
///
/// # Errors
/// Returns [`crate::Error::Io`] if writing fails.
pub fn write_points<T: Value>(mut writer: impl Write, points: &[Point<T>]) -> Result<()> {
    for p in points {
        writeln!(writer, "{:.prec$}, {:.prec$}", p.x, p.y, prec = SAVE_PRECISION)?;
    }
    writer.flush()?;
    Ok(())
}

/// Saves points to a file in the format read by [`load_points`].
///
/// # Errors
/// Returns [`crate::Error::Io`] if the file cannot be written.
pub fn save_points<T: Value>(path: impl AsRef<Path>, points: &[Point<T>]) -> Result<()> {
    let path = path.as_ref();
    write_points(BufWriter::new(File::create(path)?), points)?;
    log::debug!("Saved {} points to {}", points.len(), path.display());
    Ok(())
}

/// Saves a rendered report to a file.
///
/// # Errors
/// Returns [`crate::Error::Io`] if the file cannot be written.
pub fn save_report<T: Value>(path: impl AsRef<Path>, report: &Report<'_, T>) -> Result<()> {
    let path = path.as_ref();
    std::fs::write(path, report.to_string())?;
    log::debug!("Saved report to {}", path.display());
    Ok(())
}

/// Parses one line. `Ok(None)` for blank lines and comments.
fn parse_line<T: Value>(line: &str) -> std::result::Result<Option<Point<T>>, SkipReason> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let fields = split_fields(line);
    let (Some(x), Some(y)) = (fields.first(), fields.get(1)) else {
        return Err(SkipReason::TooFewValues);
    };

    Ok(Some(Point::new(parse_number(x)?, parse_number(y)?)))
}

/// Splits a line into value fields, leaving decimal commas in place.
fn split_fields(line: &str) -> Vec<String> {
    if line.contains(';') {
        return line
            .split(';')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
    }

    if line.contains(char::is_whitespace) {
        // "1, 2" and "1,5, 2,25" leave the separating comma on the first field
        return line
            .split_whitespace()
            .map(|f| f.trim_matches(','))
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
    }

    let parts: Vec<&str> = line.split(',').filter(|f| !f.is_empty()).collect();
    if parts.len() == 4 {
        return vec![
            format!("{}.{}", parts[0], parts[1]),
            format!("{}.{}", parts[2], parts[3]),
        ];
    }
    parts.into_iter().map(str::to_string).collect()
}

fn parse_number<T: Value>(field: &str) -> std::result::Result<T, SkipReason> {
    let value: f64 = field
        .replace(',', ".")
        .parse()
        .map_err(|_| SkipReason::InvalidNumber(field.to_string()))?;

    if !value.is_finite() {
        return Err(SkipReason::NonFinite);
    }

    T::try_cast(value)
        .ok()
        .filter(|v| v.is_real())
        .ok_or(SkipReason::NonFinite)
}
