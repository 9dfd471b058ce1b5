//! Sample points
use crate::value::Value;

/// A single 2D sample.
///
/// Points carry no identity beyond their coordinates and may be edited in place.
/// Fitting only ever borrows a slice of them for the duration of one call.
///
/// ```rust
/// # use approxfit::Point;
/// let mut p = Point::new(1.0, 2.0);
/// p.y = 3.5;
/// assert_eq!(<(f64, f64)>::from(p), (1.0, 3.5));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Point<T: Value = f64> {
    /// Independent variable
    pub x: T,

    /// Observed value
    pub y: T,
}

impl<T: Value> Point<T> {
    /// Creates a new point
    pub fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    /// True if both coordinates are finite
    pub fn is_finite(&self) -> bool {
        self.x.is_real() && self.y.is_real()
    }
}

impl<T: Value> From<(T, T)> for Point<T> {
    fn from((x, y): (T, T)) -> Self {
        Self { x, y }
    }
}

impl<T: Value> From<Point<T>> for (T, T) {
    fn from(p: Point<T>) -> Self {
        (p.x, p.y)
    }
}

impl<T: Value> std::fmt::Display for Point<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Builds a point vector from `(x, y)` pairs
pub fn points_from_pairs<T: Value>(pairs: &[(T, T)]) -> Vec<Point<T>> {
    pairs.iter().copied().map(Point::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_conversions() {
        let p: Point = (2.0, -1.0).into();
        assert_eq!(p, Point::new(2.0, -1.0));
        assert_eq!(p.to_string(), "(2, -1)");

        let points = points_from_pairs::<f64>(&[(1.0, 1.0), (2.0, 4.0)]);
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].y, 4.0);
    }

    #[test]
    fn test_point_finite() {
        assert!(Point::new(0.0, 1.0).is_finite());
        assert!(!Point::new(f64::NAN, 1.0).is_finite());
        assert!(!Point::new(1.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_point_serde() {
        let p = Point::new(1.5, 2.0);
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, r#"{"x":1.5,"y":2.0}"#);
        let back: Point = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
