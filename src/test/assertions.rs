/// Asserts that two floating-point values are approximately equal within a tolerance.
///
/// This is useful for comparing computed values where exact equality is not expected due to rounding errors.
/// - Uses the machine epsilon for the floating-point type as the tolerance, unless `tol = <value>` is given.
/// - `assert_eq!` equivalent for floats.
/// - NaN is never close to anything, including NaN. Use [`crate::assert_nan`] for that.
///
/// # Parameters
/// - `$a`: First value.
/// - `$b`: Second value.
/// - `tol`: *(optional)* Absolute tolerance.
/// - `$msg`: *(optional)* Custom failure message, supports formatting arguments.
///
/// # Panics
/// Panics if the absolute difference `|a - b|` exceeds the tolerance.
///
/// # Examples
/// ```
/// # use approxfit::assert_close;
/// assert_close!(1.0 + 1e-16, 1.0, "Nearly equal");
/// assert_close!(0.1 + 0.2, 0.3, tol = 1e-12);
/// ```
#[macro_export]
macro_rules! assert_close {
    ($a:expr, $b:expr, tol = $tol:expr $(, $($msg:tt)+)?) => { #[allow(clippy::float_cmp)] {
        #[allow(unused_mut, unused_assignments)] let mut msg = "Values not close".to_string();
        $( msg = format!($($msg)+); )?

        let (a, b, tol) = ($a, $b, $tol);
        assert!(
            a == b || $crate::value::Value::abs(a - b) <= tol,
            "{msg}: {a} != {b} (tolerance {tol})"
        );
    }};

    ($a:expr, $b:expr $(, $($msg:tt)+)?) => {{
        fn epsilon<T: $crate::value::Value>(_: T) -> T {
            T::epsilon()
        }

        let (a, b) = ($a, $b);
        $crate::assert_close!(a, b, tol = epsilon(a) $(, $($msg)+)?);
    }};
}

/// Asserts that two slices of floating-point values are approximately equal element-wise.
///
/// - Uses the machine epsilon for the floating-point type as the tolerance, unless `tol = <value>` is given.
/// - Element-wise [`crate::assert_close`].
///
/// # Parameters
/// - `$src`: Source slice (implements `iter()`).
/// - `$dst`: Destination slice (same length as `$src`).
/// - `tol`: *(optional)* Absolute tolerance.
/// - `$msg`: *(optional)* Custom failure message. Defaults to `"{len} elements"`.
///
/// # Panics
/// - If the lengths differ.
/// - If any pair of elements differ by more than the tolerance.
///
/// # Examples
/// ```
/// # use approxfit::assert_all_close;
/// let a = vec![1.0, 2.0, 3.0];
/// let b = vec![1.0 + 1e-16, 2.0, 3.0];
///
/// assert_all_close!(a, b); // OK
/// assert_all_close!(a, [1.001, 2.0, 3.0], tol = 1e-2, "Vectors must match");
/// ```
#[macro_export]
macro_rules! assert_all_close {
    ($src:expr, $dst:expr, tol = $tol:expr $(, $($msg:tt)+)?) => {{
        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", $src.len());
        $( msg = format!($($msg)+); )?

        assert_eq!($src.len(), $dst.len(), "{msg} - length mismatch");

        let tol = $tol;
        for (i, (s, d)) in $src.iter().zip($dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, tol = tol, "{msg} - src[{i}]");
        }
    }};

    ($src:expr, $dst:expr $(, $($msg:tt)+)?) => {{
        #[allow(unused_assignments, unused_mut)]
        let mut msg = format!("{} elements", $src.len());
        $( msg = format!($($msg)+); )?

        assert_eq!($src.len(), $dst.len(), "{msg} - length mismatch");

        for (i, (s, d)) in $src.iter().zip($dst.iter()).enumerate() {
            $crate::assert_close!(*s, *d, "{msg} - src[{i}]");
        }
    }};
}

/// Asserts that a value is NaN.
///
/// Unfitted models and undefined predictions use NaN as their sentinel.
///
/// # Examples
/// ```
/// # use approxfit::assert_nan;
/// assert_nan!(f64::NAN);
/// assert_nan!((-1.0f64).ln(), "log of a negative");
/// ```
#[macro_export]
macro_rules! assert_nan {
    ($v:expr $(, $($msg:tt)+)?) => {{
        #[allow(unused_mut, unused_assignments)] let mut msg = "Value is not NaN".to_string();
        $( msg = format!($($msg)+); )?

        fn is_nan<T: $crate::value::Value>(v: T) -> bool {
            v.is_nan()
        }

        let v = $v;
        assert!(is_nan(v), "{msg}: {v}");
    }};
}

/// Asserts that a fitted model meets a minimum R² threshold.
/// This is a measure of how much of the variation in the data the model explains.
///
/// See [`crate::ModelFit::r_squared`] for more details.
///
/// # Syntax
///
/// `assert_r_squared!(<ModelFit>, <threshold> [, msg = <custom message>])`
///
/// - `ModelFit`: The fitted model to test.
/// - `threshold`: Minimum acceptable R² value (between 0.0 and 1.0). Defaults to `0.9` if omitted.
/// - `msg`: *(optional)* Custom message to include on failure, supports formatting arguments.
///
/// # Panics
/// Panics if the R² is below the threshold or not finite.
///
/// # Example
/// ```rust
/// # use approxfit::{assert_r_squared, ModelKind, Point};
/// let points: Vec<Point> = (1..=6).map(|i| Point::new(f64::from(i), f64::from(i * i))).collect();
/// let fit = ModelKind::Quadratic.fit(&points).unwrap();
/// assert_r_squared!(fit, 0.99, msg = "quadratic on squares");
/// ```
#[macro_export]
macro_rules! assert_r_squared {
    ($fit:expr $(, msg = $($msg:tt)+)?) => {
        $crate::assert_r_squared!($fit, 0.9 $(, msg = $($msg)+)?)
    };

    ($fit:expr, $r2:expr $(, msg = $($msg:tt)+)?) => {{
        let fit = &$fit;
        let threshold = $r2;
        let r2 = fit.r_squared();

        if r2.is_nan() || r2 < threshold {
            #[allow(unused_mut, unused_assignments)] let mut msg = format!("{}: R² = {r2} is below {threshold}", fit.name());
            $( msg = format!("{msg}: {}", format!($($msg)+)); )?
            panic!("{msg}");
        }
    }};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_assert_close_macro() {
        assert_close!(1.0 + 1e-16, 1.0, "Values should be close");
        assert_close!(1.0, 1.05, tol = 0.1);
        assert_close!(2.0f32, 2.0f32);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_macro_fails() {
        assert_close!(1.0, 1.1);
    }

    #[test]
    #[should_panic(expected = "Values not close")]
    fn test_assert_close_nan_fails() {
        assert_close!(f64::NAN, f64::NAN, tol = 1.0);
    }

    #[test]
    fn test_assert_all_close_macro() {
        let a = [1.0, 2.0, 3.0];
        let b = vec![1.0, 2.0, 3.0 + 1e-16];
        assert_all_close!(a, b);
        assert_all_close!(a, [1.01, 2.0, 2.99], tol = 0.02, "with {}", "tolerance");
    }

    #[test]
    #[should_panic(expected = "length mismatch")]
    fn test_assert_all_close_length() {
        assert_all_close!([1.0, 2.0], [1.0]);
    }

    #[test]
    fn test_assert_nan_macro() {
        assert_nan!(f64::NAN);
        assert_nan!((-1.0f64).sqrt());

        // Untyped float expressions resolve through the macro's generic helper
        assert_nan!(0.0 * f64::INFINITY);
        assert_nan!(crate::statistics::standard_deviation(0.0, 0));
    }

    #[test]
    #[should_panic(expected = "Value is not NaN")]
    fn test_assert_nan_macro_fails() {
        assert_nan!(1.0);
    }
}
