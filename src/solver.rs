//! Least-squares polynomial solver
//!
//! Every linear-in-parameters model reduces to a polynomial fit over some
//! (possibly transformed) `x` and `y` columns. This module builds the design
//! matrix, forms the normal equations and solves them by LU decomposition.
//!
//! A singular or near-singular system is a hard failure. There is no
//! regularization and no pseudo-inverse fallback.
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{Error, Result},
    value::Value,
};

/// Fits a polynomial of the given degree by ordinary least squares.
///
/// Returns coefficients `c₀..c_d`, lowest power first, minimizing the sum of squared errors.
///
/// <div class="warning">
///
/// **Technical Details**
///
/// ```math
/// tᵢ = α xᵢ + β          (maps [min x, max x] onto [-1, 1])
/// M[i][j] = tᵢʲ
/// (MᵗM) d = Mᵗy
/// c = expand(Σ d_j (α x + β)ʲ)
/// ```
/// The normal equations are factored with partial-pivot LU. The system is rejected
/// as singular when any pivot of `U` satisfies `|u_jj| ≤ ε · max(n, k) · max|u_jj|`.
///
/// Solving in `t` keeps the system well conditioned for x-values far from the origin,
/// such as calendar years. Only degenerate x-values (too few distinct ones) are singular.
/// </div>
///
/// # Parameters
/// - `x`: Independent values.
/// - `y`: Observed values, same length as `x`.
/// - `degree`: Polynomial degree; `degree + 1` coefficients are returned.
///
/// # Errors
/// - [`Error::NoData`] if `x` is empty.
/// - [`Error::MismatchedInputs`] if `x` and `y` differ in length.
/// - [`Error::SingularMatrix`] if `n ≤ degree`, or the x-values are degenerate for the degree.
///
/// # Example
/// ```rust
/// # use approxfit::solver::polynomial_fit;
/// let x: [f64; 4] = [0.0, 1.0, 2.0, 3.0];
/// let y = [1.0, 3.0, 5.0, 7.0];
/// let c = polynomial_fit(&x, &y, 1).unwrap();
/// assert!((c[0] - 1.0).abs() < 1e-9 && (c[1] - 2.0).abs() < 1e-9);
/// ```
pub fn polynomial_fit<T: Value>(x: &[T], y: &[T], degree: usize) -> Result<Vec<T>> {
    validate(x, y, degree)?;

    let k = degree + 1;
    let normalizer = Normalizer::from_data(x);
    let (m, b) = create_matrix(&normalizer, x, y, None, k);
    let (xtx, xtb) = normal_equations(&m, &b);
    let coefficients = solve_normal_equations(xtx, &xtb, x.len())?;
    finish(&normalizer, &coefficients, x.len())
}

/// Fits a polynomial of the given degree by weighted least squares.
///
/// Minimizes `Σ wᵢ (p(xᵢ) - yᵢ)²`. Unit weights reproduce [`polynomial_fit`], and a zero
/// weight removes a sample's influence entirely.
///
/// Each row of the design matrix and each target is scaled by `√wᵢ` before forming
/// the normal equations.
///
/// # Errors
/// Same as [`polynomial_fit`], plus:
/// - [`Error::MismatchedInputs`] if `weights` does not match the sample count.
/// - [`Error::InvalidWeight`] for a negative or non-finite weight.
pub fn weighted_polynomial_fit<T: Value>(
    x: &[T],
    y: &[T],
    weights: &[T],
    degree: usize,
) -> Result<Vec<T>> {
    validate(x, y, degree)?;
    if weights.len() != x.len() {
        return Err(Error::MismatchedInputs {
            x_len: x.len(),
            y_len: weights.len(),
        });
    }
    if let Some(i) = weights
        .iter()
        .position(|&w| !w.is_real() || w < T::zero())
    {
        return Err(Error::InvalidWeight(i));
    }

    let k = degree + 1;
    let normalizer = Normalizer::from_data(x);
    let (m, b) = create_matrix(&normalizer, x, y, Some(weights), k);
    let (xtx, xtb) = normal_equations(&m, &b);
    let coefficients = solve_normal_equations(xtx, &xtb, x.len())?;
    finish(&normalizer, &coefficients, x.len())
}

/// Evaluates `c₀ + c₁x + … + c_d xᵈ` by Horner's method.
pub fn evaluate_polynomial<T: Value>(coefficients: &[T], x: T) -> T {
    coefficients
        .iter()
        .rev()
        .fold(T::zero(), |acc, &c| acc * x + c)
}

fn validate<T: Value>(x: &[T], y: &[T], degree: usize) -> Result<()> {
    if x.is_empty() {
        return Err(Error::NoData);
    }

    if x.len() != y.len() {
        return Err(Error::MismatchedInputs {
            x_len: x.len(),
            y_len: y.len(),
        });
    }

    if x.len() <= degree {
        return Err(Error::SingularMatrix {
            n: x.len(),
            k: degree + 1,
        });
    }

    Ok(())
}

/// Affine map `t = αx + β` from the data's x-range onto `[-1, 1]`.
///
/// A zero-width range only shifts, so every column past the constant one is zero
/// and the LU pivot test reports the system as singular.
#[derive(Debug, Clone, Copy)]
struct Normalizer<T: Value> {
    alpha: T,
    beta: T,
}
impl<T: Value> Normalizer<T> {
    fn from_data(x: &[T]) -> Self {
        let (min, max) = x.iter().fold((T::infinity(), T::neg_infinity()), |(lo, hi), &v| {
            (
                nalgebra::RealField::min(lo, v),
                nalgebra::RealField::max(hi, v),
            )
        });

        let width = max - min;
        if width > T::zero() && width.is_real() {
            let alpha = (T::one() + T::one()) / width;
            Self {
                alpha,
                beta: -T::one() - alpha * min,
            }
        } else {
            Self {
                alpha: T::one(),
                beta: -min,
            }
        }
    }

    fn normalize(&self, x: T) -> T {
        self.alpha * x + self.beta
    }

    /// Rewrites `Σ d_j tʲ` as coefficients of powers of `x`, lowest first.
    fn denormalize_coefs(&self, coefs: &[T]) -> Vec<T> {
        let mut unnorm = vec![T::zero(); coefs.len()];

        // (αx + β)ʲ, grown one factor per step
        let mut power = vec![T::zero(); coefs.len()];
        power[0] = T::one();

        for (j, &d) in coefs.iter().enumerate() {
            if j > 0 {
                for i in (0..=j).rev() {
                    let shifted = if i > 0 { power[i - 1] * self.alpha } else { T::zero() };
                    power[i] = power[i] * self.beta + shifted;
                }
            }
            for i in 0..=j {
                unnorm[i] += d * power[i];
            }
        }

        unnorm
    }
}

fn finish<T: Value>(normalizer: &Normalizer<T>, coefs: &[T], n: usize) -> Result<Vec<T>> {
    let coefficients = normalizer.denormalize_coefs(coefs);
    if coefficients.iter().any(|c| !c.is_real()) {
        return Err(Error::SingularMatrix {
            n,
            k: coefficients.len(),
        });
    }
    Ok(coefficients)
}

/// Builds the Vandermonde matrix over normalized x, optionally row-scaled by `√w`.
fn create_matrix<T: Value>(
    normalizer: &Normalizer<T>,
    x: &[T],
    y: &[T],
    weights: Option<&[T]>,
    k: usize,
) -> (DMatrix<T>, DVector<T>) {
    let mut bigx = DMatrix::zeros(x.len(), k);
    let mut b = DVector::from_column_slice(y);

    for (i, mut row) in bigx.row_iter_mut().enumerate() {
        let scale = weights.map_or(T::one(), |w| w[i].sqrt());

        let t = normalizer.normalize(x[i]);
        let mut term = scale;
        for j in 0..k {
            row[j] = term;
            term *= t;
        }
        b[i] *= scale;
    }

    (bigx, b)
}

fn normal_equations<T: Value>(matrix: &DMatrix<T>, b: &DVector<T>) -> (DMatrix<T>, DVector<T>) {
    let xtx = matrix.transpose() * matrix;
    let xtb = matrix.transpose() * b;
    (xtx, xtb)
}

fn solve_normal_equations<T: Value>(
    xtx: DMatrix<T>,
    xtb: &DVector<T>,
    n: usize,
) -> Result<Vec<T>> {
    let k = xtx.nrows();
    let singular = Error::SingularMatrix { n, k };

    let lu = xtx.lu();

    // Pivot threshold ~= machine_epsilon * max(n, k) * max|pivot|
    let pivots = lu.u().diagonal();
    let max_pivot = pivots.iter().fold(T::zero(), |acc, &p| {
        nalgebra::RealField::max(acc, Value::abs(p))
    });
    let tolerance = T::epsilon() * T::try_cast(n.max(k))? * max_pivot;
    if max_pivot.is_nan() || pivots.iter().any(|&p| Value::abs(p) <= tolerance) {
        return Err(singular);
    }

    let solution = lu.solve(xtb).ok_or(singular)?;
    let coefficients: Vec<T> = solution.iter().copied().collect();

    // Make sure the coefficients are valid
    if coefficients.iter().any(|c| !c.is_real()) {
        return Err(Error::SingularMatrix { n, k });
    }

    Ok(coefficients)
}
