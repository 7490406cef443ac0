use crate::dynmatrix::{DynMatrix, DynVector};
use crate::traits::FloatScalar;

use super::{check_square, threshold, OrthoError, Orthogonalize};

/// Householder-reflection orthogonalizer.
///
/// See [`householder`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Householder;

impl<T: FloatScalar> Orthogonalize<T> for Householder {
    fn name(&self) -> &'static str {
        "householder"
    }

    fn orthogonalize(&self, a: &DynMatrix<T>) -> Result<DynMatrix<T>, OrthoError> {
        householder(a)
    }
}

/// Working state of the Householder iteration.
///
/// `r` starts as a copy of the input and is driven towards upper-triangular
/// form; `q` starts as the identity and accumulates the reflections, so that
/// `q * r` equals the input (up to rounding) after every step.
///
/// Each [`step`](Self::step) consumes the state and returns the next one;
/// [`householder`] is a fold of `step` over the column indices.
///
/// ```
/// use orthobasis::{DynMatrix, HouseholderState};
///
/// let a = DynMatrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
/// let state = HouseholderState::new(&a).step(0);
/// // One reflection is enough to make a 2x2 triangular.
/// assert!(state.r()[(1, 0)].abs() < 1e-15);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholderState<T> {
    r: DynMatrix<T>,
    q: DynMatrix<T>,
}

impl<T: FloatScalar> HouseholderState<T> {
    /// Initial state: `r` is an owned copy of `a`, `q` the identity.
    pub fn new(a: &DynMatrix<T>) -> Self {
        Self {
            r: a.clone(),
            q: DynMatrix::eye(a.nrows(), T::zero()),
        }
    }

    /// Full-size reflector `Q_i` for column `i`, or `None` when the step is
    /// skipped.
    ///
    /// With `x = r[i.., i]` and `e = ‖x‖·e₀`, the reflection maps `x` onto
    /// `e`: `u = x − e`, `v = u / ‖u‖`, `H = I − 2vvᵗ`. `H` fills the
    /// trailing block of an otherwise-identity matrix. If `‖u‖` is at or
    /// below [`DEGENERACY_THRESHOLD`](super::DEGENERACY_THRESHOLD), `x` is
    /// already aligned with `e` (or is zero) and there is nothing to reflect.
    pub fn reflector(&self, i: usize) -> Option<DynMatrix<T>> {
        let n = self.r.nrows();
        assert!(i < self.r.ncols(), "column {} out of range for {} columns", i, self.r.ncols());

        let x = DynVector::from_slice(&self.r.col_slice(i)[i..]);
        let e = DynVector::unit(x.len(), 0, x.norm());
        let u = &x - &e;
        let norm_u = u.norm();
        if norm_u <= threshold::<T>() {
            return None;
        }

        let v = &u / norm_u;
        let two = T::one() + T::one();
        let h = &DynMatrix::eye(v.len(), T::zero()) - &(v.outer(&v) * two);
        Some(DynMatrix::embed_trailing(n, &h))
    }

    /// Apply the reflection for column `i`: `r ← Q_i·r`, `q ← q·Q_i`.
    ///
    /// A skipped step returns the state unchanged.
    pub fn step(self, i: usize) -> Self {
        match self.reflector(i) {
            Some(h) => Self {
                r: &h * &self.r,
                q: &self.q * &h,
            },
            None => self,
        }
    }

    /// Accumulated orthogonal factor.
    pub fn q(&self) -> &DynMatrix<T> {
        &self.q
    }

    /// Working matrix; upper-triangular (up to rounding) once every column
    /// has been stepped.
    pub fn r(&self) -> &DynMatrix<T> {
        &self.r
    }

    /// Consume the state, returning `(q, r)`.
    pub fn into_parts(self) -> (DynMatrix<T>, DynMatrix<T>) {
        (self.q, self.r)
    }
}

fn run<T: FloatScalar>(a: &DynMatrix<T>) -> HouseholderState<T> {
    (0..a.ncols()).fold(HouseholderState::new(a), HouseholderState::step)
}

/// Orthonormal basis of a square matrix's columns via Householder
/// reflections.
///
/// Folds [`HouseholderState::step`] over every column and returns the
/// accumulated `Q`. Steps whose reflection vector is numerically zero are
/// skipped, so `Q` stays orthogonal even for rank-deficient input.
///
/// # Errors
///
/// [`OrthoError::InvalidShape`] for a non-square `a`, [`OrthoError::Empty`]
/// for an empty one.
///
/// # Example
///
/// ```
/// use orthobasis::{householder, DynMatrix};
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     12.0_f64, -51.0, 4.0,
///     6.0, 167.0, -68.0,
///     -4.0, 24.0, -41.0,
/// ]);
/// let q = householder(&a).unwrap();
/// let qtq = &q.transpose() * &q;
/// assert!((&qtq - &DynMatrix::eye(3, 0.0)).max_abs() < 1e-12);
/// ```
pub fn householder<T: FloatScalar>(a: &DynMatrix<T>) -> Result<DynMatrix<T>, OrthoError> {
    check_square(a)?;
    let (q, _) = run(a).into_parts();
    debug_assert_eq!(q.shape(), a.shape());
    Ok(q)
}

/// Like [`householder`], but also returns the triangularized working matrix
/// `R`, with `a ≈ Q·R`.
///
/// ```
/// use orthobasis::{householder_qr, DynMatrix};
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
/// let (q, r) = householder_qr(&a).unwrap();
/// assert!((&(&q * &r) - &a).max_abs() < 1e-12);
/// assert!(r[(1, 0)].abs() < 1e-12);
/// ```
pub fn householder_qr<T: FloatScalar>(
    a: &DynMatrix<T>,
) -> Result<(DynMatrix<T>, DynMatrix<T>), OrthoError> {
    check_square(a)?;
    Ok(run(a).into_parts())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn defect(q: &DynMatrix<f64>) -> f64 {
        let qtq = &q.transpose() * q;
        (&qtq - &DynMatrix::eye(q.ncols(), 0.0)).max_abs()
    }

    #[test]
    fn upper_triangular_skips_every_step() {
        let a = DynMatrix::from_rows(3, 3, &[
            1.0_f64, 1.0, 1.0,
            0.0, 1.0, 2.0,
            0.0, 0.0, 3.0,
        ]);
        let state = HouseholderState::new(&a);
        for i in 0..3 {
            assert!(state.reflector(i).is_none(), "step {} should be skipped", i);
        }
        assert_eq!(householder(&a).unwrap(), DynMatrix::eye(3, 0.0));
    }

    #[test]
    fn general_3x3() {
        let a = DynMatrix::from_rows(3, 3, &[
            12.0_f64, -51.0, 4.0,
            6.0, 167.0, -68.0,
            -4.0, 24.0, -41.0,
        ]);
        let (q, r) = householder_qr(&a).unwrap();
        assert!(defect(&q) < TOL);

        let prod = &q * &r;
        for i in 0..3 {
            for j in 0..3 {
                assert_near(prod[(i, j)], a[(i, j)], 1e-9, &format!("QR[({},{})]", i, j));
            }
        }
        for i in 0..3 {
            for j in 0..i {
                assert_near(r[(i, j)], 0.0, 1e-9, &format!("R[({},{})]", i, j));
            }
        }
        // e = +‖x‖e₀, so the diagonal of R comes out non-negative.
        assert_near(r[(0, 0)], 14.0, 1e-10, "r00");
        assert_near(r[(1, 1)], 175.0, 1e-9, "r11");
    }

    #[test]
    fn reflector_is_symmetric_orthogonal_block_diagonal() {
        let a = DynMatrix::from_rows(3, 3, &[
            2.0_f64, -1.0, 0.0,
            -1.0, 2.0, -1.0,
            0.0, -1.0, 2.0,
        ]);
        let state = HouseholderState::new(&a).step(0);
        let h = state.reflector(1).unwrap();
        assert_eq!(h[(0, 0)], 1.0);
        assert_eq!(h[(0, 1)], 0.0);
        assert_eq!(h[(2, 0)], 0.0);
        assert!((&h - &h.transpose()).max_abs() < 1e-15);
        assert!((&(&h * &h) - &DynMatrix::eye(3, 0.0)).max_abs() < 1e-12);
    }

    #[test]
    fn reflection_maps_column_onto_axis() {
        let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 0.0, 4.0, 1.0]);
        let state = HouseholderState::new(&a).step(0);
        assert_near(state.r()[(0, 0)], 5.0, 1e-12, "r00");
        assert_near(state.r()[(1, 0)], 0.0, 1e-12, "r10");
    }

    #[test]
    fn zero_column_is_skipped() {
        let a = DynMatrix::from_rows(3, 3, &[
            0.0_f64, 1.0, 2.0,
            0.0, 3.0, 1.0,
            0.0, 1.0, 1.0,
        ]);
        assert!(HouseholderState::new(&a).reflector(0).is_none());
        let q = householder(&a).unwrap();
        assert!(defect(&q) < TOL);
    }

    #[test]
    fn duplicate_column_still_orthogonal() {
        let a = DynMatrix::from_rows(3, 3, &[
            1.0_f64, 1.0, 0.0,
            0.0, 0.0, 1.0,
            1.0, 1.0, 1.0,
        ]);
        let q = householder(&a).unwrap();
        assert!(defect(&q) < TOL);
    }

    #[test]
    fn input_is_not_mutated() {
        let a = DynMatrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
        let before = a.clone();
        let _ = householder(&a).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn rejects_non_square() {
        let a = DynMatrix::zeros(3, 2, 0.0_f64);
        assert_eq!(
            householder(&a).unwrap_err(),
            OrthoError::InvalidShape { nrows: 3, ncols: 2 }
        );
        assert_eq!(householder_qr(&a).unwrap_err(), OrthoError::InvalidShape { nrows: 3, ncols: 2 });
    }

    #[test]
    fn negative_one_by_one_reflects() {
        // x = [-2], e = [2], u = [-4] → H = [-1]
        let a = DynMatrix::from_rows(1, 1, &[-2.0_f64]);
        assert_eq!(householder(&a).unwrap()[(0, 0)], -1.0);
    }

    #[test]
    fn trait_dispatch() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let alg: &dyn Orthogonalize<f64> = &Householder;
        assert_eq!(alg.name(), "householder");
        assert_eq!(alg.orthogonalize(&a).unwrap(), householder(&a).unwrap());
    }

    #[test]
    fn deterministic() {
        let a = DynMatrix::from_fn(5, 5, |i, j| ((i + 1) * 10 + j + 1) as f64 + if i == j { 50.0 } else { 0.0 });
        assert_eq!(householder(&a).unwrap(), householder(&a).unwrap());
    }
}
