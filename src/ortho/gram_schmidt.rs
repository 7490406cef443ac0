use crate::dynmatrix::DynMatrix;
use crate::dynmatrix::vector::dot_slices;
use crate::traits::FloatScalar;

use super::{check_square, threshold, OrthoError, Orthogonalize};

/// Classical Gram-Schmidt orthogonalizer.
///
/// See [`gram_schmidt`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GramSchmidt;

impl<T: FloatScalar> Orthogonalize<T> for GramSchmidt {
    fn name(&self) -> &'static str {
        "gram-schmidt"
    }

    fn orthogonalize(&self, a: &DynMatrix<T>) -> Result<DynMatrix<T>, OrthoError> {
        gram_schmidt(a)
    }
}

/// Orthonormalize the columns of a square matrix by Gram-Schmidt.
///
/// Column `j` of the result is column `j` of `a` with its projections onto
/// columns `0..j` of the result removed, in ascending order, then scaled to
/// unit length. Each projection coefficient is taken against the partially
/// reduced vector.
///
/// If the residual's norm is at or below
/// [`DEGENERACY_THRESHOLD`](super::DEGENERACY_THRESHOLD) the residual is
/// stored unnormalized: a column that depends linearly on earlier ones comes
/// back as a near-zero column rather than an error. The threshold is sized
/// for `f64`; see [`DEGENERACY_THRESHOLD`](super::DEGENERACY_THRESHOLD) for
/// what this means for `f32`.
///
/// # Errors
///
/// [`OrthoError::InvalidShape`] for a non-square `a`, [`OrthoError::Empty`]
/// for an empty one.
///
/// # Example
///
/// ```
/// use orthobasis::{gram_schmidt, DynMatrix};
///
/// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 1.0, 4.0, 1.0]);
/// let q = gram_schmidt(&a).unwrap();
/// // First column is a[:, 0] / 5
/// assert!((q[(0, 0)] - 0.6).abs() < 1e-12);
/// assert!((q[(1, 0)] - 0.8).abs() < 1e-12);
/// // Second column is orthogonal to the first
/// let d = q[(0, 0)] * q[(0, 1)] + q[(1, 0)] * q[(1, 1)];
/// assert!(d.abs() < 1e-12);
/// ```
pub fn gram_schmidt<T: FloatScalar>(a: &DynMatrix<T>) -> Result<DynMatrix<T>, OrthoError> {
    check_square(a)?;
    let (nrows, ncols) = a.shape();
    let mut q = DynMatrix::zeros(nrows, ncols, T::zero());

    for j in 0..ncols {
        let mut v = a.col(j);

        for i in 0..j {
            let qi = q.col_slice(i);
            let r = dot_slices(qi, v.as_slice());
            for (vk, &qk) in v.as_mut_slice().iter_mut().zip(qi) {
                *vk = *vk - r * qk;
            }
        }

        let norm = v.norm();
        if norm > threshold::<T>() {
            q.set_col(j, &(&v / norm));
        } else {
            // Degenerate: keep the residual as-is.
            q.set_col(j, &v);
        }
    }

    debug_assert_eq!(q.shape(), a.shape());
    Ok(q)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: f64 = 1e-10;

    fn assert_near(a: f64, b: f64, tol: f64, msg: &str) {
        assert!((a - b).abs() < tol, "{}: {} vs {} (diff {})", msg, a, b, (a - b).abs());
    }

    fn assert_orthonormal(q: &DynMatrix<f64>, tol: f64) {
        let qtq = &q.transpose() * q;
        let n = q.ncols();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == j { 1.0 } else { 0.0 };
                assert_near(qtq[(i, j)], expected, tol, &format!("QtQ[({},{})]", i, j));
            }
        }
    }

    #[test]
    fn upper_triangular_gives_identity() {
        let a = DynMatrix::from_rows(3, 3, &[
            1.0_f64, 1.0, 1.0,
            0.0, 1.0, 2.0,
            0.0, 0.0, 3.0,
        ]);
        let q = gram_schmidt(&a).unwrap();
        // Positive diagonal means no sign flips for Gram-Schmidt.
        assert!((&q - &DynMatrix::eye(3, 0.0)).max_abs() < TOL);
    }

    #[test]
    fn general_3x3_is_orthonormal() {
        let a = DynMatrix::from_rows(3, 3, &[
            12.0_f64, -51.0, 4.0,
            6.0, 167.0, -68.0,
            -4.0, 24.0, -41.0,
        ]);
        let q = gram_schmidt(&a).unwrap();
        assert_orthonormal(&q, 1e-10);

        // Gram-Schmidt keeps R's diagonal positive: QᵗA is upper triangular
        // with a positive diagonal.
        let r = &q.transpose() * &a;
        for i in 0..3 {
            assert!(r[(i, i)] > 0.0);
            for j in 0..i {
                assert_near(r[(i, j)], 0.0, 1e-9, &format!("R[({},{})]", i, j));
            }
        }
        assert_near(r[(0, 0)], 14.0, 1e-10, "r00");
        assert_near(r[(1, 1)], 175.0, 1e-9, "r11");
        assert_near(r[(2, 2)], 35.0, 1e-9, "r22");
    }

    #[test]
    fn duplicate_column_yields_near_zero_column() {
        let a = DynMatrix::from_rows(3, 3, &[
            1.0_f64, 1.0, 0.0,
            0.0, 0.0, 1.0,
            1.0, 1.0, 1.0,
        ]);
        let q = gram_schmidt(&a).unwrap();
        assert!(q.col_norm(1) <= 1e-10, "dependent column norm {}", q.col_norm(1));
        assert_near(q.col_norm(0), 1.0, TOL, "col 0");
        assert_near(q.col_norm(2), 1.0, TOL, "col 2");
    }

    #[test]
    fn zero_column_is_kept_as_zero() {
        let a = DynMatrix::from_rows(2, 2, &[0.0_f64, 2.0, 0.0, 1.0]);
        let q = gram_schmidt(&a).unwrap();
        assert_eq!(q.col_slice(0), &[0.0, 0.0]);
        // Projection onto a zero column removes nothing.
        let s = 5.0_f64.sqrt();
        assert_near(q[(0, 1)], 2.0 / s, TOL, "q01");
        assert_near(q[(1, 1)], 1.0 / s, TOL, "q11");
    }

    #[test]
    fn tiny_residual_is_not_renormalized() {
        // Second column differs from the first by far less than the threshold.
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 1.0, 0.0, 1e-12]);
        let q = gram_schmidt(&a).unwrap();
        let c1 = q.col_norm(1);
        assert!(c1 > 0.0 && c1 <= 1e-10, "residual norm {}", c1);
        assert_near(q[(1, 1)], 1e-12, 1e-15, "residual kept as-is");
    }

    #[test]
    fn input_is_not_mutated() {
        let a = DynMatrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
        let before = a.clone();
        let _ = gram_schmidt(&a).unwrap();
        assert_eq!(a, before);
    }

    #[test]
    fn rejects_non_square() {
        let a = DynMatrix::zeros(2, 3, 0.0_f64);
        assert_eq!(
            gram_schmidt(&a).unwrap_err(),
            OrthoError::InvalidShape { nrows: 2, ncols: 3 }
        );
        assert_eq!(gram_schmidt(&DynMatrix::zeros(0, 0, 0.0_f64)).unwrap_err(), OrthoError::Empty);
    }

    #[test]
    fn one_by_one() {
        let a = DynMatrix::from_rows(1, 1, &[-4.0_f64]);
        let q = gram_schmidt(&a).unwrap();
        assert_eq!(q[(0, 0)], -1.0);
    }

    #[test]
    fn trait_dispatch() {
        let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let alg: &dyn Orthogonalize<f64> = &GramSchmidt;
        assert_eq!(alg.name(), "gram-schmidt");
        assert_eq!(alg.orthogonalize(&a).unwrap(), gram_schmidt(&a).unwrap());
    }

    #[test]
    fn f32_is_supported() {
        let a = DynMatrix::from_rows(2, 2, &[3.0_f32, 1.0, 4.0, 1.0]);
        let q = gram_schmidt(&a).unwrap();
        let qtq = &q.transpose() * &q;
        assert!((&qtq - &DynMatrix::eye(2, 0.0)).max_abs() < 1e-5);
    }
}
