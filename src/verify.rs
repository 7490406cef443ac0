//! Checking an orthogonal factor against a reference QR.
//!
//! Different QR algorithms are free to flip the sign of any column of `Q`
//! (and the matching row of `R`), so comparisons here are column-sign
//! insensitive: each column of the candidate is aligned with the reference
//! column it correlates with before the entries are compared.

use crate::dynmatrix::DynMatrix;
use crate::dynmatrix::vector::dot_slices;
use crate::linalg::{LinalgError, QrDecomposition};
use crate::traits::FloatScalar;

/// Largest entry of `|QᵗQ − I|`.
///
/// Zero for a perfectly orthonormal set of columns; at least `1 − ‖q_j‖²`
/// if some column `q_j` is not unit length.
///
/// ```
/// use orthobasis::DynMatrix;
/// use orthobasis::verify::orthonormality_defect;
///
/// let id = DynMatrix::eye(3, 0.0_f64);
/// assert_eq!(orthonormality_defect(&id), 0.0);
/// ```
pub fn orthonormality_defect<T: FloatScalar>(q: &DynMatrix<T>) -> T {
    let qtq = &q.transpose() * q;
    (&qtq - &DynMatrix::eye(q.ncols(), T::zero())).max_abs()
}

/// Whether every entry of `QᵗQ` is within `tol` of the identity.
pub fn is_orthonormal<T: FloatScalar>(q: &DynMatrix<T>, tol: T) -> bool {
    orthonormality_defect(q) <= tol
}

/// Copy of `q` with each column negated where it points away from the
/// matching column of `reference`.
///
/// Panics if the shapes differ.
pub fn sign_aligned<T: FloatScalar>(q: &DynMatrix<T>, reference: &DynMatrix<T>) -> DynMatrix<T> {
    assert_eq!(
        q.shape(),
        reference.shape(),
        "dimension mismatch: {}x{} vs {}x{}",
        q.nrows(), q.ncols(), reference.nrows(), reference.ncols(),
    );
    let mut out = q.clone();
    for j in 0..q.ncols() {
        if dot_slices(q.col_slice(j), reference.col_slice(j)) < T::zero() {
            out.negate_col(j);
        }
    }
    out
}

/// Whether `q` equals `reference` entry-wise within `tol` after column sign
/// alignment.
///
/// ```
/// use orthobasis::DynMatrix;
/// use orthobasis::verify::matches_up_to_sign;
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 0.0, 0.0, 1.0]);
/// let b = DynMatrix::from_rows(2, 2, &[-1.0_f64, 0.0, 0.0, 1.0]);
/// assert!(matches_up_to_sign(&a, &b, 1e-12));
/// ```
pub fn matches_up_to_sign<T: FloatScalar>(q: &DynMatrix<T>, reference: &DynMatrix<T>, tol: T) -> bool {
    q.shape() == reference.shape() && max_deviation(q, reference) <= tol
}

fn max_deviation<T: FloatScalar>(q: &DynMatrix<T>, reference: &DynMatrix<T>) -> T {
    (&sign_aligned(q, reference) - reference).max_abs()
}

/// Outcome of [`compare_with_reference`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison<T> {
    /// [`orthonormality_defect`] of the candidate.
    pub defect: T,
    /// Largest entry-wise difference from the reference `Q` after column
    /// sign alignment.
    pub deviation: T,
    /// Tolerance both figures were checked against.
    pub tol: T,
}

impl<T: FloatScalar> Comparison<T> {
    /// Both the defect and the deviation are within tolerance.
    pub fn passed(&self) -> bool {
        self.defect <= self.tol && self.deviation <= self.tol
    }
}

/// Compare a candidate orthogonal factor `q` of `a` against the reference
/// Householder QR of `a`.
///
/// # Errors
///
/// [`LinalgError::Singular`] if the reference decomposition rejects `a`
/// (a column that is numerically zero relative to the largest entry).
/// Rank-deficient inputs have no unique `Q` to compare against.
///
/// ```
/// use orthobasis::{gram_schmidt, DynMatrix};
/// use orthobasis::verify::compare_with_reference;
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     1.0_f64, 1.0, 1.0,
///     0.0, 1.0, 2.0,
///     0.0, 0.0, 3.0,
/// ]);
/// let q = gram_schmidt(&a).unwrap();
/// let cmp = compare_with_reference(&a, &q, 1e-5).unwrap();
/// assert!(cmp.passed());
/// ```
pub fn compare_with_reference<T: FloatScalar>(
    a: &DynMatrix<T>,
    q: &DynMatrix<T>,
    tol: T,
) -> Result<Comparison<T>, LinalgError> {
    let reference = QrDecomposition::new(a)?.q();
    Ok(Comparison {
        defect: orthonormality_defect(q),
        deviation: max_deviation(q, &reference),
        tol,
    })
}
