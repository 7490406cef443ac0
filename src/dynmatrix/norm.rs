use crate::traits::{FloatScalar, Scalar};

use super::vector::{dot_slices, DynVector};
use super::DynMatrix;

/// Euclidean norm of a slice.
///
/// Plain sum of squares followed by `sqrt`; no scaling against overflow,
/// matching the textbook formulation the orthogonalizers are defined in.
#[inline]
pub(crate) fn norm_slice<T: FloatScalar>(x: &[T]) -> T {
    dot_slices(x, x).sqrt()
}

// ── Vector norms ────────────────────────────────────────────────────

impl<T: Scalar> DynVector<T> {
    /// Squared L2 norm (dot product with self).
    ///
    /// ```
    /// use orthobasis::DynVector;
    /// let v = DynVector::from_slice(&[3.0, 4.0]);
    /// assert_eq!(v.norm_squared(), 25.0);
    /// ```
    pub fn norm_squared(&self) -> T {
        self.dot(self)
    }
}

impl<T: FloatScalar> DynVector<T> {
    /// L2 (Euclidean) norm.
    ///
    /// ```
    /// use orthobasis::DynVector;
    /// let v = DynVector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T {
        norm_slice(self.as_slice())
    }

    /// Return a unit vector in the same direction.
    ///
    /// No guard against a zero norm: callers that can see degenerate input
    /// check the norm first.
    pub fn normalize(&self) -> Self {
        let inv = T::one() / self.norm();
        self.scaled(inv)
    }
}

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: FloatScalar> DynMatrix<T> {
    /// Frobenius norm (square root of sum of squares).
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T {
        norm_slice(&self.data)
    }

    /// Largest absolute element (max norm). Zero for an empty matrix.
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, -7.0, 3.0, 4.0]);
    /// assert_eq!(m.max_abs(), 7.0);
    /// ```
    pub fn max_abs(&self) -> T {
        self.data
            .iter()
            .fold(T::zero(), |acc, &x| acc.max(x.abs()))
    }

    /// Euclidean norm of column `j`.
    pub fn col_norm(&self, j: usize) -> T {
        norm_slice(self.col_slice(j))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_norm() {
        let v = DynVector::from_slice(&[1.0_f64, 2.0, 2.0]);
        assert!((v.norm() - 3.0).abs() < 1e-12);
        assert_eq!(v.norm_squared(), 9.0);
    }

    #[test]
    fn normalize_gives_unit_length() {
        let v = DynVector::from_slice(&[0.0_f64, 3.0, 4.0]);
        let u = v.normalize();
        assert!((u.norm() - 1.0).abs() < 1e-12);
        assert!((u[1] - 0.6).abs() < 1e-12);
    }

    #[test]
    fn matrix_norms() {
        let m = DynMatrix::from_rows(2, 2, &[3.0_f64, 0.0, -4.0, 0.0]);
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
        assert_eq!(m.max_abs(), 4.0);
        assert!((m.col_norm(0) - 5.0).abs() < 1e-12);
        assert_eq!(m.col_norm(1), 0.0);
    }

    #[test]
    fn max_abs_empty() {
        let m = DynMatrix::zeros(0, 0, 0.0_f64);
        assert_eq!(m.max_abs(), 0.0);
    }

    #[test]
    fn normalize_f32() {
        let v = DynVector::from_slice(&[3.0_f32, 4.0]);
        assert!((v.normalize().norm() - 1.0).abs() < 1e-6);
    }
}
