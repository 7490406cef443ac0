use alloc::vec;
use alloc::vec::Vec;

use crate::dynmatrix::DynMatrix;
use crate::linalg::LinalgError;
use crate::traits::{FloatScalar, MatrixMut};

/// QR decomposition in place using Householder reflections.
///
/// On return, `a` contains the packed QR factorization:
/// - Upper triangle (including diagonal): R
/// - Lower triangle (excluding diagonal): Householder vectors (scaled)
///
/// `tau` is filled with the Householder scalar factors (length min(M,N)).
///
/// Works on rectangular matrices (M >= N).
/// Returns `LinalgError::Singular` if a column is zero relative to the
/// largest entry of `a` (or `a` is entirely zero).
pub fn qr_in_place<T: FloatScalar>(
    a: &mut impl MatrixMut<T>,
    tau: &mut [T],
) -> Result<(), LinalgError> {
    let m = a.nrows();
    let n = a.ncols();
    let k = m.min(n);
    assert!(m >= n, "QR decomposition requires M >= N");
    assert_eq!(tau.len(), k, "tau length must equal min(M, N)");

    let mut scale = T::zero();
    for j in 0..n {
        for &v in a.col_as_slice(j, 0) {
            scale = scale.max(v.abs());
        }
    }
    let cutoff = T::epsilon() * scale * scale;

    for col in 0..k {
        let norm_sq = a
            .col_as_slice(col, col)
            .iter()
            .fold(T::zero(), |acc, &v| acc + v * v);

        if norm_sq <= cutoff {
            return Err(LinalgError::Singular);
        }

        let norm = norm_sq.sqrt();
        let a_col_col = *a.get(col, col);

        // sigma = sign(a[col,col]) * ||x|| keeps v0 = a + sigma free of cancellation.
        let sigma = if a_col_col < T::zero() { -norm } else { norm };

        let v0 = a_col_col + sigma;
        let tau_val = v0 / sigma;
        tau[col] = tau_val;

        // Scale the sub-diagonal entries by 1/v0 for storage; v = [1, a[col+1..m, col]]
        for x in a.col_as_mut_slice(col, col + 1) {
            *x = *x / v0;
        }

        // Apply H to trailing columns: A[col:m, j] -= tau * v * (vᵗ * A[col:m, j])
        for j in (col + 1)..n {
            let mut dot = *a.get(col, j);
            for i in (col + 1)..m {
                dot = dot + *a.get(i, col) * *a.get(i, j);
            }
            dot = dot * tau_val;

            *a.get_mut(col, j) = *a.get(col, j) - dot;
            for i in (col + 1)..m {
                let vi = *a.get(i, col);
                let old = *a.get(i, j);
                *a.get_mut(i, j) = old - dot * vi;
            }
        }

        // R diagonal entry
        *a.get_mut(col, col) = -sigma;
    }

    Ok(())
}

/// QR decomposition of a dynamically-sized matrix (M >= N).
///
/// Stores the packed Householder vectors, R, and tau scalars.
///
/// # Example
///
/// ```
/// use orthobasis::DynMatrix;
/// use orthobasis::linalg::QrDecomposition;
///
/// let a = DynMatrix::from_rows(3, 3, &[
///     12.0_f64, -51.0, 4.0,
///     6.0, 167.0, -68.0,
///     -4.0, 24.0, -41.0,
/// ]);
/// let qr = QrDecomposition::new(&a).unwrap();
/// let back = &qr.q() * &qr.r();
/// assert!((&back - &a).max_abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    qr: DynMatrix<T>,
    tau: Vec<T>,
}

impl<T: FloatScalar> QrDecomposition<T> {
    /// Decompose a matrix. Returns an error if a column is rank-deficient.
    pub fn new(a: &DynMatrix<T>) -> Result<Self, LinalgError> {
        let m = a.nrows();
        let n = a.ncols();
        assert!(m >= n, "QR decomposition requires M >= N");
        let mut qr = a.clone();
        let mut tau = vec![T::zero(); m.min(n)];
        qr_in_place(&mut qr, &mut tau)?;
        Ok(Self { qr, tau })
    }

    /// Extract the upper-triangular R factor (N × N).
    pub fn r(&self) -> DynMatrix<T> {
        let n = self.qr.ncols();
        DynMatrix::from_fn(n, n, |i, j| if j >= i { self.qr[(i, j)] } else { T::zero() })
    }

    /// Compute the thin Q factor (M × N, orthonormal columns).
    ///
    /// Applies the Householder reflections in reverse to the first N
    /// columns of the identity matrix.
    pub fn q(&self) -> DynMatrix<T> {
        let m = self.qr.nrows();
        let n = self.qr.ncols();

        let mut q = DynMatrix::zeros(m, n, T::zero());
        for i in 0..n {
            q[(i, i)] = T::one();
        }

        for col in (0..n).rev() {
            let tau_val = self.tau[col];

            for j in col..n {
                let mut dot = q[(col, j)];
                for i in (col + 1)..m {
                    dot = dot + self.qr[(i, col)] * q[(i, j)];
                }
                dot = dot * tau_val;

                q[(col, j)] = q[(col, j)] - dot;
                for i in (col + 1)..m {
                    q[(i, j)] = q[(i, j)] - dot * self.qr[(i, col)];
                }
            }
        }

        q
    }
}
