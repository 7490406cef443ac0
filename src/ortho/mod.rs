//! Orthonormal bases for square real matrices.
//!
//! Two independent algorithms with the same contract: given a square `A`,
//! return `Q` of the same shape whose columns span the column space of `A`
//! and satisfy `QᵗQ ≈ I` when `A` has full rank.
//!
//! - [`GramSchmidt`] / [`gram_schmidt`]: column-by-column projection removal.
//! - [`Householder`] / [`householder`]: accumulated reflections.
//!
//! Neither mutates its input; both copy what they need on entry.
//!
//! ## Degenerate input
//!
//! A norm at or below [`DEGENERACY_THRESHOLD`] is treated as zero. This is
//! never an error:
//!
//! - Gram-Schmidt stores the (tiny) residual column as-is, unnormalized. The
//!   result then fails an orthonormality check at that column.
//! - Householder skips the reflection for that step, so the accumulated `Q`
//!   is still orthogonal.

mod gram_schmidt;
mod householder;

pub use gram_schmidt::{gram_schmidt, GramSchmidt};
pub use householder::{householder, householder_qr, Householder, HouseholderState};

use crate::dynmatrix::DynMatrix;
use crate::traits::FloatScalar;

/// Norm at or below which a vector is treated as numerically zero.
///
/// Absolute, and sized for `f64`. For `f32` it sits below single-precision
/// rounding error (`f32::EPSILON` ≈ 1.2e-7), so a linearly dependent column
/// usually leaves a residual above it: Gram-Schmidt then normalizes rounding
/// noise instead of returning a near-zero column. Use `f64` input when the
/// degenerate-column behavior matters.
pub const DEGENERACY_THRESHOLD: f64 = 1e-10;

#[inline]
pub(crate) fn threshold<T: FloatScalar>() -> T {
    T::from_f64_const(DEGENERACY_THRESHOLD)
}

/// Input rejected by an orthogonalizer.
///
/// ```
/// use orthobasis::{gram_schmidt, DynMatrix, OrthoError};
///
/// let a = DynMatrix::zeros(3, 2, 0.0_f64);
/// assert_eq!(
///     gram_schmidt(&a).unwrap_err(),
///     OrthoError::InvalidShape { nrows: 3, ncols: 2 },
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrthoError {
    /// Input is not square.
    InvalidShape { nrows: usize, ncols: usize },
    /// Input has no rows or no columns.
    Empty,
}

impl core::fmt::Display for OrthoError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            OrthoError::InvalidShape { nrows, ncols } => {
                write!(f, "expected a square matrix, got {}x{}", nrows, ncols)
            }
            OrthoError::Empty => write!(f, "matrix is empty"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for OrthoError {}

/// Shape check shared by both orthogonalizers.
pub(crate) fn check_square<T>(a: &DynMatrix<T>) -> Result<(), OrthoError> {
    let (nrows, ncols) = a.shape();
    if nrows == 0 || ncols == 0 {
        return Err(OrthoError::Empty);
    }
    if nrows != ncols {
        return Err(OrthoError::InvalidShape { nrows, ncols });
    }
    Ok(())
}

/// An algorithm producing an orthonormal basis for the columns of a matrix.
///
/// Implementations are stateless unit structs, so a `&dyn Orthogonalize<T>`
/// can be swapped in wherever the choice of algorithm should be a parameter.
///
/// ```
/// use orthobasis::{DynMatrix, GramSchmidt, Householder, Orthogonalize};
///
/// let a = DynMatrix::from_rows(2, 2, &[3.0_f64, 1.0, 4.0, 1.0]);
/// let algorithms: [&dyn Orthogonalize<f64>; 2] = [&GramSchmidt, &Householder];
/// for alg in algorithms {
///     let q = alg.orthogonalize(&a).unwrap();
///     assert_eq!(q.shape(), a.shape());
/// }
/// ```
pub trait Orthogonalize<T: FloatScalar> {
    /// Short human-readable algorithm name.
    fn name(&self) -> &'static str;

    /// Compute `Q` for a square `a`. `a` is left untouched.
    fn orthogonalize(&self, a: &DynMatrix<T>) -> Result<DynMatrix<T>, OrthoError>;
}
