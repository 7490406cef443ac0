//! Reference QR decomposition.
//!
//! A packed Householder QR in the LAPACK `geqrf` style. It is independent
//! of the two orthogonalizers in [`crate::ortho`] (different reflector
//! convention, implicit rather than explicit reflectors) and serves as the
//! ground truth they are checked against.

pub(crate) mod qr;

pub use qr::{qr_in_place, QrDecomposition};

/// Errors from the reference decomposition.
///
/// ```
/// use orthobasis::DynMatrix;
/// use orthobasis::linalg::{LinalgError, QrDecomposition};
///
/// let a = DynMatrix::from_rows(2, 2, &[1.0_f64, 0.0, 0.0, 0.0]);
/// assert_eq!(QrDecomposition::new(&a).unwrap_err(), LinalgError::Singular);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinalgError {
    /// Matrix has a numerically zero column (rank-deficient).
    Singular,
}

impl core::fmt::Display for LinalgError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            LinalgError::Singular => write!(f, "matrix is singular"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for LinalgError {}
