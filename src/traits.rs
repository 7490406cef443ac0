use core::fmt::Debug;
use num_traits::{Float, Num, One, Zero};

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
/// Covers `f32`, `f64`, and all integer types.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point matrix elements.
///
/// Required by everything that needs `sqrt` or `abs`: norms, the two
/// orthogonalizers, and the reference QR.
pub trait FloatScalar: Scalar + Float {
    /// Convert an `f64` constant into `Self`.
    ///
    /// Used for fixed thresholds such as the degeneracy cutoff; never fails
    /// for `f32`/`f64`. The value is converted as-is, not rescaled to the
    /// target precision, so `f64`-sized cutoffs stay `f64`-sized in `f32`.
    fn from_f64_const(x: f64) -> Self;
}

macro_rules! impl_float_scalar {
    ($($t:ty),*) => {
        $(
            impl FloatScalar for $t {
                #[inline]
                fn from_f64_const(x: f64) -> $t { x as $t }
            }
        )*
    };
}

impl_float_scalar!(f32, f64);

/// Read-only access to a matrix-like type.
///
/// Storage is column-major: every column is a contiguous slice, which is
/// what lets the QR kernels walk sub-columns without copying.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;

    /// Contiguous slice `self[row_start..nrows, col]`.
    fn col_as_slice(&self, col: usize, row_start: usize) -> &[T];
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (the reference QR) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;

    /// Mutable contiguous slice `self[row_start..nrows, col]`.
    fn col_as_mut_slice(&mut self, col: usize, row_start: usize) -> &mut [T];
}
