use alloc::vec;
use alloc::vec::Vec;
use core::ops::{Div, Index, IndexMut, Mul, Sub};

use crate::traits::Scalar;

use super::DynMatrix;

/// Dynamically-sized owned vector.
///
/// Produced by copying a matrix column ([`DynMatrix::col`]) or built from
/// scratch; never a view into a matrix, so mutating it cannot alias the
/// matrix it came from.
///
/// # Examples
///
/// ```
/// use orthobasis::DynVector;
///
/// let v = DynVector::from_slice(&[1.0_f64, 2.0, 3.0]);
/// assert_eq!(v[0], 1.0);
/// assert_eq!(v.len(), 3);
/// assert!((v.dot(&v) - 14.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DynVector<T> {
    pub(crate) data: Vec<T>,
}

impl<T: Scalar> DynVector<T> {
    /// Create a vector from a flat slice.
    pub fn from_slice(data: &[T]) -> Self {
        Self {
            data: data.to_vec(),
        }
    }

    /// Create a vector from an owned `Vec`.
    ///
    /// ```
    /// use orthobasis::DynVector;
    /// let v = DynVector::from_vec(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(v[2], 3.0);
    /// ```
    pub fn from_vec(data: Vec<T>) -> Self {
        Self { data }
    }

    /// Create a zero vector of length `n`.
    pub fn zeros(n: usize, _zero: T) -> Self {
        Self {
            data: vec![T::zero(); n],
        }
    }

    /// Vector of length `n` that is zero except for `value` at index `k`.
    ///
    /// With `value = 1` this is the standard basis vector `e_k`.
    ///
    /// ```
    /// use orthobasis::DynVector;
    /// let e = DynVector::unit(3, 0, 5.0_f64);
    /// assert_eq!(e.as_slice(), &[5.0, 0.0, 0.0]);
    /// ```
    pub fn unit(n: usize, k: usize, value: T) -> Self {
        assert!(k < n, "unit index {} out of range for length {}", k, n);
        let mut v = Self::zeros(n, T::zero());
        v.data[k] = value;
        v
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the vector is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Dot product.
    ///
    /// ```
    /// use orthobasis::DynVector;
    /// let a = DynVector::from_slice(&[1.0, 2.0, 3.0]);
    /// let b = DynVector::from_slice(&[4.0, 5.0, 6.0]);
    /// assert_eq!(a.dot(&b), 32.0);
    /// ```
    pub fn dot(&self, rhs: &Self) -> T {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        dot_slices(&self.data, &rhs.data)
    }

    /// In-place `self ← self + alpha * x`.
    pub fn axpy(&mut self, alpha: T, x: &Self) {
        assert_eq!(self.len(), x.len(), "vector length mismatch");
        for (a, &b) in self.data.iter_mut().zip(x.data.iter()) {
            *a = *a + alpha * b;
        }
    }

    /// New vector with every element multiplied by `s`.
    pub fn scaled(&self, s: T) -> Self {
        Self {
            data: self.data.iter().map(|&x| x * s).collect(),
        }
    }

    /// Outer product `self * rhsᵗ` (`len(self) x len(rhs)`).
    ///
    /// ```
    /// use orthobasis::DynVector;
    /// let u = DynVector::from_slice(&[1.0, 2.0]);
    /// let m = u.outer(&u);
    /// assert_eq!(m[(1, 0)], 2.0);
    /// assert_eq!(m[(1, 1)], 4.0);
    /// ```
    pub fn outer(&self, rhs: &Self) -> DynMatrix<T> {
        DynMatrix::from_fn(self.len(), rhs.len(), |i, j| self.data[i] * rhs.data[j])
    }

    /// View the vector data as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// View the vector data as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

#[inline]
pub(crate) fn dot_slices<T: Scalar>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());
    let mut sum = T::zero();
    for (&x, &y) in a.iter().zip(b.iter()) {
        sum = sum + x * y;
    }
    sum
}

// ── Index ───────────────────────────────────────────────────────────

impl<T> Index<usize> for DynVector<T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.data[i]
    }
}

impl<T> IndexMut<usize> for DynVector<T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.data[i]
    }
}

// ── Arithmetic ──────────────────────────────────────────────────────

impl<T: Scalar> Sub<&DynVector<T>> for &DynVector<T> {
    type Output = DynVector<T>;

    fn sub(self, rhs: &DynVector<T>) -> DynVector<T> {
        assert_eq!(self.len(), rhs.len(), "vector length mismatch");
        DynVector {
            data: self
                .data
                .iter()
                .zip(rhs.data.iter())
                .map(|(&a, &b)| a - b)
                .collect(),
        }
    }
}

impl<T: Scalar> Mul<T> for &DynVector<T> {
    type Output = DynVector<T>;

    fn mul(self, rhs: T) -> DynVector<T> {
        self.scaled(rhs)
    }
}

impl<T: Scalar> Div<T> for &DynVector<T> {
    type Output = DynVector<T>;

    fn div(self, rhs: T) -> DynVector<T> {
        DynVector {
            data: self.data.iter().map(|&x| x / rhs).collect(),
        }
    }
}

impl<T: Scalar> From<Vec<T>> for DynVector<T> {
    fn from(data: Vec<T>) -> Self {
        Self { data }
    }
}
