use crate::traits::Scalar;

use super::DynMatrix;

impl<T: Scalar> DynMatrix<T> {
    /// Extract a sub-matrix of size `rows x cols` starting at `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let m = DynMatrix::from_fn(3, 3, |i, j| (i * 3 + j) as f64);
    /// let b = m.block(1, 1, 2, 2);
    /// assert_eq!(b[(0, 0)], 4.0);
    /// assert_eq!(b[(1, 1)], 8.0);
    /// ```
    pub fn block(&self, i: usize, j: usize, rows: usize, cols: usize) -> Self {
        assert!(
            i + rows <= self.nrows && j + cols <= self.ncols,
            "block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i, j, rows, cols, self.nrows, self.ncols,
        );
        DynMatrix::from_fn(rows, cols, |r, c| self[(i + r, j + c)])
    }

    /// Write a sub-matrix into self starting at position `(i, j)`.
    ///
    /// Panics if the block extends beyond the matrix bounds.
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let mut m = DynMatrix::zeros(3, 3, 0.0_f64);
    /// let patch = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// m.set_block(1, 1, &patch);
    /// assert_eq!(m[(1, 1)], 1.0);
    /// assert_eq!(m[(2, 2)], 4.0);
    /// ```
    pub fn set_block(&mut self, i: usize, j: usize, src: &DynMatrix<T>) {
        assert!(
            i + src.nrows <= self.nrows && j + src.ncols <= self.ncols,
            "set_block ({},{}) size {}x{} out of bounds for {}x{} matrix",
            i, j, src.nrows, src.ncols, self.nrows, self.ncols,
        );
        for c in 0..src.ncols {
            for r in 0..src.nrows {
                self[(i + r, j + c)] = src[(r, c)];
            }
        }
    }

    /// `n x n` identity with `trailing` written into its bottom-right corner.
    ///
    /// The leading `(n - k) x (n - k)` block stays identity, so a square
    /// `trailing` of size `k` yields a block-diagonal matrix.
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let t = DynMatrix::from_rows(2, 2, &[0.0_f64, 1.0, 1.0, 0.0]);
    /// let m = DynMatrix::embed_trailing(3, &t);
    /// assert_eq!(m[(0, 0)], 1.0);
    /// assert_eq!(m[(1, 2)], 1.0);
    /// assert_eq!(m[(1, 1)], 0.0);
    /// ```
    pub fn embed_trailing(n: usize, trailing: &DynMatrix<T>) -> Self {
        assert!(
            trailing.is_square() && trailing.nrows <= n,
            "trailing block {}x{} does not fit in {}x{} identity",
            trailing.nrows, trailing.ncols, n, n,
        );
        let offset = n - trailing.nrows;
        let mut m = DynMatrix::eye(n, T::zero());
        m.set_block(offset, offset, trailing);
        m
    }
}
