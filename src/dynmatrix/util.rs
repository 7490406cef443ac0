use alloc::vec::Vec;
use core::fmt::{self, Write as _};

use crate::traits::Scalar;

use super::vector::DynVector;
use super::DynMatrix;

// ── Map ─────────────────────────────────────────────────────────────

impl<T> DynMatrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0_f64, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 1)], 2.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> DynMatrix<U>
    where
        T: Copy,
    {
        let data: Vec<U> = self.data.iter().map(|&x| f(x)).collect();
        DynMatrix {
            data,
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

// ── Column access ───────────────────────────────────────────────────

impl<T: Scalar> DynMatrix<T> {
    /// Copy column `j` out as an owned `DynVector`.
    ///
    /// ```
    /// use orthobasis::DynMatrix;
    /// let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c[0], 2.0);
    /// assert_eq!(c[1], 4.0);
    /// ```
    pub fn col(&self, j: usize) -> DynVector<T> {
        DynVector::from_slice(self.col_slice(j))
    }

    /// Overwrite column `j` from a `DynVector`.
    pub fn set_col(&mut self, j: usize, v: &DynVector<T>) {
        assert_eq!(v.len(), self.nrows, "vector length mismatch");
        assert!(j < self.ncols, "column {} out of range for {} columns", j, self.ncols);
        let start = j * self.nrows;
        self.data[start..start + self.nrows].copy_from_slice(v.as_slice());
    }

    /// Negate column `j` in place.
    pub fn negate_col(&mut self, j: usize) {
        assert!(j < self.ncols, "column {} out of range for {} columns", j, self.ncols);
        let start = j * self.nrows;
        for x in &mut self.data[start..start + self.nrows] {
            *x = T::zero() - *x;
        }
    }
}

// ── Display ─────────────────────────────────────────────────────────

impl<T: fmt::Display> fmt::Display for DynMatrix<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.nrows;
        let n = self.ncols;

        // Measure column widths
        let mut widths: Vec<usize> = alloc::vec![0; n];
        for j in 0..n {
            for i in 0..m {
                let w = WriteCounting::count(|wc| write!(wc, "{}", self[(i, j)]));
                if w > widths[j] {
                    widths[j] = w;
                }
            }
        }

        for i in 0..m {
            write!(f, "│")?;
            for j in 0..n {
                if j > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:>width$}", self[(i, j)], width = widths[j])?;
            }
            write!(f, "│")?;
            if i < m - 1 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

struct WriteCounting {
    count: usize,
}

impl WriteCounting {
    fn count(f: impl FnOnce(&mut Self) -> fmt::Result) -> usize {
        let mut wc = WriteCounting { count: 0 };
        let _ = f(&mut wc);
        wc.count
    }
}

impl fmt::Write for WriteCounting {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.count += s.chars().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_is_a_copy() {
        let m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        let mut c = m.col(0);
        c[0] = 99.0;
        assert_eq!(m[(0, 0)], 1.0);
    }

    #[test]
    fn set_col() {
        let mut m = DynMatrix::zeros(3, 2, 0.0_f64);
        m.set_col(1, &DynVector::from_slice(&[1.0, 2.0, 3.0]));
        assert_eq!(m[(2, 1)], 3.0);
        assert_eq!(m[(2, 0)], 0.0);
    }

    #[test]
    #[should_panic(expected = "vector length mismatch")]
    fn set_col_wrong_length() {
        let mut m = DynMatrix::zeros(3, 2, 0.0_f64);
        m.set_col(0, &DynVector::from_slice(&[1.0]));
    }

    #[test]
    fn negate_col() {
        let mut m = DynMatrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
        m.negate_col(1);
        assert_eq!(m, DynMatrix::from_rows(2, 2, &[1.0, -2.0, 3.0, -4.0]));
    }

    #[test]
    fn display_aligns_columns() {
        let m = DynMatrix::from_rows(2, 2, &[1.0, -20.0, 300.0, 4.0]);
        let s = format!("{}", m);
        assert_eq!(s, "│  1  -20│\n│300    4│");
    }
}
