//! Fixed compressed-row sparse storage.

use alloc::string::String;
use core::fmt::Write as _;
use core::ops::Range;

use alloc::vec::Vec;

use crate::error::{Result, StorageError};
use crate::extent::{Extent, StorageOrder};
use crate::print::{render_grid, PrintLevel};
use crate::traits::{MatrixElement, MatrixStorage};
use crate::validation::check_compressed;

/// Compressed-row sparse matrix with a fixed structure.
///
/// Built once from already-compressed arrays (typically a file load);
/// afterwards only the stored values can change. The numbering base of
/// `offsets` and `columns` is whatever `offsets[0]` says, commonly 0 or
/// 1; all the accessors below take zero-based addresses regardless.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CsrMatrix<T> {
    extent: Extent,
    offsets: Vec<usize>,
    columns: Vec<usize>,
    values: Vec<T>,
}

impl<T: MatrixElement> CsrMatrix<T> {
    /// Build from compressed arrays, validating the structure.
    pub fn from_parts(
        extent: Extent,
        offsets: Vec<usize>,
        columns: Vec<usize>,
        values: Vec<T>,
    ) -> Result<Self> {
        check_compressed(extent, StorageOrder::RowMajor, &offsets, &columns, values.len())?;
        Ok(Self { extent, offsets, columns, values })
    }

    /// Numbering base carried by the compressed arrays.
    pub fn base(&self) -> usize {
        self.offsets.first().copied().unwrap_or(0)
    }

    pub fn offsets(&self) -> &[usize] {
        &self.offsets
    }

    pub fn columns(&self) -> &[usize] {
        &self.columns
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Entry range of one row within `columns`/`values`.
    fn row_range(&self, row: usize) -> Range<usize> {
        let base = self.base();
        (self.offsets[row] - base)..(self.offsets[row + 1] - base)
    }

    /// Entry slot of `(row, col)`, if stored.
    fn find(&self, row: usize, col: usize) -> Option<usize> {
        let base = self.base();
        self.row_range(row).find(|&k| self.columns[k] - base == col)
    }
}

impl<T: MatrixElement> MatrixStorage<T> for CsrMatrix<T> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn at(&self, row: usize, col: usize) -> T {
        if !self.extent.contains(row, col) {
            return T::sentinel();
        }
        match self.find(row, col) {
            Some(k) => self.values[k],
            None => T::sentinel(),
        }
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if !self.extent.contains(row, col) {
            return Err(StorageError::IndexOutOfRange);
        }
        match self.find(row, col) {
            Some(k) => {
                self.values[k] = value;
                Ok(())
            }
            None => Err(StorageError::IndexOutOfRange),
        }
    }

    fn resize(&mut self, _rows: usize, _cols: usize, _fill: f64) -> Result<()> {
        Err(StorageError::UnsupportedOperation)
    }

    fn assign(&mut self, _values: &[f64]) -> Result<()> {
        Err(StorageError::UnsupportedOperation)
    }

    fn clear(&mut self) {
        self.extent.clear();
        self.offsets = Vec::new();
        self.columns = Vec::new();
        self.values = Vec::new();
    }

    fn zero_row(&mut self, row: usize) -> Result<()> {
        if row >= self.extent.rows {
            return Err(StorageError::IndexOutOfRange);
        }
        let range = self.row_range(row);
        self.values[range].fill(T::zero());
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn render(&self, level: PrintLevel) -> String {
        if level == PrintLevel::File {
            let mut out = String::new();
            out.push_str("%%MatrixMarket matrix coordinate real general\n");
            let _ = writeln!(out, "{} {} {}", self.extent.rows, self.extent.cols, self.nnz());
            let base = self.base();
            for row in 0..self.extent.rows {
                for k in self.row_range(row) {
                    let col = self.columns[k] - base;
                    let _ = writeln!(out, "{} {} {}", row + 1, col + 1, self.values[k]);
                }
            }
            return out;
        }
        render_grid(self.extent, level, Some(self.nnz()), |i, j| {
            self.find(i, j).map(|k| self.values[k])
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn sample() -> CsrMatrix<f64> {
        // 3x3: row 0 holds cols {0,2}, row 1 {1}, row 2 {0,2}
        CsrMatrix::from_parts(
            Extent::new(3, 3),
            vec![0, 2, 3, 5],
            vec![0, 2, 1, 0, 2],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        )
        .unwrap()
    }

    #[test]
    fn test_reads() {
        let m = sample();
        assert_eq!(m.at(0, 0), 1.0);
        assert_eq!(m.at(2, 2), 5.0);
        // absent within a row's slice gives the sentinel without failing
        assert!(m.at(0, 1).is_sentinel());
        assert!(m.at(5, 0).is_sentinel());
    }

    #[test]
    fn test_one_based_arrays() {
        let m = CsrMatrix::<f64>::from_parts(
            Extent::new(2, 2),
            vec![1, 2, 3],
            vec![1, 2],
            vec![7.0, 8.0],
        )
        .unwrap();
        assert_eq!(m.base(), 1);
        assert_eq!(m.at(0, 0), 7.0);
        assert_eq!(m.at(1, 1), 8.0);
        assert!(m.at(0, 1).is_sentinel());
    }

    #[test]
    fn test_writes_only_hit_stored_entries() {
        let mut m = sample();
        m.set(1, 1, 9.0).unwrap();
        assert_eq!(m.at(1, 1), 9.0);
        assert_eq!(m.set(1, 0, 9.0), Err(StorageError::IndexOutOfRange));
    }

    #[test]
    fn test_set_outside_extent() {
        let mut m = sample();
        assert_eq!(m.set(5, 0, 1.0), Err(StorageError::IndexOutOfRange));
        assert_eq!(m.set(0, 3, 1.0), Err(StorageError::IndexOutOfRange));
        assert_eq!(m.at(0, 0), 1.0);
    }

    #[test]
    fn test_structural_mutation_rejected() {
        let mut m = sample();
        assert_eq!(m.resize(4, 4, 0.0), Err(StorageError::UnsupportedOperation));
        assert_eq!(m.assign(&[1.0]), Err(StorageError::UnsupportedOperation));
    }

    #[test]
    fn test_zero_row_keeps_structure() {
        let mut m = sample();
        m.zero_row(0).unwrap();
        assert_eq!(m.at(0, 0), 0.0);
        assert_eq!(m.at(0, 2), 0.0);
        assert_eq!(m.nnz(), 5);
        assert_eq!(m.zero_row(3), Err(StorageError::IndexOutOfRange));
    }

    #[test]
    fn test_invalid_parts_rejected() {
        let r = CsrMatrix::<f64>::from_parts(
            Extent::new(3, 3),
            vec![0, 2, 3, 5],
            vec![0, 2, 1, 0, 3],
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
        );
        assert_eq!(r, Err(StorageError::InconsistentIndex));
    }

    #[test]
    fn test_file_form() {
        let m = CsrMatrix::<f64>::from_parts(
            Extent::new(2, 2),
            vec![1, 2, 3],
            vec![1, 2],
            vec![7.0, 8.5],
        )
        .unwrap();
        // always written 1-based, independent of the stored base
        assert_eq!(
            m.render(PrintLevel::File),
            "%%MatrixMarket matrix coordinate real general\n2 2 2\n1 1 7\n2 2 8.5\n"
        );
    }
}
