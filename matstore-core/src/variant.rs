//! Tagged union over all storage variants.
//!
//! Callers that pick a layout at run time hold an [`AnyMatrix`] and get
//! the full storage contract through explicit enum dispatch, avoiding
//! trait objects at the solver boundary.

use alloc::string::String;

use crate::dense::{DenseMatrix, DenseRows};
use crate::error::Result;
use crate::extent::{Extent, StorageOrder};
use crate::print::PrintLevel;
use crate::sparse::{CoordMatrix, CsrMatrix};
use crate::traits::{MatrixElement, MatrixStorage};

/// Any storage variant, selected at construction time.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnyMatrix<T> {
    DenseRowMajor(DenseMatrix<T>),
    DenseColMajor(DenseMatrix<T>),
    SparseCsr(CsrMatrix<T>),
    SparseCoordinate(CoordMatrix<T>),
    DenseNested(DenseRows<T>),
}

impl<T: MatrixElement> AnyMatrix<T> {
    pub fn dense_row_major() -> Self {
        AnyMatrix::DenseRowMajor(DenseMatrix::new(StorageOrder::RowMajor))
    }

    pub fn dense_col_major() -> Self {
        AnyMatrix::DenseColMajor(DenseMatrix::new(StorageOrder::ColumnMajor))
    }

    pub fn dense_nested(order: StorageOrder) -> Self {
        AnyMatrix::DenseNested(DenseRows::new(order))
    }

    pub fn sparse_coordinate(order: StorageOrder, base: usize) -> Self {
        AnyMatrix::SparseCoordinate(CoordMatrix::new(order, base))
    }

    /// Exchange contents with another variant in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// Flat buffer and orientation, exposed for dense variants only;
    /// sparse layouts are not contiguous-dense compatible.
    pub fn dense_buffer(&self) -> Option<(&[T], StorageOrder)> {
        match self {
            AnyMatrix::DenseRowMajor(m) | AnyMatrix::DenseColMajor(m) => {
                Some((m.as_slice(), m.order()))
            }
            _ => None,
        }
    }
}

macro_rules! dispatch {
    ($self:expr, $m:ident => $body:expr) => {
        match $self {
            AnyMatrix::DenseRowMajor($m) => $body,
            AnyMatrix::DenseColMajor($m) => $body,
            AnyMatrix::SparseCsr($m) => $body,
            AnyMatrix::SparseCoordinate($m) => $body,
            AnyMatrix::DenseNested($m) => $body,
        }
    };
}

impl<T: MatrixElement> MatrixStorage<T> for AnyMatrix<T> {
    fn extent(&self) -> Extent {
        dispatch!(self, m => m.extent())
    }

    fn at(&self, row: usize, col: usize) -> T {
        dispatch!(self, m => m.at(row, col))
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        dispatch!(self, m => m.set(row, col, value))
    }

    fn resize(&mut self, rows: usize, cols: usize, fill: f64) -> Result<()> {
        dispatch!(self, m => m.resize(rows, cols, fill))
    }

    fn assign(&mut self, values: &[f64]) -> Result<()> {
        dispatch!(self, m => m.assign(values))
    }

    fn clear(&mut self) {
        dispatch!(self, m => m.clear())
    }

    fn zero_row(&mut self, row: usize) -> Result<()> {
        dispatch!(self, m => m.zero_row(row))
    }

    fn nnz(&self) -> usize {
        dispatch!(self, m => m.nnz())
    }

    fn render(&self, level: PrintLevel) -> String {
        dispatch!(self, m => m.render(level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_dense() {
        let mut m = AnyMatrix::<f64>::dense_row_major();
        m.resize(2, 2, 0.0).unwrap();
        m.set(1, 1, 3.0).unwrap();
        assert_eq!(m.at(1, 1), 3.0);
        assert_eq!(m.extent(), Extent::new(2, 2));
        let (buf, order) = m.dense_buffer().unwrap();
        assert_eq!(order, StorageOrder::RowMajor);
        assert_eq!(buf, &[0.0, 0.0, 0.0, 3.0]);
    }

    #[test]
    fn test_dispatch_sparse() {
        let mut m = AnyMatrix::<f64>::sparse_coordinate(StorageOrder::RowMajor, 0);
        m.resize(2, 2, 0.0).unwrap();
        m.set(0, 1, 4.0).unwrap();
        assert_eq!(m.at(0, 1), 4.0);
        assert_eq!(m.nnz(), 1);
        assert!(m.dense_buffer().is_none());
    }
}
