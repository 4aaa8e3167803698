//! Dense storage, flat and nested.
//!
//! [`DenseMatrix`] keeps one contiguous allocation addressed by an
//! orientation stride; this is the only variant exposing its raw buffer,
//! so an external dense solver can consume it without copying.
//! [`DenseRows`] keeps one allocation per major line and trades that
//! contiguity for cheap per-line manipulation.

use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::error::{Result, StorageError};
use crate::extent::{Extent, StorageOrder};
use crate::print::{render_grid, PrintLevel};
use crate::traits::{MatrixElement, MatrixStorage};

/// Dense matrix over a single flat buffer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseMatrix<T> {
    extent: Extent,
    order: StorageOrder,
    data: Vec<T>,
}

impl<T: MatrixElement> DenseMatrix<T> {
    pub fn new(order: StorageOrder) -> Self {
        Self { extent: Extent::zero(), order, data: Vec::new() }
    }

    pub fn with_extent(order: StorageOrder, rows: usize, cols: usize, fill: f64) -> Result<Self> {
        let mut m = Self::new(order);
        m.resize(rows, cols, fill)?;
        Ok(m)
    }

    pub fn order(&self) -> StorageOrder {
        self.order
    }

    fn index(&self, row: usize, col: usize) -> usize {
        debug_assert!(self.extent.contains(row, col));
        match self.order {
            StorageOrder::RowMajor => row * self.extent.cols + col,
            StorageOrder::ColumnMajor => col * self.extent.rows + row,
        }
    }

    /// Raw buffer in storage order, for external dense solvers.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Exchange contents with another matrix in O(1).
    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<T: MatrixElement> MatrixStorage<T> for DenseMatrix<T> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn at(&self, row: usize, col: usize) -> T {
        self.data[self.index(row, col)]
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        let k = self.index(row, col);
        self.data[k] = value;
        Ok(())
    }

    fn resize(&mut self, rows: usize, cols: usize, fill: f64) -> Result<()> {
        let extent = Extent::new(rows, cols);
        if !extent.is_valid_size() {
            // invalid sizes are ignored, leaving the matrix untouched
            return Ok(());
        }
        self.extent = extent;
        self.data = vec![T::from_f64(fill); extent.cells()];
        Ok(())
    }

    fn assign(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.extent.cells() {
            return Err(StorageError::SizeMismatch);
        }
        for (slot, &v) in self.data.iter_mut().zip(values) {
            *slot = T::from_f64(v);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.extent.clear();
        self.data = Vec::new();
    }

    fn zero_row(&mut self, row: usize) -> Result<()> {
        if row >= self.extent.rows {
            return Err(StorageError::IndexOutOfRange);
        }
        match self.order {
            StorageOrder::RowMajor => {
                let start = row * self.extent.cols;
                self.data[start..start + self.extent.cols].fill(T::zero());
            }
            StorageOrder::ColumnMajor => {
                for col in 0..self.extent.cols {
                    self.data[col * self.extent.rows + row] = T::zero();
                }
            }
        }
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.data.len()
    }

    fn render(&self, level: PrintLevel) -> String {
        if level == PrintLevel::File {
            return render_dense_market(self.extent, |i, j| self.at(i, j));
        }
        render_grid(self.extent, level, None, |i, j| Some(self.at(i, j)))
    }
}

/// Dense matrix as one allocation per major line.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DenseRows<T> {
    extent: Extent,
    order: StorageOrder,
    data: Vec<Vec<T>>,
}

impl<T: MatrixElement> DenseRows<T> {
    pub fn new(order: StorageOrder) -> Self {
        Self { extent: Extent::zero(), order, data: Vec::new() }
    }

    pub fn with_extent(order: StorageOrder, rows: usize, cols: usize, fill: f64) -> Result<Self> {
        let mut m = Self::new(order);
        m.resize(rows, cols, fill)?;
        Ok(m)
    }

    pub fn order(&self) -> StorageOrder {
        self.order
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }
}

impl<T: MatrixElement> MatrixStorage<T> for DenseRows<T> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn at(&self, row: usize, col: usize) -> T {
        debug_assert!(self.extent.contains(row, col));
        match self.order {
            StorageOrder::RowMajor => self.data[row][col],
            StorageOrder::ColumnMajor => self.data[col][row],
        }
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        debug_assert!(self.extent.contains(row, col));
        match self.order {
            StorageOrder::RowMajor => self.data[row][col] = value,
            StorageOrder::ColumnMajor => self.data[col][row] = value,
        }
        Ok(())
    }

    fn resize(&mut self, rows: usize, cols: usize, fill: f64) -> Result<()> {
        let extent = Extent::new(rows, cols);
        if !extent.is_valid_size() {
            return Ok(());
        }
        self.extent = extent;
        let major = self.order.major_extent(extent);
        let minor = self.order.minor_extent(extent);
        self.data = vec![vec![T::from_f64(fill); minor]; major];
        Ok(())
    }

    fn assign(&mut self, values: &[f64]) -> Result<()> {
        if values.len() != self.extent.cells() {
            return Err(StorageError::SizeMismatch);
        }
        let minor = self.order.minor_extent(self.extent);
        for (k, &v) in values.iter().enumerate() {
            self.data[k / minor][k % minor] = T::from_f64(v);
        }
        Ok(())
    }

    fn clear(&mut self) {
        self.extent.clear();
        self.data = Vec::new();
    }

    fn zero_row(&mut self, row: usize) -> Result<()> {
        if row >= self.extent.rows {
            return Err(StorageError::IndexOutOfRange);
        }
        match self.order {
            StorageOrder::RowMajor => self.data[row].fill(T::zero()),
            StorageOrder::ColumnMajor => {
                for col in self.data.iter_mut() {
                    col[row] = T::zero();
                }
            }
        }
        Ok(())
    }

    fn nnz(&self) -> usize {
        self.extent.cells()
    }

    fn render(&self, level: PrintLevel) -> String {
        if level == PrintLevel::File {
            return render_dense_market(self.extent, |i, j| self.at(i, j));
        }
        render_grid(self.extent, level, None, |i, j| Some(self.at(i, j)))
    }
}

/// MatrixMarket array form: banner, size line, then the value stream in
/// column-major order.
fn render_dense_market<T, F>(extent: Extent, at: F) -> String
where
    T: MatrixElement,
    F: Fn(usize, usize) -> T,
{
    let mut out = String::new();
    out.push_str("%%MatrixMarket matrix array real general\n");
    let _ = writeln!(out, "{} {}", extent.rows, extent.cols);
    for j in 0..extent.cols {
        for i in 0..extent.rows {
            let _ = writeln!(out, "{}", at(i, j));
        }
    }
    out
}
