//! Common contract implemented by every storage variant.

use alloc::string::String;

use crate::error::Result;
use crate::extent::Extent;
use crate::print::PrintLevel;
use crate::traits::MatrixElement;

/// Uniform access, sizing and rendering over all storage variants.
///
/// All addressing through this trait is zero-based regardless of the
/// numbering base a sparse variant carries in its compressed arrays or
/// writes to files.
pub trait MatrixStorage<T: MatrixElement> {
    /// Current shape.
    fn extent(&self) -> Extent;

    /// Read a cell by value.
    ///
    /// Sparse variants return the element sentinel for entries absent
    /// from the structure.
    fn at(&self, row: usize, col: usize) -> T;

    /// Write a cell.
    ///
    /// Fixed-structure variants reject writes to structurally-absent
    /// entries with `IndexOutOfRange`.
    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()>;

    /// Resize to the given shape, filling with `fill`.
    ///
    /// Variants whose structure is fixed by construction reject this
    /// with `UnsupportedOperation`.
    fn resize(&mut self, rows: usize, cols: usize, fill: f64) -> Result<()>;

    /// Overwrite all stored values from a flat slice laid out in this
    /// variant's storage order.
    fn assign(&mut self, values: &[f64]) -> Result<()>;

    /// Release contents and return to the empty state.
    fn clear(&mut self);

    /// Set every stored entry of one row to zero, keeping structure.
    fn zero_row(&mut self, row: usize) -> Result<()>;

    /// Number of stored entries.
    fn nnz(&self) -> usize;

    /// Render at the given verbosity.
    fn render(&self, level: PrintLevel) -> String;
}
