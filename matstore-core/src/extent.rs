//! Matrix extents, cell coordinates and storage orderings.
//!
//! These are the value types every storage variant shares: the
//! `(rows, cols)` shape, the `(row, col)` cell address, and the
//! orientation selector that decides which of the two is the primary
//! sort/addressing key.

use core::cmp::Ordering;

/// Marker for an extent that was explicitly invalidated.
const UNSET: usize = usize::MAX;

/// Row/column extent of a matrix.
///
/// An extent has three observable states: a valid size (both dimensions
/// strictly positive), the zero extent left behind by [`Extent::clear`],
/// and an explicit unset state distinct from zero (used while a file
/// load is in flight, so a failed load is distinguishable from an empty
/// matrix).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub rows: usize,
    pub cols: usize,
}

impl Extent {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// The empty extent left behind by `clear`.
    pub const fn zero() -> Self {
        Self { rows: 0, cols: 0 }
    }

    /// An explicitly unset extent, distinct from the zero extent.
    pub const fn unset() -> Self {
        Self { rows: UNSET, cols: UNSET }
    }

    /// Mark this extent as unset.
    pub fn invalidate(&mut self) {
        *self = Self::unset();
    }

    /// Reset to the zero extent.
    pub fn clear(&mut self) {
        *self = Self::zero();
    }

    /// Both dimensions strictly positive and not unset.
    pub const fn is_valid_size(&self) -> bool {
        self.rows > 0 && self.cols > 0 && self.rows != UNSET && self.cols != UNSET
    }

    /// Valid and square (required by external dense direct solvers).
    pub const fn is_square(&self) -> bool {
        self.is_valid_size() && self.rows == self.cols
    }

    /// Total cell count, zero unless the size is valid.
    pub const fn cells(&self) -> usize {
        if self.is_valid_size() {
            self.rows * self.cols
        } else {
            0
        }
    }

    /// True if the given cell address lies inside this extent.
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

impl core::fmt::Display for Extent {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// A cell address, usable both as a dense index and a sparse entry key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    pub row: usize,
    pub col: usize,
}

impl Coordinate {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Compare row first, then column.
    pub fn cmp_row_major(&self, other: &Self) -> Ordering {
        (self.row, self.col).cmp(&(other.row, other.col))
    }

    /// Compare column first, then row.
    pub fn cmp_column_major(&self, other: &Self) -> Ordering {
        (self.col, self.row).cmp(&(other.col, other.row))
    }

    /// The coordinate reflected across the diagonal.
    pub const fn mirrored(self) -> Self {
        Self { row: self.col, col: self.row }
    }

    pub const fn is_diagonal(self) -> bool {
        self.row == self.col
    }
}

/// Whether linear storage advances fastest along rows or columns.
///
/// For dense storage this selects the addressing stride; for the sparse
/// coordinate form it selects the entry comparator and therefore which
/// dimension the compressed offsets array is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StorageOrder {
    RowMajor,
    ColumnMajor,
}

impl StorageOrder {
    /// Primary sort key of a coordinate under this ordering.
    pub const fn major(self, c: Coordinate) -> usize {
        match self {
            StorageOrder::RowMajor => c.row,
            StorageOrder::ColumnMajor => c.col,
        }
    }

    /// Secondary sort key of a coordinate under this ordering.
    pub const fn minor(self, c: Coordinate) -> usize {
        match self {
            StorageOrder::RowMajor => c.col,
            StorageOrder::ColumnMajor => c.row,
        }
    }

    /// The `(major, minor)` key pair for a coordinate.
    pub const fn key(self, c: Coordinate) -> (usize, usize) {
        (self.major(c), self.minor(c))
    }

    /// Rebuild a coordinate from its `(major, minor)` key pair.
    pub const fn coordinate(self, major: usize, minor: usize) -> Coordinate {
        match self {
            StorageOrder::RowMajor => Coordinate::new(major, minor),
            StorageOrder::ColumnMajor => Coordinate::new(minor, major),
        }
    }

    /// Extent of the primary dimension.
    pub const fn major_extent(self, e: Extent) -> usize {
        match self {
            StorageOrder::RowMajor => e.rows,
            StorageOrder::ColumnMajor => e.cols,
        }
    }

    /// Extent of the secondary dimension.
    pub const fn minor_extent(self, e: Extent) -> usize {
        match self {
            StorageOrder::RowMajor => e.cols,
            StorageOrder::ColumnMajor => e.rows,
        }
    }
}

impl core::fmt::Display for StorageOrder {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StorageOrder::RowMajor => write!(f, "row-major"),
            StorageOrder::ColumnMajor => write!(f, "column-major"),
        }
    }
}
