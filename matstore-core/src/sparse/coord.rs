//! Mutable coordinate sparse storage.
//!
//! Two-state storage: an ordered entry map keyed by `(major, minor)`
//! under the chosen orientation, or the compressed three-array form the
//! map groups into. `compress` and `uncompress` move between the states
//! and are no-ops when already there; the round trip preserves the
//! entry set exactly.

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write as _;

use crate::error::{Result, StorageError};
use crate::extent::{Coordinate, Extent, StorageOrder};
use crate::print::{render_grid, PrintLevel};
use crate::traits::{MatrixElement, MatrixStorage};
use crate::validation::check_compressed;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
enum State<T> {
    /// Ordered map from `(major, minor)` key to value.
    Entries(BTreeMap<(usize, usize), T>),
    /// Grouped arrays, offsets carrying the numbering base.
    Compressed { offsets: Vec<usize>, indices: Vec<usize>, values: Vec<T> },
}

/// Sparse matrix over an ordered coordinate map, compressible in place.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoordMatrix<T> {
    extent: Extent,
    order: StorageOrder,
    base: usize,
    state: State<T>,
}

impl<T: MatrixElement> CoordMatrix<T> {
    /// Empty matrix grouping by the given orientation; `base` is the
    /// numbering base used when compressing (commonly 0 or 1).
    pub fn new(order: StorageOrder, base: usize) -> Self {
        Self {
            extent: Extent::zero(),
            order,
            base,
            state: State::Entries(BTreeMap::new()),
        }
    }

    pub fn order(&self) -> StorageOrder {
        self.order
    }

    pub fn base(&self) -> usize {
        self.base
    }

    /// Establish the shape without touching entries.
    ///
    /// Shrinking below a stored entry would orphan it, so that is
    /// rejected as `InvalidSize`.
    pub fn set_extent(&mut self, rows: usize, cols: usize) -> Result<()> {
        let extent = Extent::new(rows, cols);
        if !extent.is_valid_size() {
            return Err(StorageError::InvalidSize);
        }
        let mut fits = true;
        self.for_each_entry(|c, _| fits &= extent.contains(c.row, c.col));
        if !fits {
            return Err(StorageError::InvalidSize);
        }
        self.extent = extent;
        Ok(())
    }

    pub fn is_compressed(&self) -> bool {
        matches!(self.state, State::Compressed { .. })
    }

    pub fn swap(&mut self, other: &mut Self) {
        core::mem::swap(self, other);
    }

    /// The compressed arrays, if currently in the compressed state.
    pub fn compressed_parts(&self) -> Option<(&[usize], &[usize], &[T])> {
        match &self.state {
            State::Compressed { offsets, indices, values } => {
                Some((offsets, indices, values))
            }
            State::Entries(_) => None,
        }
    }

    /// Group the entry map into the three-array form.
    ///
    /// Offsets get one slot per major line plus a trailing total and
    /// advance through empty lines, so the result always satisfies the
    /// compressed invariants for the full extent.
    pub fn compress(&mut self) {
        let entries = match &mut self.state {
            State::Entries(entries) => core::mem::take(entries),
            State::Compressed { .. } => return,
        };
        let majors = self.order.major_extent(self.extent);
        let mut offsets = Vec::with_capacity(majors + 1);
        let mut indices = Vec::with_capacity(entries.len());
        let mut values = Vec::with_capacity(entries.len());

        offsets.push(self.base);
        let mut it = entries.iter().peekable();
        for major in 0..majors {
            while let Some(&(&(em, eminor), &v)) = it.peek() {
                if em != major {
                    break;
                }
                indices.push(eminor + self.base);
                values.push(v);
                it.next();
            }
            offsets.push(indices.len() + self.base);
        }
        debug_assert!(it.next().is_none(), "entry beyond the major extent");
        self.state = State::Compressed { offsets, indices, values };
    }

    /// Re-create the entry map from the compressed arrays.
    pub fn uncompress(&mut self) {
        let (offsets, indices, values) = match &mut self.state {
            State::Compressed { offsets, indices, values } => (
                core::mem::take(offsets),
                core::mem::take(indices),
                core::mem::take(values),
            ),
            State::Entries(_) => return,
        };
        let base = offsets.first().copied().unwrap_or(self.base);
        let mut entries = BTreeMap::new();
        for major in 0..offsets.len().saturating_sub(1) {
            for k in (offsets[major] - base)..(offsets[major + 1] - base) {
                entries.insert((major, indices[k] - base), values[k]);
            }
        }
        self.state = State::Entries(entries);
    }

    /// Complete the diagonal and mirror every entry's coordinate, so
    /// the sparsity pattern comes out symmetric. New entries get zero
    /// values. Uncompresses first if needed.
    pub fn augment_symmetry(&mut self) {
        self.uncompress();
        let entries = match &mut self.state {
            State::Entries(entries) => entries,
            State::Compressed { .. } => return,
        };
        let before = entries.len();
        for d in 0..self.extent.rows.min(self.extent.cols) {
            entries.entry((d, d)).or_insert_with(T::zero);
        }
        // a mirror of a mirror is the original entry, so one
        // collect-then-merge pass reaches the fixed point
        let mut mirrors = Vec::new();
        for &(major, minor) in entries.keys() {
            let c = self.order.coordinate(major, minor).mirrored();
            if self.extent.contains(c.row, c.col) {
                let key = self.order.key(c);
                if !entries.contains_key(&key) {
                    mirrors.push(key);
                }
            }
        }
        for key in mirrors {
            entries.entry(key).or_insert_with(T::zero);
        }
        log::debug!(
            "symmetry augmentation added {} entries ({} total)",
            entries.len() - before,
            entries.len()
        );
    }

    /// Visit every stored entry as `(Coordinate, value)`, in the entry
    /// ordering of the current orientation, without changing state.
    pub fn for_each_entry<F: FnMut(Coordinate, T)>(&self, mut f: F) {
        match &self.state {
            State::Entries(entries) => {
                for (&(major, minor), &v) in entries {
                    f(self.order.coordinate(major, minor), v);
                }
            }
            State::Compressed { offsets, indices, values } => {
                let base = offsets.first().copied().unwrap_or(0);
                for major in 0..offsets.len().saturating_sub(1) {
                    for k in (offsets[major] - base)..(offsets[major + 1] - base) {
                        f(self.order.coordinate(major, indices[k] - base), values[k]);
                    }
                }
            }
        }
    }

    /// Validate the compressed arrays against the current extent.
    pub fn check(&self) -> Result<()> {
        match &self.state {
            State::Compressed { offsets, indices, values } => {
                check_compressed(self.extent, self.order, offsets, indices, values.len())
            }
            State::Entries(_) => Ok(()),
        }
    }

    /// Entry slot of a coordinate within the compressed arrays.
    fn find_compressed(&self, row: usize, col: usize) -> Option<usize> {
        let (offsets, indices, _) = self.compressed_parts()?;
        let base = offsets.first().copied().unwrap_or(0);
        let c = Coordinate::new(row, col);
        let major = self.order.major(c);
        let minor = self.order.minor(c);
        if major + 1 >= offsets.len() {
            return None;
        }
        ((offsets[major] - base)..(offsets[major + 1] - base))
            .find(|&k| indices[k] - base == minor)
    }
}

impl<T: MatrixElement> MatrixStorage<T> for CoordMatrix<T> {
    fn extent(&self) -> Extent {
        self.extent
    }

    fn at(&self, row: usize, col: usize) -> T {
        if !self.extent.contains(row, col) {
            return T::sentinel();
        }
        match &self.state {
            State::Entries(entries) => {
                let key = self.order.key(Coordinate::new(row, col));
                entries.get(&key).copied().unwrap_or_else(T::sentinel)
            }
            State::Compressed { values, .. } => match self.find_compressed(row, col) {
                Some(k) => values[k],
                None => T::sentinel(),
            },
        }
    }

    fn set(&mut self, row: usize, col: usize, value: T) -> Result<()> {
        if !self.extent.contains(row, col) {
            return Err(StorageError::IndexOutOfRange);
        }
        let key = self.order.key(Coordinate::new(row, col));
        match &mut self.state {
            State::Entries(entries) => {
                // insert-or-update: a pre-existing entry's value is
                // replaced, never kept stale
                entries.insert(key, value);
                Ok(())
            }
            State::Compressed { .. } => match self.find_compressed(row, col) {
                Some(k) => {
                    if let State::Compressed { values, .. } = &mut self.state {
                        values[k] = value;
                    }
                    Ok(())
                }
                None => Err(StorageError::IndexOutOfRange),
            },
        }
    }

    fn resize(&mut self, rows: usize, cols: usize, fill: f64) -> Result<()> {
        // shape can only be established while empty; fill values are
        // meaningless for a structure with no entries yet
        let _ = fill;
        if self.nnz() > 0 {
            return Err(StorageError::UnsupportedOperation);
        }
        self.set_extent(rows, cols)
    }

    fn assign(&mut self, _values: &[f64]) -> Result<()> {
        Err(StorageError::UnsupportedOperation)
    }

    fn clear(&mut self) {
        self.extent.clear();
        self.state = State::Entries(BTreeMap::new());
    }

    fn zero_row(&mut self, row: usize) -> Result<()> {
        if row >= self.extent.rows {
            return Err(StorageError::IndexOutOfRange);
        }
        let order = self.order;
        match &mut self.state {
            State::Entries(entries) => {
                for (&(major, minor), v) in entries.iter_mut() {
                    if order.coordinate(major, minor).row == row {
                        *v = T::zero();
                    }
                }
            }
            State::Compressed { offsets, indices, values } => {
                let base = offsets.first().copied().unwrap_or(0);
                match order {
                    StorageOrder::RowMajor => {
                        let range = (offsets[row] - base)..(offsets[row + 1] - base);
                        values[range].fill(T::zero());
                    }
                    StorageOrder::ColumnMajor => {
                        // row entries are scattered across column slices
                        for (k, &minor) in indices.iter().enumerate() {
                            if minor - base == row {
                                values[k] = T::zero();
                            }
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn nnz(&self) -> usize {
        match &self.state {
            State::Entries(entries) => entries.len(),
            State::Compressed { values, .. } => values.len(),
        }
    }

    fn render(&self, level: PrintLevel) -> String {
        if level == PrintLevel::File {
            let mut out = String::new();
            out.push_str("%%MatrixMarket matrix coordinate real general\n");
            let _ = writeln!(out, "{} {} {}", self.extent.rows, self.extent.cols, self.nnz());
            self.for_each_entry(|c, v| {
                let _ = writeln!(out, "{} {} {}", c.row + 1, c.col + 1, v);
            });
            return out;
        }
        render_grid(self.extent, level, Some(self.nnz()), |i, j| {
            let v = self.at(i, j);
            if v.is_sentinel() {
                None
            } else {
                Some(v)
            }
        })
    }
}
