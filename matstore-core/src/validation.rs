//! Structural validation of compressed sparse arrays.

use crate::error::{Result, StorageError};
use crate::extent::{Extent, StorageOrder};

/// Check the three-array compressed structure against its extent.
///
/// `offsets` must have one entry per major line plus a trailing total,
/// be non-decreasing, and start at the numbering base; `indices` holds
/// one minor index per stored entry, each within the minor extent in
/// that same base. Any violation is reported as `InconsistentIndex`;
/// an unusable extent as `InvalidSize`.
pub fn check_compressed(
    extent: Extent,
    order: StorageOrder,
    offsets: &[usize],
    indices: &[usize],
    values_len: usize,
) -> Result<()> {
    if !extent.is_valid_size() {
        return Err(StorageError::InvalidSize);
    }
    if indices.len() != values_len {
        return Err(StorageError::InconsistentIndex);
    }
    if offsets.len() != order.major_extent(extent) + 1 {
        return Err(StorageError::InconsistentIndex);
    }
    let base = offsets[0];
    if offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err(StorageError::InconsistentIndex);
    }
    if offsets[offsets.len() - 1] - base != indices.len() {
        return Err(StorageError::InconsistentIndex);
    }
    let minor = order.minor_extent(extent);
    if indices.iter().any(|&j| j < base || j - base >= minor) {
        return Err(StorageError::InconsistentIndex);
    }
    Ok(())
}
