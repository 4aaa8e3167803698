//! Error types for matrix storage operations

/// Errors that can occur while sizing, converting or addressing storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// Zero or unset extent supplied where a valid one is required
    InvalidSize,
    /// Flat value count does not match the current extent
    SizeMismatch,
    /// Compressed structure invariants violated after load or conversion
    InconsistentIndex,
    /// Address outside the current extent, or a write to a
    /// structurally-absent entry of a compressed matrix
    IndexOutOfRange,
    /// Structural resize or value initialization attempted on a
    /// fixed-structure variant
    UnsupportedOperation,
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let msg = match self {
            StorageError::InvalidSize => "invalid matrix size",
            StorageError::SizeMismatch => "value count not consistent with current size",
            StorageError::InconsistentIndex => "compressed indexing not correct",
            StorageError::IndexOutOfRange => "index not available",
            StorageError::UnsupportedOperation => "operation not available for this storage",
        };
        write!(f, "{msg}")
    }
}

/// Result type for storage operations
pub type Result<T> = core::result::Result<T, StorageError>;
