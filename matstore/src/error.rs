//! Errors raised while reading and writing matrix files.

use std::io;
use std::path::PathBuf;

use matstore_core::StorageError;

/// A file load or store failure, carrying the offending path so
/// "file absent" and "file malformed" stay distinguishable upstream.
#[derive(Debug)]
pub enum ReadError {
    /// The file could not be opened or read.
    Open { path: PathBuf, source: io::Error },
    /// The file extension maps to no known codec.
    UnknownFormat { path: PathBuf },
    /// Banner or type tag not supported, or structure malformed.
    Format { path: PathBuf, detail: String },
    /// A line or token failed to parse.
    Parse { path: PathBuf, line: usize, detail: String },
    /// Fewer entries or values than the header declared.
    Truncated { path: PathBuf },
    /// Loaded data violated a storage invariant.
    Storage(StorageError),
}

impl std::fmt::Display for ReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReadError::Open { path, source } => {
                write!(f, "cannot open {}: {source}", path.display())
            }
            ReadError::UnknownFormat { path } => {
                write!(f, "unrecognized file format: {}", path.display())
            }
            ReadError::Format { path, detail } => {
                write!(f, "{}: {detail}", path.display())
            }
            ReadError::Parse { path, line, detail } => {
                write!(f, "{}:{line}: {detail}", path.display())
            }
            ReadError::Truncated { path } => {
                write!(f, "{}: file ends before the declared entry count", path.display())
            }
            ReadError::Storage(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::Open { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl From<StorageError> for ReadError {
    fn from(e: StorageError) -> Self {
        ReadError::Storage(e)
    }
}

pub type Result<T> = std::result::Result<T, ReadError>;
