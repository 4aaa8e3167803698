//! Compact offset-array text codec.
//!
//! The `.csr` form is a bare whitespace-delimited token stream with no
//! banner or type tag: `rows cols`, then `rows+1` offsets, then the
//! column indices, then the values in row order. The numbering base is
//! whatever the first offset says; arrays are returned untranslated so
//! the consumer can keep or shift the base as it likes. `%` comment
//! lines are skipped.

use std::path::Path;

use matstore_core::Extent;

use crate::error::{ReadError, Result};

/// A parsed offset-array file, arrays still in the file's base.
#[derive(Debug, Clone, PartialEq)]
pub struct OffsetsFile {
    pub extent: Extent,
    pub offsets: Vec<usize>,
    pub columns: Vec<usize>,
    pub values: Vec<f64>,
}

impl OffsetsFile {
    /// Numbering base implied by the first offset.
    pub fn base(&self) -> usize {
        self.offsets.first().copied().unwrap_or(0)
    }

    /// Stored entry count.
    pub fn nnz(&self) -> usize {
        self.values.len()
    }
}

/// Parse offset-array text. `path` is only used in error reports.
pub fn parse_offsets(path: &Path, text: &str) -> Result<OffsetsFile> {
    let mut tokens = text
        .lines()
        .enumerate()
        .filter(|(_, l)| !l.trim_start().starts_with('%'))
        .flat_map(|(n, l)| l.split_whitespace().map(move |t| (n + 1, t)));

    let rows = next_token::<usize>(path, &mut tokens, "row count")?;
    let cols = next_token::<usize>(path, &mut tokens, "column count")?;
    let extent = Extent::new(rows, cols);
    if !extent.is_valid_size() {
        return Err(ReadError::Format {
            path: path.into(),
            detail: format!("invalid matrix size {extent}"),
        });
    }

    let mut offsets = Vec::with_capacity(rows + 1);
    for _ in 0..rows + 1 {
        offsets.push(next_token::<usize>(path, &mut tokens, "offset")?);
    }
    if offsets.windows(2).any(|w| w[0] > w[1]) {
        return Err(ReadError::Format {
            path: path.into(),
            detail: "offsets not non-decreasing".into(),
        });
    }
    let nnz = offsets[rows] - offsets[0];

    let mut columns = Vec::with_capacity(nnz);
    for _ in 0..nnz {
        columns.push(next_token::<usize>(path, &mut tokens, "column index")?);
    }
    let mut values = Vec::with_capacity(nnz);
    for _ in 0..nnz {
        values.push(next_token::<f64>(path, &mut tokens, "value")?);
    }

    Ok(OffsetsFile { extent, offsets, columns, values })
}

fn next_token<'a, T: std::str::FromStr>(
    path: &Path,
    tokens: &mut impl Iterator<Item = (usize, &'a str)>,
    what: &str,
) -> Result<T> {
    match tokens.next() {
        Some((line, t)) => t.parse().map_err(|_| ReadError::Parse {
            path: path.into(),
            line,
            detail: format!("invalid {what} \"{t}\""),
        }),
        None => Err(ReadError::Truncated { path: path.into() }),
    }
}
