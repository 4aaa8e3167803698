//! MatrixMarket text codec.
//!
//! Reads the ASCII MatrixMarket form: a banner restricted to
//! `real general` matrices in `array` or `coordinate` layout, `%`
//! comment lines, a size line, then either a column-major value stream
//! (array) or 1-based `row col value` triples (coordinate). Parsed
//! entries come out zero-based.

use std::path::Path;

use matstore_core::Extent;

use crate::error::{ReadError, Result};

/// Layout of a MatrixMarket file body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketFormat {
    /// Dense column-major value stream.
    Array,
    /// Sparse `row col value` triples.
    Coordinate,
}

/// A parsed MatrixMarket file, entries zero-based.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketFile {
    pub format: MarketFormat,
    pub extent: Extent,
    pub entries: Vec<(usize, usize, f64)>,
}

/// Parse MatrixMarket text. `path` is only used in error reports.
pub fn parse_market(path: &Path, text: &str) -> Result<MarketFile> {
    let mut lines = text.lines().enumerate();

    let format = match lines.next() {
        Some((_, banner)) => parse_banner(path, banner)?,
        None => {
            return Err(ReadError::Format {
                path: path.into(),
                detail: "empty file, \"%%MatrixMarket ...\" banner not found".into(),
            })
        }
    };

    let mut meaningful = lines.filter(|(_, l)| {
        let l = l.trim();
        !l.is_empty() && !l.starts_with('%')
    });

    let (extent, declared) = match meaningful.next() {
        Some((n, line)) => parse_size(path, n + 1, line, format)?,
        None => return Err(ReadError::Truncated { path: path.into() }),
    };

    let mut entries = Vec::with_capacity(declared);
    match format {
        MarketFormat::Array => {
            // values stream column by column, no explicit indices
            for k in 0..declared {
                let (n, line) = meaningful.next().ok_or(ReadError::Truncated { path: path.into() })?;
                let v = parse_token::<f64>(path, n + 1, line.trim(), "value")?;
                entries.push((k % extent.rows, k / extent.rows, v));
            }
        }
        MarketFormat::Coordinate => {
            for _ in 0..declared {
                let (n, line) = meaningful.next().ok_or(ReadError::Truncated { path: path.into() })?;
                let mut tok = line.split_whitespace();
                let row = parse_next::<usize>(path, n + 1, &mut tok, "row index")?;
                let col = parse_next::<usize>(path, n + 1, &mut tok, "column index")?;
                let v = parse_next::<f64>(path, n + 1, &mut tok, "value")?;
                if row == 0 || row > extent.rows || col == 0 || col > extent.cols {
                    return Err(ReadError::Parse {
                        path: path.into(),
                        line: n + 1,
                        detail: format!("coordinate ({row},{col}) outside {extent}"),
                    });
                }
                entries.push((row - 1, col - 1, v));
            }
        }
    }

    Ok(MarketFile { format, extent, entries })
}

fn parse_banner(path: &Path, banner: &str) -> Result<MarketFormat> {
    let reject = |detail: &str| ReadError::Format { path: path.into(), detail: detail.into() };
    let mut tok = banner.split_whitespace();
    if tok.next() != Some("%%MatrixMarket") || tok.next() != Some("matrix") {
        return Err(reject("invalid header, \"%%MatrixMarket matrix ...\" not found"));
    }
    let format = match tok.next() {
        Some("array") => MarketFormat::Array,
        Some("coordinate") => MarketFormat::Coordinate,
        _ => return Err(reject("only \"(coordinate|array) real general\" supported")),
    };
    if tok.next() != Some("real") || tok.next() != Some("general") {
        return Err(reject("only \"(coordinate|array) real general\" supported"));
    }
    Ok(format)
}

fn parse_size(
    path: &Path,
    line_no: usize,
    line: &str,
    format: MarketFormat,
) -> Result<(Extent, usize)> {
    let mut tok = line.split_whitespace();
    let rows = parse_next::<usize>(path, line_no, &mut tok, "row count")?;
    let cols = parse_next::<usize>(path, line_no, &mut tok, "column count")?;
    let extent = Extent::new(rows, cols);
    if !extent.is_valid_size() {
        return Err(ReadError::Format {
            path: path.into(),
            detail: format!("invalid matrix/array size {extent}"),
        });
    }
    let declared = match format {
        MarketFormat::Array => extent.cells(),
        MarketFormat::Coordinate => parse_next::<usize>(path, line_no, &mut tok, "entry count")?,
    };
    Ok((extent, declared))
}

fn parse_next<'a, T: std::str::FromStr>(
    path: &Path,
    line_no: usize,
    tok: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<T> {
    match tok.next() {
        Some(t) => parse_token(path, line_no, t, what),
        None => Err(ReadError::Parse {
            path: path.into(),
            line: line_no,
            detail: format!("missing {what}"),
        }),
    }
}

fn parse_token<T: std::str::FromStr>(
    path: &Path,
    line_no: usize,
    token: &str,
    what: &str,
) -> Result<T> {
    token.parse().map_err(|_| ReadError::Parse {
        path: path.into(),
        line: line_no,
        detail: format!("invalid {what} \"{token}\""),
    })
}
