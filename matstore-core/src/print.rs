//! Verbosity policy and shared text rendering.
//!
//! Every storage variant renders through the same policy so a combined
//! report over several matrices reads consistently. The file form is
//! rendered by each variant itself (array form for dense, coordinate
//! form for sparse); everything else goes through [`render_grid`].

use alloc::string::String;
use alloc::vec;
use core::fmt::Write as _;

use crate::extent::Extent;
use crate::traits::MatrixElement;

/// Rendering verbosity for a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PrintLevel {
    /// Pick a level from the matrix shape.
    Auto,
    /// Shape only.
    Size,
    /// One character per cell: sign pattern.
    Signs,
    /// Every value.
    Full,
    /// Persisted MatrixMarket text form.
    File,
}

impl PrintLevel {
    /// Convert an integer level, clamping out-of-range values.
    pub const fn from_i32(level: i32) -> Self {
        match level {
            i32::MIN..=0 => PrintLevel::Auto,
            1 => PrintLevel::Size,
            2 => PrintLevel::Signs,
            3 => PrintLevel::Full,
            _ => PrintLevel::File,
        }
    }

    /// Resolve `Auto` against a shape; other levels pass through.
    pub const fn resolve(self, extent: Extent) -> Self {
        match self {
            PrintLevel::Auto => {
                if extent.rows > 100 || extent.cols > 100 {
                    PrintLevel::Size
                } else if extent.rows > 10 || extent.cols > 10 {
                    PrintLevel::Signs
                } else {
                    PrintLevel::Full
                }
            }
            other => other,
        }
    }
}

impl core::fmt::Display for PrintLevel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            PrintLevel::Auto => "auto",
            PrintLevel::Size => "size",
            PrintLevel::Signs => "signs",
            PrintLevel::Full => "full",
            PrintLevel::File => "file",
        };
        write!(f, "{name}")
    }
}

/// Render the human-readable forms (`Size`, `Signs`, `Full`).
///
/// `at` returns `Some(value)` for stored cells and `None` for cells the
/// structure does not hold; `nnz` is `Some` for sparse variants, which
/// annotate the shape with their stored entry count and mark absent
/// cells distinctly in the sign pattern. `Auto` is resolved here; the
/// `File` level is the caller's responsibility and falls back to `Full`.
pub fn render_grid<T, F>(extent: Extent, level: PrintLevel, nnz: Option<usize>, at: F) -> String
where
    T: MatrixElement,
    F: Fn(usize, usize) -> Option<T>,
{
    let eps = 1.0e3 * T::EPSILON;
    let level = match level.resolve(extent) {
        PrintLevel::File => PrintLevel::Full,
        resolved => resolved,
    };

    let mut out = String::new();
    match nnz {
        Some(n) => {
            let _ = write!(out, "({}x{}>={}) [", extent.rows, extent.cols, n);
        }
        None => {
            let _ = write!(out, "({}x{}) [", extent.rows, extent.cols);
        }
    }

    match level {
        PrintLevel::Size => {
            out.push_str(" ... ]");
        }
        PrintLevel::Signs => {
            // absent sparse cells render as blanks, stored zeros as '.'
            let (neutral, absent) = if nnz.is_some() { ('.', ' ') } else { ('0', ' ') };
            for i in 0..extent.rows {
                let mut line = vec![absent; extent.cols];
                for (j, slot) in line.iter_mut().enumerate() {
                    if let Some(v) = at(i, j) {
                        let v = v.to_f64();
                        *slot = if v > eps {
                            '+'
                        } else if v < -eps {
                            '-'
                        } else {
                            neutral
                        };
                    }
                }
                out.push_str("\n  ");
                out.extend(line);
            }
            out.push_str(" ]");
        }
        _ => {
            for i in 0..extent.rows {
                out.push_str("\n  ");
                for j in 0..extent.cols {
                    let v = at(i, j).unwrap_or_else(T::zero);
                    let _ = write!(out, "{v}, ");
                }
            }
            out.push_str(" ]");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_i32_clamps() {
        assert_eq!(PrintLevel::from_i32(-3), PrintLevel::Auto);
        assert_eq!(PrintLevel::from_i32(0), PrintLevel::Auto);
        assert_eq!(PrintLevel::from_i32(1), PrintLevel::Size);
        assert_eq!(PrintLevel::from_i32(2), PrintLevel::Signs);
        assert_eq!(PrintLevel::from_i32(3), PrintLevel::Full);
        assert_eq!(PrintLevel::from_i32(4), PrintLevel::File);
        assert_eq!(PrintLevel::from_i32(99), PrintLevel::File);
    }

    #[test]
    fn test_auto_resolution_thresholds() {
        assert_eq!(PrintLevel::Auto.resolve(Extent::new(3, 3)), PrintLevel::Full);
        assert_eq!(PrintLevel::Auto.resolve(Extent::new(11, 3)), PrintLevel::Signs);
        assert_eq!(PrintLevel::Auto.resolve(Extent::new(3, 101)), PrintLevel::Size);
        // explicit levels pass through untouched
        assert_eq!(PrintLevel::Full.resolve(Extent::new(500, 500)), PrintLevel::Full);
    }

    #[test]
    fn test_size_form() {
        let s = render_grid::<f64, _>(Extent::new(2, 3), PrintLevel::Size, None, |_, _| Some(0.0));
        assert_eq!(s, "(2x3) [ ... ]");

        let s = render_grid::<f64, _>(Extent::new(2, 3), PrintLevel::Size, Some(4), |_, _| None);
        assert_eq!(s, "(2x3>=4) [ ... ]");
    }

    #[test]
    fn test_sign_pattern() {
        let vals = [[1.0, -2.0], [0.0, 5.0]];
        let s = render_grid::<f64, _>(Extent::new(2, 2), PrintLevel::Signs, None, |i, j| {
            Some(vals[i][j])
        });
        assert_eq!(s, "(2x2) [\n  +-\n  0+ ]");
    }

    #[test]
    fn test_sign_pattern_sparse_blanks() {
        // stored (0,0)=3.0 and (1,1)=0.0; the rest are absent
        let s = render_grid::<f64, _>(Extent::new(2, 2), PrintLevel::Signs, Some(2), |i, j| {
            match (i, j) {
                (0, 0) => Some(3.0),
                (1, 1) => Some(0.0),
                _ => None,
            }
        });
        assert_eq!(s, "(2x2>=2) [\n  + \n   . ]");
    }

    #[test]
    fn test_full_values() {
        let s = render_grid::<f64, _>(Extent::new(2, 2), PrintLevel::Full, None, |i, j| {
            Some((i * 2 + j) as f64)
        });
        assert_eq!(s, "(2x2) [\n  0, 1, \n  2, 3,  ]");
    }
}
