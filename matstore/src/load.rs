//! Format detection and storage-filling load paths.
//!
//! The codec is picked from the file extension (`.mtx` MatrixMarket,
//! `.csr` compact offsets); every storage variant can be initialized
//! from either. Writing always emits the MatrixMarket file form.

use std::fs;
use std::path::Path;

use matstore_core::{
    AnyMatrix, CoordMatrix, CsrMatrix, DenseMatrix, DenseRows, Extent, MatrixElement,
    MatrixStorage, PrintLevel, StorageOrder,
};

use crate::error::{ReadError, Result};
use crate::market::parse_market;
use crate::offsets::{parse_offsets, OffsetsFile};

/// Codec selected from a file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Market,
    Offsets,
}

impl FileKind {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(e) if e.eq_ignore_ascii_case("mtx") => Ok(FileKind::Market),
            Some(e) if e.eq_ignore_ascii_case("csr") => Ok(FileKind::Offsets),
            _ => Err(ReadError::UnknownFormat { path: path.into() }),
        }
    }
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| ReadError::Open { path: path.into(), source })
}

/// Expand an offset-array file into zero-based entry triples.
fn offsets_entries(path: &Path, f: &OffsetsFile) -> Result<Vec<(usize, usize, f64)>> {
    let base = f.base();
    let mut entries = Vec::with_capacity(f.nnz());
    for row in 0..f.extent.rows {
        for k in (f.offsets[row] - base)..(f.offsets[row + 1] - base) {
            let col = f.columns[k];
            if col < base || col - base >= f.extent.cols {
                return Err(ReadError::Format {
                    path: path.into(),
                    detail: format!("column index {col} outside {}", f.extent),
                });
            }
            entries.push((row, col - base, f.values[k]));
        }
    }
    Ok(entries)
}

/// Read either codec into an extent plus zero-based entry triples.
fn load_entries(path: &Path) -> Result<(Extent, Vec<(usize, usize, f64)>)> {
    let kind = FileKind::from_path(path)?;
    let text = read_text(path)?;
    match kind {
        FileKind::Market => {
            let mf = parse_market(path, &text)?;
            Ok((mf.extent, mf.entries))
        }
        FileKind::Offsets => {
            let of = parse_offsets(path, &text)?;
            let entries = offsets_entries(path, &of)?;
            Ok((of.extent, entries))
        }
    }
    .map(|(extent, entries)| {
        log::debug!("{}: {} entries over {}", path.display(), entries.len(), extent);
        (extent, entries)
    })
}

/// Load a flat dense matrix; cells the file does not mention are zero.
pub fn read_dense<T: MatrixElement>(
    path: impl AsRef<Path>,
    order: StorageOrder,
) -> Result<DenseMatrix<T>> {
    let (extent, entries) = load_entries(path.as_ref())?;
    let mut m = DenseMatrix::with_extent(order, extent.rows, extent.cols, 0.0)?;
    for (row, col, v) in entries {
        m.set(row, col, T::from_f64(v))?;
    }
    Ok(m)
}

/// Load a nested dense matrix; cells the file does not mention are zero.
pub fn read_dense_rows<T: MatrixElement>(
    path: impl AsRef<Path>,
    order: StorageOrder,
) -> Result<DenseRows<T>> {
    let (extent, entries) = load_entries(path.as_ref())?;
    let mut m = DenseRows::with_extent(order, extent.rows, extent.cols, 0.0)?;
    for (row, col, v) in entries {
        m.set(row, col, T::from_f64(v))?;
    }
    Ok(m)
}

/// Load a fixed compressed-row matrix.
///
/// An offset-array file maps directly onto the compressed arrays in
/// its own numbering base; a MatrixMarket file is grouped into
/// zero-based rows first. Structural invariants are validated either
/// way.
pub fn read_csr<T: MatrixElement>(path: impl AsRef<Path>) -> Result<CsrMatrix<T>> {
    let path = path.as_ref();
    let kind = FileKind::from_path(path)?;
    let text = read_text(path)?;
    match kind {
        FileKind::Offsets => {
            let of = parse_offsets(path, &text)?;
            let values = of.values.iter().map(|&v| T::from_f64(v)).collect();
            Ok(CsrMatrix::from_parts(of.extent, of.offsets, of.columns, values)?)
        }
        FileKind::Market => {
            let mf = parse_market(path, &text)?;
            let mut entries = mf.entries;
            entries.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));

            let mut offsets = Vec::with_capacity(mf.extent.rows + 1);
            let mut columns = Vec::with_capacity(entries.len());
            let mut values = Vec::with_capacity(entries.len());
            offsets.push(0);
            let mut it = entries.iter().peekable();
            for row in 0..mf.extent.rows {
                while let Some(&&(r, c, v)) = it.peek() {
                    if r != row {
                        break;
                    }
                    columns.push(c);
                    values.push(T::from_f64(v));
                    it.next();
                }
                offsets.push(columns.len());
            }
            Ok(CsrMatrix::from_parts(mf.extent, offsets, columns, values)?)
        }
    }
}

/// Load a mutable coordinate matrix.
///
/// Entries are inserted into the ordered map, the pattern is made
/// symmetric with a complete diagonal, then the matrix is compressed
/// and its structure validated.
pub fn read_coord<T: MatrixElement>(
    path: impl AsRef<Path>,
    order: StorageOrder,
    base: usize,
) -> Result<CoordMatrix<T>> {
    let (extent, entries) = load_entries(path.as_ref())?;
    let mut m = CoordMatrix::new(order, base);
    m.set_extent(extent.rows, extent.cols)?;
    for (row, col, v) in entries {
        m.set(row, col, T::from_f64(v))?;
    }
    m.augment_symmetry();
    m.compress();
    m.check()?;
    Ok(m)
}

/// Write any storage variant in its MatrixMarket file form.
pub fn write_market<T, M>(path: impl AsRef<Path>, matrix: &M) -> Result<()>
where
    T: MatrixElement,
    M: MatrixStorage<T>,
{
    let path = path.as_ref();
    fs::write(path, matrix.render(PrintLevel::File))
        .map_err(|source| ReadError::Open { path: path.into(), source })
}

/// In-place initialization from a file path.
///
/// The target is cleared before the load, so a failure always leaves
/// it empty rather than half-populated.
pub trait LoadPath {
    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()>;
}

impl<T: MatrixElement> LoadPath for DenseMatrix<T> {
    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let order = self.order();
        self.clear();
        *self = read_dense(path, order)?;
        Ok(())
    }
}

impl<T: MatrixElement> LoadPath for DenseRows<T> {
    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let order = self.order();
        self.clear();
        *self = read_dense_rows(path, order)?;
        Ok(())
    }
}

impl<T: MatrixElement> LoadPath for CsrMatrix<T> {
    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        self.clear();
        *self = read_csr(path)?;
        Ok(())
    }
}

impl<T: MatrixElement> LoadPath for CoordMatrix<T> {
    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let order = self.order();
        let base = self.base();
        self.clear();
        *self = read_coord(path, order, base)?;
        Ok(())
    }
}

impl<T: MatrixElement> LoadPath for AnyMatrix<T> {
    fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        match self {
            AnyMatrix::DenseRowMajor(m) | AnyMatrix::DenseColMajor(m) => m.load_path(path),
            AnyMatrix::DenseNested(m) => m.load_path(path),
            AnyMatrix::SparseCsr(m) => m.load_path(path),
            AnyMatrix::SparseCoordinate(m) => m.load_path(path),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn tmp(name: &str, text: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("matstore-{}-{name}", std::process::id()));
        std::fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn test_unknown_extension() {
        assert!(matches!(
            read_dense::<f64>("matrix.bin", StorageOrder::RowMajor),
            Err(ReadError::UnknownFormat { .. })
        ));
        assert!(matches!(
            FileKind::from_path(Path::new("matrix.bin")),
            Err(ReadError::UnknownFormat { .. })
        ));
    }

    #[test]
    fn test_missing_file_reports_open_error() {
        let path = std::env::temp_dir().join(format!("matstore-{}-nothing.mtx", std::process::id()));
        let err = read_dense::<f64>(&path, StorageOrder::RowMajor).unwrap_err();
        // absent file, not a malformed one
        match err {
            ReadError::Open { ref source, .. } => {
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected an open error, got {other}"),
        }
    }

    #[test]
    fn test_dense_market_round_trip() {
        let mut m = DenseMatrix::<f64>::with_extent(StorageOrder::RowMajor, 3, 3, 0.0).unwrap();
        m.assign(&[1.5, 2.0, 3.25, 4.0, 5.0, 6.0, 7.0, 8.0, 9.5]).unwrap();
        let path = tmp("round.mtx", "");
        write_market(&path, &m).unwrap();

        let back = read_dense::<f64>(&path, StorageOrder::ColumnMajor).unwrap();
        assert_eq!(back.extent(), m.extent());
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(back.at(i, j), m.at(i, j));
            }
        }
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_dense_from_coordinate_market() {
        let path = tmp(
            "dense-coord.mtx",
            "%%MatrixMarket matrix coordinate real general\n2 3 2\n1 3 5.0\n2 1 -2.0\n",
        );
        let m = read_dense::<f64>(&path, StorageOrder::RowMajor).unwrap();
        assert_eq!(m.at(0, 2), 5.0);
        assert_eq!(m.at(1, 0), -2.0);
        assert_eq!(m.at(0, 0), 0.0);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_csr_from_offsets_file() {
        let path = tmp("fixed.csr", "3 3\n0 2 3 5\n0 2 1 0 2\n1 2 3 4 5\n");
        let m = read_csr::<f64>(&path).unwrap();
        assert_eq!(m.extent(), Extent::new(3, 3));
        assert_eq!(m.at(0, 0), 1.0);
        assert_eq!(m.at(1, 1), 3.0);
        assert!(m.at(0, 1).is_sentinel());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_csr_from_market() {
        let path = tmp(
            "fixed.mtx",
            "%%MatrixMarket matrix coordinate real general\n3 3 3\n3 2 9.0\n1 1 1.0\n1 3 2.0\n",
        );
        let m = read_csr::<f64>(&path).unwrap();
        assert_eq!(m.offsets(), &[0, 2, 2, 3]);
        assert_eq!(m.at(0, 2), 2.0);
        assert_eq!(m.at(2, 1), 9.0);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_coord_load_augments_and_compresses() {
        let path = tmp(
            "coord.mtx",
            "%%MatrixMarket matrix coordinate real general\n2 2 1\n1 2 5.0\n",
        );
        let m = read_coord::<f64>(&path, StorageOrder::RowMajor, 0).unwrap();
        assert!(m.is_compressed());
        assert_eq!(m.nnz(), 4);
        assert_eq!(m.at(0, 1), 5.0);
        assert_eq!(m.at(1, 0), 0.0);
        assert_eq!(m.at(0, 0), 0.0);
        assert_eq!(m.at(1, 1), 0.0);
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_random_sparse_file_round_trip() {
        use rand::rngs::StdRng;
        use rand::{Rng, SeedableRng};

        let mut rng = StdRng::seed_from_u64(1);
        let mut m = CoordMatrix::<f64>::new(StorageOrder::RowMajor, 0);
        m.set_extent(8, 8).unwrap();
        for _ in 0..20 {
            let i = rng.gen_range(0..8);
            let j = rng.gen_range(0..8);
            // integer values survive the text representation exactly
            m.set(i, j, rng.gen_range(-5..5) as f64).unwrap();
        }
        m.augment_symmetry();

        let path = tmp("rand.mtx", "");
        write_market(&path, &m).unwrap();
        let back = read_coord::<f64>(&path, StorageOrder::RowMajor, 0).unwrap();
        assert_eq!(back.nnz(), m.nnz());
        for i in 0..8 {
            for j in 0..8 {
                let (a, b) = (m.at(i, j), back.at(i, j));
                assert_eq!(a.is_sentinel(), b.is_sentinel());
                if !a.is_sentinel() {
                    assert_eq!(a, b);
                }
            }
        }
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_failed_load_leaves_target_empty() {
        let path = tmp("bad.mtx", "%%MatrixMarket matrix coordinate real general\n2 2 5\n1 1 1\n");
        let mut m = DenseMatrix::<f64>::with_extent(StorageOrder::RowMajor, 2, 2, 7.0).unwrap();
        assert!(m.load_path(&path).is_err());
        assert_eq!(m.extent(), Extent::zero());
        std::fs::remove_file(path).unwrap();
    }

    #[test]
    fn test_any_matrix_load() {
        let path = tmp("any.csr", "2 2\n1 2 3\n1 2\n4 5\n");
        let mut m = AnyMatrix::<f64>::SparseCsr(
            CsrMatrix::from_parts(Extent::new(1, 1), vec![0, 0], vec![], vec![]).unwrap(),
        );
        m.load_path(&path).unwrap();
        assert_eq!(m.extent(), Extent::new(2, 2));
        assert_eq!(m.at(0, 0), 4.0);
        assert_eq!(m.at(1, 1), 5.0);
        std::fs::remove_file(path).unwrap();
    }
}
