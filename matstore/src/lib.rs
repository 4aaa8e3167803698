//! # matstore
//!
//! Text-format persistence for the `matstore-core` storage variants.
//!
//! ## Architecture
//!
//! The workspace separates concerns the same way the storage contract
//! does:
//!
//! - **matstore-core**: layouts, conversions and validation, `no_std`
//! - **matstore**: the MatrixMarket (`.mtx`) and compact offset
//!   (`.csr`) codecs plus path-driven initialization
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use matstore::{read_coord, write_market, MatrixStorage, StorageOrder};
//!
//! fn example() -> Result<(), matstore::ReadError> {
//!     // load triples, symmetrize the pattern, compress
//!     let m = read_coord::<f64>("system.mtx", StorageOrder::RowMajor, 0)?;
//!     println!("loaded {} with {} entries", m.extent(), m.nnz());
//!
//!     // persist in MatrixMarket coordinate form, 1-based
//!     write_market("system-out.mtx", &m)?;
//!     Ok(())
//! }
//! ```

pub use matstore_core::{
    AnyMatrix, CoordMatrix, Coordinate, CsrMatrix, DenseMatrix, DenseRows, Extent, MatrixElement,
    MatrixStorage, PrintLevel, StorageError, StorageOrder,
};

pub mod error;
pub mod load;
pub mod market;
pub mod offsets;

pub use error::ReadError;
pub use load::{read_coord, read_csr, read_dense, read_dense_rows, write_market, FileKind, LoadPath};
pub use market::{parse_market, MarketFile, MarketFormat};
pub use offsets::{parse_offsets, OffsetsFile};
