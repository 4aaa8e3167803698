//! # matstore-core
//!
//! Interchangeable in-memory matrix representations for sparse/dense
//! linear-algebra problems: dense flat and nested storage in either
//! orientation, a fixed compressed-row sparse form, and a mutable
//! coordinate sparse form with explicit compress/uncompress
//! transitions. All variants share one addressing, sizing, clearing
//! and rendering contract, so a generic linear-system layer can hand
//! any of them to an external solver without caring about layout.
//!
//! This crate is `no_std` (with `alloc`); file I/O and the text codecs
//! live in the companion `matstore` crate.

#![no_std]

extern crate alloc;

pub mod dense;
pub mod error;
pub mod extent;
pub mod print;
pub mod sparse;
pub mod traits;
pub mod validation;
pub mod variant;

pub use dense::{DenseMatrix, DenseRows};
pub use error::{Result, StorageError};
pub use extent::{Coordinate, Extent, StorageOrder};
pub use print::PrintLevel;
pub use sparse::{CoordMatrix, CsrMatrix};
pub use traits::{MatrixElement, MatrixStorage};
pub use validation::check_compressed;
pub use variant::AnyMatrix;
