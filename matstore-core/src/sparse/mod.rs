//! Sparse storage variants.
//!
//! [`fixed`] holds the read-mostly compressed row form built once from
//! a file; [`coord`] holds the mutable coordinate form with explicit
//! compress/uncompress transitions between an entry map and the same
//! three-array compressed layout.

pub mod coord;
pub mod fixed;

pub use coord::CoordMatrix;
pub use fixed::CsrMatrix;
