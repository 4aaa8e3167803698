//! Shared trait surface: element scalars and the storage contract.

pub mod element;
pub mod matrix;

pub use element::MatrixElement;
pub use matrix::MatrixStorage;
