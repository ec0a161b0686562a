//! Mathematical utilities: polynomial evaluation and least-squares solves.

pub mod ols;
pub mod poly;

pub use ols::*;
pub use poly::*;
