//! Input/output helpers.
//!
//! - fit JSON read/write (`curve`)
//! - atmosphere table CSV export (`export`)

pub mod curve;
pub mod export;

pub use curve::*;
pub use export::*;
