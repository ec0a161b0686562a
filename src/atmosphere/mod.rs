//! 1976 U.S. Standard Atmosphere evaluator.
//!
//! - `layers`: the static layer table and the chained base-state precompute
//! - `model`: the public evaluator (`StandardAtmosphere::evaluate`)
//!
//! The evaluator is pure: all state is the read-only layer table built once
//! at construction.

pub mod layers;
pub mod model;

pub use layers::*;
pub use model::*;
