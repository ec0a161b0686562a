//! Closed-form fit model implementations.
//!
//! Models are small, pure value types so that fitting and reporting code can
//! stay generic over the `FitModel` variants.

pub mod model;

pub use model::*;
