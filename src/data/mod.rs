//! Sample generation: driving the atmosphere model across an altitude grid.

pub mod sample;

pub use sample::*;
