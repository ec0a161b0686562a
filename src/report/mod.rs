//! Reporting utilities: formatted terminal output for fits and tables.

pub mod format;

pub use format::*;
