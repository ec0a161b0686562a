//! `atmofit` library crate.
//!
//! Generates a reference table of 1976 U.S. Standard Atmosphere properties
//! over an altitude grid, then condenses it into two compact closed-form
//! approximations: a two-term exponential for pressure and a degree-6
//! polynomial for temperature.
//!
//! The binary (`atmofit`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., embedded table generation, notebooks)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod atmosphere;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod models;
pub mod report;
