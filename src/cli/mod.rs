//! Command-line parsing for the standard-atmosphere fitter.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the modeling/math code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "atmofit",
    version,
    about = "Closed-form fits of the 1976 U.S. Standard Atmosphere"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sample the atmosphere, fit both closed forms, print the report, and
    /// optionally export results.
    Fit(FitArgs),
    /// Print the sampled atmosphere table (no fitting).
    Table(TableArgs),
}

/// Options for fitting.
#[derive(Debug, Parser, Clone)]
pub struct FitArgs {
    /// Maximum geometric altitude of the sampling grid (m).
    #[arg(long, default_value_t = 40_000.0)]
    pub max_altitude: f64,

    /// Grid step (m).
    #[arg(long, default_value_t = 50.0)]
    pub step: f64,

    /// Temperature polynomial degree.
    #[arg(long, default_value_t = 6)]
    pub degree: usize,

    /// Initial guess `a b c d` for the pressure exponential fit.
    ///
    /// The built-in default is calibrated to the default grid; changing the
    /// grid without changing the guess may not converge.
    #[arg(long, num_args = 4, allow_negative_numbers = true, value_names = ["A", "B", "C", "D"])]
    pub guess: Option<Vec<f64>>,

    /// Iteration cap for the exponential fit.
    #[arg(long, default_value_t = 200)]
    pub max_iterations: usize,

    /// Convergence tolerance for the exponential fit.
    #[arg(long, default_value_t = 1e-9)]
    pub tolerance: f64,

    /// Export both fits (models + statistics + fitted grid) to JSON.
    #[arg(long = "export-curve")]
    pub export_curve: Option<PathBuf>,

    /// Export the sampled atmosphere table to CSV.
    #[arg(long = "export-table")]
    pub export_table: Option<PathBuf>,
}

/// Options for printing the atmosphere table.
#[derive(Debug, Parser)]
pub struct TableArgs {
    /// Maximum geometric altitude (m).
    #[arg(long, default_value_t = 40_000.0)]
    pub max_altitude: f64,

    /// Grid step (m).
    #[arg(long, default_value_t = 1_000.0)]
    pub step: f64,

    /// Export the table to CSV instead of printing it.
    #[arg(long)]
    pub export: Option<PathBuf>,
}
