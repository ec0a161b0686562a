//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they
//! can be:
//!
//! - used in-memory during fitting
//! - exported to JSON for downstream consumers
//! - reloaded later for comparisons

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::data::GridSpec;
use crate::models::FitModel;

/// Reference initial guess for the pressure exponential fit.
///
/// Precondition, not a tunable: this guess is calibrated to the default
/// 0-40000 m / 50 m sampling of the standard atmosphere. Convergence from
/// it is not guaranteed for other grids; callers changing the grid should
/// supply their own guess (`--guess`).
pub const REFERENCE_PRESSURE_GUESS: [f64; 4] =
    [144_450.537, -1.530_87e-4, -41_541.543, -2.164_19e-4];

/// Default polynomial degree for the temperature fit.
pub const DEFAULT_TEMPERATURE_DEGREE: usize = 6;

/// Goodness-of-fit statistics, computed once at fit time from the final
/// residuals and never mutated afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Goodness {
    /// Sum of squared errors.
    pub sse: f64,
    /// Coefficient of determination.
    pub rsquare: f64,
    /// Residual degrees of freedom (`n - p`).
    pub dfe: usize,
    /// Degrees-of-freedom-adjusted R^2.
    pub adjrsquare: f64,
    /// Root-mean-square error (`sqrt(sse/dfe)`).
    pub rmse: f64,
}

/// A full run's configuration as understood by the pipeline.
///
/// This is derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct FitConfig {
    pub grid: GridSpec,
    /// Temperature polynomial degree.
    pub degree: usize,
    /// Initial guess for the pressure exponential fit.
    pub pressure_guess: [f64; 4],
    /// Iteration cap for the exponential fit.
    pub max_iterations: usize,
    /// Convergence tolerance (relative SSE decrease / relative step norm).
    pub tolerance: f64,

    pub export_curve: Option<PathBuf>,
    pub export_table: Option<PathBuf>,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec {
                max_altitude_m: 40_000.0,
                step_m: 50.0,
            },
            degree: DEFAULT_TEMPERATURE_DEGREE,
            pressure_guess: REFERENCE_PRESSURE_GUESS,
            max_iterations: 200,
            tolerance: 1e-9,
            export_curve: None,
            export_table: None,
        }
    }
}

/// One fitted model plus its diagnostics, as exported to JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitRecord {
    pub model: FitModel,
    pub goodness: Goodness,
    /// Diagnostic carried alongside the result (non-convergence,
    /// ill-conditioning); absent for a clean fit.
    pub warning: Option<String>,
    /// Precomputed fitted grid for quick downstream plotting.
    pub grid: CurveGrid,
}

/// A saved fit file (JSON).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitFile {
    pub tool: String,
    pub grid: GridSpec,
    pub pressure: FitRecord,
    pub temperature: FitRecord,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurveGrid {
    pub altitude_m: Vec<f64>,
    pub y: Vec<f64>,
}
