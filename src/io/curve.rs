//! Read/write fit JSON files.
//!
//! Fit JSON is the "portable" representation of a run:
//! - both fitted models with their coefficients
//! - goodness-of-fit statistics and any warnings
//! - a precomputed fitted grid for quick downstream plotting
//!
//! The schema is defined by `domain::FitFile`.

use std::fs::File;
use std::path::Path;

use crate::app::pipeline::RunOutput;
use crate::domain::{CurveGrid, FitConfig, FitFile, FitRecord};
use crate::error::AppError;
use crate::models::FitModel;

/// Write a fit JSON file.
pub fn write_fit_json(path: &Path, run: &RunOutput, config: &FitConfig) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| {
        AppError::Io(format!("Failed to create fit JSON '{}': {e}", path.display()))
    })?;

    let pressure_warning = (!run.pressure.converged).then(|| {
        format!(
            "exponential fit did not converge within {} iterations",
            run.pressure.iterations
        )
    });
    let temperature_warning = run.temperature.ill_conditioned.then(|| {
        format!(
            "ill-conditioned design matrix (cond = {:.3e})",
            run.temperature.condition
        )
    });

    let fit_file = FitFile {
        tool: "atmofit".to_string(),
        grid: config.grid,
        pressure: FitRecord {
            model: FitModel::Exponential(run.pressure.model),
            goodness: run.pressure.goodness,
            warning: pressure_warning,
            grid: build_grid(
                &FitModel::Exponential(run.pressure.model),
                config.grid.max_altitude_m,
                101,
            ),
        },
        temperature: FitRecord {
            model: FitModel::Polynomial(run.temperature.model.clone()),
            goodness: run.temperature.goodness,
            warning: temperature_warning,
            grid: build_grid(
                &FitModel::Polynomial(run.temperature.model.clone()),
                config.grid.max_altitude_m,
                101,
            ),
        },
    };

    serde_json::to_writer_pretty(file, &fit_file)
        .map_err(|e| AppError::Io(format!("Failed to write fit JSON: {e}")))?;

    Ok(())
}

/// Read a fit JSON file.
pub fn read_fit_json(path: &Path) -> Result<FitFile, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::Io(format!("Failed to open fit JSON '{}': {e}", path.display()))
    })?;
    let fit_file: FitFile = serde_json::from_reader(file)
        .map_err(|e| AppError::Io(format!("Invalid fit JSON: {e}")))?;
    Ok(fit_file)
}

fn build_grid(model: &FitModel, max_altitude_m: f64, n: usize) -> CurveGrid {
    let n = n.max(2);
    let mut altitude_m = Vec::with_capacity(n);
    let mut y = Vec::with_capacity(n);
    for i in 0..n {
        let u = i as f64 / (n as f64 - 1.0);
        let z = u * max_altitude_m;
        altitude_m.push(z);
        y.push(model.predict(z));
    }
    CurveGrid { altitude_m, y }
}
