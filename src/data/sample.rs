//! Fixed-step altitude grid sampling of the standard atmosphere.
//!
//! The fitters consume plain `(x, y)` arrays; this module owns the sampled
//! table and exposes those arrays as projections so the fit input contract
//! lives in one place.

use serde::{Deserialize, Serialize};

use crate::atmosphere::{AtmosphereSample, StandardAtmosphere};
use crate::error::AppError;

/// Altitude grid specification: `0, step, 2*step, ..., max` (geometric m).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    pub max_altitude_m: f64,
    pub step_m: f64,
}

impl GridSpec {
    /// Number of grid points: `floor(max/step) + 1`.
    pub fn len(&self) -> usize {
        (self.max_altitude_m / self.step_m).floor() as usize + 1
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if !(self.step_m.is_finite() && self.step_m > 0.0) {
            return Err(AppError::InvalidGrid(format!(
                "step must be finite and > 0, got {}",
                self.step_m
            )));
        }
        if !(self.max_altitude_m.is_finite() && self.max_altitude_m >= 0.0) {
            return Err(AppError::InvalidGrid(format!(
                "max altitude must be finite and >= 0, got {}",
                self.max_altitude_m
            )));
        }
        Ok(())
    }
}

/// An ordered set of atmosphere samples sharing one grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet {
    pub spec: GridSpec,
    samples: Vec<AtmosphereSample>,
}

impl SampleSet {
    pub fn samples(&self) -> &[AtmosphereSample] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn altitudes_m(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.altitude_m).collect()
    }

    pub fn temperatures_k(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.temperature_k).collect()
    }

    pub fn pressures_pa(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.pressure_pa).collect()
    }

    pub fn densities_kg_m3(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.density_kg_m3).collect()
    }

    pub fn speeds_of_sound_m_s(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.speed_of_sound_m_s).collect()
    }
}

/// Sample the atmosphere across the grid.
///
/// Domain errors from the atmosphere propagate unchanged; for a grid whose
/// `max_altitude_m` sits inside the model domain they cannot occur.
pub fn generate_samples(
    atmosphere: &StandardAtmosphere,
    spec: &GridSpec,
) -> Result<SampleSet, AppError> {
    spec.validate()?;

    let n = spec.len();
    let mut samples = Vec::with_capacity(n);
    for i in 0..n {
        samples.push(atmosphere.evaluate(i as f64 * spec.step_m)?);
    }

    Ok(SampleSet {
        spec: *spec,
        samples,
    })
}
