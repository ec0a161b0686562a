//! Standard-atmosphere evaluation at a geometric altitude.

use serde::{Deserialize, Serialize};

use crate::atmosphere::layers::{
    self, EARTH_RADIUS_M, GAMMA, Layer, R_SPECIFIC, TOP_GEOPOTENTIAL_M,
};
use crate::error::AppError;

/// Physical quantities at one altitude. Immutable once computed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereSample {
    /// Geometric altitude the sample was evaluated at (m).
    pub altitude_m: f64,
    pub temperature_k: f64,
    pub speed_of_sound_m_s: f64,
    pub pressure_pa: f64,
    pub density_kg_m3: f64,
}

/// Piecewise-layer standard atmosphere.
///
/// Construction chains the per-layer base states once; `evaluate` then only
/// touches the layer containing the query altitude.
#[derive(Debug, Clone)]
pub struct StandardAtmosphere {
    layers: Vec<Layer>,
}

impl Default for StandardAtmosphere {
    fn default() -> Self {
        Self::new()
    }
}

impl StandardAtmosphere {
    pub fn new() -> Self {
        Self {
            layers: layers::build_layers(),
        }
    }

    /// Convert geometric altitude to geopotential altitude.
    pub fn geopotential_m(altitude_m: f64) -> f64 {
        EARTH_RADIUS_M * altitude_m / (EARTH_RADIUS_M + altitude_m)
    }

    /// Highest geometric altitude inside the model domain (exclusive).
    pub fn max_geometric_m() -> f64 {
        // Invert h = R*z/(R+z) at the top geopotential boundary.
        EARTH_RADIUS_M * TOP_GEOPOTENTIAL_M / (EARTH_RADIUS_M - TOP_GEOPOTENTIAL_M)
    }

    /// Evaluate temperature, speed of sound, pressure, and density at a
    /// geometric altitude (m).
    ///
    /// Fails with a domain error below sea level or at/above the top of the
    /// defined layer stack (geopotential 84 852 m). An altitude exactly at a
    /// layer boundary belongs to the layer starting there.
    pub fn evaluate(&self, altitude_m: f64) -> Result<AtmosphereSample, AppError> {
        if !altitude_m.is_finite() || altitude_m < 0.0 {
            return Err(AppError::Domain { altitude_m });
        }
        let h = Self::geopotential_m(altitude_m);
        if h >= TOP_GEOPOTENTIAL_M {
            return Err(AppError::Domain { altitude_m });
        }

        // Last layer whose base is at or below h. Linear scan: the table has
        // seven entries, ordered by base altitude.
        let layer = self
            .layers
            .iter()
            .rev()
            .find(|l| h >= l.base_m)
            .ok_or(AppError::Domain { altitude_m })?;

        let temperature_k = layer.temperature_k(h);
        let pressure_pa = layer.pressure_pa(h);
        let density_kg_m3 = pressure_pa / (R_SPECIFIC * temperature_k);
        let speed_of_sound_m_s = (GAMMA * R_SPECIFIC * temperature_k).sqrt();

        Ok(AtmosphereSample {
            altitude_m,
            temperature_k,
            speed_of_sound_m_s,
            pressure_pa,
            density_kg_m3,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sea_level_reference_state() {
        let atm = StandardAtmosphere::new();
        let s = atm.evaluate(0.0).unwrap();
        assert!((s.temperature_k - 288.15).abs() < 1e-9);
        assert!((s.pressure_pa - 101_325.0).abs() < 1e-9);
        assert!((s.speed_of_sound_m_s - 340.294).abs() < 1e-3);
        assert!((s.density_kg_m3 - 1.225).abs() < 1e-3);
    }

    #[test]
    fn tropopause_boundary_temperature() {
        // Geometric altitude whose geopotential equivalent is exactly 11 km.
        let z = EARTH_RADIUS_M * 11_000.0 / (EARTH_RADIUS_M - 11_000.0);
        let atm = StandardAtmosphere::new();
        let s = atm.evaluate(z).unwrap();
        assert!((s.temperature_k - 216.65).abs() < 1e-9);
        assert!((s.pressure_pa - 22_632.0).abs() < 1.0);

        // The boundary belongs to the isothermal layer starting there, so a
        // touch above it the temperature must not keep falling.
        let above = atm.evaluate(z + 100.0).unwrap();
        assert!((above.temperature_k - 216.65).abs() < 1e-9);
    }

    #[test]
    fn pressure_strictly_decreasing() {
        let atm = StandardAtmosphere::new();
        let mut prev = f64::INFINITY;
        for i in 0..=800 {
            let p = atm.evaluate(i as f64 * 50.0).unwrap().pressure_pa;
            assert!(p < prev, "pressure not strictly decreasing at {} m", i * 50);
            prev = p;
        }
    }

    #[test]
    fn domain_errors_outside_layer_stack() {
        let atm = StandardAtmosphere::new();
        assert!(matches!(
            atm.evaluate(-1.0),
            Err(AppError::Domain { .. })
        ));
        assert!(matches!(
            atm.evaluate(90_000.0),
            Err(AppError::Domain { .. })
        ));
        // Just below the top boundary still evaluates.
        assert!(atm.evaluate(StandardAtmosphere::max_geometric_m() - 1.0).is_ok());
    }

    #[test]
    fn upper_stratosphere_warms() {
        // Positive lapse above 20 km geopotential.
        let atm = StandardAtmosphere::new();
        let lo = atm.evaluate(25_000.0).unwrap();
        let hi = atm.evaluate(35_000.0).unwrap();
        assert!(hi.temperature_k > lo.temperature_k);
    }

    #[test]
    fn density_consistent_with_ideal_gas() {
        let atm = StandardAtmosphere::new();
        let s = atm.evaluate(12_345.0).unwrap();
        let rho = s.pressure_pa / (R_SPECIFIC * s.temperature_k);
        assert!((s.density_kg_m3 - rho).abs() < 1e-12);
    }
}
