//! Layer definitions for the 1976 U.S. Standard Atmosphere.
//!
//! The model partitions the atmosphere by *geopotential* altitude into
//! layers of constant temperature lapse rate. Only the base altitude and
//! lapse rate are primary data; each layer's base temperature and pressure
//! follow from integrating the hydrostatic equation upward from sea level.
//! We do that chaining once at construction so that per-query evaluation
//! touches a single layer.

/// Sea-level gravitational acceleration (m/s^2).
pub const G0: f64 = 9.80665;

/// Specific gas constant for dry air (J/(kg*K)).
pub const R_SPECIFIC: f64 = 287.0528;

/// Heat capacity ratio for air.
pub const GAMMA: f64 = 1.4;

/// Effective Earth radius used for the geopotential conversion (m).
pub const EARTH_RADIUS_M: f64 = 6_356_766.0;

/// Sea-level base temperature (K).
pub const SEA_LEVEL_TEMPERATURE_K: f64 = 288.15;

/// Sea-level base pressure (Pa).
pub const SEA_LEVEL_PRESSURE_PA: f64 = 101_325.0;

/// Top of the defined layer stack, geopotential (m).
pub const TOP_GEOPOTENTIAL_M: f64 = 84_852.0;

/// Primary layer data: base geopotential altitude (m) and lapse rate (K/m).
pub const LAYER_BASES: [(f64, f64); 7] = [
    (0.0, -0.0065),     // troposphere
    (11_000.0, 0.0),    // tropopause (isothermal)
    (20_000.0, 0.001),  // lower stratosphere
    (32_000.0, 0.0028), // upper stratosphere
    (47_000.0, 0.0),    // stratopause (isothermal)
    (51_000.0, -0.0028),// lower mesosphere
    (71_000.0, -0.002), // upper mesosphere
];

/// A single layer with its chained base state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Layer {
    /// Base geopotential altitude (m).
    pub base_m: f64,
    /// Temperature lapse rate (K/m); zero for isothermal layers.
    pub lapse_k_per_m: f64,
    /// Temperature at the layer base (K).
    pub base_temperature_k: f64,
    /// Pressure at the layer base (Pa).
    pub base_pressure_pa: f64,
}

impl Layer {
    /// Temperature at geopotential altitude `h` within this layer.
    pub fn temperature_k(&self, h: f64) -> f64 {
        self.base_temperature_k + self.lapse_k_per_m * (h - self.base_m)
    }

    /// Pressure at geopotential altitude `h` within this layer.
    ///
    /// Hydrostatic equation, integrated with constant lapse rate: a power
    /// law in `T/T_base` for non-zero lapse, an exponential for isothermal
    /// layers.
    pub fn pressure_pa(&self, h: f64) -> f64 {
        if self.lapse_k_per_m == 0.0 {
            self.base_pressure_pa
                * (-G0 * (h - self.base_m) / (R_SPECIFIC * self.base_temperature_k)).exp()
        } else {
            let t = self.temperature_k(h);
            self.base_pressure_pa
                * (t / self.base_temperature_k).powf(-G0 / (self.lapse_k_per_m * R_SPECIFIC))
        }
    }
}

/// Build the full layer table, chaining each layer's exit state into the
/// next layer's base state.
pub fn build_layers() -> Vec<Layer> {
    let mut layers = Vec::with_capacity(LAYER_BASES.len());
    let (base0, lapse0) = LAYER_BASES[0];
    layers.push(Layer {
        base_m: base0,
        lapse_k_per_m: lapse0,
        base_temperature_k: SEA_LEVEL_TEMPERATURE_K,
        base_pressure_pa: SEA_LEVEL_PRESSURE_PA,
    });

    for &(base_m, lapse_k_per_m) in &LAYER_BASES[1..] {
        let below = *layers.last().unwrap();
        layers.push(Layer {
            base_m,
            lapse_k_per_m,
            base_temperature_k: below.temperature_k(base_m),
            base_pressure_pa: below.pressure_pa(base_m),
        });
    }

    layers
}
