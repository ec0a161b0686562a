//! Shared "fit pipeline" logic used by the CLI front-end and tests.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! grid -> atmosphere sampling -> {exponential, polynomial} fits -> outputs
//!
//! The front-end then focuses on presentation (printing, exports).

use crate::atmosphere::StandardAtmosphere;
use crate::data::{SampleSet, generate_samples};
use crate::domain::FitConfig;
use crate::error::AppError;
use crate::fit::{ExpFit, ExpFitOptions, PolyFit, fit_exponential, fit_polynomial};

/// All computed outputs of a single `atmofit fit` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub samples: SampleSet,
    /// Two-term exponential fit of pressure vs. altitude.
    pub pressure: ExpFit,
    /// Polynomial fit of temperature vs. altitude.
    pub temperature: PolyFit,
}

/// Execute the full fitting pipeline and return the computed outputs.
pub fn run_fit(config: &FitConfig) -> Result<RunOutput, AppError> {
    let atmosphere = StandardAtmosphere::new();
    let samples = generate_samples(&atmosphere, &config.grid)?;

    let xs = samples.altitudes_m();
    let pressures = samples.pressures_pa();
    let temperatures = samples.temperatures_k();

    let opts = ExpFitOptions {
        max_iterations: config.max_iterations,
        tolerance: config.tolerance,
    };

    // The two fits share no state, so they run in parallel.
    let (pressure, temperature) = rayon::join(
        || fit_exponential(&xs, &pressures, config.pressure_guess, &opts),
        || fit_polynomial(&xs, &temperatures, config.degree),
    );

    Ok(RunOutput {
        samples,
        pressure: pressure?,
        temperature: temperature?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_run_converges_with_reference_guess() {
        let run = run_fit(&FitConfig::default()).unwrap();

        // Exponential pressure fit: reference guess on the default grid
        // must converge cleanly and explain essentially all variance.
        assert!(run.pressure.converged);
        assert!(run.pressure.goodness.rsquare > 0.999);
        assert_eq!(run.pressure.goodness.dfe, 801 - 4);

        // Polynomial temperature fit: degree 6 over 0-40 km lands around
        // one kelvin of RMSE against the piecewise-linear profile.
        assert!(!run.temperature.ill_conditioned);
        assert!(run.temperature.goodness.rmse < 1.5);
        assert!(run.temperature.goodness.rsquare > 0.99);
    }

    #[test]
    fn temperature_fit_reproduces_samples_within_rmse_bound() {
        let run = run_fit(&FitConfig::default()).unwrap();
        let rmse = run.temperature.goodness.rmse;

        let mut max_abs = 0.0_f64;
        for s in run.samples.samples() {
            let r = (s.temperature_k - run.temperature.model.predict(s.altitude_m)).abs();
            max_abs = max_abs.max(r);
        }
        assert!(
            max_abs <= 5.0 * rmse,
            "max residual {max_abs} vs rmse {rmse}"
        );
    }

    #[test]
    fn pressure_model_is_positive_and_decreasing_over_the_grid() {
        let run = run_fit(&FitConfig::default()).unwrap();
        let mut prev = f64::INFINITY;
        for i in 0..=40 {
            let p = run.pressure.model.predict(i as f64 * 1_000.0);
            assert!(p > 0.0);
            assert!(p < prev);
            prev = p;
        }
    }

    #[test]
    fn invalid_grid_fails_before_fitting() {
        let config = FitConfig {
            grid: crate::data::GridSpec {
                max_altitude_m: 40_000.0,
                step_m: -1.0,
            },
            ..FitConfig::default()
        };
        assert!(matches!(run_fit(&config), Err(AppError::InvalidGrid(_))));
    }
}
