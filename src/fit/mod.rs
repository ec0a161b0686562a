//! Least-squares fitting of the closed-form models.
//!
//! - `exponential`: damped Gauss-Newton (Levenberg-Marquardt) fit of the
//!   two-term exponential pressure model
//! - `polynomial`: linear least-squares fit of the temperature polynomial
//!
//! Both fitters return their model together with goodness-of-fit statistics
//! computed here from the final residuals.

pub mod exponential;
pub mod polynomial;

pub use exponential::*;
pub use polynomial::*;

use crate::domain::Goodness;

/// Compute goodness-of-fit statistics from final residuals.
///
/// `n_params` is the number of free model parameters. Degenerate
/// denominators (no residual degrees of freedom, constant observations)
/// yield NaN statistics rather than panicking; the fitters' sample-count
/// guards keep those out of normal runs.
pub fn goodness_of_fit(residuals: &[f64], ys: &[f64], n_params: usize) -> Goodness {
    let n = residuals.len();
    let dfe = n.saturating_sub(n_params);

    let sse: f64 = residuals.iter().map(|r| r * r).sum();

    let mean = ys.iter().sum::<f64>() / n as f64;
    let sst: f64 = ys.iter().map(|y| (y - mean) * (y - mean)).sum();

    let rsquare = if sst > 0.0 { 1.0 - sse / sst } else { f64::NAN };
    let rmse = if dfe > 0 {
        (sse / dfe as f64).sqrt()
    } else {
        f64::NAN
    };
    let adjrsquare = if dfe > 0 && sst > 0.0 {
        1.0 - (1.0 - rsquare) * (n as f64 - 1.0) / dfe as f64
    } else {
        f64::NAN
    };

    Goodness {
        sse,
        rsquare,
        dfe,
        adjrsquare,
        rmse,
    }
}
