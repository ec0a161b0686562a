//! Linear least-squares fit of a polynomial model.
//!
//! Ordinary least squares on a Vandermonde design matrix. Raw altitudes up
//! to 40 000 m make a degree-6 power basis hopelessly ill-conditioned, so
//! the fit is performed on the centered/scaled variable
//! `z = (x - mean) / std` and the coefficients are expanded back to raw `x`
//! afterwards (`math::poly::unscale_coeffs`). The scaling is enforced here
//! rather than left to callers.
//!
//! A high design-matrix condition number is reported as an
//! `ill_conditioned` flag on the (possibly degraded) result rather than a
//! failure, since the solve still produces an answer.

use nalgebra::{DMatrix, DVector};

use crate::domain::Goodness;
use crate::error::AppError;
use crate::fit::goodness_of_fit;
use crate::math::{condition_number, solve_least_squares, unscale_coeffs};
use crate::models::PolyModel;

/// Condition numbers above this mark the fit as ill-conditioned.
const CONDITION_LIMIT: f64 = 1e10;

/// Result of a polynomial fit.
#[derive(Debug, Clone)]
pub struct PolyFit {
    pub model: PolyModel,
    pub goodness: Goodness,
    /// Set when the design matrix condition number exceeds the limit; the
    /// coefficients are still returned but may be degraded.
    pub ill_conditioned: bool,
    /// Condition number of the (scaled) design matrix.
    pub condition: f64,
}

/// Fit a degree-`degree` polynomial to the samples.
///
/// Requires `degree + 2` points: one per coefficient plus at least one
/// residual degree of freedom, so the reported statistics are always
/// defined.
pub fn fit_polynomial(xs: &[f64], ys: &[f64], degree: usize) -> Result<PolyFit, AppError> {
    if xs.len() != ys.len() {
        return Err(AppError::MismatchedSamples {
            xs: xs.len(),
            ys: ys.len(),
        });
    }
    let n_params = degree + 1;
    let needed = n_params + 1;
    if xs.len() < needed {
        return Err(AppError::InsufficientData {
            needed,
            got: xs.len(),
        });
    }

    let n = xs.len();

    // Center and scale the regressor. A zero spread (all x equal) leaves a
    // rank-one design matrix; the scale fallback keeps the arithmetic
    // finite and the condition number flags the degeneracy.
    let mean = xs.iter().sum::<f64>() / n as f64;
    let var = xs.iter().map(|x| (x - mean) * (x - mean)).sum::<f64>() / n as f64;
    let scale = if var > 0.0 { var.sqrt() } else { 1.0 };

    // Columns ordered highest degree first: [z^d, ..., z, 1].
    let mut design = DMatrix::<f64>::zeros(n, n_params);
    for (i, &x) in xs.iter().enumerate() {
        let z = (x - mean) / scale;
        let mut pow = 1.0;
        for j in (0..n_params).rev() {
            design[(i, j)] = pow;
            pow *= z;
        }
    }
    let y = DVector::from_column_slice(ys);

    let condition = condition_number(&design);
    let ill_conditioned = !condition.is_finite() || condition > CONDITION_LIMIT;

    let beta = solve_least_squares(&design, &y).ok_or_else(|| {
        AppError::LeastSquares("polynomial design matrix could not be solved".to_string())
    })?;

    let scaled: Vec<f64> = beta.iter().copied().collect();
    let model = PolyModel {
        coeffs: unscale_coeffs(&scaled, mean, scale),
    };

    let residuals: Vec<f64> = xs
        .iter()
        .zip(ys)
        .map(|(&x, &yv)| yv - model.predict(x))
        .collect();
    let goodness = goodness_of_fit(&residuals, ys, n_params);

    Ok(PolyFit {
        model,
        goodness,
        ill_conditioned,
        condition,
    })
}
