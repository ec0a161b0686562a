//! Least-squares solver.
//!
//! Both fitters reduce to small dense linear solves:
//!
//! - the polynomial fit is one ordinary least-squares problem on a
//!   Vandermonde design matrix
//! - each Levenberg-Marquardt step solves the damped normal equations
//!
//! Implementation choices:
//! - We use SVD to solve the least-squares problem robustly even when the
//!   design matrix is tall (more rows than columns). Nalgebra's `QR::solve`
//!   is intended for square systems and will panic for non-square matrices.
//! - High-degree power bases produce nearly collinear columns when the
//!   inputs are not centered/scaled, so we try progressively looser
//!   tolerances before giving up.
//! - Parameter dimensions are tiny (4-7 columns), so SVD cost is negligible
//!   next to sample generation.

use nalgebra::{DMatrix, DVector};

/// Solve a least-squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if the strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// 2-norm condition number of a matrix (largest over smallest singular
/// value). Infinite for rank-deficient matrices.
pub fn condition_number(x: &DMatrix<f64>) -> f64 {
    let sv = x.clone().svd(false, false).singular_values;
    let max = sv.iter().cloned().fold(0.0_f64, f64::max);
    let min = sv.iter().cloned().fold(f64::INFINITY, f64::min);
    if min <= 0.0 {
        return f64::INFINITY;
    }
    max / min
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn least_squares_solves_simple_system() {
        // Fit y = 2 + 3x on x = [0,1,2]
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, 1.0, 1.0, 1.0, 2.0]);
        let y = DVector::from_row_slice(&[2.0, 5.0, 8.0]);

        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 2.0).abs() < 1e-10);
        assert!((beta[1] - 3.0).abs() < 1e-10);
    }

    #[test]
    fn least_squares_overdetermined() {
        // y = 1 + 0.5x with one point off the line; residuals split evenly.
        let x = DMatrix::from_row_slice(4, 2, &[1.0, 0.0, 1.0, 2.0, 1.0, 4.0, 1.0, 6.0]);
        let y = DVector::from_row_slice(&[1.0, 2.0, 3.0, 4.0]);
        let beta = solve_least_squares(&x, &y).unwrap();
        assert!((beta[0] - 1.0).abs() < 1e-10);
        assert!((beta[1] - 0.5).abs() < 1e-10);
    }

    #[test]
    fn condition_number_of_orthogonal_columns_is_one() {
        let x = DMatrix::from_row_slice(2, 2, &[1.0, 0.0, 0.0, 1.0]);
        assert!((condition_number(&x) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn condition_number_rank_deficient_is_infinite() {
        // Two identical columns.
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 1.0, 2.0, 2.0, 3.0, 3.0]);
        assert!(condition_number(&x).is_infinite());
    }
}
