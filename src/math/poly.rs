//! Polynomial helpers: Horner evaluation and scaled-basis expansion.
//!
//! The polynomial fitter solves in a centered/scaled variable
//! `z = (x - mean) / scale` to keep the Vandermonde matrix well-conditioned,
//! but callers want coefficients in the raw variable. `unscale_coeffs`
//! performs the change of variable exactly (polynomial composition with the
//! affine map), so the returned coefficients evaluate identically to the
//! scaled-basis fit up to rounding.
//!
//! Coefficients are ordered highest degree first throughout, matching the
//! conventional `p1*x^n + ... + pn*x + p(n+1)` printout.

/// Evaluate a polynomial by Horner's rule.
///
/// `coeffs` is highest degree first; an empty slice evaluates to zero.
pub fn horner(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().fold(0.0, |acc, &c| acc * x + c)
}

/// Expand coefficients fitted on `z = (x - mean) / scale` into coefficients
/// on raw `x`.
///
/// Both input and output are highest degree first and have equal length.
pub fn unscale_coeffs(scaled: &[f64], mean: f64, scale: f64) -> Vec<f64> {
    let p = scaled.len();
    if p == 0 {
        return Vec::new();
    }

    // Work lowest-degree-first: accumulate c_k * ((x - mean)/scale)^k by
    // keeping a running polynomial for the k-th power of the affine map.
    let mut raw = vec![0.0; p];
    let mut power = vec![1.0]; // ((x - mean)/scale)^0
    let affine = [-mean / scale, 1.0 / scale];

    for (k, &c) in scaled.iter().rev().enumerate() {
        for (j, &v) in power.iter().enumerate() {
            raw[j] += c * v;
        }
        if k + 1 < p {
            let mut next = vec![0.0; power.len() + 1];
            for (j, &v) in power.iter().enumerate() {
                next[j] += v * affine[0];
                next[j + 1] += v * affine[1];
            }
            power = next;
        }
    }

    raw.reverse();
    raw
}
