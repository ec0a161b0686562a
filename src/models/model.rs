//! Model evaluation for the two closed-form shapes.
//!
//! Only two model shapes exist, so they are an explicit tagged enum chosen
//! by the caller at construction time; there is no runtime model registry.

use serde::{Deserialize, Serialize};

use crate::math::horner;

/// Two-term exponential: `a*exp(b*x) + c*exp(d*x)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExpModel {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl ExpModel {
    pub fn predict(&self, x: f64) -> f64 {
        self.a * (self.b * x).exp() + self.c * (self.d * x).exp()
    }

    pub fn params(&self) -> [f64; 4] {
        [self.a, self.b, self.c, self.d]
    }

    pub fn from_params(p: [f64; 4]) -> Self {
        Self {
            a: p[0],
            b: p[1],
            c: p[2],
            d: p[3],
        }
    }
}

/// Polynomial with coefficients ordered highest degree first, evaluated by
/// Horner's rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolyModel {
    pub coeffs: Vec<f64>,
}

impl PolyModel {
    pub fn degree(&self) -> usize {
        self.coeffs.len().saturating_sub(1)
    }

    pub fn predict(&self, x: f64) -> f64 {
        horner(&self.coeffs, x)
    }
}

/// A fitted closed-form model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FitModel {
    Exponential(ExpModel),
    Polynomial(PolyModel),
}

impl FitModel {
    pub fn predict(&self, x: f64) -> f64 {
        match self {
            FitModel::Exponential(m) => m.predict(x),
            FitModel::Polynomial(m) => m.predict(x),
        }
    }

    /// Number of free parameters of the model shape.
    pub fn param_count(&self) -> usize {
        match self {
            FitModel::Exponential(_) => 4,
            FitModel::Polynomial(m) => m.coeffs.len(),
        }
    }
}
