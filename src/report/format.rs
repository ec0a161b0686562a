//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the math/fitting code stays clean and testable
//! - output changes are localized (important for future snapshot tests)
//!
//! Coefficients print in 6-digit exponential notation, the conventional
//! format for quoting these fits.

use crate::app::pipeline::RunOutput;
use crate::data::SampleSet;
use crate::domain::{FitConfig, Goodness};

/// Format the full run summary (grid stats + both fits + warnings).
pub fn format_run_summary(run: &RunOutput, config: &FitConfig) -> String {
    let mut out = String::new();

    out.push_str("=== atmofit - Standard Atmosphere Closed-Form Fits ===\n");
    out.push_str(&format!(
        "Grid: 0..{} m, step {} m (n={})\n",
        config.grid.max_altitude_m,
        config.grid.step_m,
        run.samples.len()
    ));

    out.push_str("\nPressure: p(z) = a*exp(b*z) + c*exp(d*z)\n");
    let m = &run.pressure.model;
    out.push_str(&format!("  a = {:>13.6e}\n", m.a));
    out.push_str(&format!("  b = {:>13.6e}\n", m.b));
    out.push_str(&format!("  c = {:>13.6e}\n", m.c));
    out.push_str(&format!("  d = {:>13.6e}\n", m.d));
    out.push_str(&format_goodness(&run.pressure.goodness));
    if run.pressure.converged {
        out.push_str(&format!(
            "  converged in {} iterations\n",
            run.pressure.iterations
        ));
    } else {
        out.push_str(&format!(
            "  WARNING: did not converge within {} iterations; coefficients are the best found\n",
            run.pressure.iterations
        ));
    }

    out.push_str(&format!(
        "\nTemperature: degree-{} polynomial, highest degree first\n",
        run.temperature.model.degree()
    ));
    for (i, c) in run.temperature.model.coeffs.iter().enumerate() {
        out.push_str(&format!("  p{} = {:>13.6e}\n", i + 1, c));
    }
    out.push_str(&format_goodness(&run.temperature.goodness));
    if run.temperature.ill_conditioned {
        out.push_str(&format!(
            "  WARNING: ill-conditioned design matrix (cond = {:.3e}); coefficients may be degraded\n",
            run.temperature.condition
        ));
    }

    out
}

fn format_goodness(g: &Goodness) -> String {
    format!(
        "  SSE={:.6e}  RMSE={:.6e}  R^2={:.6}  adjR^2={:.6}  DFE={}\n",
        g.sse, g.rmse, g.rsquare, g.adjrsquare, g.dfe
    )
}

/// Format the sampled atmosphere table (fixed-width columns).
pub fn format_table(samples: &SampleSet) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:>12} {:>12} {:>10} {:>14} {:>12}\n",
        "altitude_m", "temp_K", "sound_m_s", "pressure_Pa", "rho_kg_m3"
    ));
    for s in samples.samples() {
        out.push_str(&format!(
            "{:>12.1} {:>12.3} {:>10.3} {:>14.3} {:>12.6}\n",
            s.altitude_m, s.temperature_k, s.speed_of_sound_m_s, s.pressure_pa, s.density_kg_m3
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::atmosphere::StandardAtmosphere;
    use crate::data::{GridSpec, generate_samples};

    #[test]
    fn table_has_one_row_per_sample_plus_header() {
        let atm = StandardAtmosphere::new();
        let set = generate_samples(
            &atm,
            &GridSpec {
                max_altitude_m: 2_000.0,
                step_m: 500.0,
            },
        )
        .unwrap();
        let text = format_table(&set);
        assert_eq!(text.lines().count(), set.len() + 1);
        assert!(text.contains("pressure_Pa"));
    }

    #[test]
    fn goodness_line_contains_all_statistics() {
        let g = Goodness {
            sse: 1.0,
            rsquare: 0.5,
            dfe: 3,
            adjrsquare: 0.25,
            rmse: 0.1,
        };
        let line = format_goodness(&g);
        for needle in ["SSE=", "RMSE=", "R^2=", "adjR^2=", "DFE=3"] {
            assert!(line.contains(needle), "missing {needle} in {line}");
        }
    }
}
