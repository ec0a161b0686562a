//! Export the sampled atmosphere table to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream
//! scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::data::SampleSet;
use crate::error::AppError;

/// Write the atmosphere table to a CSV file.
pub fn write_table_csv(path: &Path, samples: &SampleSet) -> Result<(), AppError> {
    let mut file = File::create(path).map_err(|e| {
        AppError::Io(format!("Failed to create export CSV '{}': {e}", path.display()))
    })?;

    writeln!(
        file,
        "altitude_m,temperature_k,speed_of_sound_m_s,pressure_pa,density_kg_m3"
    )
    .map_err(|e| AppError::Io(format!("Failed to write export CSV header: {e}")))?;

    for s in samples.samples() {
        writeln!(
            file,
            "{:.3},{:.6},{:.6},{:.6},{:.9}",
            s.altitude_m, s.temperature_k, s.speed_of_sound_m_s, s.pressure_pa, s.density_kg_m3
        )
        .map_err(|e| AppError::Io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}
