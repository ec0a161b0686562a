//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main"
//! that:
//! - parses CLI arguments
//! - runs the sampling + fitting pipeline
//! - prints the report
//! - writes optional exports

use clap::Parser;

use crate::atmosphere::StandardAtmosphere;
use crate::cli::{Command, FitArgs, TableArgs};
use crate::data::{GridSpec, generate_samples};
use crate::domain::{FitConfig, REFERENCE_PRESSURE_GUESS};
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `atmofit` binary.
pub fn run() -> Result<(), AppError> {
    // We want a bare `atmofit` (or `atmofit --step 100`) to behave like
    // `atmofit fit ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite
    // of the argv list before parsing. This preserves a clean clap
    // structure while keeping the common invocation short.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Fit(args) => handle_fit(args),
        Command::Table(args) => handle_table(args),
    }
}

fn handle_fit(args: FitArgs) -> Result<(), AppError> {
    let config = fit_config_from_args(&args)?;
    let run = pipeline::run_fit(&config)?;

    println!("{}", crate::report::format_run_summary(&run, &config));

    if let Some(path) = &config.export_curve {
        crate::io::write_fit_json(path, &run, &config)?;
    }
    if let Some(path) = &config.export_table {
        crate::io::write_table_csv(path, &run.samples)?;
    }

    Ok(())
}

fn handle_table(args: TableArgs) -> Result<(), AppError> {
    let atmosphere = StandardAtmosphere::new();
    let samples = generate_samples(
        &atmosphere,
        &GridSpec {
            max_altitude_m: args.max_altitude,
            step_m: args.step,
        },
    )?;

    match &args.export {
        Some(path) => crate::io::write_table_csv(path, &samples)?,
        None => print!("{}", crate::report::format_table(&samples)),
    }

    Ok(())
}

pub fn fit_config_from_args(args: &FitArgs) -> Result<FitConfig, AppError> {
    let pressure_guess = match &args.guess {
        None => REFERENCE_PRESSURE_GUESS,
        // Clap enforces the arity for CLI use; library callers can pass
        // anything, so check again.
        Some(values) => <[f64; 4]>::try_from(values.as_slice()).map_err(|_| {
            AppError::InvalidArgument(format!(
                "--guess requires exactly four values, got {}",
                values.len()
            ))
        })?,
    };

    Ok(FitConfig {
        grid: GridSpec {
            max_altitude_m: args.max_altitude,
            step_m: args.step,
        },
        degree: args.degree,
        pressure_guess,
        max_iterations: args.max_iterations,
        tolerance: args.tolerance,
        export_curve: args.export_curve.clone(),
        export_table: args.export_table.clone(),
    })
}

/// Rewrite argv so `atmofit` defaults to `atmofit fit`.
///
/// Rules:
/// - `atmofit`                     -> `atmofit fit`
/// - `atmofit --step 100 ...`      -> `atmofit fit --step 100 ...`
/// - `atmofit --help/--version`    -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("fit".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "fit" | "table");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "fit flags".
    if arg1.starts_with('-') {
        argv.insert(1, "fit".to_string());
        return argv;
    }

    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_fit() {
        assert_eq!(rewrite_args(argv(&["atmofit"])), argv(&["atmofit", "fit"]));
        assert_eq!(
            rewrite_args(argv(&["atmofit", "--step", "100"])),
            argv(&["atmofit", "fit", "--step", "100"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(argv(&["atmofit", "table"])),
            argv(&["atmofit", "table"])
        );
        assert_eq!(
            rewrite_args(argv(&["atmofit", "--help"])),
            argv(&["atmofit", "--help"])
        );
    }

    #[test]
    fn guess_override_is_applied() {
        let args = FitArgs {
            max_altitude: 40_000.0,
            step: 50.0,
            degree: 6,
            guess: Some(vec![1.0, -2.0, 3.0, -4.0]),
            max_iterations: 200,
            tolerance: 1e-9,
            export_curve: None,
            export_table: None,
        };
        let config = fit_config_from_args(&args).unwrap();
        assert_eq!(config.pressure_guess, [1.0, -2.0, 3.0, -4.0]);
    }
}
