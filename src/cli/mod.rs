// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All pipeline logic is delegated to Layer 2 (application).
//
// Two commands are supported:
//   1. `curve`   — run the learning-curve experiment and plot it
//   2. `inspect` — summarise the dataset and its partitions
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

// Declare the commands submodule
pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, CurveArgs, InspectArgs};

use crate::application::curve_use_case::{CurveConfig, CurveUseCase};
use crate::application::inspect_use_case::InspectUseCase;

/// The main CLI struct. clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "learning-curves",
    version,
    about = "Measure how classifier accuracy scales with training-set size."
)]
pub struct Cli {
    /// The subcommand to run (curve or inspect)
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Curve(args)   => run_curve(args),
            Commands::Inspect(args) => run_inspect(args),
        }
    }
}

/// Handles the `curve` subcommand.
fn run_curve(args: CurveArgs) -> Result<()> {
    let config = match args.config.clone() {
        Some(path) => CurveConfig::from_json_file(path)?,
        None       => args.into(),
    };

    tracing::info!("Measuring learning curve on '{}'", config.data_path);
    let outcome = CurveUseCase::new(config).execute()?;

    println!("{:>8}  {:>8}  {:>8}", "samples", "mean", "std");
    for s in &outcome.curve.stats {
        println!("{:>8}  {:>8.4}  {:>8.4}", s.n_samples, s.mean, s.std);
    }
    println!("\nPlots written:");
    println!("  {}", outcome.plots.band.display());
    println!("  {}", outcome.plots.boxplots.display());
    Ok(())
}

/// Handles the `inspect` subcommand.
fn run_inspect(args: InspectArgs) -> Result<()> {
    let show    = args.show_columns;
    let summary = InspectUseCase::new(args.data.into(), show).execute()?;

    println!("records:    {} ({} positive)", summary.records, summary.positives);
    println!("columns:    {}", summary.n_features);
    for (i, name) in summary.columns.iter().enumerate() {
        println!("  [{i:>4}] {name}");
    }
    if summary.n_features > summary.columns.len() {
        println!("  ... {} more", summary.n_features - summary.columns.len());
    }
    if !summary.constant_columns.is_empty() {
        println!("constant on train: {}", summary.constant_columns.join(", "));
    }
    println!(
        "partitions: {} train / {} validation / {} test",
        summary.train, summary.validation, summary.test
    );
    Ok(())
}
