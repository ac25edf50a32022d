//! Cross-check the generic engine (reference preset) against the reference
//! engine for one study, year by year
//!
//! Usage: cargo run --bin compare_engines -- study.json

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use wealth_projection::compare::{cross_check, DIVERGENCE_TOLERANCE};
use wealth_projection::ProjectionInput;

#[derive(Parser, Debug)]
#[command(name = "compare_engines", about = "Year-end divergence between the two engines")]
struct Cli {
    /// Study as a JSON file
    input: PathBuf,
    #[arg(long, default_value_t = DIVERGENCE_TOLERANCE)]
    tolerance: f64,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let file = File::open(&cli.input).with_context(|| format!("opening {}", cli.input.display()))?;
    let input: ProjectionInput =
        serde_json::from_reader(file).with_context(|| format!("parsing {}", cli.input.display()))?;

    let comparison = cross_check(&input)?;
    println!("Preset: {:?}", comparison.options);
    println!(
        "{:>4} {:>16} {:>16} {:>12} {:>16} {:>16} {:>12} {:>12}",
        "Year", "Generic nom", "Reference nom", "Diff", "Generic wealth", "Reference wealth", "Diff", "Contrib diff"
    );
    println!("{}", "-".repeat(112));
    for year in &comparison.years {
        println!(
            "{:>4} {:>16.2} {:>16.2} {:>12.2} {:>16.2} {:>16.2} {:>12.2} {:>12.2}",
            year.year,
            year.generic_nominal,
            year.reference_nominal,
            year.nominal_diff(),
            year.generic_wealth,
            year.reference_wealth,
            year.wealth_diff(),
            year.contributions_diff(),
        );
    }

    let status = if comparison.within(cli.tolerance) {
        "within"
    } else {
        "outside"
    };
    println!(
        "\nMax relative divergence: {:.6}% ({} tolerance of {:.4}%)",
        comparison.max_relative_divergence * 100.0,
        status,
        cli.tolerance * 100.0
    );
    Ok(())
}
