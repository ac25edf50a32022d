//! Run every study in a CSV file and write one JSON report per study
//!
//! Usage: cargo run --release --bin run_batch -- studies.csv [--engine official] [--out reports]

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use wealth_projection::report::{write_yearly_csv, MILESTONE_THRESHOLD};
use wealth_projection::study::load_studies;
use wealth_projection::{EngineSelection, ScenarioRunner};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    Official,
    Reference,
}

#[derive(Parser, Debug)]
#[command(name = "run_batch", about = "Project a CSV of studies in parallel")]
struct Cli {
    /// Study sheet
    studies: PathBuf,
    #[arg(long, value_enum, default_value_t = EngineArg::Reference)]
    engine: EngineArg,
    #[arg(long, default_value = "batch_output")]
    out: PathBuf,
    #[arg(long, help = "Include monthly records in the JSON reports")]
    monthly: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let start = Instant::now();
    println!("Loading studies from {}...", cli.studies.display());
    let studies = load_studies(&cli.studies)
        .with_context(|| format!("loading {}", cli.studies.display()))?;
    println!("Loaded {} studies in {:?}", studies.len(), start.elapsed());

    let selection = match cli.engine {
        EngineArg::Official => EngineSelection::Official,
        EngineArg::Reference => EngineSelection::Reference,
    };
    let mut runner = ScenarioRunner::new(selection);
    if !cli.monthly {
        runner = runner.summaries_only();
    }

    println!("Running projections...");
    let proj_start = Instant::now();
    let reports = runner.run_batch(&studies);
    println!("Projections complete in {:?}", proj_start.elapsed());

    fs::create_dir_all(&cli.out).with_context(|| format!("creating {}", cli.out.display()))?;

    let mut failures = 0;
    println!("\n{:<16} {:>16} {:>14} {:>10}", "Study", "Final wealth", "Passive", "Million");
    println!("{}", "-".repeat(60));
    for (study, report) in studies.iter().zip(reports) {
        let report = match report {
            Ok(report) => report,
            Err(err) => {
                log::warn!("study {} failed: {}", study.id, err);
                failures += 1;
                continue;
            }
        };

        let json_path = cli.out.join(format!("{}.json", report.study_id));
        let file = File::create(&json_path).with_context(|| format!("creating {}", json_path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;

        let yearly_path = cli.out.join(format!("{}_yearly.csv", report.study_id));
        let file = File::create(&yearly_path).with_context(|| format!("creating {}", yearly_path.display()))?;
        write_yearly_csv(BufWriter::new(file), &report.yearly)?;

        let milestone = report
            .metrics
            .milestone
            .as_ref()
            .map(|row| format!("age {}", row.age))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<16} {:>16.2} {:>14.2} {:>10}",
            report.study_id, report.metrics.final_wealth, report.metrics.passive_income, milestone
        );
    }

    println!(
        "\n{} studies written to {} ({} failed), milestone {:.0}",
        studies.len() - failures,
        cli.out.display(),
        failures,
        MILESTONE_THRESHOLD
    );
    println!("Total time: {:?}", start.elapsed());
    Ok(())
}
