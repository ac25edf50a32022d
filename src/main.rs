//! Wealth Projection CLI
//!
//! Runs a single study through either engine, or builds a goal plan.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand, ValueEnum};

use wealth_projection::planning::{plan_goal, GoalPlanInput};
use wealth_projection::report::{format_abbreviated, write_monthly_csv, NumberStyle};
use wealth_projection::study::ContributionFrequency;
use wealth_projection::{
    CalculationOptions, EngineSelection, ProjectionInput, ScenarioRunner, Study,
};

#[derive(Parser, Debug)]
#[command(
    name = "wealth_projection",
    about = "Monthly compound-interest projection of a savings study"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Project one study month by month
    Project(ProjectArgs),
    /// Split a wealth goal into dated implementation windows
    Goal(GoalArgs),
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum EngineArg {
    /// Generic engine with the options file (or defaults)
    Generic,
    /// Generic engine with the reference-emulating preset
    Official,
    /// Reference engine
    Reference,
}

#[derive(Args, Debug)]
struct ProjectArgs {
    #[arg(long, value_enum, default_value_t = EngineArg::Reference)]
    engine: EngineArg,
    #[arg(long, help = "Study as a JSON file; overrides the individual flags")]
    input: Option<PathBuf>,
    #[arg(long, help = "Generic engine options as a JSON file")]
    options: Option<PathBuf>,
    #[arg(long, default_value = "projection_output.csv")]
    output: PathBuf,

    #[arg(long, default_value_t = 30)]
    current_age: u32,
    #[arg(long, default_value_t = 20)]
    years: u32,
    #[arg(long, default_value_t = 0.0)]
    initial_capital: f64,
    #[arg(long, default_value_t = 0.0)]
    contribution: f64,
    #[arg(long, help = "Contribution is an annual total")]
    yearly: bool,
    #[arg(long, default_value_t = 10.0, help = "Annual return in percent")]
    return_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual inflation in percent")]
    inflation: f64,
    #[arg(long, help = "Report wealth in today's money")]
    fix_capital: bool,
    #[arg(long, help = "Index contributions to inflation")]
    fix_contributions: bool,
    #[arg(long, default_value_t = 0.0, help = "Real contribution growth in percent")]
    real_growth: f64,
    #[arg(long, help = "Tax rate in percent; enables tax when given")]
    tax_rate: Option<f64>,
}

impl ProjectArgs {
    fn study_input(&self) -> Result<ProjectionInput> {
        if let Some(path) = &self.input {
            return read_json(path);
        }
        Ok(ProjectionInput {
            current_age: self.current_age,
            application_years: self.years,
            initial_capital: self.initial_capital,
            contribution: self.contribution,
            contribution_frequency: if self.yearly {
                ContributionFrequency::Yearly
            } else {
                ContributionFrequency::Monthly
            },
            annual_return_pct: self.return_rate,
            annual_inflation_pct: self.inflation,
            adjust_capital_inflation: self.fix_capital,
            adjust_contributions_inflation: self.fix_contributions,
            real_growth_pct: self.real_growth,
            include_tax: self.tax_rate.is_some(),
            tax_rate_pct: self.tax_rate.unwrap_or(0.0),
        })
    }

    fn selection(&self) -> Result<EngineSelection> {
        Ok(match self.engine {
            EngineArg::Generic => {
                let options = match &self.options {
                    Some(path) => read_json(path)?,
                    None => CalculationOptions::default(),
                };
                EngineSelection::Generic(options)
            }
            EngineArg::Official => EngineSelection::Official,
            EngineArg::Reference => EngineSelection::Reference,
        })
    }
}

#[derive(Args, Debug)]
struct GoalArgs {
    #[arg(long)]
    current_age: u32,
    #[arg(long)]
    target_age: u32,
    #[arg(long)]
    current_wealth: f64,
    #[arg(long)]
    target_wealth: f64,
    #[arg(long, help = "Real annual return in percent")]
    real_return: f64,
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    monthly_investment: f64,
    #[arg(long, default_value_t = 60, help = "Window length in months")]
    window_months: u32,
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    serde_json::from_reader(file).with_context(|| format!("parsing {}", path.display()))
}

fn run_projection(args: &ProjectArgs) -> Result<()> {
    let input = args.study_input()?;
    let runner = ScenarioRunner::new(args.selection()?);
    let report = runner.run(&Study {
        id: "cli".to_string(),
        input,
    })?;

    println!("Projection Results ({} months, {} engine):", report.records.len(), report.summary.engine);
    println!(
        "{:>5} {:>4} {:>3} {:>12} {:>16} {:>16} {:>16}",
        "Month", "Year", "Age", "Contribution", "Accumulated", "Nominal", "Real"
    );
    println!("{}", "-".repeat(94));
    for row in report.records.iter().take(24) {
        println!(
            "{:>5} {:>4} {:>3} {:>12.2} {:>16.2} {:>16.2} {:>16.2}",
            row.month,
            row.year,
            row.age,
            row.contribution_nominal,
            row.accumulated_nominal,
            row.balance_after_tax_nominal,
            row.real_balance,
        );
    }
    if report.records.len() > 24 {
        println!("... ({} more months)", report.records.len() - 24);
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    write_monthly_csv(BufWriter::new(file), &report.records)?;
    println!("\nFull results written to: {}", args.output.display());

    let metrics = &report.metrics;
    println!("\nSummary:");
    println!("  Final wealth:     {:.2}", metrics.final_wealth);
    println!("  Final nominal:    {:.2}", metrics.final_nominal);
    println!("  Contributions:    {:.2} ({:.1}%)", metrics.split.contributions, metrics.split.contributions_fraction * 100.0);
    println!("  Interest:         {:.2} ({:.1}%)", metrics.split.interest, metrics.split.interest_fraction * 100.0);
    println!("  Passive income:   {}", format_abbreviated(metrics.passive_income, NumberStyle::Currency));
    if let Some(income) = report.option_passive_income {
        println!("  Option income:    {}", format_abbreviated(income, NumberStyle::Currency));
    }
    match &metrics.milestone {
        Some(row) => println!("  First million:    month {} (age {})", row.month, row.age),
        None => println!("  First million:    not reached"),
    }

    println!("\nYear-end balances:");
    for year in &report.yearly {
        println!(
            "  Year {:>2} (age {:>3}): {:>16.2}  contributions {:>5.1}%",
            year.year,
            year.age,
            year.wealth,
            year.split.contributions_fraction * 100.0
        );
    }

    Ok(())
}

fn run_goal(args: &GoalArgs) -> Result<()> {
    let input = GoalPlanInput {
        current_age: args.current_age,
        target_age: args.target_age,
        current_wealth: args.current_wealth,
        target_wealth: args.target_wealth,
        real_return_pct: args.real_return,
        current_monthly_investment: args.monthly_investment,
        window_period_months: args.window_months,
    };
    let plan = plan_goal(&input, Local::now().date_naive())?;

    println!("Goal plan ({} years, delta {:.2}):", plan.years, plan.delta);
    println!("  Yearly contribution:   {:.2}", plan.yearly_contribution);
    println!("  Monthly equivalent:    {:.2}", plan.monthly_equivalent);
    println!("  Monthly needed:        {:.2}", plan.total_monthly_contribution);
    println!("  Windows:               {} x {:.2}", plan.window_count, plan.window_target);
    for window in &plan.windows {
        println!(
            "  #{:<2} {} (+{:>3} months, {:>2} years to target): PV {:.2}",
            window.index, window.date, window.months_from_now, window.years_to_target, window.present_value
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    match &cli.command {
        Command::Project(args) => run_projection(args),
        Command::Goal(args) => run_goal(args),
    }
}
