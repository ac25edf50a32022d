//! Metrics, yearly rollup and display helpers over monthly streams

mod export;
pub mod format;
mod metrics;
mod yearly;

pub use export::{write_monthly_csv, write_yearly_csv};
pub use format::{format_abbreviated, format_abbreviated_long, NumberStyle};
pub use metrics::{
    aggregate_metrics, find_first_milestone, passive_income_rate, ContributionSplit, Metrics,
    MILESTONE_THRESHOLD,
};
pub use yearly::{rollup_yearly, YearlyRecord};
