//! Cross-check of the generic engine against the reference engine
//!
//! The generic engine runs with [`CalculationOptions::official_preset`] and
//! both streams are compared at each year end. Divergence is expected, so it
//! is reported and logged but never treated as an error.

use serde::Serialize;

use crate::error::Result;
use crate::projection::{CalculationOptions, GenericEngine, ProjectionEngine, ReferenceEngine};
use crate::study::ProjectionInput;

/// Relative divergence above which the cross-check logs a warning
pub const DIVERGENCE_TOLERANCE: f64 = 0.01;

/// Both engines at one year end
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearComparison {
    /// 1-based year number
    pub year: u32,
    pub month: u32,
    pub generic_nominal: f64,
    pub reference_nominal: f64,
    pub generic_wealth: f64,
    pub reference_wealth: f64,
    pub generic_contributions: f64,
    pub reference_contributions: f64,
}

impl YearComparison {
    pub fn nominal_diff(&self) -> f64 {
        self.generic_nominal - self.reference_nominal
    }

    pub fn wealth_diff(&self) -> f64 {
        self.generic_wealth - self.reference_wealth
    }

    pub fn contributions_diff(&self) -> f64 {
        self.generic_contributions - self.reference_contributions
    }

    /// Largest relative gap across nominal balance and wealth
    pub fn relative_divergence(&self) -> f64 {
        relative(self.nominal_diff(), self.reference_nominal)
            .max(relative(self.wealth_diff(), self.reference_wealth))
    }
}

fn relative(diff: f64, base: f64) -> f64 {
    if base.abs() > 0.0 {
        (diff / base).abs()
    } else {
        diff.abs()
    }
}

/// Result of a cross-check
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineComparison {
    pub options: CalculationOptions,
    pub years: Vec<YearComparison>,
    pub max_relative_divergence: f64,
}

impl EngineComparison {
    pub fn within(&self, tolerance: f64) -> bool {
        self.max_relative_divergence <= tolerance
    }
}

/// Compare both engines on `input` at every year end
pub fn cross_check(input: &ProjectionInput) -> Result<EngineComparison> {
    let options = CalculationOptions::official_preset(input);
    let generic = GenericEngine::new(options).project(input)?;
    let reference = ReferenceEngine.project(input)?;
    let fix_inflation = input.adjust_capital_inflation;

    let mut years = Vec::with_capacity(input.application_years as usize);
    for year in 1..=input.application_years {
        let month = year * 12;
        // Generic streams start at month 0, reference streams at month 1
        let (Some(a), Some(b)) = (
            generic.records.get(month as usize),
            reference.records.get(month as usize - 1),
        ) else {
            continue;
        };
        years.push(YearComparison {
            year,
            month,
            generic_nominal: a.balance_after_tax_nominal,
            reference_nominal: b.balance_after_tax_nominal,
            generic_wealth: a.wealth(fix_inflation),
            reference_wealth: b.wealth(fix_inflation),
            generic_contributions: a.accumulated_nominal,
            reference_contributions: b.accumulated_nominal,
        });
    }

    let max_relative_divergence = years
        .iter()
        .map(YearComparison::relative_divergence)
        .fold(0.0, f64::max);

    if max_relative_divergence > DIVERGENCE_TOLERANCE {
        log::warn!(
            "engines diverge by up to {:.4}% over {} years",
            max_relative_divergence * 100.0,
            years.len()
        );
    } else {
        log::debug!("engines agree within {:.6}%", max_relative_divergence * 100.0);
    }

    Ok(EngineComparison {
        options,
        years,
        max_relative_divergence,
    })
}
