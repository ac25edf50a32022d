//! Contribution schedules
//!
//! The generic engine recomputes each month's contribution from the base
//! amount; the reference engine escalates the previous month's amount in
//! place. Both live here so the two escalation rules sit side by side.

use crate::rates::{monthly_from_annual, RateConvention};
use crate::study::ProjectionInput;

use super::options::ContributionCadence;

/// Contribution amounts for the generic engine
#[derive(Debug, Clone, PartialEq)]
pub struct ContributionSchedule {
    base: f64,
    /// (annual, monthly) inflation when contributions are indexed
    inflation: Option<(f64, f64)>,
    /// Sanitized real growth as a decimal
    annual_growth: f64,
}

impl ContributionSchedule {
    /// Build the schedule for a study
    ///
    /// `annual_inflation` and `monthly_inflation` are decimals already
    /// derived by the engine, so both engines' rate rules stay in one place.
    pub fn new(input: &ProjectionInput, annual_inflation: f64, monthly_inflation: f64) -> Self {
        let inflation = if input.adjust_contributions_inflation {
            Some((annual_inflation, monthly_inflation))
        } else {
            None
        };

        Self {
            base: input.monthly_contribution(),
            inflation,
            annual_growth: input.sanitized_real_growth_pct() / 100.0,
        }
    }

    pub fn base(&self) -> f64 {
        self.base
    }

    /// Contribution paid in `month` (month 0 carries no contribution)
    pub fn contribution(&self, month: u32, cadence: ContributionCadence) -> f64 {
        if month == 0 {
            return 0.0;
        }
        match cadence {
            ContributionCadence::Annual => self.annual_step(month),
            ContributionCadence::Monthly => self.monthly_escalation(month),
        }
    }

    /// Step up once per elapsed year, counted from month 0
    ///
    /// Month 12 already falls in year 1 and receives the first uplift.
    fn annual_step(&self, month: u32) -> f64 {
        let years = (month / 12) as f64;
        let mut contribution = self.base;

        if years > 0.0 {
            if let Some((annual_inflation, _)) = self.inflation {
                contribution = self.base * (1.0 + annual_inflation).powf(years);
            }
            if self.annual_growth > 0.0 {
                contribution *= (1.0 + self.annual_growth).powf(years);
            }
        }

        contribution
    }

    /// Escalate every month: the inflation chain first, then the growth chain
    fn monthly_escalation(&self, month: u32) -> f64 {
        let mut contribution = self.base;

        if let Some((_, monthly_inflation)) = self.inflation {
            let mut indexed = self.base;
            for _ in 1..=month {
                indexed *= 1.0 + monthly_inflation;
            }
            contribution = indexed;
        }

        if self.annual_growth > 0.0 {
            let monthly_growth = monthly_from_annual(self.annual_growth, RateConvention::Effective);
            let mut grown = contribution;
            for _ in 1..=month {
                grown *= 1.0 + monthly_growth;
            }
            contribution = grown;
        }

        contribution
    }
}

/// In-place contribution escalation used by the reference engine
///
/// Inflation indexing and real growth are folded into one annual factor,
/// converted to an effective monthly rate, and applied every month
/// including the first. A zero rate leaves the contribution untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceEscalation {
    monthly_rate: f64,
}

impl ReferenceEscalation {
    /// `annual_inflation` and `annual_growth` are decimals
    pub fn new(index_inflation: bool, annual_inflation: f64, annual_growth: f64) -> Self {
        let mut annual_factor = 1.0;
        if index_inflation {
            annual_factor *= 1.0 + annual_inflation;
        }
        if annual_growth > 0.0 {
            annual_factor *= 1.0 + annual_growth;
        }

        Self {
            monthly_rate: annual_factor.powf(1.0 / 12.0) - 1.0,
        }
    }

    pub fn monthly_rate(&self) -> f64 {
        self.monthly_rate
    }

    /// Next month's contribution from the current one
    pub fn escalate(&self, contribution: f64) -> f64 {
        if self.monthly_rate > 0.0 {
            contribution * (1.0 + self.monthly_rate)
        } else {
            contribution
        }
    }
}
