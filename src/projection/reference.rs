//! Reference projection engine
//!
//! Fixed rules, no options. Rates are carried in percent units between
//! steps so the month-by-month values match the published calculator to
//! the last digit.

use crate::error::Result;
use crate::rates::fisher_real_rate;
use crate::study::ProjectionInput;

use super::records::{EngineKind, MonthlyRecord, ProjectionResult};
use super::schedule::ReferenceEscalation;
use super::ProjectionEngine;

/// Effective monthly rate in percent for an annual percentage
fn effective_monthly_pct(annual_pct: f64) -> f64 {
    ((1.0 + annual_pct / 100.0).powf(1.0 / 12.0) - 1.0) * 100.0
}

/// Engine reproducing the reference calculator
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl ReferenceEngine {
    pub fn new() -> Self {
        ReferenceEngine
    }
}

impl ProjectionEngine for ReferenceEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Reference
    }

    /// Project months 1 through `12 * application_years`
    ///
    /// Interest accrues on the prior month's total before the contribution
    /// lands. The contribution is escalated before it is paid, so month 1
    /// already carries one step. A zero period yields no records.
    fn project(&self, input: &ProjectionInput) -> Result<ProjectionResult> {
        input.validate()?;

        let fix_inflation = input.adjust_capital_inflation;
        let index_contributions = input.adjust_contributions_inflation || fix_inflation;

        let monthly_rate_pct = effective_monthly_pct(input.annual_return_pct) * input.tax_haircut();
        let monthly_inflation_pct = effective_monthly_pct(input.annual_inflation_pct);
        let real_rate = fisher_real_rate(monthly_rate_pct / 100.0, monthly_inflation_pct / 100.0);

        let escalation = ReferenceEscalation::new(
            index_contributions,
            input.annual_inflation_pct / 100.0,
            input.sanitized_real_growth_pct() / 100.0,
        );

        let total_months = input.total_months();
        log::debug!(
            "reference projection: {} months, monthly rate {:.8}%, contribution step {:.8}",
            total_months,
            monthly_rate_pct,
            escalation.monthly_rate()
        );

        let mut result = ProjectionResult::with_capacity(EngineKind::Reference, total_months as usize);

        let mut contribution = input.monthly_contribution();
        let mut accumulated = input.initial_capital;
        let mut accumulated_interest = 0.0;
        let mut total = input.initial_capital;
        let mut real = input.initial_capital;
        let mut real_accumulated = input.initial_capital;
        let mut inflation_factor = 1.0;

        for month in 1..=total_months {
            contribution = escalation.escalate(contribution);

            let interest = total * (monthly_rate_pct / 100.0);
            accumulated += contribution;
            accumulated_interest += interest;
            total = total + interest + contribution;
            real = (real + contribution) * (1.0 + real_rate);

            inflation_factor *= 1.0 + monthly_inflation_pct / 100.0;
            real_accumulated += contribution / inflation_factor;

            let year = (month - 1) / 12;
            let exhibited = if fix_inflation { real } else { total };

            result.add_row(MonthlyRecord {
                month,
                age: input.age_at_year(year),
                year,
                contribution_nominal: contribution,
                accumulated_nominal: accumulated,
                balance_gross_nominal: total,
                balance_after_tax_nominal: total,
                real_balance: real,
                real_accumulated,
                tax_amount: 0.0,
                inflation_factor,
                exhibited_balance: exhibited,
                interest,
                accumulated_interest,
                capital_indexed_balance: exhibited,
            });
        }

        Ok(result)
    }
}
