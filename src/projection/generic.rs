//! Configurable projection engine
//!
//! Every knob lives in [`CalculationOptions`]: rate convention, deposit
//! timing, contribution cadence, inflation mode, declared tax mode and
//! rounding. Under [`CalculationOptions::official_preset`] the engine tracks
//! the reference calculator closely but not exactly.

use crate::error::Result;
use crate::rates::{
    compound_annual_rates, fisher_real_rate, monthly_from_annual, round_half_up, round_rate,
    RateConvention,
};
use crate::study::ProjectionInput;

use super::options::{CalculationOptions, DepositTiming, InflationMode};
use super::records::{EngineKind, MonthlyRecord, ProjectionResult};
use super::schedule::ContributionSchedule;
use super::state::ProjectionState;
use super::ProjectionEngine;

/// Rates derived once per run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenericRates {
    pub annual_return: f64,
    pub annual_inflation: f64,
    /// Simple conversion of the annual inflation
    pub monthly_inflation: f64,
    /// Monthly return before tax, six decimals
    pub monthly_return: f64,
    /// Monthly return actually credited, six decimals
    pub effective_monthly_return: f64,
}

impl GenericRates {
    /// Derive the run's rates from the study and options
    ///
    /// Annual percentages are first rounded to two decimals. In deflate mode
    /// the input return is read as real and compounded with inflation into
    /// the nominal rate that is actually credited.
    pub fn derive(input: &ProjectionInput, options: &CalculationOptions) -> Self {
        let annual_return = round_half_up(input.annual_return_pct, 2) / 100.0;
        let annual_inflation = round_half_up(input.annual_inflation_pct, 2) / 100.0;
        let monthly_inflation = monthly_from_annual(annual_inflation, RateConvention::Simple);

        let credited_annual = if options.deflates() {
            compound_annual_rates(annual_return, annual_inflation)
        } else {
            annual_return
        };

        let monthly_return = round_rate(monthly_from_annual(credited_annual, options.rate_compounding));
        let effective_monthly_return = if input.include_tax {
            round_rate(monthly_return * input.tax_haircut())
        } else {
            monthly_return
        };

        Self {
            annual_return,
            annual_inflation,
            monthly_inflation,
            monthly_return,
            effective_monthly_return,
        }
    }

    /// Monthly real rate credited to the deflated balance
    pub fn monthly_real_return(&self) -> f64 {
        fisher_real_rate(self.effective_monthly_return, self.monthly_inflation)
    }
}

/// Generic engine
#[derive(Debug, Clone, Default)]
pub struct GenericEngine {
    options: CalculationOptions,
}

impl GenericEngine {
    pub fn new(options: CalculationOptions) -> Self {
        Self { options }
    }

    /// Engine configured with the reference-emulating preset for `input`
    pub fn official(input: &ProjectionInput) -> Self {
        Self::new(CalculationOptions::official_preset(input))
    }

    pub fn options(&self) -> &CalculationOptions {
        &self.options
    }

    /// Calculate a single month, mutating the running state
    fn calculate_month(
        &self,
        input: &ProjectionInput,
        rates: &GenericRates,
        schedule: &ContributionSchedule,
        state: &mut ProjectionState,
        is_final: bool,
    ) -> MonthlyRecord {
        let rounding = self.options.rounding;
        let month = state.month;

        let mut row = MonthlyRecord::new(month);
        row.age = state.age;
        row.year = state.year;

        let mut interest = 0.0;
        if month > 0 {
            let contribution =
                rounding.apply(schedule.contribution(month, self.options.contribution_update), is_final);
            state.contribution = contribution;

            match self.options.deposit_timing {
                DepositTiming::Start => {
                    state.deposit(contribution);
                    interest = state.credit_interest(rates.effective_monthly_return);
                }
                DepositTiming::End => {
                    interest = state.credit_interest(rates.effective_monthly_return);
                    state.deposit(contribution);
                }
            }
            row.contribution_nominal = contribution;
        } else {
            row.contribution_nominal = input.initial_capital;
        }

        state.balance_nominal = rounding.apply(state.balance_nominal, is_final);
        state.accumulated_nominal = rounding.apply(state.accumulated_nominal, is_final);

        // Tax is only ever charged through the rate haircut
        let tax_amount = rounding.apply(0.0, is_final);
        let balance_after_tax = rounding.apply(state.balance_nominal, is_final);

        let inflation_factor = if month > 0 {
            (1.0 + rates.monthly_inflation).powf(month as f64)
        } else {
            1.0
        };

        let deflates = self.options.deflates();
        if deflates && month > 0 {
            state.compound_real(row.contribution_nominal, inflation_factor, rates.monthly_real_return());
        }

        let real_balance = if deflates && month > 0 {
            state.real_balance
        } else {
            balance_after_tax
        };
        let real_accumulated = if deflates {
            state.real_accumulated
        } else {
            state.accumulated_nominal
        };

        row.accumulated_nominal = state.accumulated_nominal;
        row.balance_gross_nominal = state.balance_nominal;
        row.balance_after_tax_nominal = balance_after_tax;
        row.real_balance = rounding.apply(real_balance, is_final);
        row.real_accumulated = rounding.apply(real_accumulated, is_final);
        row.tax_amount = tax_amount;
        row.inflation_factor = inflation_factor;
        row.interest = interest;
        row.accumulated_interest = state.accumulated_interest;

        row.exhibited_balance = match self.options.inflation_mode {
            InflationMode::None => state.balance_nominal,
            InflationMode::DisplayNominal => balance_after_tax,
            InflationMode::DeflateBoth => row.real_balance,
        };

        row.capital_indexed_balance = if input.adjust_capital_inflation && month > 0 {
            balance_after_tax / inflation_factor
        } else {
            balance_after_tax
        };

        row
    }
}

impl ProjectionEngine for GenericEngine {
    fn kind(&self) -> EngineKind {
        EngineKind::Generic
    }

    /// Project months 0 through `12 * application_years` inclusive
    fn project(&self, input: &ProjectionInput) -> Result<ProjectionResult> {
        input.validate()?;

        let rates = GenericRates::derive(input, &self.options);
        let schedule = ContributionSchedule::new(input, rates.annual_inflation, rates.monthly_inflation);
        let total_months = input.total_months();

        log::debug!(
            "generic projection: {} months, monthly return {:.6}, options {:?}",
            total_months,
            rates.effective_monthly_return,
            self.options
        );

        let mut result = ProjectionResult::with_capacity(EngineKind::Generic, total_months as usize + 1);
        let mut state = ProjectionState::from_input(input);

        for month in 0..=total_months {
            state.advance_to(month, input);
            let row = self.calculate_month(input, &rates, &schedule, &mut state, month == total_months);
            result.add_row(row);
        }

        Ok(result)
    }
}
