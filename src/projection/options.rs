//! Calculation options for the generic engine

use serde::{Deserialize, Serialize};

use crate::rates::{RateConvention, RoundingPolicy};
use crate::study::ProjectionInput;

/// Default monthly passive income rate (percent of wealth per month)
pub const DEFAULT_PASSIVE_INCOME_RATE_PCT: f64 = 0.5;

/// When the month's contribution is deposited relative to interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DepositTiming {
    /// Deposit, then earn interest on it this month
    #[default]
    Start,
    /// Earn interest, then deposit
    End,
}

/// How often indexed contributions are recomputed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionCadence {
    /// Step up once per elapsed year
    #[default]
    Annual,
    /// Escalate every month
    Monthly,
}

/// Which balance is exhibited and whether real values are tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InflationMode {
    /// Exhibit the gross nominal balance
    None,
    /// Exhibit the after-tax nominal balance
    #[default]
    DisplayNominal,
    /// Input rate is real; track and exhibit the deflated balance
    #[serde(alias = "display_deflate_both")]
    DeflateBoth,
}

/// Declared tax treatment
///
/// Only the rate haircut is ever applied: when tax is included, every mode
/// reduces the monthly return by the tax rate from month one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    #[default]
    None,
    OnRedemption,
    Monthly,
}

/// Configuration for a generic projection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculationOptions {
    pub rate_compounding: RateConvention,
    pub deposit_timing: DepositTiming,
    pub contribution_update: ContributionCadence,
    pub inflation_mode: InflationMode,
    pub tax_mode: TaxMode,
    pub rounding: RoundingPolicy,
    /// Passive income as a percent of wealth per month
    pub passive_income_rate_pct: f64,
}

impl Default for CalculationOptions {
    fn default() -> Self {
        Self {
            rate_compounding: RateConvention::Effective,
            deposit_timing: DepositTiming::Start,
            contribution_update: ContributionCadence::Annual,
            inflation_mode: InflationMode::DisplayNominal,
            tax_mode: TaxMode::None,
            rounding: RoundingPolicy::None,
            passive_income_rate_pct: DEFAULT_PASSIVE_INCOME_RATE_PCT,
        }
    }
}

impl CalculationOptions {
    /// Options that make the generic engine emulate the reference calculator
    ///
    /// Real-terms studies switch to monthly escalation and deflate both
    /// balances; nominal studies keep annual steps and show nominal values.
    pub fn official_preset(input: &ProjectionInput) -> Self {
        let real_mode = input.adjust_capital_inflation;
        Self {
            rate_compounding: RateConvention::Effective,
            deposit_timing: DepositTiming::End,
            contribution_update: if real_mode {
                ContributionCadence::Monthly
            } else {
                ContributionCadence::Annual
            },
            inflation_mode: if real_mode {
                InflationMode::DeflateBoth
            } else {
                InflationMode::DisplayNominal
            },
            tax_mode: if input.include_tax {
                TaxMode::OnRedemption
            } else {
                TaxMode::None
            },
            rounding: RoundingPolicy::None,
            passive_income_rate_pct: DEFAULT_PASSIVE_INCOME_RATE_PCT,
        }
    }

    /// Monthly passive income produced by `balance`
    pub fn passive_income(&self, balance: f64) -> f64 {
        balance * self.passive_income_rate_pct / 100.0
    }

    pub fn deflates(&self) -> bool {
        self.inflation_mode == InflationMode::DeflateBoth
    }
}
