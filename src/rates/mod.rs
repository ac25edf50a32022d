//! Interest and inflation rate handling
//!
//! Conversions between annual and monthly bases, the Fisher relation, and the
//! fixed-precision rounding steps the reference calculator applies mid-run.

mod conversion;
mod precision;

pub use conversion::{
    annual_from_monthly, compound_annual_rates, fisher_real_rate, monthly_from_annual,
    RateConvention,
};
pub use precision::{
    quantize_significant, round_half_up, round_money, round_rate, RoundingPolicy,
    MONEY_DECIMALS, RATE_DECIMALS, SIGNIFICANT_DIGITS,
};
