//! Fixed-precision steps reproduced from the reference calculator
//!
//! The reference truncates intermediate values at well-defined points: money
//! to cents, monthly rates to six decimals, running balances to fifteen
//! significant digits. Each step is a named function so every call site in the
//! engines is explicit.

use serde::{Deserialize, Serialize};

/// Decimal places kept for monetary amounts
pub const MONEY_DECIMALS: i32 = 2;

/// Decimal places kept for monthly rates
pub const RATE_DECIMALS: i32 = 6;

/// Significant digits kept after every addition to a running balance
pub const SIGNIFICANT_DIGITS: usize = 15;

/// Round half-up to `decimals` places: floor(x * 10^d + 0.5) / 10^d
pub fn round_half_up(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor + 0.5).floor() / factor
}

/// Round a monetary amount to cents
pub fn round_money(value: f64) -> f64 {
    round_half_up(value, MONEY_DECIMALS)
}

/// Round a monthly rate to six decimal places
pub fn round_rate(value: f64) -> f64 {
    round_half_up(value, RATE_DECIMALS)
}

/// Re-quantize a value to `digits` significant digits
///
/// Goes through the decimal representation so the result is the double
/// nearest to the printed value, which is what the reference engine stores.
pub fn quantize_significant(value: f64, digits: usize) -> f64 {
    if !value.is_finite() || value == 0.0 || digits == 0 {
        return value;
    }
    format!("{:.*e}", digits - 1, value)
        .parse::<f64>()
        .unwrap_or(value)
}

/// When monetary quantities are rounded to cents during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingPolicy {
    /// Full floating-point precision throughout
    #[default]
    None,
    /// Round every month
    Monthly,
    /// Round only the final month
    Final,
}

impl RoundingPolicy {
    /// Apply the policy to a monetary value for the current month
    pub fn apply(self, value: f64, is_final_month: bool) -> f64 {
        match self {
            RoundingPolicy::None => value,
            RoundingPolicy::Monthly => round_money(value),
            RoundingPolicy::Final if is_final_month => round_money(value),
            RoundingPolicy::Final => value,
        }
    }
}
