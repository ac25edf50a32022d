//! Annual/monthly rate conversion

use serde::{Deserialize, Serialize};

/// Convention for converting an annual rate to a monthly one
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateConvention {
    /// Geometric: i_m = (1 + i_a)^(1/12) - 1
    #[default]
    Effective,
    /// Pro-rata: i_m = i_a / 12
    Simple,
}

/// Convert an annual rate (as a decimal) to a monthly rate
///
/// Total for any finite rate, including zero and negative rates.
pub fn monthly_from_annual(annual_rate: f64, convention: RateConvention) -> f64 {
    match convention {
        RateConvention::Effective => (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0,
        RateConvention::Simple => annual_rate / 12.0,
    }
}

/// Inverse of [`monthly_from_annual`]
pub fn annual_from_monthly(monthly_rate: f64, convention: RateConvention) -> f64 {
    match convention {
        RateConvention::Effective => (1.0 + monthly_rate).powi(12) - 1.0,
        RateConvention::Simple => monthly_rate * 12.0,
    }
}

/// Fisher relation: real = (1 + nominal) / (1 + inflation) - 1
///
/// Both rates must be on the same periodic basis.
pub fn fisher_real_rate(nominal_rate: f64, inflation_rate: f64) -> f64 {
    (1.0 + nominal_rate) / (1.0 + inflation_rate) - 1.0
}

/// Compound two annual rates: (1 + a)(1 + b) - 1
///
/// Used to turn a real rate plus inflation into the equivalent nominal rate.
pub fn compound_annual_rates(rate_a: f64, rate_b: f64) -> f64 {
    (1.0 + rate_a) * (1.0 + rate_b) - 1.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effective_conversion() {
        let monthly = monthly_from_annual(0.10, RateConvention::Effective);
        assert_relative_eq!(monthly, 0.007974140428903764, epsilon = 1e-12);

        // Twelve months of compounding recovers the annual rate
        assert_relative_eq!((1.0 + monthly).powi(12) - 1.0, 0.10, epsilon = 1e-12);
    }

    #[test]
    fn test_simple_conversion() {
        assert_relative_eq!(monthly_from_annual(0.12, RateConvention::Simple), 0.01);
        assert_relative_eq!(annual_from_monthly(0.01, RateConvention::Simple), 0.12);
    }

    #[test]
    fn test_zero_and_negative_rates() {
        assert_eq!(monthly_from_annual(0.0, RateConvention::Effective), 0.0);
        assert_eq!(monthly_from_annual(0.0, RateConvention::Simple), 0.0);

        let monthly = monthly_from_annual(-0.05, RateConvention::Effective);
        assert!(monthly < 0.0);
        assert_relative_eq!(
            annual_from_monthly(monthly, RateConvention::Effective),
            -0.05,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_fisher_and_compounding_are_inverse() {
        let nominal = compound_annual_rates(0.045, 0.0375);
        assert_relative_eq!(nominal, 0.0841875, epsilon = 1e-12);
        assert_relative_eq!(fisher_real_rate(nominal, 0.0375), 0.045, epsilon = 1e-12);
    }

    #[test]
    fn test_effective_is_default() {
        assert_eq!(RateConvention::default(), RateConvention::Effective);
    }
}
