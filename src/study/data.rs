//! Study input record shared by both projection engines

use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ensure_non_negative, ProjectionError, Result};

/// Longest supported application period in years
pub const MAX_APPLICATION_YEARS: u32 = 50;

/// How often the contribution amount is paid in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContributionFrequency {
    #[default]
    Monthly,
    /// Amount is an annual total spread evenly over twelve months
    Yearly,
}

/// Parameters of one wealth-accumulation study
///
/// Rates are expressed in percent (10.0 means 10% per year).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    /// Age of the investor at month zero
    pub current_age: u32,

    /// Length of the projection in years
    pub application_years: u32,

    /// Capital invested at month zero
    pub initial_capital: f64,

    /// Contribution amount per `contribution_frequency`
    pub contribution: f64,

    #[serde(default)]
    pub contribution_frequency: ContributionFrequency,

    /// Nominal annual return rate (percent)
    pub annual_return_pct: f64,

    /// Annual inflation rate (percent)
    #[serde(default)]
    pub annual_inflation_pct: f64,

    /// Report wealth in today's money
    #[serde(default)]
    pub adjust_capital_inflation: bool,

    /// Index contributions to inflation
    #[serde(default)]
    pub adjust_contributions_inflation: bool,

    /// Real annual growth of contributions (percent)
    #[serde(default)]
    pub real_growth_pct: f64,

    #[serde(default)]
    pub include_tax: bool,

    /// Income tax on returns (percent)
    #[serde(default)]
    pub tax_rate_pct: f64,
}

impl ProjectionInput {
    /// Reject malformed inputs before any month is computed
    ///
    /// Real growth is the only field that is clamped instead of rejected; see
    /// [`ProjectionInput::sanitized_real_growth_pct`].
    pub fn validate(&self) -> Result<()> {
        if self.application_years > MAX_APPLICATION_YEARS {
            return Err(ProjectionError::PeriodTooLong {
                years: self.application_years,
                max: MAX_APPLICATION_YEARS,
            });
        }
        ensure_non_negative("initial_capital", self.initial_capital)?;
        ensure_non_negative("contribution", self.contribution)?;
        ensure_non_negative("annual_return_pct", self.annual_return_pct)?;
        ensure_non_negative("annual_inflation_pct", self.annual_inflation_pct)?;
        ensure_finite("real_growth_pct", self.real_growth_pct)?;
        ensure_non_negative("tax_rate_pct", self.tax_rate_pct)?;
        if self.tax_rate_pct > 100.0 {
            return Err(ProjectionError::invalid(
                "tax_rate_pct",
                format!("{} exceeds 100%", self.tax_rate_pct),
            ));
        }
        Ok(())
    }

    /// Number of monthly steps in the projection
    pub fn total_months(&self) -> u32 {
        self.application_years * 12
    }

    /// Contribution expressed as a monthly amount
    pub fn monthly_contribution(&self) -> f64 {
        match self.contribution_frequency {
            ContributionFrequency::Monthly => self.contribution,
            ContributionFrequency::Yearly => self.contribution / 12.0,
        }
    }

    /// Real growth with the documented clamps: 100% or more and negative
    /// values are both treated as zero
    pub fn sanitized_real_growth_pct(&self) -> f64 {
        if self.real_growth_pct >= 100.0 {
            log::warn!(
                "real growth of {}% is not supported, treating as 0%",
                self.real_growth_pct
            );
            0.0
        } else if self.real_growth_pct < 0.0 {
            log::warn!(
                "negative real growth of {}% clamped to 0%",
                self.real_growth_pct
            );
            0.0
        } else {
            self.real_growth_pct
        }
    }

    /// Multiplier applied to returns when tax is enabled
    pub fn tax_haircut(&self) -> f64 {
        if self.include_tax {
            1.0 - self.tax_rate_pct / 100.0
        } else {
            1.0
        }
    }

    /// Age reached after `years` whole years
    pub fn age_at_year(&self, years: u32) -> u32 {
        self.current_age + years
    }
}

impl Default for ProjectionInput {
    fn default() -> Self {
        Self {
            current_age: 30,
            application_years: 20,
            initial_capital: 0.0,
            contribution: 0.0,
            contribution_frequency: ContributionFrequency::Monthly,
            annual_return_pct: 10.0,
            annual_inflation_pct: 0.0,
            adjust_capital_inflation: false,
            adjust_contributions_inflation: false,
            real_growth_pct: 0.0,
            include_tax: false,
            tax_rate_pct: 0.0,
        }
    }
}
