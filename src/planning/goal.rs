//! Goal plan split into dated implementation windows

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ensure_finite, ProjectionError, Result};
use crate::rates::round_half_up;

/// Annuity payment that takes `pv` to `fv` over `nper` periods
///
/// Spreadsheet sign convention: money paid out is negative. Zero periods
/// yield a zero payment.
pub fn pmt(rate: f64, nper: f64, pv: f64, fv: f64) -> f64 {
    if nper == 0.0 {
        return 0.0;
    }
    if rate == 0.0 {
        return -(pv + fv) / nper;
    }
    let growth = (1.0 + rate).powf(nper);
    -(pv * growth + fv) / ((growth - 1.0) / rate)
}

/// Present value of `fv` plus a payment stream over `nper` periods
pub fn pv(rate: f64, nper: f64, pmt: f64, fv: f64) -> f64 {
    if rate == 0.0 {
        return -(fv + pmt * nper);
    }
    let growth = (1.0 + rate).powf(nper);
    -(fv + pmt * ((growth - 1.0) / rate)) / growth
}

/// Parameters of a wealth goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlanInput {
    pub current_age: u32,
    pub target_age: u32,
    pub current_wealth: f64,
    pub target_wealth: f64,
    /// Real annual return during accumulation (percent)
    pub real_return_pct: f64,
    /// Amount already invested each month, signed as a spreadsheet cash flow
    pub current_monthly_investment: f64,
    /// Length of each implementation window in months
    pub window_period_months: u32,
}

impl GoalPlanInput {
    pub fn validate(&self) -> Result<()> {
        ensure_finite("current_wealth", self.current_wealth)?;
        ensure_finite("target_wealth", self.target_wealth)?;
        ensure_finite("real_return_pct", self.real_return_pct)?;
        ensure_finite("current_monthly_investment", self.current_monthly_investment)?;
        if self.target_age < self.current_age {
            return Err(ProjectionError::invalid(
                "target_age",
                format!("{} is below current age {}", self.target_age, self.current_age),
            ));
        }
        if self.window_period_months == 0 {
            return Err(ProjectionError::invalid("window_period_months", "must be positive"));
        }
        Ok(())
    }
}

/// One implementation window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalWindow {
    /// 1-based window number
    pub index: u32,
    /// End of the month in which the window is evaluated
    pub date: NaiveDate,
    pub months_from_now: u32,
    /// Whole calendar years between the window and the target year
    pub years_to_target: i32,
    /// Window target as a (negative) future cash flow, rounded to units
    pub future_value: f64,
    pub present_value: f64,
}

/// Contribution plan for a goal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalPlan {
    pub delta: f64,
    pub years: u32,
    pub yearly_contribution: f64,
    pub monthly_equivalent: f64,
    pub total_monthly_contribution: f64,
    pub window_count: u32,
    pub window_target: f64,
    pub windows: Vec<GoalWindow>,
}

/// Last day of the month `months` after `as_of`
fn end_of_month(as_of: NaiveDate, months: u32) -> Option<NaiveDate> {
    as_of
        .with_day(1)?
        .checked_add_months(Months::new(months + 1))?
        .pred_opt()
}

/// Build the plan as seen from `as_of`
pub fn plan_goal(input: &GoalPlanInput, as_of: NaiveDate) -> Result<GoalPlan> {
    input.validate()?;

    let delta = input.target_wealth - input.current_wealth;
    let years = input.target_age - input.current_age;
    let rate = input.real_return_pct / 100.0;

    let yearly_contribution = pmt(rate, years as f64, 0.0, delta);
    let monthly_equivalent = yearly_contribution / 12.0;
    let total_monthly_contribution = monthly_equivalent + input.current_monthly_investment;

    let window_years = input.window_period_months as f64 / 12.0;
    let window_count = round_half_up(years as f64 / window_years, 0) as u32;
    let window_target = if window_count > 0 {
        delta / window_count as f64
    } else {
        0.0
    };

    let target_year = as_of.year() + years as i32;
    let half_period = input.window_period_months / 2;
    let future_value = -round_half_up(window_target, 0);

    let mut windows = Vec::with_capacity(window_count as usize);
    for index in 1..=window_count {
        let months_from_now = half_period + (index - 1) * input.window_period_months;
        let date = end_of_month(as_of, months_from_now).ok_or_else(|| {
            ProjectionError::invalid(
                "window_period_months",
                format!("window {} falls outside the supported calendar", index),
            )
        })?;
        let years_to_target = target_year - date.year();

        windows.push(GoalWindow {
            index,
            date,
            months_from_now,
            years_to_target,
            future_value,
            present_value: pv(rate, years_to_target as f64, 0.0, future_value).abs(),
        });
    }

    log::debug!(
        "goal plan: delta {:.2} over {} years, {} windows",
        delta,
        years,
        window_count
    );

    Ok(GoalPlan {
        delta,
        years,
        yearly_contribution: yearly_contribution.abs(),
        monthly_equivalent: monthly_equivalent.abs(),
        total_monthly_contribution: total_monthly_contribution.abs(),
        window_count,
        window_target: window_target.abs(),
        windows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 15).unwrap()
    }

    fn goal() -> GoalPlanInput {
        GoalPlanInput {
            current_age: 35,
            target_age: 60,
            current_wealth: 500_000.0,
            target_wealth: 3_000_000.0,
            real_return_pct: 4.0,
            current_monthly_investment: -2_000.0,
            window_period_months: 60,
        }
    }

    #[test]
    fn test_pmt_and_pv() {
        assert_relative_eq!(pmt(0.04, 25.0, 0.0, 2_500_000.0), -60_029.906966, epsilon = 1e-5);
        assert_eq!(pmt(0.0, 10.0, 0.0, 1_000.0), -100.0);
        assert_eq!(pmt(0.05, 0.0, 0.0, 1_000.0), 0.0);

        assert_relative_eq!(pv(0.04, 2.0, 0.0, -500_000.0), 462_278.106509, epsilon = 1e-5);
        assert_eq!(pv(0.0, 5.0, -100.0, 0.0), 500.0);
    }

    #[test]
    fn test_goal_plan() {
        let plan = plan_goal(&goal(), as_of()).unwrap();

        assert_eq!(plan.delta, 2_500_000.0);
        assert_eq!(plan.years, 25);
        assert_relative_eq!(plan.yearly_contribution, 60_029.906966, epsilon = 1e-5);
        assert_relative_eq!(plan.monthly_equivalent, 5_002.492247, epsilon = 1e-5);
        assert_relative_eq!(plan.total_monthly_contribution, 7_002.492247, epsilon = 1e-5);
        assert_eq!(plan.window_count, 5);
        assert_eq!(plan.window_target, 500_000.0);
    }

    #[test]
    fn test_windows_are_dated_at_month_end() {
        let plan = plan_goal(&goal(), as_of()).unwrap();
        let months: Vec<u32> = plan.windows.iter().map(|w| w.months_from_now).collect();
        assert_eq!(months, vec![30, 90, 150, 210, 270]);

        let first = &plan.windows[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2029, 4, 30).unwrap());
        assert_eq!(first.years_to_target, 22);
        assert_eq!(first.future_value, -500_000.0);
        assert_relative_eq!(first.present_value, 210_977.693325, epsilon = 1e-5);

        let last = plan.windows.last().unwrap();
        assert_eq!(last.date, NaiveDate::from_ymd_opt(2049, 4, 30).unwrap());
        assert_eq!(last.years_to_target, 2);
    }

    #[test]
    fn test_end_of_month_handles_short_months() {
        let jan_31 = NaiveDate::from_ymd_opt(2027, 1, 31).unwrap();
        assert_eq!(end_of_month(jan_31, 1), NaiveDate::from_ymd_opt(2027, 2, 28));
        assert_eq!(end_of_month(jan_31, 0), Some(jan_31));
    }

    #[test]
    fn test_same_age_goal_has_no_windows() {
        let input = GoalPlanInput {
            target_age: 35,
            ..goal()
        };
        let plan = plan_goal(&input, as_of()).unwrap();
        assert_eq!(plan.window_count, 0);
        assert_eq!(plan.window_target, 0.0);
        assert_eq!(plan.yearly_contribution, 0.0);
        assert!(plan.windows.is_empty());
    }

    #[test]
    fn test_invalid_goals() {
        let backwards = GoalPlanInput {
            target_age: 30,
            ..goal()
        };
        assert!(matches!(
            plan_goal(&backwards, as_of()),
            Err(ProjectionError::InvalidInput { field: "target_age", .. })
        ));

        let no_period = GoalPlanInput {
            window_period_months: 0,
            ..goal()
        };
        assert!(plan_goal(&no_period, as_of()).is_err());

        let nan_rate = GoalPlanInput {
            real_return_pct: f64::NAN,
            ..goal()
        };
        assert!(plan_goal(&nan_rate, as_of()).is_err());
    }
}
