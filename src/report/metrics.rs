//! Summary metrics over a reference-engine stream

use serde::{Deserialize, Serialize};

use crate::projection::MonthlyRecord;
use crate::study::ProjectionInput;

/// Wealth that counts as the first milestone
pub const MILESTONE_THRESHOLD: f64 = 1_000_000.0;

/// Contribution/interest decomposition of a wealth figure
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionSplit {
    pub contributions: f64,
    pub interest: f64,
    pub contributions_fraction: f64,
    pub interest_fraction: f64,
}

impl ContributionSplit {
    /// Split a record's wealth into what was paid in and what was earned
    ///
    /// Contributions are never deflated, even when wealth is real. In real
    /// terms interest is whatever remains of wealth; in nominal terms it is the
    /// running interest tally and the fractions are taken over the sum of both.
    pub fn from_record(record: &MonthlyRecord, fix_inflation: bool) -> Self {
        let contributions = record.accumulated_nominal;
        let (interest, base) = if fix_inflation {
            let wealth = record.real_balance;
            (wealth - contributions, wealth)
        } else {
            let interest = record.accumulated_interest;
            (interest, contributions + interest)
        };

        Self {
            contributions,
            interest,
            contributions_fraction: fraction(contributions, base),
            interest_fraction: fraction(interest, base),
        }
    }
}

fn fraction(part: f64, total: f64) -> f64 {
    if total > 0.0 {
        part / total
    } else {
        0.0
    }
}

/// Headline metrics of a study
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Real wealth when fixed to inflation, nominal otherwise
    pub final_wealth: f64,
    pub final_nominal: f64,
    pub final_real: f64,
    /// Estimated monthly income the final wealth sustains
    pub passive_income: f64,
    /// Record reported for the first million, one month early by convention
    pub milestone: Option<MonthlyRecord>,
    pub split: ContributionSplit,
}

/// Simplified monthly real net rate used for the passive income estimate
///
/// A linear approximation from the annual inputs, not the compound rate
/// credited by the engines. The tax rate is applied as given.
pub fn passive_income_rate(input: &ProjectionInput) -> f64 {
    let real_annual = (input.annual_return_pct - input.annual_inflation_pct) / 100.0;
    real_annual * (1.0 - input.tax_rate_pct / 100.0) / 12.0
}

/// First record whose wealth reaches `threshold`, reported one month early
///
/// A crossing at index `i > 0` returns the record at `i - 1`; a crossing at
/// index 0 returns index 0.
pub fn find_first_milestone(
    records: &[MonthlyRecord],
    fix_inflation: bool,
    threshold: f64,
) -> Option<&MonthlyRecord> {
    let index = records.iter().position(|r| r.wealth(fix_inflation) >= threshold)?;
    records.get(index.saturating_sub(1))
}

/// Derive the study's headline metrics from a monthly stream
///
/// An empty stream yields zeroed metrics and no milestone.
pub fn aggregate_metrics(records: &[MonthlyRecord], input: &ProjectionInput) -> Metrics {
    let fix_inflation = input.adjust_capital_inflation;

    let Some(last) = records.last() else {
        return Metrics::default();
    };

    let final_wealth = last.wealth(fix_inflation);
    let metrics = Metrics {
        final_wealth,
        final_nominal: last.balance_after_tax_nominal,
        final_real: last.real_balance,
        passive_income: final_wealth * passive_income_rate(input),
        milestone: find_first_milestone(records, fix_inflation, MILESTONE_THRESHOLD).cloned(),
        split: ContributionSplit::from_record(last, fix_inflation),
    };

    log::debug!(
        "metrics: wealth {:.2}, passive income {:.2}, milestone month {:?}",
        metrics.final_wealth,
        metrics.passive_income,
        metrics.milestone.as_ref().map(|r| r.month)
    );

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_engine_b;
    use approx::assert_relative_eq;

    fn fixture_input() -> ProjectionInput {
        ProjectionInput {
            current_age: 30,
            application_years: 25,
            initial_capital: 20_000.0,
            contribution: 2_500.0,
            annual_return_pct: 10.0,
            annual_inflation_pct: 3.75,
            adjust_capital_inflation: true,
            adjust_contributions_inflation: true,
            real_growth_pct: 1.0,
            include_tax: true,
            tax_rate_pct: 15.0,
            ..Default::default()
        }
    }

    fn stream(balances: &[f64]) -> Vec<MonthlyRecord> {
        balances
            .iter()
            .enumerate()
            .map(|(i, &balance)| MonthlyRecord {
                balance_after_tax_nominal: balance,
                real_balance: balance,
                ..MonthlyRecord::new(i as u32 + 1)
            })
            .collect()
    }

    #[test]
    fn test_reference_fixture_metrics() {
        let input = fixture_input();
        let records = project_engine_b(&input).unwrap();
        let metrics = aggregate_metrics(&records, &input);

        assert_relative_eq!(metrics.final_wealth, 2_409_309.28, epsilon = 0.01);
        assert_relative_eq!(metrics.split.contributions, 1_446_373.46, epsilon = 0.01);
        assert_relative_eq!(metrics.split.interest, 962_935.82, epsilon = 0.01);
        assert_relative_eq!(metrics.passive_income, 10_666.21, epsilon = 0.01);
        assert_relative_eq!(
            metrics.split.contributions_fraction + metrics.split.interest_fraction,
            1.0,
            epsilon = 1e-9
        );

        let milestone = metrics.milestone.unwrap();
        assert_eq!(milestone.month, 187);
        assert_eq!(milestone.year, 15);
    }

    #[test]
    fn test_nominal_metrics_use_interest_tally() {
        let input = ProjectionInput {
            adjust_capital_inflation: false,
            ..fixture_input()
        };
        let records = project_engine_b(&input).unwrap();
        let metrics = aggregate_metrics(&records, &input);
        let last = records.last().unwrap();

        assert_eq!(metrics.final_wealth, last.balance_after_tax_nominal);
        assert_eq!(metrics.split.interest, last.accumulated_interest);
        assert_relative_eq!(
            metrics.split.contributions_fraction + metrics.split.interest_fraction,
            1.0,
            epsilon = 1e-9
        );
        assert_eq!(metrics.milestone.unwrap().month, 159);
    }

    #[test]
    fn test_milestone_is_reported_one_month_early() {
        let records = stream(&[400_000.0, 800_000.0, 1_000_000.0, 1_200_000.0]);
        let found = find_first_milestone(&records, false, MILESTONE_THRESHOLD).unwrap();
        assert_eq!(found.month, 2);
    }

    #[test]
    fn test_milestone_at_first_record() {
        let records = stream(&[1_500_000.0, 1_600_000.0]);
        let found = find_first_milestone(&records, true, MILESTONE_THRESHOLD).unwrap();
        assert_eq!(found.month, 1);
    }

    #[test]
    fn test_milestone_never_reached() {
        let records = stream(&[10.0, 20.0, 999_999.99]);
        assert!(find_first_milestone(&records, false, MILESTONE_THRESHOLD).is_none());
    }

    #[test]
    fn test_empty_stream_yields_zeroed_metrics() {
        let metrics = aggregate_metrics(&[], &fixture_input());
        assert_eq!(metrics, Metrics::default());
        assert!(metrics.milestone.is_none());
    }

    #[test]
    fn test_zero_wealth_has_zero_fractions() {
        let record = MonthlyRecord::new(1);
        let split = ContributionSplit::from_record(&record, true);
        assert_eq!(split.contributions_fraction, 0.0);
        assert_eq!(split.interest_fraction, 0.0);
        assert!(!split.interest_fraction.is_nan());
    }

    #[test]
    fn test_passive_rate_ignores_tax_flag() {
        let input = ProjectionInput {
            include_tax: false,
            ..fixture_input()
        };
        assert_relative_eq!(passive_income_rate(&input), 0.0625 * 0.85 / 12.0, epsilon = 1e-15);
    }
}
