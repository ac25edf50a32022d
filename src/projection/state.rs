//! Running state carried between months

use crate::rates::{quantize_significant, SIGNIFICANT_DIGITS};
use crate::study::ProjectionInput;

/// State of a projection at a point in time
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (0 is the initial deposit)
    pub month: u32,

    /// Whole years elapsed since month 0
    pub year: u32,

    /// Investor age at this month
    pub age: u32,

    /// Nominal balance before tax
    pub balance_nominal: f64,

    /// Initial capital plus all contributions so far
    pub accumulated_nominal: f64,

    /// Interest credited since month 0
    pub accumulated_interest: f64,

    /// Balance in month-0 money, compounded at the real rate
    pub real_balance: f64,

    /// Contributions deflated to month-0 money
    pub real_accumulated: f64,

    /// Contribution paid in the current month
    pub contribution: f64,
}

impl ProjectionState {
    /// Initialize state at month 0
    pub fn from_input(input: &ProjectionInput) -> Self {
        Self {
            month: 0,
            year: 0,
            age: input.current_age,
            balance_nominal: input.initial_capital,
            accumulated_nominal: input.initial_capital,
            accumulated_interest: 0.0,
            real_balance: input.initial_capital,
            real_accumulated: input.initial_capital,
            contribution: input.monthly_contribution(),
        }
    }

    /// Move the calendar to `month`
    pub fn advance_to(&mut self, month: u32, input: &ProjectionInput) {
        self.month = month;
        self.year = month / 12;
        self.age = input.age_at_year(self.year);
    }

    /// Deposit into the nominal balance and contribution tally, keeping
    /// fifteen significant digits
    pub fn deposit(&mut self, amount: f64) {
        self.balance_nominal = quantize_significant(self.balance_nominal + amount, SIGNIFICANT_DIGITS);
        self.accumulated_nominal =
            quantize_significant(self.accumulated_nominal + amount, SIGNIFICANT_DIGITS);
    }

    /// Credit one month of interest at `monthly_rate` and return the amount
    pub fn credit_interest(&mut self, monthly_rate: f64) -> f64 {
        let interest = self.balance_nominal * monthly_rate;
        self.balance_nominal = quantize_significant(self.balance_nominal + interest, SIGNIFICANT_DIGITS);
        self.accumulated_interest += interest;
        interest
    }

    /// Deflate this month's contribution and compound the real balance
    pub fn compound_real(&mut self, contribution: f64, inflation_factor: f64, real_rate: f64) {
        self.real_accumulated += contribution / inflation_factor;
        self.real_balance = (self.real_balance + contribution) * (1.0 + real_rate);
    }

    /// Share of the nominal balance that came from contributions
    pub fn contribution_share(&self) -> f64 {
        if self.balance_nominal <= 0.0 {
            0.0
        } else {
            self.accumulated_nominal / self.balance_nominal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ProjectionInput {
        ProjectionInput {
            current_age: 35,
            initial_capital: 1_000.0,
            contribution: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_initial_state() {
        let state = ProjectionState::from_input(&input());
        assert_eq!(state.balance_nominal, 1_000.0);
        assert_eq!(state.accumulated_nominal, 1_000.0);
        assert_eq!(state.real_balance, 1_000.0);
        assert_eq!(state.contribution, 100.0);
        assert_eq!(state.contribution_share(), 1.0);
    }

    #[test]
    fn test_advance_tracks_year_and_age() {
        let mut state = ProjectionState::from_input(&input());
        state.advance_to(11, &input());
        assert_eq!((state.year, state.age), (0, 35));
        state.advance_to(12, &input());
        assert_eq!((state.year, state.age), (1, 36));
    }

    #[test]
    fn test_deposit_then_interest() {
        let mut state = ProjectionState::from_input(&input());
        state.deposit(100.0);
        let interest = state.credit_interest(0.01);
        assert!((interest - 11.0).abs() < 1e-12);
        assert!((state.balance_nominal - 1_111.0).abs() < 1e-9);
        assert_eq!(state.accumulated_nominal, 1_100.0);
        assert!((state.accumulated_interest - 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_compound_real() {
        let mut state = ProjectionState::from_input(&input());
        state.compound_real(100.0, 1.25, 0.01);
        assert_eq!(state.real_accumulated, 1_080.0);
        assert!((state.real_balance - 1_111.0).abs() < 1e-9);
    }
}
