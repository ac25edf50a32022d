//! Output structures for projections

use serde::{Deserialize, Serialize};

/// Which engine produced a record stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// Configurable engine driven by [`super::CalculationOptions`]
    Generic,
    /// Fixed-rule engine reproducing the reference calculator
    Reference,
}

impl std::fmt::Display for EngineKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineKind::Generic => write!(f, "generic"),
            EngineKind::Reference => write!(f, "reference"),
        }
    }
}

/// One month of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRecord {
    // Timing
    pub month: u32,
    pub age: u32,
    pub year: u32,

    /// Month 0 carries the initial capital
    pub contribution_nominal: f64,
    /// Initial capital plus contributions to date
    pub accumulated_nominal: f64,
    pub balance_gross_nominal: f64,
    pub balance_after_tax_nominal: f64,
    pub real_balance: f64,
    pub real_accumulated: f64,
    pub tax_amount: f64,
    pub inflation_factor: f64,
    /// Balance shown to the user under the active inflation mode
    pub exhibited_balance: f64,

    /// Interest credited this month
    pub interest: f64,
    pub accumulated_interest: f64,
    /// After-tax balance expressed in month-0 money
    pub capital_indexed_balance: f64,
}

impl MonthlyRecord {
    /// Create a record with zeroed values
    pub fn new(month: u32) -> Self {
        Self {
            month,
            age: 0,
            year: month / 12,
            contribution_nominal: 0.0,
            accumulated_nominal: 0.0,
            balance_gross_nominal: 0.0,
            balance_after_tax_nominal: 0.0,
            real_balance: 0.0,
            real_accumulated: 0.0,
            tax_amount: 0.0,
            inflation_factor: 1.0,
            exhibited_balance: 0.0,
            interest: 0.0,
            accumulated_interest: 0.0,
            capital_indexed_balance: 0.0,
        }
    }

    /// Wealth used by the metrics: real when the study reports in today's
    /// money, after-tax nominal otherwise
    pub fn wealth(&self, fix_inflation: bool) -> f64 {
        if fix_inflation {
            self.real_balance
        } else {
            self.balance_after_tax_nominal
        }
    }
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub engine: EngineKind,

    /// Monthly records in ascending month order
    pub records: Vec<MonthlyRecord>,
}

impl ProjectionResult {
    pub fn new(engine: EngineKind) -> Self {
        Self {
            engine,
            records: Vec::new(),
        }
    }

    pub fn with_capacity(engine: EngineKind, months: usize) -> Self {
        Self {
            engine,
            records: Vec::with_capacity(months),
        }
    }

    /// Add a monthly record
    pub fn add_row(&mut self, row: MonthlyRecord) {
        self.records.push(row);
    }

    pub fn last(&self) -> Option<&MonthlyRecord> {
        self.records.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_interest: f64 = self.records.iter().map(|r| r.interest).sum();

        let last = self.records.last();
        let total_contributed = last.map(|r| r.accumulated_nominal).unwrap_or(0.0);
        let final_nominal = last.map(|r| r.balance_after_tax_nominal).unwrap_or(0.0);
        let final_real = last.map(|r| r.real_balance).unwrap_or(0.0);
        let final_exhibited = last.map(|r| r.exhibited_balance).unwrap_or(0.0);

        ProjectionSummary {
            engine: self.engine,
            total_months: self.records.len() as u32,
            total_contributed,
            total_interest,
            final_nominal,
            final_real,
            final_exhibited,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub engine: EngineKind,
    pub total_months: u32,
    pub total_contributed: f64,
    pub total_interest: f64,
    pub final_nominal: f64,
    pub final_real: f64,
    pub final_exhibited: f64,
}
