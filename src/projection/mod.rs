//! Monthly wealth projection engines
//!
//! Two engines share the [`MonthlyRecord`] shape: the configurable
//! [`GenericEngine`] and the fixed-rule [`ReferenceEngine`].

mod generic;
mod options;
mod records;
mod reference;
mod schedule;
mod state;

pub use generic::{GenericEngine, GenericRates};
pub use options::{
    CalculationOptions, ContributionCadence, DepositTiming, InflationMode, TaxMode,
    DEFAULT_PASSIVE_INCOME_RATE_PCT,
};
pub use records::{EngineKind, MonthlyRecord, ProjectionResult, ProjectionSummary};
pub use reference::ReferenceEngine;
pub use schedule::{ContributionSchedule, ReferenceEscalation};
pub use state::ProjectionState;

use crate::error::Result;
use crate::study::ProjectionInput;

/// A projection engine turns a validated study into monthly records
pub trait ProjectionEngine: Send + Sync {
    fn kind(&self) -> EngineKind;

    fn project(&self, input: &ProjectionInput) -> Result<ProjectionResult>;
}

/// Run the generic engine with the given options
pub fn project_engine_a(input: &ProjectionInput, options: &CalculationOptions) -> Result<Vec<MonthlyRecord>> {
    Ok(GenericEngine::new(*options).project(input)?.records)
}

/// Run the reference engine
pub fn project_engine_b(input: &ProjectionInput) -> Result<Vec<MonthlyRecord>> {
    Ok(ReferenceEngine.project(input)?.records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engines_behind_trait_objects() {
        let input = ProjectionInput {
            application_years: 2,
            initial_capital: 5_000.0,
            contribution: 500.0,
            ..Default::default()
        };
        let engines: Vec<Box<dyn ProjectionEngine>> = vec![
            Box::new(GenericEngine::official(&input)),
            Box::new(ReferenceEngine),
        ];

        let lengths: Vec<(EngineKind, usize)> = engines
            .iter()
            .map(|e| (e.kind(), e.project(&input).unwrap().records.len()))
            .collect();
        assert_eq!(lengths, vec![(EngineKind::Generic, 25), (EngineKind::Reference, 24)]);
    }

    #[test]
    fn test_free_functions_match_engines() {
        let input = ProjectionInput {
            application_years: 3,
            initial_capital: 1_000.0,
            contribution: 100.0,
            ..Default::default()
        };
        let options = CalculationOptions::default();
        assert_eq!(
            project_engine_a(&input, &options).unwrap(),
            GenericEngine::new(options).project(&input).unwrap().records
        );
        assert_eq!(
            project_engine_b(&input).unwrap(),
            ReferenceEngine.project(&input).unwrap().records
        );
    }

    #[test]
    fn test_official_preset_tracks_reference() {
        let input = ProjectionInput {
            application_years: 10,
            initial_capital: 10_000.0,
            contribution: 1_000.0,
            annual_return_pct: 10.0,
            ..Default::default()
        };
        let generic = project_engine_a(&input, &CalculationOptions::official_preset(&input)).unwrap();
        let reference = project_engine_b(&input).unwrap();

        let a = generic.last().unwrap().balance_after_tax_nominal;
        let b = reference.last().unwrap().balance_after_tax_nominal;
        assert!((a - b).abs() / b < 0.001, "generic {} vs reference {}", a, b);
    }
}
