//! Scenario runner for batch projections
//!
//! Holds the engine choice once, then runs any number of studies through it.
//! Studies are independent, so batches run in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::error::Result;
use crate::projection::{
    CalculationOptions, GenericEngine, MonthlyRecord, ProjectionEngine, ProjectionResult,
    ProjectionSummary, ReferenceEngine,
};
use crate::report::{aggregate_metrics, rollup_yearly, Metrics, YearlyRecord};
use crate::study::{ProjectionInput, Study};

/// Which engine a runner drives
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EngineSelection {
    /// Generic engine with fixed options
    Generic(CalculationOptions),
    /// Generic engine with the reference-emulating preset derived per study
    Official,
    /// Reference engine
    #[default]
    Reference,
}

/// Everything produced for one study
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyReport {
    pub study_id: String,
    pub summary: ProjectionSummary,
    pub metrics: Metrics,
    /// Monthly income from the exhibited balance at the configured rate
    /// (generic runs only)
    pub option_passive_income: Option<f64>,
    pub yearly: Vec<YearlyRecord>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub records: Vec<MonthlyRecord>,
}

/// Pre-configured runner for batch projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new(EngineSelection::Reference);
/// let studies = load_studies("studies.csv")?;
/// for report in runner.run_batch(&studies) {
///     println!("{}", report?.metrics.final_wealth);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    selection: EngineSelection,
    keep_records: bool,
}

impl ScenarioRunner {
    pub fn new(selection: EngineSelection) -> Self {
        Self {
            selection,
            keep_records: true,
        }
    }

    /// Drop monthly records from reports to keep batch output small
    pub fn summaries_only(mut self) -> Self {
        self.keep_records = false;
        self
    }

    pub fn selection(&self) -> EngineSelection {
        self.selection
    }

    /// Options the generic engine would use for `input`, if this runner
    /// drives the generic engine
    fn options_for(&self, input: &ProjectionInput) -> Option<CalculationOptions> {
        match self.selection {
            EngineSelection::Generic(options) => Some(options),
            EngineSelection::Official => Some(CalculationOptions::official_preset(input)),
            EngineSelection::Reference => None,
        }
    }

    /// Project a single input
    pub fn project(&self, input: &ProjectionInput) -> Result<ProjectionResult> {
        match self.options_for(input) {
            Some(options) => GenericEngine::new(options).project(input),
            None => ReferenceEngine.project(input),
        }
    }

    /// Run a single study and derive its report
    pub fn run(&self, study: &Study) -> Result<StudyReport> {
        let result = self.project(&study.input)?;
        let metrics = aggregate_metrics(&result.records, &study.input);
        let yearly = rollup_yearly(&result.records, &study.input);
        let summary = result.summary();
        let option_passive_income = self
            .options_for(&study.input)
            .map(|options| options.passive_income(summary.final_exhibited));

        Ok(StudyReport {
            study_id: study.id.clone(),
            summary,
            metrics,
            option_passive_income,
            yearly,
            records: if self.keep_records {
                result.records
            } else {
                Vec::new()
            },
        })
    }

    /// Run many studies in parallel, preserving input order
    pub fn run_batch(&self, studies: &[Study]) -> Vec<Result<StudyReport>> {
        studies.par_iter().map(|study| self.run(study)).collect()
    }

    /// Run one input under several option sets with the generic engine
    pub fn run_scenarios(
        &self,
        input: &ProjectionInput,
        scenarios: &[CalculationOptions],
    ) -> Result<Vec<ProjectionResult>> {
        scenarios
            .par_iter()
            .map(|options| GenericEngine::new(*options).project(input))
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(EngineSelection::default())
    }
}
