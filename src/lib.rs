//! Wealth Projection - month-by-month compound-interest engines for long-term
//! savings studies
//!
//! This library provides:
//! - A configurable generic engine and a fixed-rule reference engine sharing
//!   one monthly record shape
//! - Rate conversion and the fixed-precision rounding steps both engines use
//! - Summary metrics, milestone detection and yearly rollups
//! - Closed-form goal planning over dated implementation windows
//! - Batch execution of many studies in parallel

pub mod compare;
pub mod error;
pub mod planning;
pub mod projection;
pub mod rates;
pub mod report;
pub mod scenario;
pub mod study;

// Re-export commonly used types
pub use error::{ProjectionError, Result};
pub use projection::{
    project_engine_a, project_engine_b, CalculationOptions, GenericEngine, MonthlyRecord,
    ProjectionEngine, ProjectionResult, ReferenceEngine,
};
pub use report::{aggregate_metrics, rollup_yearly, Metrics, YearlyRecord};
pub use scenario::{EngineSelection, ScenarioRunner, StudyReport};
pub use study::{ProjectionInput, Study};
