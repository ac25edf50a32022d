//! Study inputs and CSV loading

mod data;
pub mod loader;

pub use data::{ContributionFrequency, ProjectionInput, MAX_APPLICATION_YEARS};
pub use loader::{load_studies, load_studies_from_reader, Study};
