//! Load studies from CSV
//!
//! Expected header:
//! `StudyId,CurrentAge,ApplicationYears,InitialCapital,Contribution,ContributionFrequency,
//! ReturnRate,Inflation,AdjustCapitalInflation,AdjustContributionsInflation,RealGrowth,
//! IncludeTax,TaxRate`

use csv::Reader;
use serde::Serialize;
use std::path::Path;

use super::{ContributionFrequency, ProjectionInput};
use crate::error::{ProjectionError, Result};

/// A named study ready to be projected
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Study {
    pub id: String,
    pub input: ProjectionInput,
}

/// Raw CSV row matching the study sheet columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "StudyId")]
    study_id: String,
    #[serde(rename = "CurrentAge")]
    current_age: u32,
    #[serde(rename = "ApplicationYears")]
    application_years: u32,
    #[serde(rename = "InitialCapital")]
    initial_capital: f64,
    #[serde(rename = "Contribution")]
    contribution: f64,
    #[serde(rename = "ContributionFrequency")]
    contribution_frequency: String,
    #[serde(rename = "ReturnRate")]
    return_rate: f64,
    #[serde(rename = "Inflation")]
    inflation: f64,
    #[serde(rename = "AdjustCapitalInflation")]
    adjust_capital_inflation: bool,
    #[serde(rename = "AdjustContributionsInflation")]
    adjust_contributions_inflation: bool,
    #[serde(rename = "RealGrowth")]
    real_growth: f64,
    #[serde(rename = "IncludeTax")]
    include_tax: bool,
    #[serde(rename = "TaxRate")]
    tax_rate: f64,
}

impl CsvRow {
    fn into_study(self, line: u64) -> Result<Study> {
        let contribution_frequency = match self.contribution_frequency.as_str() {
            "Monthly" | "Mensal" => ContributionFrequency::Monthly,
            "Yearly" | "Anual" => ContributionFrequency::Yearly,
            other => {
                return Err(ProjectionError::InvalidRecord {
                    line,
                    reason: format!("unknown ContributionFrequency: {}", other),
                })
            }
        };

        let input = ProjectionInput {
            current_age: self.current_age,
            application_years: self.application_years,
            initial_capital: self.initial_capital,
            contribution: self.contribution,
            contribution_frequency,
            annual_return_pct: self.return_rate,
            annual_inflation_pct: self.inflation,
            adjust_capital_inflation: self.adjust_capital_inflation,
            adjust_contributions_inflation: self.adjust_contributions_inflation,
            real_growth_pct: self.real_growth,
            include_tax: self.include_tax,
            tax_rate_pct: self.tax_rate,
        };

        input.validate().map_err(|e| ProjectionError::InvalidRecord {
            line,
            reason: e.to_string(),
        })?;

        Ok(Study {
            id: self.study_id,
            input,
        })
    }
}

/// Load all studies from a CSV file
pub fn load_studies<P: AsRef<Path>>(path: P) -> Result<Vec<Study>> {
    let reader = Reader::from_path(path)?;
    collect_studies(reader)
}

/// Load studies from any reader (string buffer, stdin, ...)
pub fn load_studies_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Study>> {
    collect_studies(Reader::from_reader(reader))
}

fn collect_studies<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Study>> {
    let mut studies = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: CsvRow = result?;
        // Header occupies line 1
        let line = index as u64 + 2;
        studies.push(row.into_study(line)?);
    }

    log::debug!("loaded {} studies", studies.len());
    Ok(studies)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "StudyId,CurrentAge,ApplicationYears,InitialCapital,Contribution,\
ContributionFrequency,ReturnRate,Inflation,AdjustCapitalInflation,\
AdjustContributionsInflation,RealGrowth,IncludeTax,TaxRate";

    #[test]
    fn test_load_studies_from_reader() {
        let data = format!(
            "{}\ncase-1,30,20,10000,1000,Monthly,10,3.75,true,true,1,true,15\n\
             case-2,45,10,0,12000,Anual,8,0,false,false,0,false,0\n",
            HEADER
        );

        let studies = load_studies_from_reader(data.as_bytes()).unwrap();
        assert_eq!(studies.len(), 2);

        let first = &studies[0];
        assert_eq!(first.id, "case-1");
        assert_eq!(first.input.application_years, 20);
        assert_eq!(first.input.annual_inflation_pct, 3.75);
        assert!(first.input.include_tax);

        let second = &studies[1];
        assert_eq!(second.input.contribution_frequency, ContributionFrequency::Yearly);
        assert_eq!(second.input.monthly_contribution(), 1_000.0);
    }

    #[test]
    fn test_unknown_frequency_reports_line() {
        let data = format!(
            "{}\ncase-1,30,20,10000,1000,Weekly,10,3.75,true,true,1,true,15\n",
            HEADER
        );

        match load_studies_from_reader(data.as_bytes()) {
            Err(ProjectionError::InvalidRecord { line, reason }) => {
                assert_eq!(line, 2);
                assert!(reason.contains("Weekly"));
            }
            other => panic!("expected InvalidRecord, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        let data = format!(
            "{}\ncase-1,30,80,10000,1000,Monthly,10,3.75,true,true,1,true,15\n",
            HEADER
        );

        assert!(matches!(
            load_studies_from_reader(data.as_bytes()),
            Err(ProjectionError::InvalidRecord { line: 2, .. })
        ));
    }
}
