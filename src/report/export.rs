//! CSV export for spreadsheet reconciliation

use std::io::Write;

use csv::Writer;
use serde::Serialize;

use super::yearly::YearlyRecord;
use crate::error::Result;
use crate::projection::MonthlyRecord;

/// Write monthly records with one column per field
pub fn write_monthly_csv<W: Write>(writer: W, records: &[MonthlyRecord]) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    for record in records {
        csv.serialize(record)?;
    }
    csv.flush()?;
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct YearlyRow {
    year: u32,
    age: u32,
    month: u32,
    nominal_balance: f64,
    real_balance: f64,
    wealth: f64,
    contributions: f64,
    interest: f64,
    contributions_fraction: f64,
    interest_fraction: f64,
}

impl From<&YearlyRecord> for YearlyRow {
    fn from(record: &YearlyRecord) -> Self {
        Self {
            year: record.year,
            age: record.age,
            month: record.month,
            nominal_balance: record.nominal_balance,
            real_balance: record.real_balance,
            wealth: record.wealth,
            contributions: record.split.contributions,
            interest: record.split.interest,
            contributions_fraction: record.split.contributions_fraction,
            interest_fraction: record.split.interest_fraction,
        }
    }
}

/// Write the yearly rollup with the contribution split flattened
pub fn write_yearly_csv<W: Write>(writer: W, records: &[YearlyRecord]) -> Result<()> {
    let mut csv = Writer::from_writer(writer);
    for record in records {
        csv.serialize(YearlyRow::from(record))?;
    }
    csv.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::project_engine_b;
    use crate::report::rollup_yearly;
    use crate::study::ProjectionInput;

    fn input() -> ProjectionInput {
        ProjectionInput {
            application_years: 2,
            initial_capital: 1_000.0,
            contribution: 100.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_monthly_csv_has_header_and_rows() {
        let records = project_engine_b(&input()).unwrap();
        let mut buffer = Vec::new();
        write_monthly_csv(&mut buffer, &records).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("month,age,year,contributionNominal"));
        assert_eq!(lines.count(), 24);
    }

    #[test]
    fn test_yearly_csv_flattens_split() {
        let records = project_engine_b(&input()).unwrap();
        let yearly = rollup_yearly(&records, &input());
        let mut buffer = Vec::new();
        write_yearly_csv(&mut buffer, &yearly).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.lines().next().unwrap().ends_with("contributionsFraction,interestFraction"));
        assert_eq!(text.lines().count(), 3);
    }
}
