//! Record import
//!
//! Loads expense records from back-office exports: CSV (one row per
//! expense) or a JSON array. The file extension decides the parser.

use std::io::Read;
use std::path::Path;
use std::str::FromStr;

use chrono::NaiveDate;
use csv::ReaderBuilder;
use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::{ExpenseRecord, RecurringFrequency};

/// CSV row shape.
///
/// Expected header:
/// `id,amount,currency,category,shop_name,expense_date,is_recurring,recurring_frequency`
/// Empty category/shop/frequency cells mean "missing" and get the engine's
/// sentinel defaults downstream.
#[derive(Debug, Deserialize)]
struct RecordRow {
    id: String,
    amount: f64,
    currency: String,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    shop_name: Option<String>,
    expense_date: String,
    #[serde(default)]
    is_recurring: Option<bool>,
    #[serde(default)]
    recurring_frequency: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl RecordRow {
    fn into_record(self) -> Result<ExpenseRecord> {
        let expense_date = NaiveDate::parse_from_str(self.expense_date.trim(), "%Y-%m-%d")
            .map_err(|_| {
                Error::InvalidData(format!(
                    "record {}: bad expense_date {:?} (expected YYYY-MM-DD)",
                    self.id, self.expense_date
                ))
            })?;

        if self.amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "record {}: negative amount {}",
                self.id, self.amount
            )));
        }

        let recurring_frequency = non_empty(self.recurring_frequency)
            .map(|s| {
                RecurringFrequency::from_str(&s)
                    .map_err(|e| Error::InvalidData(format!("record {}: {}", self.id, e)))
            })
            .transpose()?;

        Ok(ExpenseRecord {
            id: self.id,
            amount: self.amount,
            currency: self.currency.trim().to_string(),
            category: non_empty(self.category),
            shop_name: non_empty(self.shop_name),
            expense_date,
            is_recurring: self.is_recurring.unwrap_or(false),
            recurring_frequency,
        })
    }
}

/// Parse CSV expense data
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize::<RecordRow>() {
        records.push(result?.into_record()?);
    }

    debug!(count = records.len(), "Parsed CSV expense records");
    Ok(records)
}

/// Parse a JSON array of expense records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<ExpenseRecord>> {
    let records: Vec<ExpenseRecord> = serde_json::from_reader(reader)?;
    debug!(count = records.len(), "Parsed JSON expense records");
    Ok(records)
}

/// Load records from a file, dispatching on extension (.csv or .json)
pub fn load_records(path: &Path) -> Result<Vec<ExpenseRecord>> {
    let file = std::fs::File::open(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("csv") => parse_csv(file),
        Some("json") => parse_json(file),
        other => Err(Error::UnsupportedFormat(format!(
            "{} (expected .csv or .json)",
            other.unwrap_or("<none>")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV_FIXTURE: &str = "\
id,amount,currency,category,shop_name,expense_date,is_recurring,recurring_frequency
e1,100.0,USD,Rent,Kimironko,2024-01-15,false,
e2,50.0,USD,,,2024-02-15,true,monthly
e3,200.0,RWF,Utilities,Downtown,2024-01-20,,
";

    #[test]
    fn test_parse_csv() {
        let records = parse_csv(CSV_FIXTURE.as_bytes()).unwrap();
        assert_eq!(records.len(), 3);

        assert_eq!(records[0].category.as_deref(), Some("Rent"));
        assert!(!records[0].is_recurring);

        // Empty cells become missing values
        assert!(records[1].category.is_none());
        assert!(records[1].shop_name.is_none());
        assert!(records[1].is_recurring);
        assert_eq!(
            records[1].recurring_frequency,
            Some(RecurringFrequency::Monthly)
        );

        assert!(!records[2].is_recurring);
        assert!(records[2].recurring_frequency.is_none());
    }

    #[test]
    fn test_bad_date_is_invalid_data() {
        let csv = "id,amount,currency,category,shop_name,expense_date,is_recurring,recurring_frequency\n\
                   e1,10.0,USD,,,15-01-2024,,\n";
        let err = parse_csv(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, Error::InvalidData(_)));
    }

    #[test]
    fn test_negative_amount_rejected_at_import() {
        let csv = "id,amount,currency,category,shop_name,expense_date,is_recurring,recurring_frequency\n\
                   e1,-10.0,USD,,,2024-01-15,,\n";
        assert!(parse_csv(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_parse_json() {
        let json = r#"[
            {
                "id": "e1",
                "amount": 100.0,
                "currency": "USD",
                "category": "Rent",
                "shop_name": null,
                "expense_date": "2024-01-15",
                "is_recurring": false,
                "recurring_frequency": null
            }
        ]"#;
        let records = parse_json(json.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].shop(), "All Shops");
    }

    #[test]
    fn test_load_records_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.xml");
        std::fs::write(&path, "<xml/>").unwrap();

        let err = load_records(&path).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFormat(_)));
    }

    #[test]
    fn test_load_records_csv_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("records.csv");
        std::fs::write(&path, CSV_FIXTURE).unwrap();

        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 3);
    }
}
