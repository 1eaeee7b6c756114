//! Period filtering
//!
//! Selects the records that fall inside a named time window. "Now" is
//! computed once per call; `filter_at` takes an explicit reference date so
//! tests stay deterministic.

use chrono::{Datelike, Duration, NaiveDate, Utc};

use crate::models::{ExpenseRecord, Period};

/// Calendar quarter index (0..=3) for a date
fn quarter(date: NaiveDate) -> u32 {
    (date.month() - 1) / 3
}

/// Filter `records` to the window named by `period`, evaluated against
/// today's date.
pub fn filter<'a>(records: &'a [ExpenseRecord], period: Period) -> Vec<&'a ExpenseRecord> {
    filter_at(records, period, Utc::now().date_naive())
}

/// Filter against an explicit reference date.
///
/// Records are never excluded for missing optional fields; only
/// `expense_date` participates in the window test.
pub fn filter_at<'a>(
    records: &'a [ExpenseRecord],
    period: Period,
    today: NaiveDate,
) -> Vec<&'a ExpenseRecord> {
    match period {
        Period::All => records.iter().collect(),
        Period::ThisMonth => records
            .iter()
            .filter(|r| {
                r.expense_date.year() == today.year() && r.expense_date.month() == today.month()
            })
            .collect(),
        Period::LastMonth => {
            // December of the previous year when today is January
            let (year, month) = if today.month() == 1 {
                (today.year() - 1, 12)
            } else {
                (today.year(), today.month() - 1)
            };
            records
                .iter()
                .filter(|r| r.expense_date.year() == year && r.expense_date.month() == month)
                .collect()
        }
        Period::ThisQuarter => records
            .iter()
            .filter(|r| {
                r.expense_date.year() == today.year() && quarter(r.expense_date) == quarter(today)
            })
            .collect(),
        Period::ThisYear => records
            .iter()
            .filter(|r| r.expense_date.year() == today.year())
            .collect(),
        Period::Last30Days => {
            let cutoff = today - Duration::days(30);
            records
                .iter()
                .filter(|r| r.expense_date >= cutoff)
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: date.to_string(),
            amount: 10.0,
            currency: "RWF".to_string(),
            category: None,
            shop_name: None,
            expense_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            is_recurring: false,
            recurring_frequency: None,
        }
    }

    fn ids(filtered: &[&ExpenseRecord]) -> Vec<String> {
        filtered.iter().map(|r| r.id.clone()).collect()
    }

    #[test]
    fn test_this_month() {
        let records = vec![record("2024-03-01"), record("2024-03-31"), record("2024-02-29")];
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let filtered = filter_at(&records, Period::ThisMonth, today);
        assert_eq!(ids(&filtered), vec!["2024-03-01", "2024-03-31"]);
    }

    #[test]
    fn test_last_month_wraps_year_boundary() {
        let records = vec![record("2023-12-20"), record("2024-01-05"), record("2023-11-30")];
        let today = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();

        let filtered = filter_at(&records, Period::LastMonth, today);
        assert_eq!(ids(&filtered), vec!["2023-12-20"]);
    }

    #[test]
    fn test_this_quarter_requires_same_year() {
        let records = vec![record("2024-01-15"), record("2024-03-31"), record("2023-02-01")];
        let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();

        let filtered = filter_at(&records, Period::ThisQuarter, today);
        assert_eq!(ids(&filtered), vec!["2024-01-15", "2024-03-31"]);
    }

    #[test]
    fn test_last_30_days_is_inclusive() {
        let today = NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
        let records = vec![
            record("2024-03-01"), // exactly 30 days before: kept
            record("2024-02-29"), // 31 days before: dropped
            record("2024-03-31"),
        ];

        let filtered = filter_at(&records, Period::Last30Days, today);
        assert_eq!(ids(&filtered), vec!["2024-03-01", "2024-03-31"]);
    }

    #[test]
    fn test_all_passes_through() {
        let records = vec![record("1999-01-01"), record("2024-03-01")];
        let today = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();

        let filtered = filter_at(&records, Period::All, today);
        assert_eq!(filtered.len(), 2);
    }

    #[test]
    fn test_this_year() {
        let records = vec![record("2024-01-01"), record("2024-12-31"), record("2023-12-31")];
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let filtered = filter_at(&records, Period::ThisYear, today);
        assert_eq!(filtered.len(), 2);
    }
}
