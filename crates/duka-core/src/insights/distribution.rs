//! Quartile-based size distribution
//!
//! Buckets normalized amounts into small/medium/large using the 25th and
//! 75th percentile boundaries. The three buckets always partition the
//! record set exactly.

use crate::models::ExpenseRecord;
use crate::rates::RateTable;

use super::types::DistributionBuckets;

/// Compute the distribution over the filtered records. Records with an
/// unrecognized currency participate with a normalized amount of 0.
pub fn analyze(records: &[&ExpenseRecord], rates: &RateTable) -> DistributionBuckets {
    if records.is_empty() {
        return DistributionBuckets::default();
    }

    let mut values: Vec<f64> = records
        .iter()
        .map(|r| rates.convert_to_base(r.amount, &r.currency).unwrap_or(0.0))
        .collect();
    values.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let n = values.len();
    let q1 = values[(n as f64 * 0.25).floor() as usize];
    let q3 = values[(n as f64 * 0.75).floor() as usize];

    let mut buckets = DistributionBuckets {
        q1,
        q3,
        ..Default::default()
    };
    for v in &values {
        if *v <= q1 {
            buckets.small += 1;
        } else if *v <= q3 {
            buckets.medium += 1;
        } else {
            buckets.large += 1;
        }
    }
    buckets
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::HashMap;

    fn rates() -> RateTable {
        let mut map = HashMap::new();
        map.insert("USD".to_string(), 1300.0);
        RateTable::new("RWF", map)
    }

    fn record(amount: f64, currency: &str) -> ExpenseRecord {
        ExpenseRecord {
            id: format!("{}", amount),
            amount,
            currency: currency.to_string(),
            category: None,
            shop_name: None,
            expense_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            is_recurring: false,
            recurring_frequency: None,
        }
    }

    #[test]
    fn test_empty_input_is_all_zero() {
        let buckets = analyze(&[], &rates());
        assert_eq!((buckets.small, buckets.medium, buckets.large), (0, 0, 0));
        assert_eq!(buckets.q1, 0.0);
    }

    #[test]
    fn test_partition_is_exact() {
        let records: Vec<ExpenseRecord> =
            (1..=10).map(|i| record(i as f64, "RWF")).collect();
        let refs: Vec<&ExpenseRecord> = records.iter().collect();

        let buckets = analyze(&refs, &rates());
        assert_eq!(buckets.small + buckets.medium + buckets.large, 10);
        assert!(buckets.small > 0 && buckets.large > 0);
    }

    #[test]
    fn test_quartile_indices() {
        // n=8: q1 at index 2 (value 3), q3 at index 6 (value 7)
        let records: Vec<ExpenseRecord> = (1..=8).map(|i| record(i as f64, "RWF")).collect();
        let refs: Vec<&ExpenseRecord> = records.iter().collect();

        let buckets = analyze(&refs, &rates());
        assert_eq!(buckets.q1, 3.0);
        assert_eq!(buckets.q3, 7.0);
        // small <=3 is {1,2,3}; medium (3,7] is {4,5,6,7}; large >7 is {8}
        assert_eq!((buckets.small, buckets.medium, buckets.large), (3, 4, 1));
    }

    #[test]
    fn test_single_record_lands_in_small() {
        let records = vec![record(42.0, "RWF")];
        let refs: Vec<&ExpenseRecord> = records.iter().collect();

        let buckets = analyze(&refs, &rates());
        assert_eq!((buckets.small, buckets.medium, buckets.large), (1, 0, 0));
    }

    #[test]
    fn test_unknown_currency_participates_as_zero() {
        let records = vec![record(9999.0, "XYZ"), record(10.0, "RWF"), record(20.0, "RWF")];
        let refs: Vec<&ExpenseRecord> = records.iter().collect();

        let buckets = analyze(&refs, &rates());
        assert_eq!(buckets.small + buckets.medium + buckets.large, 3);
        // The XYZ record normalizes to 0 and sorts first
        assert_eq!(buckets.q1, 0.0);
    }
}
