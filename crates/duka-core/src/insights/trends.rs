//! Month-over-month trend analysis

use super::types::{GroupBreakdown, MonthlyTrend, TrendDirection};

/// Percentage change between two monthly totals; 0 when the previous
/// month's total is 0 (never NaN/Infinity)
pub fn change_percentage(prev: f64, curr: f64) -> f64 {
    if prev == 0.0 {
        0.0
    } else {
        (curr - prev) / prev * 100.0
    }
}

/// Derive the trend series from the ascending monthly aggregation.
///
/// The first month has no prior reference: it is classified `stable` and
/// carries no change percentage.
pub fn analyze(monthly: &[GroupBreakdown]) -> Vec<MonthlyTrend> {
    monthly
        .iter()
        .enumerate()
        .map(|(i, group)| {
            let change = if i == 0 {
                None
            } else {
                Some(change_percentage(
                    monthly[i - 1].total_normalized,
                    group.total_normalized,
                ))
            };
            MonthlyTrend {
                month: group.key.clone(),
                count: group.count,
                total_amount: group.total_amount,
                total_normalized: group.total_normalized,
                change_percentage: change,
                trend: change.map_or(TrendDirection::Stable, TrendDirection::classify),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn month(key: &str, total: f64) -> GroupBreakdown {
        GroupBreakdown {
            key: key.to_string(),
            count: 1,
            total_amount: total,
            total_normalized: total,
            percentage: 0.0,
            average_amount: total,
            average_normalized: total,
            breakdown: vec![],
        }
    }

    // Worked example: [1000, 1200, 900] gives stable, increasing +20%, decreasing -25%
    #[test]
    fn test_trend_series_example() {
        let monthly = vec![
            month("2024-01", 1000.0),
            month("2024-02", 1200.0),
            month("2024-03", 900.0),
        ];
        let trends = analyze(&monthly);

        assert_eq!(trends[0].trend, TrendDirection::Stable);
        assert!(trends[0].change_percentage.is_none());

        assert_eq!(trends[1].trend, TrendDirection::Increasing);
        assert!((trends[1].change_percentage.unwrap() - 20.0).abs() < 1e-9);

        assert_eq!(trends[2].trend, TrendDirection::Decreasing);
        assert!((trends[2].change_percentage.unwrap() + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_previous_month_yields_zero_change() {
        let monthly = vec![month("2024-01", 0.0), month("2024-02", 500.0)];
        let trends = analyze(&monthly);

        assert_eq!(trends[1].change_percentage, Some(0.0));
        assert_eq!(trends[1].trend, TrendDirection::Stable);
    }

    #[test]
    fn test_small_change_is_stable() {
        let monthly = vec![month("2024-01", 1000.0), month("2024-02", 1040.0)];
        let trends = analyze(&monthly);

        assert_eq!(trends[1].trend, TrendDirection::Stable);
    }

    #[test]
    fn test_empty_series() {
        assert!(analyze(&[]).is_empty());
    }
}
