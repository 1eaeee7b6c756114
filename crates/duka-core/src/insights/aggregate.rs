//! Multi-dimensional aggregation
//!
//! Groups filtered records by category, shop, currency, or month.
//! Accumulation is insertion-ordered (a Vec of groups plus a key index)
//! followed by an explicit stable sort, so output order never depends on
//! map iteration semantics.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::models::ExpenseRecord;
use crate::rates::RateTable;

use super::types::{DrillDown, GroupBreakdown};

/// Descending by normalized total; stable, NaN-safe
fn by_normalized_desc(a: &GroupBreakdown, b: &GroupBreakdown) -> Ordering {
    b.total_normalized
        .partial_cmp(&a.total_normalized)
        .unwrap_or(Ordering::Equal)
}

struct GroupAcc {
    key: String,
    count: usize,
    total_amount: f64,
    total_normalized: f64,
    drill_order: Vec<String>,
    drill: HashMap<String, (usize, f64)>,
}

impl GroupAcc {
    fn new(key: String) -> Self {
        Self {
            key,
            count: 0,
            total_amount: 0.0,
            total_normalized: 0.0,
            drill_order: Vec::new(),
            drill: HashMap::new(),
        }
    }
}

/// Core accumulation: one pass over the records, then a percentage/average
/// post-pass once the grand total is known.
///
/// `total_amount` sums raw amounts in their original currency units (a
/// compatibility behavior of the report contract); `total_normalized` sums
/// base-currency conversions, counting unknown currencies as 0.
fn accumulate(
    records: &[&ExpenseRecord],
    rates: &RateTable,
    key_fn: impl Fn(&ExpenseRecord) -> String,
    drill_fn: Option<&dyn Fn(&ExpenseRecord) -> String>,
) -> Vec<GroupBreakdown> {
    let mut order: Vec<GroupAcc> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let key = key_fn(record);
        let idx = *index.entry(key.clone()).or_insert_with(|| {
            order.push(GroupAcc::new(key));
            order.len() - 1
        });

        let normalized = rates
            .convert_to_base(record.amount, &record.currency)
            .unwrap_or(0.0);

        let group = &mut order[idx];
        group.count += 1;
        group.total_amount += record.amount;
        group.total_normalized += normalized;

        if let Some(drill_fn) = drill_fn {
            let drill_key = drill_fn(record);
            match group.drill.get_mut(&drill_key) {
                Some(entry) => {
                    entry.0 += 1;
                    entry.1 += normalized;
                }
                None => {
                    group.drill_order.push(drill_key.clone());
                    group.drill.insert(drill_key, (1, normalized));
                }
            }
        }
    }

    let grand_total: f64 = order.iter().map(|g| g.total_normalized).sum();

    order
        .into_iter()
        .map(|g| {
            let percentage = if grand_total > 0.0 {
                g.total_normalized / grand_total * 100.0
            } else {
                0.0
            };
            let average_amount = if g.count > 0 {
                g.total_amount / g.count as f64
            } else {
                0.0
            };
            let average_normalized = if g.count > 0 {
                g.total_normalized / g.count as f64
            } else {
                0.0
            };

            let breakdown = g
                .drill_order
                .iter()
                .map(|key| {
                    let (count, total_normalized) = g.drill[key];
                    DrillDown {
                        key: key.clone(),
                        count,
                        total_normalized,
                    }
                })
                .collect();

            GroupBreakdown {
                key: g.key,
                count: g.count,
                total_amount: g.total_amount,
                total_normalized: g.total_normalized,
                percentage,
                average_amount,
                average_normalized,
                breakdown,
            }
        })
        .collect()
}

/// Spend by category, descending by normalized total. Each category
/// carries a per-month drill-down, sorted ascending by month key.
pub fn by_category(records: &[&ExpenseRecord], rates: &RateTable) -> Vec<GroupBreakdown> {
    let mut groups = accumulate(
        records,
        rates,
        |r| r.category().to_string(),
        Some(&|r: &ExpenseRecord| r.month_key()),
    );
    for group in &mut groups {
        group.breakdown.sort_by(|a, b| a.key.cmp(&b.key));
    }
    groups.sort_by(by_normalized_desc);
    groups
}

/// Spend by shop, descending by normalized total. Each shop carries a
/// per-category drill-down, descending by normalized total.
pub fn by_shop(records: &[&ExpenseRecord], rates: &RateTable) -> Vec<GroupBreakdown> {
    let mut groups = accumulate(
        records,
        rates,
        |r| r.shop().to_string(),
        Some(&|r: &ExpenseRecord| r.category().to_string()),
    );
    for group in &mut groups {
        group.breakdown.sort_by(|a, b| {
            b.total_normalized
                .partial_cmp(&a.total_normalized)
                .unwrap_or(Ordering::Equal)
        });
    }
    groups.sort_by(by_normalized_desc);
    groups
}

/// Spend by original currency, descending by normalized total
pub fn by_currency(records: &[&ExpenseRecord], rates: &RateTable) -> Vec<GroupBreakdown> {
    let mut groups = accumulate(records, rates, |r| r.currency.clone(), None);
    groups.sort_by(by_normalized_desc);
    groups
}

/// Spend by "YYYY-MM" month key, ascending by month
pub fn by_month(records: &[&ExpenseRecord], rates: &RateTable) -> Vec<GroupBreakdown> {
    let mut groups = accumulate(records, rates, |r| r.month_key(), None);
    groups.sort_by(|a, b| a.key.cmp(&b.key));
    groups
}
