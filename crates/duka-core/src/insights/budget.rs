//! Budget projection, efficiency scoring, and recurring-spend analysis

use crate::models::ExpenseRecord;
use crate::rates::RateTable;

use super::trends::change_percentage;
use super::types::{
    AlertLevel, BudgetInsights, EfficiencyEntry, EfficiencyMetrics, GroupBreakdown, Impact,
    MonthlyTrend, Opportunity, OpportunityKind, RecurringAnalysis, TrendDirection,
};

/// Shop raw-average multiple over the cheapest shop that flags inefficiency
const INEFFICIENT_SHOP_FACTOR: f64 = 1.5;

/// Budget projection from the monthly series. Fewer than two months means
/// no month-over-month signal (change 0, alert low).
pub fn budget_insights(monthly: &[MonthlyTrend]) -> BudgetInsights {
    if monthly.is_empty() {
        return BudgetInsights::default();
    }

    let average_monthly =
        monthly.iter().map(|m| m.total_normalized).sum::<f64>() / monthly.len() as f64;
    let projected_annual = average_monthly * 12.0;

    let month_over_month_change = if monthly.len() >= 2 {
        let prev = &monthly[monthly.len() - 2];
        let curr = &monthly[monthly.len() - 1];
        change_percentage(prev.total_normalized, curr.total_normalized)
    } else {
        0.0
    };

    let alert = if month_over_month_change > 20.0 {
        AlertLevel::High
    } else if month_over_month_change > 10.0 {
        AlertLevel::Medium
    } else {
        AlertLevel::Low
    };

    BudgetInsights {
        average_monthly,
        projected_annual,
        month_over_month_change,
        trend: TrendDirection::classify(month_over_month_change),
        alert,
    }
}

fn efficiency_table(groups: &[GroupBreakdown]) -> Vec<EfficiencyEntry> {
    let mut entries: Vec<EfficiencyEntry> = groups
        .iter()
        .map(|g| EfficiencyEntry {
            key: g.key.clone(),
            cost_per_transaction: if g.count > 0 {
                g.total_normalized / g.count as f64
            } else {
                0.0
            },
            count: g.count,
        })
        .collect();
    entries.sort_by(|a, b| {
        b.cost_per_transaction
            .partial_cmp(&a.cost_per_transaction)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Cost-optimization rules, in fixed order:
/// 1. any category above 20% of total spend;
/// 2. any shop whose raw average exceeds 1.5x the cheapest shop's;
/// 3. one entry if any category name contains "Subscription" or "Service"
///    (substring heuristic preserved from the upstream report contract).
fn opportunities(
    categories: &[GroupBreakdown],
    shops: &[GroupBreakdown],
) -> Vec<Opportunity> {
    let mut out = Vec::new();

    for cat in categories {
        if cat.percentage > 20.0 {
            out.push(Opportunity {
                kind: OpportunityKind::HighSpendingCategory,
                target: cat.key.clone(),
                impact: Impact::High,
                description: format!(
                    "{} accounts for {:.1}% of total spend; review for reduction potential",
                    cat.key, cat.percentage
                ),
            });
        }
    }

    // Raw averages by contract; mixed currencies caveat applies
    let cheapest = shops
        .iter()
        .map(|s| s.average_amount)
        .fold(f64::INFINITY, f64::min);
    if cheapest.is_finite() && cheapest > 0.0 {
        for shop in shops {
            if shop.average_amount > cheapest * INEFFICIENT_SHOP_FACTOR {
                out.push(Opportunity {
                    kind: OpportunityKind::InefficientShop,
                    target: shop.key.clone(),
                    impact: Impact::Medium,
                    description: format!(
                        "{} averages {:.2} per expense vs {:.2} at the cheapest shop",
                        shop.key, shop.average_amount, cheapest
                    ),
                });
            }
        }
    }

    let subscription_like: Vec<&str> = categories
        .iter()
        .map(|c| c.key.as_str())
        .filter(|k| k.contains("Subscription") || k.contains("Service"))
        .collect();
    if !subscription_like.is_empty() {
        out.push(Opportunity {
            kind: OpportunityKind::SubscriptionOptimization,
            target: subscription_like.join(", "),
            impact: Impact::Medium,
            description:
                "Review subscription and service categories for unused or duplicate plans"
                    .to_string(),
        });
    }

    out
}

/// Efficiency section: cost-per-transaction tables plus the rule output
pub fn efficiency_metrics(
    categories: &[GroupBreakdown],
    shops: &[GroupBreakdown],
) -> EfficiencyMetrics {
    EfficiencyMetrics {
        category_efficiency: efficiency_table(categories),
        shop_efficiency: efficiency_table(shops),
        optimization_opportunities: opportunities(categories, shops),
    }
}

/// Recurring vs one-time spend over the filtered records.
///
/// The monthly commitment estimate weights each recurring charge by its
/// cadence (daily x30, weekly x4, monthly x1, yearly /12).
pub fn recurring_analysis(
    records: &[&ExpenseRecord],
    rates: &RateTable,
    grand_total: f64,
) -> RecurringAnalysis {
    let mut out = RecurringAnalysis::default();

    for record in records {
        let normalized = rates
            .convert_to_base(record.amount, &record.currency)
            .unwrap_or(0.0);
        if record.is_recurring {
            out.recurring_count += 1;
            out.recurring_total_normalized += normalized;
            out.estimated_monthly_commitment += normalized * record.frequency().monthly_factor();
        } else {
            out.one_time_count += 1;
        }
    }

    out.recurring_percentage = if grand_total > 0.0 {
        out.recurring_total_normalized / grand_total * 100.0
    } else {
        0.0
    };
    out
}
