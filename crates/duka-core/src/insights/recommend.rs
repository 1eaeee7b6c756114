//! Recommendation synthesis
//!
//! Four independent rules, run in fixed order (category concentration,
//! trend alert, budget alert, cost-optimization passthrough). The final
//! list is stable-sorted descending by priority rank, so entries of equal
//! priority keep rule order.

use super::types::{
    BudgetInsights, GroupBreakdown, Impact, MonthlyTrend, Opportunity, Priority, Recommendation,
    RecommendationKind, TrendDirection,
};

/// Top-category share of total spend that triggers a concentration warning
const CONCENTRATION_THRESHOLD_PCT: f64 = 30.0;

/// Month-over-month change that triggers the budget recommendation
const BUDGET_ALERT_THRESHOLD_PCT: f64 = 15.0;

pub fn synthesize(
    categories: &[GroupBreakdown],
    monthly_trends: &[MonthlyTrend],
    budget: &BudgetInsights,
    opportunities: &[Opportunity],
) -> Vec<Recommendation> {
    let mut out = Vec::new();

    // Rule 1: category concentration
    if let Some(top) = categories.first() {
        if top.percentage > CONCENTRATION_THRESHOLD_PCT {
            out.push(Recommendation {
                kind: RecommendationKind::CategoryConcentration,
                priority: Priority::High,
                title: format!("Spending concentrated in {}", top.key),
                description: format!(
                    "{} holds {:.1}% of total spend for the period",
                    top.key, top.percentage
                ),
                action: format!("Break down {} expenses and negotiate the largest items", top.key),
                impact: Impact::High,
            });
        }
    }

    // Rule 2: sustained upward trend over the last 3 months
    let recent = &monthly_trends[monthly_trends.len().saturating_sub(3)..];
    let increasing = recent
        .iter()
        .filter(|t| t.trend == TrendDirection::Increasing)
        .count();
    if increasing >= 2 {
        out.push(Recommendation {
            kind: RecommendationKind::TrendAlert,
            priority: Priority::Medium,
            title: "Spending is trending up".to_string(),
            description: format!(
                "{} of the last {} months show increasing spend",
                increasing,
                recent.len()
            ),
            action: "Compare recent months against budget and flag new cost drivers".to_string(),
            impact: Impact::Medium,
        });
    }

    // Rule 3: sharp month-over-month jump
    if budget.month_over_month_change > BUDGET_ALERT_THRESHOLD_PCT {
        out.push(Recommendation {
            kind: RecommendationKind::BudgetAlert,
            priority: Priority::High,
            title: "Monthly spend jumped".to_string(),
            description: format!(
                "Spend rose {:.1}% versus the previous month",
                budget.month_over_month_change
            ),
            action: "Review this month's largest expenses before closing the books".to_string(),
            impact: Impact::High,
        });
    }

    // Rule 4: cost-optimization passthrough
    for opp in opportunities {
        out.push(Recommendation {
            kind: RecommendationKind::CostOptimization,
            priority: if opp.impact == Impact::High {
                Priority::High
            } else {
                Priority::Medium
            },
            title: format!("Optimize: {}", opp.target),
            description: opp.description.clone(),
            action: "Investigate and act on the flagged cost pattern".to_string(),
            impact: opp.impact,
        });
    }

    // Stable: equal priorities keep the rule order above
    out.sort_by(|a, b| b.priority.rank().cmp(&a.priority.rank()));
    out
}
