//! Report types for the expense analytics engine
//!
//! Everything here is plain data: built once by the orchestrator, never
//! mutated afterwards, serialized as camelCase JSON for whatever consumer
//! renders or stores the report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Period;

/// Three-way month-over-month trend classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Increasing,
    Decreasing,
    Stable,
}

impl TrendDirection {
    /// Classify a percentage change with the ±5% threshold
    pub fn classify(change_pct: f64) -> Self {
        if change_pct > 5.0 {
            Self::Increasing
        } else if change_pct < -5.0 {
            Self::Decreasing
        } else {
            Self::Stable
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Increasing => "increasing",
            Self::Decreasing => "decreasing",
            Self::Stable => "stable",
        }
    }
}

impl std::fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Recommendation priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// Numeric rank for sorting (higher = more urgent)
    pub fn rank(&self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Estimated impact of acting on an opportunity or recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    High,
    Medium,
    Low,
}

/// Budget alert tier derived from the month-over-month change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    High,
    Medium,
    Low,
}

/// One row of a breakdown dimension (category, shop, or currency)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupBreakdown {
    /// Group key: category name, shop name, or currency code
    pub key: String,
    pub count: usize,
    /// Sum of raw amounts in original currency units. Kept for
    /// compatibility with the upstream report contract; mixes currencies
    /// when the group spans more than one.
    pub total_amount: f64,
    /// Sum of base-currency amounts (unknown currencies contribute 0)
    pub total_normalized: f64,
    /// Share of the grand normalized total, in percent
    pub percentage: f64,
    /// total_amount / count; same mixed-currency caveat as total_amount
    pub average_amount: f64,
    /// total_normalized / count; the currency-correct average
    pub average_normalized: f64,
    /// Drill-down rows for display (by month for categories, by category
    /// for shops); empty for currency groups
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breakdown: Vec<DrillDown>,
}

/// Nested drill-down row inside a `GroupBreakdown`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrillDown {
    pub key: String,
    pub count: usize,
    pub total_normalized: f64,
}

/// One month in the time series
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrend {
    /// "YYYY-MM"
    pub month: String,
    pub count: usize,
    pub total_amount: f64,
    pub total_normalized: f64,
    /// Change vs the previous month; absent for the first month
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_percentage: Option<f64>,
    pub trend: TrendDirection,
}

/// Quartile-based size distribution of normalized amounts
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DistributionBuckets {
    /// Records with normalized amount <= q1
    pub small: usize,
    /// Records with q1 < normalized amount <= q3
    pub medium: usize,
    /// Records with normalized amount > q3
    pub large: usize,
    /// 25th-percentile boundary
    pub q1: f64,
    /// 75th-percentile boundary
    pub q3: f64,
}

/// Recurring vs one-time spend
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurringAnalysis {
    pub recurring_count: usize,
    pub one_time_count: usize,
    pub recurring_total_normalized: f64,
    /// Share of the grand normalized total held by recurring charges
    pub recurring_percentage: f64,
    /// Frequency-weighted monthly equivalent of recurring spend
    pub estimated_monthly_commitment: f64,
}

/// Budget projection and month-over-month alerting
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetInsights {
    pub average_monthly: f64,
    pub projected_annual: f64,
    /// Change between the two most recent months (0 with fewer than 2)
    pub month_over_month_change: f64,
    pub trend: TrendDirection,
    pub alert: AlertLevel,
}

impl Default for BudgetInsights {
    fn default() -> Self {
        Self {
            average_monthly: 0.0,
            projected_annual: 0.0,
            month_over_month_change: 0.0,
            trend: TrendDirection::Stable,
            alert: AlertLevel::Low,
        }
    }
}

/// Cost-per-transaction row
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyEntry {
    pub key: String,
    /// total_normalized / count for the group
    pub cost_per_transaction: f64,
    pub count: usize,
}

/// Kind of cost-optimization opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpportunityKind {
    HighSpendingCategory,
    InefficientShop,
    SubscriptionOptimization,
}

/// A single cost-optimization opportunity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Opportunity {
    pub kind: OpportunityKind,
    /// Category or shop the opportunity points at
    pub target: String,
    pub impact: Impact,
    pub description: String,
}

/// Efficiency section of the report
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EfficiencyMetrics {
    /// Cost per transaction by category, descending
    pub category_efficiency: Vec<EfficiencyEntry>,
    /// Cost per transaction by shop, descending
    pub shop_efficiency: Vec<EfficiencyEntry>,
    pub optimization_opportunities: Vec<Opportunity>,
}

/// Which rule produced a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    CategoryConcentration,
    TrendAlert,
    BudgetAlert,
    CostOptimization,
}

/// A prioritized, human-readable recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub kind: RecommendationKind,
    pub priority: Priority,
    pub title: String,
    pub description: String,
    /// Suggested next step for the operator
    pub action: String,
    pub impact: Impact,
}

/// Headline figures for the report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub period: Period,
    pub record_count: usize,
    pub total_normalized: f64,
    pub average_normalized: f64,
    pub base_currency: String,
    /// Timestamp of the rate table the report was normalized with
    pub rates_last_update: DateTime<Utc>,
}

/// The complete insights report. Immutable once assembled.
///
/// Invariant: the normalized totals of `category_breakdown`,
/// `shop_analysis`, and `currency_analysis` each sum to
/// `summary.total_normalized`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsReport {
    pub summary: ReportSummary,
    /// Descending by normalized total
    pub category_breakdown: Vec<GroupBreakdown>,
    /// Ascending by month key
    pub monthly_trends: Vec<MonthlyTrend>,
    /// Descending by normalized total
    pub shop_analysis: Vec<GroupBreakdown>,
    /// Descending by normalized total
    pub currency_analysis: Vec<GroupBreakdown>,
    pub recurring_analysis: RecurringAnalysis,
    pub distribution: DistributionBuckets,
    pub budget_insights: BudgetInsights,
    pub efficiency_metrics: EfficiencyMetrics,
    /// Descending by priority rank; rule order preserved within a rank
    pub recommendations: Vec<Recommendation>,
}

impl InsightsReport {
    /// Canonical all-zero report for empty (or fully filtered-out) input
    pub fn empty(period: Period, base_currency: String, rates_last_update: DateTime<Utc>) -> Self {
        Self {
            summary: ReportSummary {
                period,
                record_count: 0,
                total_normalized: 0.0,
                average_normalized: 0.0,
                base_currency,
                rates_last_update,
            },
            category_breakdown: vec![],
            monthly_trends: vec![],
            shop_analysis: vec![],
            currency_analysis: vec![],
            recurring_analysis: RecurringAnalysis::default(),
            distribution: DistributionBuckets::default(),
            budget_insights: BudgetInsights::default(),
            efficiency_metrics: EfficiencyMetrics::default(),
            recommendations: vec![],
        }
    }
}
