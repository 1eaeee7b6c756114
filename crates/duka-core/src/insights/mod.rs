//! Expense analytics pipeline
//!
//! A pure computation over an in-memory record list: period filter,
//! four-dimensional aggregation, trend/distribution analysis,
//! budget/efficiency metrics, then recommendation synthesis. Everything is
//! deterministic for a fixed rate-table snapshot.

pub mod aggregate;
pub mod budget;
pub mod distribution;
pub mod engine;
pub mod period;
pub mod recommend;
pub mod trends;
pub mod types;

pub use engine::InsightsEngine;
pub use types::{
    AlertLevel, BudgetInsights, DistributionBuckets, DrillDown, EfficiencyEntry,
    EfficiencyMetrics, GroupBreakdown, Impact, InsightsReport, MonthlyTrend, Opportunity,
    OpportunityKind, Priority, Recommendation, RecommendationKind, RecurringAnalysis,
    ReportSummary, TrendDirection,
};
