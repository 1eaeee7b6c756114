//! Insights orchestrator
//!
//! `InsightsEngine` is the single entry point: a pure function of
//! `(records, period)` over one rate-table snapshot. The engine owns the
//! process-wide `RateStore`; refresh is the only async boundary and its
//! failure never affects report generation.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::{ExpenseRecord, Period};
use crate::rates::{RateProvider, RateStore};

use super::types::{InsightsReport, ReportSummary};
use super::{aggregate, budget, distribution, period, recommend, trends};

pub struct InsightsEngine {
    rates: Arc<RateStore>,
}

impl InsightsEngine {
    pub fn new(rates: Arc<RateStore>) -> Self {
        Self { rates }
    }

    /// Engine over the static fallback rate table
    pub fn with_fallback_rates() -> Self {
        Self::new(Arc::new(RateStore::default()))
    }

    pub fn rate_store(&self) -> &Arc<RateStore> {
        &self.rates
    }

    /// Refresh the shared rate table from `provider`. Failure is logged
    /// and swallowed; the previous table stays authoritative.
    pub async fn refresh_rates(&self, provider: &dyn RateProvider) {
        if let Err(e) = self.rates.refresh(provider).await {
            tracing::warn!(error = %e, "Rate refresh failed; keeping previous table");
        }
    }

    /// Generate the insights report for `records` over `period`, with the
    /// period window evaluated against today's date.
    pub fn generate(&self, records: &[ExpenseRecord], period_key: Period) -> InsightsReport {
        self.generate_at(records, period_key, chrono::Utc::now().date_naive())
    }

    /// Generate against an explicit reference date (deterministic for tests).
    pub fn generate_at(
        &self,
        records: &[ExpenseRecord],
        period_key: Period,
        today: NaiveDate,
    ) -> InsightsReport {
        // One snapshot per report: a refresh landing mid-generation is
        // observed as entirely old or entirely new rates.
        let rates = self.rates.snapshot();

        let filtered = period::filter_at(records, period_key, today);
        if filtered.is_empty() {
            tracing::debug!(period = %period_key, "No records in period; returning empty report");
            return InsightsReport::empty(period_key, rates.base.clone(), rates.last_update);
        }

        let category_breakdown = aggregate::by_category(&filtered, &rates);
        let shop_analysis = aggregate::by_shop(&filtered, &rates);
        let currency_analysis = aggregate::by_currency(&filtered, &rates);
        let monthly = aggregate::by_month(&filtered, &rates);

        let grand_total: f64 = category_breakdown.iter().map(|g| g.total_normalized).sum();

        let monthly_trends = trends::analyze(&monthly);
        let dist = distribution::analyze(&filtered, &rates);
        let recurring = budget::recurring_analysis(&filtered, &rates, grand_total);
        let budget_insights = budget::budget_insights(&monthly_trends);
        let efficiency = budget::efficiency_metrics(&category_breakdown, &shop_analysis);

        let recommendations = recommend::synthesize(
            &category_breakdown,
            &monthly_trends,
            &budget_insights,
            &efficiency.optimization_opportunities,
        );

        tracing::debug!(
            period = %period_key,
            records = filtered.len(),
            categories = category_breakdown.len(),
            recommendations = recommendations.len(),
            "Insights report generated"
        );

        InsightsReport {
            summary: ReportSummary {
                period: period_key,
                record_count: filtered.len(),
                total_normalized: grand_total,
                average_normalized: grand_total / filtered.len() as f64,
                base_currency: rates.base.clone(),
                rates_last_update: rates.last_update,
            },
            category_breakdown,
            monthly_trends,
            shop_analysis,
            currency_analysis,
            recurring_analysis: recurring,
            distribution: dist,
            budget_insights,
            efficiency_metrics: efficiency,
            recommendations,
        }
    }
}

impl Default for InsightsEngine {
    fn default() -> Self {
        Self::with_fallback_rates()
    }
}
