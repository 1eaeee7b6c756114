//! Duka Core Library
//!
//! Expense analytics engine for the Duka retail back-office:
//! - Expense record model and CSV/JSON import
//! - Currency rate table with static fallback and pluggable refresh
//! - Pure insights pipeline: period filter, multi-dimensional aggregation,
//!   trend and distribution analysis, budget projection, efficiency
//!   scoring, and prioritized recommendations
//!
//! The pipeline never errors on bad input: unknown currencies contribute
//! zero to normalized totals, missing fields resolve to documented
//! defaults, and empty input produces a canonical all-zero report.

pub mod error;
pub mod import;
pub mod insights;
pub mod models;
pub mod rates;

pub use error::{Error, Result};
pub use import::load_records;
pub use insights::{InsightsEngine, InsightsReport};
pub use models::{ExpenseRecord, Period, RecurringFrequency};
pub use rates::{HttpRateProvider, RateProvider, RateStore, RateTable, StaticRateProvider};
