//! Domain models for Duka

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default category for records imported without one
pub const UNCATEGORIZED: &str = "Uncategorized";

/// Default shop label for records imported without one
pub const ALL_SHOPS: &str = "All Shops";

/// A single expense as supplied by the record source (back-office export,
/// CSV dump, API payload). Read-only input to the analytics engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseRecord {
    /// Opaque identifier from the source system
    pub id: String,
    /// Non-negative amount in `currency` units
    pub amount: f64,
    /// ISO-like currency code; may be unrecognized
    pub currency: String,
    /// Expense category; missing values resolve to "Uncategorized"
    pub category: Option<String>,
    /// Shop the expense belongs to; missing values resolve to "All Shops"
    pub shop_name: Option<String>,
    /// Calendar date of the expense
    pub expense_date: NaiveDate,
    /// Whether this is a recurring charge
    #[serde(default)]
    pub is_recurring: bool,
    /// Billing cadence; only meaningful when `is_recurring`
    pub recurring_frequency: Option<RecurringFrequency>,
}

impl ExpenseRecord {
    /// Category with the missing-value sentinel applied
    pub fn category(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }

    /// Shop name with the missing-value sentinel applied
    pub fn shop(&self) -> &str {
        self.shop_name.as_deref().unwrap_or(ALL_SHOPS)
    }

    /// Billing cadence, defaulting to monthly
    pub fn frequency(&self) -> RecurringFrequency {
        self.recurring_frequency
            .unwrap_or(RecurringFrequency::Monthly)
    }

    /// "YYYY-MM" key used for monthly grouping
    pub fn month_key(&self) -> String {
        self.expense_date.format("%Y-%m").to_string()
    }
}

/// Billing cadence for recurring expenses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecurringFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl RecurringFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    /// Multiplier that converts one charge at this cadence into an
    /// estimated monthly commitment
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Self::Daily => 30.0,
            Self::Weekly => 4.0,
            Self::Monthly => 1.0,
            Self::Yearly => 1.0 / 12.0,
        }
    }
}

impl std::str::FromStr for RecurringFrequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "monthly" => Ok(Self::Monthly),
            "yearly" => Ok(Self::Yearly),
            _ => Err(format!("Unknown recurring frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for RecurringFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Named time window used to filter records before aggregation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    ThisMonth,
    LastMonth,
    ThisQuarter,
    ThisYear,
    Last30Days,
    #[default]
    All,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::ThisQuarter => "this_quarter",
            Self::ThisYear => "this_year",
            Self::Last30Days => "last_30_days",
            Self::All => "all",
        }
    }

    /// Parse a period key. Unrecognized keys resolve to `All` (pass-through)
    /// rather than erroring, matching the engine's no-rejection contract.
    pub fn from_key(key: &str) -> Self {
        match key.to_lowercase().as_str() {
            "this_month" => Self::ThisMonth,
            "last_month" => Self::LastMonth,
            "this_quarter" => Self::ThisQuarter,
            "this_year" => Self::ThisYear,
            "last_30_days" => Self::Last30Days,
            _ => Self::All,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Option<&str>) -> ExpenseRecord {
        ExpenseRecord {
            id: "e1".to_string(),
            amount: 100.0,
            currency: "USD".to_string(),
            category: category.map(String::from),
            shop_name: None,
            expense_date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
            is_recurring: false,
            recurring_frequency: None,
        }
    }

    #[test]
    fn test_sentinel_defaults() {
        let r = record(None);
        assert_eq!(r.category(), "Uncategorized");
        assert_eq!(r.shop(), "All Shops");
        assert_eq!(r.frequency(), RecurringFrequency::Monthly);
    }

    #[test]
    fn test_month_key() {
        assert_eq!(record(Some("Rent")).month_key(), "2024-01");
    }

    #[test]
    fn test_period_from_key_falls_back_to_all() {
        assert_eq!(Period::from_key("this_month"), Period::ThisMonth);
        assert_eq!(Period::from_key("THIS_QUARTER"), Period::ThisQuarter);
        assert_eq!(Period::from_key("fortnight"), Period::All);
        assert_eq!(Period::from_key(""), Period::All);
    }

    #[test]
    fn test_monthly_factors() {
        assert_eq!(RecurringFrequency::Daily.monthly_factor(), 30.0);
        assert_eq!(RecurringFrequency::Monthly.monthly_factor(), 1.0);
        assert!((RecurringFrequency::Yearly.monthly_factor() - 1.0 / 12.0).abs() < 1e-12);
    }
}
