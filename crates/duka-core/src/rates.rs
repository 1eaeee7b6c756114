//! Currency rate table and normalization
//!
//! All report figures are expressed in a single base currency (RWF by
//! default). Conversion goes through a `RateTable` seeded with fixed
//! fallback rates so normalization works offline; an external
//! `RateProvider` can overwrite the table at runtime. Refresh failure is
//! non-fatal: the previous table stays authoritative.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default base currency for the Rwandan retail deployment
pub const DEFAULT_BASE_CURRENCY: &str = "RWF";

/// Approximate rates to RWF, used until (or instead of) a live refresh.
/// Kept deliberately coarse; they exist so normalization never hard-fails.
const FALLBACK_RATES: &[(&str, f64)] = &[
    ("USD", 1300.0),
    ("EUR", 1400.0),
    ("GBP", 1650.0),
    ("JPY", 8.7),
    ("CNY", 180.0),
    ("INR", 15.6),
    ("AED", 354.0),
    ("CAD", 950.0),
    ("AUD", 860.0),
    ("CHF", 1450.0),
];

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Snapshot of currency to base-currency rates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateTable {
    /// Canonical currency all normalized totals are expressed in
    pub base: String,
    rates: HashMap<String, f64>,
    /// When the table was last (re)populated
    pub last_update: DateTime<Utc>,
}

impl RateTable {
    /// Build a table from explicit rates. Tests and offline deployments
    /// use this to get deterministic conversions.
    pub fn new(base: impl Into<String>, rates: HashMap<String, f64>) -> Self {
        Self {
            base: base.into(),
            rates,
            last_update: Utc::now(),
        }
    }

    /// The static fallback table (base RWF)
    pub fn fallback() -> Self {
        let rates = FALLBACK_RATES
            .iter()
            .map(|(code, rate)| (code.to_string(), *rate))
            .collect();
        Self::new(DEFAULT_BASE_CURRENCY, rates)
    }

    /// Convert an amount in `currency` into the base currency, rounded to
    /// 2 decimals. Returns `None` for unrecognized codes; callers count
    /// that as a zero contribution, never an error.
    pub fn convert_to_base(&self, amount: f64, currency: &str) -> Option<f64> {
        if currency == self.base {
            return Some(amount);
        }
        self.rates.get(currency).map(|rate| round2(amount * rate))
    }

    /// Rate for a single currency, if known
    pub fn rate(&self, currency: &str) -> Option<f64> {
        if currency == self.base {
            Some(1.0)
        } else {
            self.rates.get(currency).copied()
        }
    }

    /// Known currency codes, sorted (for display)
    pub fn currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.rates.keys().cloned().collect();
        codes.sort();
        codes
    }
}

impl Default for RateTable {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Source of exchange-rate snapshots. Implementations must return the full
/// map of currency to rate-to-`base`; partial updates are not supported.
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>>;
}

/// Provider backed by a fixed map; used by tests and offline tooling
pub struct StaticRateProvider {
    rates: HashMap<String, f64>,
}

impl StaticRateProvider {
    pub fn new(rates: HashMap<String, f64>) -> Self {
        Self { rates }
    }
}

#[async_trait]
impl RateProvider for StaticRateProvider {
    async fn fetch_rates(&self, _base: &str) -> Result<HashMap<String, f64>> {
        Ok(self.rates.clone())
    }
}

/// Expected shape of the remote rate endpoint response
#[derive(Debug, Deserialize)]
struct RateResponse {
    #[allow(dead_code)]
    base: Option<String>,
    rates: HashMap<String, f64>,
}

/// Provider that fetches rates over HTTP.
///
/// The endpoint is queried as `GET {url}?base={base}` and must respond with
/// `{"base": "...", "rates": {"USD": 1300.0, ...}}`.
pub struct HttpRateProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpRateProvider {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
        }
    }
}

#[async_trait]
impl RateProvider for HttpRateProvider {
    async fn fetch_rates(&self, base: &str) -> Result<HashMap<String, f64>> {
        let response = self
            .client
            .get(&self.url)
            .query(&[("base", base)])
            .send()
            .await?
            .error_for_status()?;

        let body: RateResponse = response.json().await?;
        if body.rates.is_empty() {
            return Err(Error::RateProvider(format!(
                "rate endpoint {} returned an empty table",
                self.url
            )));
        }
        Ok(body.rates)
    }
}

/// Process-wide rate cache.
///
/// Reports snapshot the table once per generation, so a refresh landing
/// mid-computation is observed as either the old or the new table, never
/// a partial mix.
pub struct RateStore {
    table: RwLock<RateTable>,
}

impl RateStore {
    pub fn new(table: RateTable) -> Self {
        Self {
            table: RwLock::new(table),
        }
    }

    /// Current table snapshot
    pub fn snapshot(&self) -> RateTable {
        self.table
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Fetch a fresh table from `provider` and overwrite the cache.
    /// On provider failure the previous table is left intact and the
    /// error is returned for the caller to log.
    pub async fn refresh(&self, provider: &dyn RateProvider) -> Result<()> {
        let base = self.snapshot().base;
        let rates = provider.fetch_rates(&base).await?;

        let mut table = self
            .table
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        table.rates = rates;
        table.last_update = Utc::now();

        tracing::info!(
            base = %table.base,
            currencies = table.rates.len(),
            "Exchange rates refreshed"
        );
        Ok(())
    }
}

impl Default for RateStore {
    fn default() -> Self {
        Self::new(RateTable::fallback())
    }
}
