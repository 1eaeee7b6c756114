//! Command implementations

use std::path::Path;

use anyhow::{Context, Result};

use duka_core::models::Period;
use duka_core::rates::HttpRateProvider;
use duka_core::{load_records, InsightsEngine};

/// `duka report` - load records, optionally refresh rates, print the report
pub async fn cmd_report(
    input: &Path,
    period_key: &str,
    rates_url: Option<&str>,
    pretty: bool,
) -> Result<()> {
    let records = load_records(input)
        .with_context(|| format!("Failed to load records from {}", input.display()))?;
    tracing::info!(count = records.len(), file = %input.display(), "Loaded expense records");

    let engine = InsightsEngine::with_fallback_rates();
    if let Some(url) = rates_url {
        // Non-fatal: the fallback table keeps normalization working
        engine.refresh_rates(&HttpRateProvider::new(url)).await;
    }

    let period = Period::from_key(period_key);
    let report = engine.generate(&records, period);

    let output = if pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    println!("{}", output);
    Ok(())
}

/// `duka rates` - show the active rate table
pub async fn cmd_rates(rates_url: Option<&str>) -> Result<()> {
    let engine = InsightsEngine::with_fallback_rates();
    if let Some(url) = rates_url {
        engine.refresh_rates(&HttpRateProvider::new(url)).await;
    }

    let table = engine.rate_store().snapshot();
    println!("Base currency: {}", table.base);
    println!("Last update:   {}", table.last_update.to_rfc3339());
    for code in table.currencies() {
        if let Some(rate) = table.rate(&code) {
            println!("  {}  {:>12.4}", code, rate);
        }
    }
    Ok(())
}
