//! Duka CLI - expense analytics for the retail back-office
//!
//! Usage:
//!   duka report --input expenses.csv --period this_month
//!   duka report --input expenses.json --rates-url https://rates.example/api
//!   duka rates

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (warn)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Report {
            input,
            period,
            rates_url,
            pretty,
        } => commands::cmd_report(&input, &period, rates_url.as_deref(), pretty).await,
        Commands::Rates { rates_url } => commands::cmd_rates(rates_url.as_deref()).await,
    }
}
