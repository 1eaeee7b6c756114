//! CLI argument definitions using clap
//!
//! This module contains the clap structs and enums for parsing CLI
//! arguments. The command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Duka - Expense analytics for the retail back-office
#[derive(Parser)]
#[command(name = "duka")]
#[command(about = "Turn expense exports into a multi-dimensional insights report", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate an insights report from an expense export
    Report {
        /// Expense records file (.csv or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Period window: this_month, last_month, this_quarter,
        /// this_year, last_30_days, or all
        #[arg(short, long, default_value = "all")]
        period: String,

        /// Exchange-rate endpoint to refresh from before generating
        /// (falls back to the built-in table on failure)
        #[arg(long)]
        rates_url: Option<String>,

        /// Pretty-print the JSON report
        #[arg(long)]
        pretty: bool,
    },

    /// Show the active exchange-rate table
    Rates {
        /// Exchange-rate endpoint to refresh from first
        #[arg(long)]
        rates_url: Option<String>,
    },
}
