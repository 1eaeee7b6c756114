//! Error types for Duka
//!
//! The analytics pipeline itself is infallible: bad input degrades to
//! documented defaults instead of erroring. `Error` only appears at the
//! I/O edges (record import, rate refresh).

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Unsupported record format: {0}")]
    UnsupportedFormat(String),

    #[error("Rate provider error: {0}")]
    RateProvider(String),
}

pub type Result<T> = std::result::Result<T, Error>;
