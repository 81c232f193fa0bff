//! Error types for EquiTracker

use thiserror::Error;

/// Failures of the company store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connect(#[source] sqlx::Error),

    #[error("Database query error: {0}")]
    Query(#[from] sqlx::Error),

    #[error("Schema migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error("Company not found: {0}")]
    NotFound(String),

    #[error("Invalid price {price} for {symbol}")]
    InvalidPrice { symbol: String, price: f64 },
}

/// Failures of the market data provider
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP request error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Market data request failed with status {0}")]
    Status(u16),

    #[error("Failed to parse market data: {0}")]
    Parse(String),

    #[error("Unknown symbol: {0}")]
    UnknownSymbol(String),

    #[error("No current price available for {0}")]
    MissingPrice(String),
}

/// Failures of a company lookup that must reach the caller.
///
/// Provider trouble never ends up here: a failed price fetch is reported on
/// the view and a failed history fetch leaves the chart empty.
#[derive(Error, Debug)]
pub enum LookupError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failures while importing the company list
#[derive(Error, Debug)]
pub enum ImportError {
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid data on line {line}: {message}")]
    InvalidData { line: u64, message: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}
