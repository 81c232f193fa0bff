use async_trait::async_trait;

use crate::error::ProviderError;
use crate::models::{HistoryPeriod, PricePoint};

pub mod yahoo_client;
pub use yahoo_client::YahooClient;

/// Exchange suffix the provider expects after a bare NSE symbol
pub const NSE_SUFFIX: &str = ".NS";

/// Map a stored symbol to the provider's market-qualified form
pub fn provider_symbol(symbol: &str) -> String {
    format!("{}{}", symbol, NSE_SUFFIX)
}

/// Source of live prices and recent history.
///
/// Symbols passed in are the bare codes stored in the `companies` table;
/// implementations apply [`provider_symbol`] themselves.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Latest traded price. Any failure is reported, never retried.
    async fn fetch_current_price(&self, symbol: &str) -> Result<f64, ProviderError>;

    /// Daily closes over `period`, oldest first. Failures yield an empty series.
    async fn fetch_price_history(&self, symbol: &str, period: HistoryPeriod) -> Vec<PricePoint>;
}
