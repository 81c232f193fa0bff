use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

use super::{provider_symbol, MarketDataProvider};
use crate::error::ProviderError;
use crate::models::{Config, HistoryPeriod, PricePoint};

/// Chart endpoint response
#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartEnvelope,
}

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
    /// Exchange offset from UTC in seconds
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

#[derive(Debug, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

/// Yahoo Finance chart API client
pub struct YahooClient {
    client: Client,
    base_url: Url,
}

impl YahooClient {
    /// Create a new client from the application configuration
    pub fn new(config: &Config) -> Result<Self> {
        Self::with_base_url(&config.market_data_base_url, config.http_timeout)
    }

    pub fn with_base_url(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("Mozilla/5.0 (compatible; equitracker/0.1)")
            .build()?;

        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow::anyhow!("Market data URL cannot be a base: {}", base_url));
        }

        Ok(Self { client, base_url })
    }

    fn chart_url(&self, symbol: &str, period: HistoryPeriod) -> Url {
        let qualified = provider_symbol(symbol);
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["v8", "finance", "chart", qualified.as_str()]);
        }
        url.query_pairs_mut()
            .append_pair("range", period.as_range())
            .append_pair("interval", "1d");
        url
    }

    async fn fetch_chart(&self, symbol: &str, period: HistoryPeriod) -> Result<ChartResult, ProviderError> {
        let url = self.chart_url(symbol, period);
        debug!("Making request to: {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        // Unknown symbols come back as 404 with a JSON error envelope
        if !status.is_success() && status != StatusCode::NOT_FOUND {
            return Err(ProviderError::Status(status.as_u16()));
        }

        match serde_json::from_str::<ChartResponse>(&body) {
            Ok(parsed) => select_result(symbol, parsed),
            Err(_) if !status.is_success() => Err(ProviderError::Status(status.as_u16())),
            Err(e) => Err(ProviderError::Parse(e.to_string())),
        }
    }
}

fn select_result(symbol: &str, response: ChartResponse) -> Result<ChartResult, ProviderError> {
    if let Some(error) = response.chart.error {
        if error.code.eq_ignore_ascii_case("Not Found") {
            return Err(ProviderError::UnknownSymbol(symbol.to_string()));
        }
        return Err(ProviderError::Parse(format!(
            "{}: {}",
            error.code,
            error.description.unwrap_or_default()
        )));
    }

    response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| ProviderError::UnknownSymbol(symbol.to_string()))
}

fn current_price(symbol: &str, result: &ChartResult) -> Result<f64, ProviderError> {
    result
        .meta
        .regular_market_price
        .filter(|price| price.is_finite() && *price >= 0.0)
        .ok_or_else(|| ProviderError::MissingPrice(symbol.to_string()))
}

/// Pair timestamps with closes, dropping sessions without a close
fn history_points(result: &ChartResult) -> Vec<PricePoint> {
    let closes = match result.indicators.quote.first() {
        Some(quote) => &quote.close,
        None => return Vec::new(),
    };

    result
        .timestamp
        .iter()
        .zip(closes.iter())
        .filter_map(|(&ts, close)| {
            let close = (*close)?;
            let local = DateTime::from_timestamp(ts + result.meta.gmtoffset, 0)?;
            Some(PricePoint {
                date: local.date_naive(),
                close,
            })
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for YahooClient {
    async fn fetch_current_price(&self, symbol: &str) -> Result<f64, ProviderError> {
        let result = self.fetch_chart(symbol, HistoryPeriod::FiveDays).await?;
        current_price(symbol, &result)
    }

    async fn fetch_price_history(&self, symbol: &str, period: HistoryPeriod) -> Vec<PricePoint> {
        match self.fetch_chart(symbol, period).await {
            Ok(result) => history_points(&result),
            Err(e) => {
                warn!("No price history for {}: {}", symbol, e);
                Vec::new()
            }
        }
    }
}
