use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::database::StoreConfig;

/// A row of the `companies` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Company {
    pub symbol: String,
    pub name: String,
    pub industry: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub description: Option<String>,
    pub current_price: Option<f64>,
    pub last_updated: Option<DateTime<Utc>>,
    pub market_cap_inr_crore: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

impl Company {
    pub fn fundamentals(&self) -> Fundamentals {
        Fundamentals {
            pe_ratio: self.pe_ratio,
            pb_ratio: self.pb_ratio,
            dividend_yield: self.dividend_yield,
            market_cap_inr_crore: self.market_cap_inr_crore,
        }
    }
}

/// Company fields owned by the seeding path. Prices are never part of it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewCompany {
    pub symbol: String,
    pub name: String,
    pub industry: Option<String>,
    pub founded: Option<String>,
    pub headquarters: Option<String>,
    pub description: Option<String>,
    pub market_cap_inr_crore: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
}

/// Search suggestion row
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct CompanySummary {
    pub symbol: String,
    pub name: String,
}

impl fmt::Display for CompanySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.symbol)
    }
}

/// Valuation inputs for the insight engine. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Fundamentals {
    pub pe_ratio: Option<f64>,
    pub pb_ratio: Option<f64>,
    pub dividend_yield: Option<f64>,
    pub market_cap_inr_crore: Option<f64>,
}

/// One close of the price history series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Lookback window for the price history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryPeriod {
    FiveDays,
    #[default]
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl HistoryPeriod {
    /// Range parameter understood by the chart endpoint
    pub fn as_range(&self) -> &'static str {
        match self {
            HistoryPeriod::FiveDays => "5d",
            HistoryPeriod::OneMonth => "1mo",
            HistoryPeriod::ThreeMonths => "3mo",
            HistoryPeriod::SixMonths => "6mo",
            HistoryPeriod::OneYear => "1y",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            HistoryPeriod::FiveDays => "Last 5 Days",
            HistoryPeriod::OneMonth => "Last 30 Days",
            HistoryPeriod::ThreeMonths => "Last 3 Months",
            HistoryPeriod::SixMonths => "Last 6 Months",
            HistoryPeriod::OneYear => "Last Year",
        }
    }
}

impl FromStr for HistoryPeriod {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "5d" => Ok(HistoryPeriod::FiveDays),
            "1mo" => Ok(HistoryPeriod::OneMonth),
            "3mo" => Ok(HistoryPeriod::ThreeMonths),
            "6mo" => Ok(HistoryPeriod::SixMonths),
            "1y" => Ok(HistoryPeriod::OneYear),
            other => Err(anyhow::anyhow!(
                "Unknown history period '{}' (expected 5d, 1mo, 3mo, 6mo or 1y)",
                other
            )),
        }
    }
}

/// Severity attached to an insight
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Positive,
    Caution,
    Negative,
}

/// A qualitative judgement about one fundamental
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Insight {
    pub message: &'static str,
    pub severity: Severity,
}

impl Insight {
    pub const fn new(message: &'static str, severity: Severity) -> Self {
        Self { message, severity }
    }
}

/// Configuration for the application
#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
    pub market_data_base_url: String,
    pub http_timeout: Duration,
    pub history_period: HistoryPeriod,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok(); // Load .env file if it exists

        let http_timeout_secs = std::env::var("HTTP_TIMEOUT_SECS")
            .unwrap_or_else(|_| "15".to_string())
            .parse()
            .unwrap_or(15);

        let history_period = match std::env::var("HISTORY_PERIOD") {
            Ok(value) => value.parse()?,
            Err(_) => HistoryPeriod::default(),
        };

        Ok(Config {
            database_path: std::env::var("DATABASE_PATH")
                .unwrap_or_else(|_| "equitracker.db".to_string())
                .into(),
            market_data_base_url: std::env::var("MARKET_DATA_BASE_URL")
                .unwrap_or_else(|_| "https://query1.finance.yahoo.com".to_string()),
            http_timeout: Duration::from_secs(http_timeout_secs),
            history_period,
        })
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig::new(self.database_path.clone())
    }
}
