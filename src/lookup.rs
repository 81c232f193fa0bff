use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use crate::api::MarketDataProvider;
use crate::database::CompanyStore;
use crate::error::{LookupError, StoreError};
use crate::insights::generate_insights;
use crate::models::{Company, CompanySummary, HistoryPeriod, Insight, PricePoint};

/// Everything the detail screen shows for one company
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyView {
    pub company: Company,
    pub history: Vec<PricePoint>,
    pub insights: Vec<Insight>,
    /// Set when the live price could not be fetched; the stored price is shown instead
    pub price_error: Option<String>,
}

impl CompanyView {
    pub fn detail_lines(&self) -> Vec<String> {
        let c = &self.company;
        vec![
            format!("Company: {} ({})", c.name, c.symbol),
            format!("Industry: {}", text_or_na(&c.industry)),
            format!("Founded: {}", text_or_na(&c.founded)),
            format!("Headquarters: {}", text_or_na(&c.headquarters)),
            format!("Description: {}", text_or_na(&c.description)),
            format!("Current Price: ₹{}", number_or_na(c.current_price)),
            format!("Market Cap: ₹{} Cr", number_or_na(c.market_cap_inr_crore)),
            format!("P/E Ratio: {}", number_or_na(c.pe_ratio)),
            format!("P/B Ratio: {}", number_or_na(c.pb_ratio)),
            format!("Dividend Yield: {}%", number_or_na(c.dividend_yield)),
        ]
    }

    pub fn has_chart(&self) -> bool {
        !self.history.is_empty()
    }
}

fn text_or_na(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("N/A")
}

fn number_or_na(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}

/// Runs a full company lookup against the store and the market data provider
pub struct LookupService<P> {
    store: CompanyStore,
    provider: Arc<P>,
    period: HistoryPeriod,
}

impl<P> Clone for LookupService<P> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            provider: Arc::clone(&self.provider),
            period: self.period,
        }
    }
}

impl<P: MarketDataProvider> LookupService<P> {
    pub fn new(store: CompanyStore, provider: P, period: HistoryPeriod) -> Self {
        Self {
            store,
            provider: Arc::new(provider),
            period,
        }
    }

    pub fn period(&self) -> HistoryPeriod {
        self.period
    }

    pub async fn search(&self, query: &str) -> Result<Vec<CompanySummary>, StoreError> {
        self.store.search_companies(query).await
    }

    /// Look up `symbol`, refresh its price and derive the view.
    ///
    /// `Ok(None)` means the symbol is not in the store. A price fetch failure
    /// leaves the stored price untouched and is reported on the view. A store
    /// failure while persisting the new price is returned as an error.
    pub async fn lookup(&self, symbol: &str) -> Result<Option<CompanyView>, LookupError> {
        let Some(mut company) = self.store.get_company_details(symbol).await? else {
            info!("{} is not in the company table", symbol);
            return Ok(None);
        };

        let price_error = match self.provider.fetch_current_price(symbol).await {
            Ok(price) => {
                let now = Utc::now();
                self.store.update_price(symbol, price, now).await?;
                company.current_price = Some(price);
                company.last_updated = Some(now);
                None
            }
            Err(e) => {
                warn!("Price fetch failed for {}: {}", symbol, e);
                Some(format!("Failed to fetch data for {}: {}", symbol, e))
            }
        };

        let history = self.provider.fetch_price_history(symbol, self.period).await;
        let insights = generate_insights(&company.fundamentals());

        Ok(Some(CompanyView {
            company,
            history,
            insights,
            price_error,
        }))
    }
}
