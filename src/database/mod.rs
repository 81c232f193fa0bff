use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::Connection;
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::models::{Company, CompanySummary, NewCompany};

/// Maximum number of search suggestions returned
pub const SEARCH_LIMIT: i64 = 10;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./db/migrations");

/// Connection parameters for the company store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub database_path: PathBuf,
    pub create_if_missing: bool,
    pub busy_timeout: Duration,
}

impl StoreConfig {
    pub fn new(database_path: impl Into<PathBuf>) -> Self {
        Self {
            database_path: database_path.into(),
            create_if_missing: true,
            busy_timeout: Duration::from_secs(5),
        }
    }
}

/// Gateway to the `companies` table.
///
/// Every operation opens its own connection and closes it before returning.
/// Nothing is pooled and nothing is held between calls.
#[derive(Debug, Clone)]
pub struct CompanyStore {
    options: SqliteConnectOptions,
}

impl CompanyStore {
    pub fn new(config: StoreConfig) -> Self {
        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(config.create_if_missing)
            .busy_timeout(config.busy_timeout);

        Self { options }
    }

    async fn connect(&self) -> Result<SqliteConnection, StoreError> {
        SqliteConnection::connect_with(&self.options)
            .await
            .map_err(StoreError::Connect)
    }

    async fn release(&self, conn: SqliteConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection: {}", e);
        }
    }

    /// Create or upgrade the schema
    pub async fn init_schema(&self) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = MIGRATOR.run(&mut conn).await;
        self.release(conn).await;
        result?;

        info!("Database schema is up to date");
        Ok(())
    }

    /// Case-insensitive substring search over name and symbol.
    ///
    /// Surrounding whitespace is ignored. Matching runs against the `name_key`
    /// and `symbol_key` columns, which hold the same Unicode lowercase fold
    /// applied to the query here.
    pub async fn search_companies(&self, query: &str) -> Result<Vec<CompanySummary>, StoreError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let pattern = format!("%{}%", escape_like(&search_key(query)));

        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, CompanySummary>(
            r#"
            SELECT symbol, name
            FROM companies
            WHERE name_key LIKE ? ESCAPE '\' OR symbol_key LIKE ? ESCAPE '\'
            LIMIT ?
            "#,
        )
        .bind(&pattern)
        .bind(&pattern)
        .bind(SEARCH_LIMIT)
        .fetch_all(&mut conn)
        .await;
        self.release(conn).await;

        let matches = result?;
        debug!("Search '{}' matched {} companies", query, matches.len());
        Ok(matches)
    }

    /// Exact lookup by symbol. A missing row is `Ok(None)`.
    pub async fn get_company_details(&self, symbol: &str) -> Result<Option<Company>, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_as::<_, Company>(
            r#"
            SELECT symbol, name, industry, founded, headquarters, description,
                   current_price, last_updated, market_cap_inr_crore,
                   pe_ratio, pb_ratio, dividend_yield
            FROM companies
            WHERE symbol = ?
            "#,
        )
        .bind(symbol)
        .fetch_optional(&mut conn)
        .await;
        self.release(conn).await;

        Ok(result?)
    }

    /// Store a freshly fetched price.
    ///
    /// Price and timestamp go out in one statement so they are never observed apart.
    pub async fn update_price(
        &self,
        symbol: &str,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        if !price.is_finite() {
            return Err(StoreError::InvalidPrice {
                symbol: symbol.to_string(),
                price,
            });
        }

        let mut conn = self.connect().await?;
        let result = sqlx::query(
            "UPDATE companies SET current_price = ?, last_updated = ? WHERE symbol = ?",
        )
        .bind(price)
        .bind(timestamp)
        .bind(symbol)
        .execute(&mut conn)
        .await;
        self.release(conn).await;

        if result?.rows_affected() == 0 {
            return Err(StoreError::NotFound(symbol.to_string()));
        }

        info!("Stored price {:.2} for {}", price, symbol);
        Ok(())
    }

    /// Insert a company or refresh its descriptive fields and fundamentals.
    /// The stored price and its timestamp are left alone.
    pub async fn upsert_company(&self, company: &NewCompany) -> Result<(), StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query(
            r#"
            INSERT INTO companies (
                symbol, name, industry, founded, headquarters, description,
                market_cap_inr_crore, pe_ratio, pb_ratio, dividend_yield,
                name_key, symbol_key
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(symbol) DO UPDATE SET
                name = excluded.name,
                name_key = excluded.name_key,
                industry = excluded.industry,
                founded = excluded.founded,
                headquarters = excluded.headquarters,
                description = excluded.description,
                market_cap_inr_crore = excluded.market_cap_inr_crore,
                pe_ratio = excluded.pe_ratio,
                pb_ratio = excluded.pb_ratio,
                dividend_yield = excluded.dividend_yield
            "#,
        )
        .bind(&company.symbol)
        .bind(&company.name)
        .bind(&company.industry)
        .bind(&company.founded)
        .bind(&company.headquarters)
        .bind(&company.description)
        .bind(company.market_cap_inr_crore)
        .bind(company.pe_ratio)
        .bind(company.pb_ratio)
        .bind(company.dividend_yield)
        .bind(search_key(&company.name))
        .bind(search_key(&company.symbol))
        .execute(&mut conn)
        .await;
        self.release(conn).await;

        result?;
        Ok(())
    }

    pub async fn count_companies(&self) -> Result<i64, StoreError> {
        let mut conn = self.connect().await?;
        let result = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM companies")
            .fetch_one(&mut conn)
            .await;
        self.release(conn).await;

        Ok(result?)
    }
}

/// Case fold shared by stored keys and queries
fn search_key(text: &str) -> String {
    text.to_lowercase()
}

/// Escape LIKE wildcards so user input matches literally
fn escape_like(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
