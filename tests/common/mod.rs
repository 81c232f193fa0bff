//! Common test utilities and helpers

pub mod database;

pub use database::TestStore;

/// Test data utilities
pub mod test_data {
    use chrono::NaiveDate;
    use equitracker::models::{NewCompany, PricePoint};

    /// Create a company with fundamentals and no descriptive extras
    pub fn create_test_company(symbol: &str, name: &str) -> NewCompany {
        NewCompany {
            symbol: symbol.to_string(),
            name: name.to_string(),
            industry: Some("Information Technology".to_string()),
            founded: Some("1968".to_string()),
            headquarters: Some("Mumbai".to_string()),
            description: None,
            market_cap_inr_crore: Some(150_000.0),
            pe_ratio: Some(25.0),
            pb_ratio: Some(3.0),
            dividend_yield: Some(1.5),
        }
    }

    /// A small NSE universe used by most store tests
    pub fn sample_companies() -> Vec<NewCompany> {
        let mut reliance = create_test_company("RELIANCE", "Reliance Industries Limited");
        reliance.industry = Some("Conglomerate".to_string());
        reliance.market_cap_inr_crore = Some(1_900_000.0);

        let mut tcs = create_test_company("TCS", "Tata Consultancy Services");
        tcs.pe_ratio = Some(29.5);

        let mut tatamotors = create_test_company("TATAMOTORS", "Tata Motors Limited");
        tatamotors.industry = Some("Automobile".to_string());
        tatamotors.pe_ratio = Some(9.0);
        tatamotors.dividend_yield = Some(0.4);

        let mut infy = create_test_company("INFY", "Infosys Limited");
        infy.pe_ratio = None;

        vec![reliance, tcs, tatamotors, infy]
    }

    /// Daily closes starting 2024-06-03, one per day
    pub fn create_test_history(days: i64) -> Vec<PricePoint> {
        let start = NaiveDate::from_ymd_opt(2024, 6, 3).unwrap();
        (0..days)
            .map(|i| PricePoint {
                date: start + chrono::Duration::days(i),
                close: 100.0 + i as f64,
            })
            .collect()
    }
}

/// Logging utilities for tests
pub mod logging {
    use tracing::{debug, info};

    /// Log test step
    pub fn log_test_step(step: &str) {
        info!("🧪 Test Step: {}", step);
    }

    /// Log test data
    pub fn log_test_data<T: std::fmt::Debug>(label: &str, data: &T) {
        debug!("📊 {}: {:?}", label, data);
    }
}
