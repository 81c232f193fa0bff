//! Seeding the store from CSV

use assert_matches::assert_matches;
use chrono::Utc;
use pretty_assertions::assert_eq;

use crate::common::TestStore;
use equitracker::error::ImportError;
use equitracker::seed::import_companies;

const COMPANIES_CSV: &str = "\
symbol,name,industry,founded,headquarters,description,market_cap_inr_crore,pe_ratio,pb_ratio,dividend_yield
RELIANCE,Reliance Industries Limited,Conglomerate,1966,Mumbai,\"Energy, retail and telecom\",1900000,27.1,2.3,0.3
HDFCBANK,HDFC Bank Limited,Banking,1994,Mumbai,,1250000,18.2,2.6,1.2
ITC,ITC Limited,FMCG,1910,Kolkata,,550000,26.4,7.1,3.1
";

#[test_log::test(tokio::test)]
async fn test_import_then_search() {
    let test_store = TestStore::empty().await;

    let imported = import_companies(&test_store.store, COMPANIES_CSV.as_bytes()).await.unwrap();
    assert_eq!(imported, 3);

    let matches = test_store.store.search_companies("bank").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].symbol, "HDFCBANK");

    let reliance = test_store.store.get_company_details("RELIANCE").await.unwrap().unwrap();
    assert_eq!(reliance.description.as_deref(), Some("Energy, retail and telecom"));
    assert_eq!(reliance.market_cap_inr_crore, Some(1_900_000.0));
}

#[test_log::test(tokio::test)]
async fn test_reimport_is_idempotent_and_keeps_prices() {
    let test_store = TestStore::empty().await;
    import_companies(&test_store.store, COMPANIES_CSV.as_bytes()).await.unwrap();

    let at = Utc::now();
    test_store.store.update_price("ITC", 431.5, at).await.unwrap();

    import_companies(&test_store.store, COMPANIES_CSV.as_bytes()).await.unwrap();

    assert_eq!(test_store.store.count_companies().await.unwrap(), 3);
    let itc = test_store.store.get_company_details("ITC").await.unwrap().unwrap();
    assert_eq!(itc.current_price, Some(431.5));
    assert_eq!(itc.last_updated, Some(at));
}

#[test_log::test(tokio::test)]
async fn test_bad_row_imports_nothing() {
    let test_store = TestStore::empty().await;
    let csv = format!("{}BROKEN,Broken Co,,,,,,not-a-number,,\n", COMPANIES_CSV);

    let result = import_companies(&test_store.store, csv.as_bytes()).await;
    assert_matches!(result, Err(ImportError::InvalidData { line: 5, .. }));
    assert_eq!(test_store.store.count_companies().await.unwrap(), 0);
}
