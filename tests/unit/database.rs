//! Company store operations against a throwaway SQLite file

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use crate::common::{logging, test_data, TestStore};
use equitracker::database::SEARCH_LIMIT;
use equitracker::error::StoreError;

#[test_log::test(tokio::test)]
async fn test_search_is_case_insensitive_over_name_and_symbol() {
    logging::log_test_step("Searching by name fragment and by symbol");
    let test_store = TestStore::seeded().await;

    let mut by_name: Vec<String> = test_store
        .store
        .search_companies("TATA")
        .await
        .unwrap()
        .into_iter()
        .map(|c| c.symbol)
        .collect();
    by_name.sort();
    assert_eq!(by_name, vec!["TATAMOTORS".to_string(), "TCS".to_string()]);

    let by_symbol = test_store.store.search_companies("infy").await.unwrap();
    assert_eq!(by_symbol.len(), 1);
    assert_eq!(by_symbol[0].to_string(), "Infosys Limited (INFY)");
}

#[test_log::test(tokio::test)]
async fn test_search_with_no_match_is_empty() {
    let test_store = TestStore::seeded().await;
    let matches = test_store.store.search_companies("zzzz").await.unwrap();
    assert!(matches.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_blank_search_returns_nothing() {
    let test_store = TestStore::seeded().await;
    assert!(test_store.store.search_companies("").await.unwrap().is_empty());
    assert!(test_store.store.search_companies("   ").await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_search_is_capped() {
    let test_store = TestStore::empty().await;
    let companies: Vec<_> = (0..15)
        .map(|i| test_data::create_test_company(&format!("BANK{:02}", i), &format!("Bank Number {}", i)))
        .collect();
    test_store.insert_all(&companies).await;

    let matches = test_store.store.search_companies("bank").await.unwrap();
    assert_eq!(matches.len() as i64, SEARCH_LIMIT);
}

#[test_log::test(tokio::test)]
async fn test_wildcards_in_query_match_literally() {
    let test_store = TestStore::seeded().await;
    test_store
        .insert_all(&[
            test_data::create_test_company("M_M", "Mahindra & Mahindra"),
            test_data::create_test_company("MUMMETRO", "Mumbai Metro"),
        ])
        .await;

    // "_" would match any single character if it were not escaped
    let matches = test_store.store.search_companies("m_m").await.unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].symbol, "M_M");

    assert!(test_store.store.search_companies("%").await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_search_folds_non_ascii_case() {
    let test_store = TestStore::seeded().await;
    test_store
        .insert_all(&[test_data::create_test_company("ECOLE", "École Holdings")])
        .await;

    for query in ["école", "ÉCOLE", "École", "cole hold"] {
        let matches = test_store.store.search_companies(query).await.unwrap();
        let symbols: Vec<&str> = matches.iter().map(|c| c.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["ECOLE"], "query = {:?}", query);
    }
}

#[test_log::test(tokio::test)]
async fn test_search_ignores_surrounding_whitespace() {
    let test_store = TestStore::seeded().await;

    let padded = test_store.store.search_companies("  motors  ").await.unwrap();
    let bare = test_store.store.search_companies("motors").await.unwrap();
    assert_eq!(padded, bare);
    assert_eq!(padded.len(), 1);
    assert_eq!(padded[0].symbol, "TATAMOTORS");
}

#[test_log::test(tokio::test)]
async fn test_details_for_known_and_unknown_symbol() {
    let test_store = TestStore::seeded().await;

    let reliance = test_store
        .store
        .get_company_details("RELIANCE")
        .await
        .unwrap()
        .expect("RELIANCE is seeded");
    logging::log_test_data("Company", &reliance);
    assert_eq!(reliance.name, "Reliance Industries Limited");
    assert_eq!(reliance.industry.as_deref(), Some("Conglomerate"));
    assert_eq!(reliance.current_price, None);
    assert_eq!(reliance.last_updated, None);

    assert_matches!(test_store.store.get_company_details("NOSUCH").await, Ok(None));
}

#[test_log::test(tokio::test)]
async fn test_update_price_sets_price_and_timestamp_together() {
    let test_store = TestStore::seeded().await;
    let at = Utc.with_ymd_and_hms(2024, 6, 14, 10, 30, 0).unwrap();

    test_store.store.update_price("TCS", 3875.25, at).await.unwrap();

    let tcs = test_store.store.get_company_details("TCS").await.unwrap().unwrap();
    assert_eq!(tcs.current_price, Some(3875.25));
    assert_eq!(tcs.last_updated, Some(at));
}

#[test_log::test(tokio::test)]
async fn test_rejected_update_leaves_row_untouched() {
    let test_store = TestStore::seeded().await;
    let first = Utc::now() - Duration::hours(6);
    test_store.store.update_price("TCS", 3800.0, first).await.unwrap();

    let result = test_store.store.update_price("TCS", -1.0, Utc::now()).await;
    assert_matches!(result, Err(StoreError::Query(_)));

    let result = test_store.store.update_price("TCS", f64::NAN, Utc::now()).await;
    assert_matches!(result, Err(StoreError::InvalidPrice { .. }));

    let tcs = test_store.store.get_company_details("TCS").await.unwrap().unwrap();
    assert_eq!(tcs.current_price, Some(3800.0));
    assert_eq!(tcs.last_updated, Some(first));
}

#[test_log::test(tokio::test)]
async fn test_update_price_for_unknown_symbol() {
    let test_store = TestStore::seeded().await;
    let result = test_store.store.update_price("NOSUCH", 10.0, Utc::now()).await;
    assert_matches!(result, Err(StoreError::NotFound(symbol)) if symbol == "NOSUCH");
}

#[test_log::test(tokio::test)]
async fn test_upsert_refreshes_fundamentals_but_keeps_price() {
    let test_store = TestStore::seeded().await;
    let at = Utc.with_ymd_and_hms(2024, 6, 14, 9, 15, 0).unwrap();
    test_store.store.update_price("INFY", 1490.0, at).await.unwrap();

    let mut infy = test_data::create_test_company("INFY", "Infosys Ltd");
    infy.pe_ratio = Some(24.0);
    test_store.insert_all(&[infy]).await;

    let stored = test_store.store.get_company_details("INFY").await.unwrap().unwrap();
    assert_eq!(stored.name, "Infosys Ltd");
    assert_eq!(stored.pe_ratio, Some(24.0));
    assert_eq!(stored.current_price, Some(1490.0));
    assert_eq!(stored.last_updated, Some(at));
    assert_eq!(test_store.store.count_companies().await.unwrap(), 4);
}

#[test_log::test(tokio::test)]
async fn test_init_schema_twice_is_harmless() {
    let test_store = TestStore::seeded().await;
    test_store.store.init_schema().await.unwrap();
    assert_eq!(test_store.store.count_companies().await.unwrap(), 4);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_store_reports_connection_error() {
    let dir = tempfile::TempDir::new().unwrap();
    let store = TestStore::unreachable(&dir);

    assert_matches!(store.search_companies("tata").await, Err(StoreError::Connect(_)));
    assert_matches!(store.get_company_details("TCS").await, Err(StoreError::Connect(_)));
    assert_matches!(
        store.update_price("TCS", 1.0, Utc::now()).await,
        Err(StoreError::Connect(_))
    );
}
