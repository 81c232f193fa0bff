//! Throwaway company stores backed by a temporary directory

use equitracker::database::{CompanyStore, StoreConfig};
use equitracker::models::NewCompany;
use tempfile::TempDir;

use super::test_data;

/// A store whose file lives as long as this value
pub struct TestStore {
    pub store: CompanyStore,
    pub dir: TempDir,
}

impl TestStore {
    /// Fresh store with the schema applied and no rows
    pub async fn empty() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = CompanyStore::new(StoreConfig::new(dir.path().join("equitracker.db")));
        store.init_schema().await.expect("Failed to create schema");
        Self { store, dir }
    }

    /// Store preloaded with [`test_data::sample_companies`]
    pub async fn seeded() -> Self {
        let test_store = Self::empty().await;
        test_store.insert_all(&test_data::sample_companies()).await;
        test_store
    }

    pub async fn insert_all(&self, companies: &[NewCompany]) {
        for company in companies {
            self.store
                .upsert_company(company)
                .await
                .expect("Failed to insert company");
        }
    }

    /// A store pointing at a file that does not exist and may not be created
    pub fn unreachable(dir: &TempDir) -> CompanyStore {
        let mut config = StoreConfig::new(dir.path().join("nowhere").join("missing.db"));
        config.create_if_missing = false;
        CompanyStore::new(config)
    }
}
