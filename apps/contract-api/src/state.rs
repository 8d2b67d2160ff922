//! Application state for the contract API

use anyhow::Result;

use contract_store::{ContractManager, ContractStore};

pub struct AppState {
    pub manager: ContractManager,
}

impl AppState {
    pub async fn new() -> Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "sqlite:contracts.db?mode=rwc".to_string());
        let store = ContractStore::connect(&database_url).await?;
        Ok(Self {
            manager: ContractManager::new(store),
        })
    }

    /// State over an in-memory database, for tests
    pub async fn in_memory() -> Result<Self> {
        let store = ContractStore::in_memory().await?;
        Ok(Self {
            manager: ContractManager::new(store),
        })
    }
}
