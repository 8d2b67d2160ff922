//! Contract lifecycle manager
//!
//! Owns the single contract row per application and exposes the
//! load/create/save/transition operations on top of the store, with a
//! read-through cache and in-flight deduplication for canvas syncs.

use std::sync::Mutex;
use std::time::Duration;

use clause_engine::{ClauseEngine, TemplateFields};
use contract_types::audit::{ContractAuditAction, ContractAuditLog};
use contract_types::{ContractClause, ContractContent, ContractStatus, RentalContract};

use crate::cache::TtlCache;
use crate::error::StoreError;
use crate::inflight::InFlightRegistry;
use crate::store::ContractStore;

/// Notes tag stamped on contracts whose content came from the workflow import
pub const IMPORT_NOTES: &str = "Imported from N8N";

const CACHE_CAPACITY: usize = 256;
const CACHE_TTL: Duration = Duration::from_secs(30);

pub struct ContractManager {
    store: ContractStore,
    engine: ClauseEngine,
    cache: Mutex<TtlCache<String, RentalContract>>,
    syncs: InFlightRegistry,
}

impl ContractManager {
    pub fn new(store: ContractStore) -> Self {
        Self {
            store,
            engine: ClauseEngine::new(),
            cache: Mutex::new(TtlCache::new(CACHE_CAPACITY, CACHE_TTL)),
            syncs: InFlightRegistry::new(),
        }
    }

    /// Fetch the contract for an application, creating it from the default
    /// template on first access.
    ///
    /// `fields`, when present, are validated and substituted into the
    /// template before anything is persisted.
    pub async fn load_or_create(
        &self,
        application_id: &str,
        fields: Option<&TemplateFields>,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        if let Some(existing) = self.store.find_by_application(application_id).await? {
            self.cache_put(existing.clone());
            return Ok(existing);
        }

        let mut content = clause_engine::default_content();
        if let Some(fields) = fields {
            fields
                .validate()
                .map_err(|e| StoreError::Validation(e.to_string()))?;
            content = fields.apply(content);
        }

        let contract = self
            .store
            .insert_default(application_id, &content, actor)
            .await?;
        self.cache_put(contract.clone());
        Ok(contract)
    }

    /// Fetch by contract id, serving from the cache while the entry is live
    pub async fn get(&self, id: &str) -> Result<RentalContract, StoreError> {
        if let Some(hit) = self.cache_get(id) {
            return Ok(hit);
        }
        let contract = self.store.get(id).await?;
        self.cache_put(contract.clone());
        Ok(contract)
    }

    /// Persist a full content replacement through the version check
    pub async fn save(
        &self,
        id: &str,
        expected_version: u32,
        content: &ContractContent,
        notes: Option<&str>,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        let result = self
            .store
            .save_content(id, expected_version, content, notes, actor)
            .await;
        match result {
            Ok(saved) => {
                self.cache_put(saved.clone());
                Ok(saved)
            }
            Err(err) => {
                // A stale write means our cached copy is stale too
                if matches!(err, StoreError::Conflict { .. }) {
                    self.invalidate(id);
                }
                Err(err)
            }
        }
    }

    /// Apply a status transition
    pub async fn update_status(
        &self,
        id: &str,
        status: ContractStatus,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        let updated = self.store.update_status(id, status, actor).await?;
        self.cache_put(updated.clone());
        Ok(updated)
    }

    /// Import raw legal text: parse it into canvas content, replace the
    /// clause set with the tokenized segments, and persist both
    pub async fn import_text(
        &self,
        id: &str,
        expected_version: u32,
        raw_text: &str,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        let content = self.engine.parse_text(raw_text);
        let clauses = self.engine.extract_clauses(id, raw_text);
        let clauses_found = clauses.len() as u32;

        self.store.replace_clauses(id, &clauses).await?;
        let saved = self
            .save(id, expected_version, &content, Some(IMPORT_NOTES), actor)
            .await?;
        self.store
            .append_audit(
                id,
                ContractAuditAction::TextImported { clauses_found },
                actor,
                None,
            )
            .await?;

        tracing::info!("Imported {} clauses into contract {}", clauses_found, id);
        Ok(saved)
    }

    /// Regenerate canvas content from the current clause set and persist it.
    ///
    /// Deduplicated per contract id: a second sync arriving while one is
    /// running gets `SyncInFlight` instead of racing it.
    pub async fn sync_canvas(&self, id: &str, actor: &str) -> Result<RentalContract, StoreError> {
        let _guard = self.syncs.try_begin(id).ok_or(StoreError::SyncInFlight)?;

        let current = self.store.get(id).await?;
        let clauses = self.store.list_clauses(id).await?;
        let content = self.engine.project(&clauses);

        let saved = self
            .save(
                id,
                current.version,
                &content,
                current.notes.as_deref(),
                actor,
            )
            .await?;
        self.store
            .append_audit(
                id,
                ContractAuditAction::ClausesSynced {
                    clause_count: clauses.len() as u32,
                },
                actor,
                None,
            )
            .await?;

        Ok(saved)
    }

    /// Replace the clause set by hand (manual clause entry)
    pub async fn replace_clauses(
        &self,
        id: &str,
        clauses: &[ContractClause],
    ) -> Result<(), StoreError> {
        // Reject clauses for contracts that do not exist
        self.store.get(id).await?;
        self.store.replace_clauses(id, clauses).await
    }

    pub async fn list_clauses(&self, id: &str) -> Result<Vec<ContractClause>, StoreError> {
        self.store.list_clauses(id).await
    }

    pub async fn audit_log(&self, id: &str) -> Result<ContractAuditLog, StoreError> {
        self.store.audit_log(id).await
    }

    /// Drop the cached copy of a contract
    pub fn invalidate(&self, id: &str) {
        self.cache
            .lock()
            .expect("contract cache poisoned")
            .invalidate(&id.to_string());
    }

    fn cache_get(&self, id: &str) -> Option<RentalContract> {
        self.cache
            .lock()
            .expect("contract cache poisoned")
            .get(&id.to_string())
    }

    fn cache_put(&self, contract: RentalContract) {
        self.cache
            .lock()
            .expect("contract cache poisoned")
            .insert(contract.id.clone(), contract);
    }
}
