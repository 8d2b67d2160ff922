//! Error types for contract persistence and lifecycle operations

use thiserror::Error;

use contract_types::ContractStatus;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Contract not found: {0}")]
    NotFound(String),

    #[error("Stale contract version: expected {expected}, found {actual}")]
    Conflict { expected: u32, actual: u32 },

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition {
        from: ContractStatus,
        to: ContractStatus,
    },

    #[error("A canvas sync for this contract is already running")]
    SyncInFlight,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Corrupt contract row: {0}")]
    Corrupt(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
