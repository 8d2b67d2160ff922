//! HTTP handlers for the contract API

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use contract_types::audit::ContractAuditLog;
use contract_types::ContractClause;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

/// Health check endpoint
pub async fn health() -> &'static str {
    "OK"
}

/// Fetch the contract for an application, creating it on first access
pub async fn create_contract(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateContractRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    if req.application_id.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "applicationId must not be empty".to_string(),
        ));
    }

    let contract = state
        .manager
        .load_or_create(&req.application_id, req.fields.as_ref(), &req.actor)
        .await?;

    tracing::info!(
        "Contract {} ready for application {}",
        contract.id,
        req.application_id
    );
    Ok(Json(contract.into()))
}

/// Get a contract by id
pub async fn get_contract(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ContractResponse>, ApiError> {
    let contract = state.manager.get(&id).await?;
    Ok(Json(contract.into()))
}

/// Replace the contract content, guarded by the version the client last read
pub async fn save_content(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SaveContentRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let saved = state
        .manager
        .save(
            &id,
            req.expected_version,
            &req.content,
            req.notes.as_deref(),
            &req.actor,
        )
        .await?;
    Ok(Json(saved.into()))
}

/// Apply a status transition
pub async fn update_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateStatusRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let updated = state.manager.update_status(&id, req.status, &req.actor).await?;
    Ok(Json(updated.into()))
}

/// Parse raw legal text and import it into the contract
pub async fn import_text(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ImportTextRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    if req.raw_text.trim().is_empty() {
        return Err(ApiError::InvalidRequest(
            "rawText must not be empty".to_string(),
        ));
    }

    let imported = state
        .manager
        .import_text(&id, req.expected_version, &req.raw_text, &req.actor)
        .await?;
    Ok(Json(imported.into()))
}

/// Regenerate the canvas content from the contract's clause set
pub async fn sync_canvas(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<SyncRequest>,
) -> Result<Json<ContractResponse>, ApiError> {
    let synced = state.manager.sync_canvas(&id, &req.actor).await?;
    Ok(Json(synced.into()))
}

/// List a contract's clauses in sort order
pub async fn list_clauses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Vec<ClauseResponse>>, ApiError> {
    let clauses = state.manager.list_clauses(&id).await?;
    Ok(Json(clauses.into_iter().map(ClauseResponse::from).collect()))
}

/// Replace a contract's clause set (manual clause entry)
pub async fn replace_clauses(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceClausesRequest>,
) -> Result<Json<Vec<ClauseResponse>>, ApiError> {
    let clauses: Vec<ContractClause> = req
        .clauses
        .into_iter()
        .map(|payload| ContractClause {
            id: Uuid::new_v4().to_string(),
            contract_id: id.clone(),
            clause_number: payload.clause_number,
            clause_title: payload.clause_title,
            clause_content: payload.clause_content,
            canvas_section: payload.canvas_section,
            sort_order: payload.sort_order,
        })
        .collect();

    state.manager.replace_clauses(&id, &clauses).await?;
    Ok(Json(clauses.into_iter().map(ClauseResponse::from).collect()))
}

/// The contract's audit chain, in append order
pub async fn audit_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<ContractAuditLog>, ApiError> {
    let log = state.manager.audit_log(&id).await?;
    Ok(Json(log))
}
