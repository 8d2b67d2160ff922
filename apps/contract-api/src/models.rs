//! Data models for the contract API

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use clause_engine::TemplateFields;
use contract_types::{
    CanvasSection, ContractClause, ContractContent, ContractStatus, RentalContract,
};

/// Request to fetch or create the contract for an application
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractRequest {
    #[serde(rename = "applicationId")]
    pub application_id: String,
    pub actor: String,
    #[serde(default)]
    pub fields: Option<TemplateFields>,
}

/// Contract response for API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractResponse {
    pub id: String,
    #[serde(rename = "applicationId")]
    pub application_id: String,
    pub status: ContractStatus,
    pub content: ContractContent,
    pub version: u32,
    pub notes: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
    #[serde(rename = "approvedAt")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(rename = "approvedBy")]
    pub approved_by: Option<String>,
    #[serde(rename = "sentToSignatureAt")]
    pub sent_to_signature_at: Option<DateTime<Utc>>,
}

impl From<RentalContract> for ContractResponse {
    fn from(contract: RentalContract) -> Self {
        Self {
            id: contract.id,
            application_id: contract.application_id,
            status: contract.status,
            content: contract.content,
            version: contract.version,
            notes: contract.notes,
            created_at: contract.created_at,
            updated_at: contract.updated_at,
            approved_at: contract.approved_at,
            approved_by: contract.approved_by,
            sent_to_signature_at: contract.sent_to_signature_at,
        }
    }
}

/// Full content replacement with the version the client last read
#[derive(Debug, Clone, Deserialize)]
pub struct SaveContentRequest {
    pub content: ContractContent,
    #[serde(rename = "expectedVersion")]
    pub expected_version: u32,
    #[serde(default)]
    pub notes: Option<String>,
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: ContractStatus,
    pub actor: String,
}

/// Raw legal text to parse and import
#[derive(Debug, Clone, Deserialize)]
pub struct ImportTextRequest {
    #[serde(rename = "rawText")]
    pub raw_text: String,
    #[serde(rename = "expectedVersion")]
    pub expected_version: u32,
    pub actor: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncRequest {
    pub actor: String,
}

/// One clause as submitted by manual entry
#[derive(Debug, Clone, Deserialize)]
pub struct ClausePayload {
    #[serde(rename = "clauseNumber")]
    pub clause_number: String,
    #[serde(rename = "clauseTitle")]
    pub clause_title: String,
    #[serde(rename = "clauseContent")]
    pub clause_content: String,
    #[serde(rename = "canvasSection")]
    pub canvas_section: CanvasSection,
    #[serde(rename = "sortOrder")]
    pub sort_order: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReplaceClausesRequest {
    pub clauses: Vec<ClausePayload>,
}

/// One clause as returned to API clients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClauseResponse {
    pub id: String,
    #[serde(rename = "contractId")]
    pub contract_id: String,
    #[serde(rename = "clauseNumber")]
    pub clause_number: String,
    #[serde(rename = "clauseTitle")]
    pub clause_title: String,
    #[serde(rename = "clauseContent")]
    pub clause_content: String,
    #[serde(rename = "canvasSection")]
    pub canvas_section: CanvasSection,
    #[serde(rename = "sortOrder")]
    pub sort_order: i64,
}

impl From<ContractClause> for ClauseResponse {
    fn from(clause: ContractClause) -> Self {
        Self {
            id: clause.id,
            contract_id: clause.contract_id,
            clause_number: clause.clause_number,
            clause_title: clause.clause_title,
            clause_content: clause.clause_content,
            canvas_section: clause.canvas_section,
            sort_order: clause.sort_order,
        }
    }
}
