//! Tamper-evident audit log for contract lifecycle events

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::types::ContractStatus;

/// Types of auditable contract events
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractAuditAction {
    Created,
    ContentSaved {
        version: u32,
    },
    StatusChanged {
        from: ContractStatus,
        to: ContractStatus,
    },
    TextImported {
        clauses_found: u32,
    },
    ClausesSynced {
        clause_count: u32,
    },
}

/// A single audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractAuditEvent {
    pub event_id: String,
    pub timestamp: String,
    pub action: ContractAuditAction,
    pub actor: String,
    pub contract_id: String,
    pub previous_hash: Option<String>,
    pub details: Option<String>,
}

impl ContractAuditEvent {
    /// Create a new audit event
    pub fn new(
        action: ContractAuditAction,
        actor: &str,
        contract_id: &str,
        previous_hash: Option<String>,
        details: Option<String>,
    ) -> Self {
        Self {
            event_id: Uuid::new_v4().to_string(),
            timestamp: Utc::now().to_rfc3339(),
            action,
            actor: actor.to_string(),
            contract_id: contract_id.to_string(),
            previous_hash,
            details,
        }
    }

    /// Compute the hash of this event (for chain linking)
    pub fn compute_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.event_id.as_bytes());
        hasher.update(self.timestamp.as_bytes());
        hasher.update(format!("{:?}", self.action).as_bytes());
        hasher.update(self.actor.as_bytes());
        hasher.update(self.contract_id.as_bytes());
        if let Some(ref prev) = self.previous_hash {
            hasher.update(prev.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

/// Chain of audit events with hash linking
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ContractAuditLog {
    pub contract_id: String,
    pub events: Vec<ContractAuditEvent>,
    pub created_at: String,
}

impl ContractAuditLog {
    /// Create a new audit log for a contract
    pub fn new(contract_id: &str) -> Self {
        Self {
            contract_id: contract_id.to_string(),
            events: Vec::new(),
            created_at: Utc::now().to_rfc3339(),
        }
    }

    /// Hash of the last event, used to link the next one
    pub fn last_hash(&self) -> Option<String> {
        self.events.last().map(|e| e.compute_hash())
    }

    /// Append an event, linking it to the current chain head
    pub fn append(
        &mut self,
        action: ContractAuditAction,
        actor: &str,
        details: Option<String>,
    ) -> &ContractAuditEvent {
        let event = ContractAuditEvent::new(
            action,
            actor,
            &self.contract_id,
            self.last_hash(),
            details,
        );
        self.events.push(event);
        self.events.last().expect("just pushed")
    }

    /// Verify the hash chain end to end
    pub fn verify(&self) -> bool {
        for (i, event) in self.events.iter().enumerate() {
            let expected = if i == 0 {
                None
            } else {
                Some(self.events[i - 1].compute_hash())
            };
            if event.previous_hash != expected {
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_links_and_verifies() {
        let mut log = ContractAuditLog::new("c-1");
        log.append(ContractAuditAction::Created, "broker@test", None);
        log.append(
            ContractAuditAction::ContentSaved { version: 2 },
            "broker@test",
            None,
        );
        log.append(
            ContractAuditAction::StatusChanged {
                from: ContractStatus::Draft,
                to: ContractStatus::Approved,
            },
            "admin@test",
            Some("aprobado".to_string()),
        );

        assert_eq!(log.events.len(), 3);
        assert!(log.events[0].previous_hash.is_none());
        assert!(log.events[1].previous_hash.is_some());
        assert!(log.verify());
    }

    #[test]
    fn test_tampering_breaks_the_chain() {
        let mut log = ContractAuditLog::new("c-1");
        log.append(ContractAuditAction::Created, "broker@test", None);
        log.append(
            ContractAuditAction::ContentSaved { version: 2 },
            "broker@test",
            None,
        );
        assert!(log.verify());

        // Rewriting history invalidates every later link
        log.events[0].actor = "intruder@test".to_string();
        assert!(!log.verify());
    }

    #[test]
    fn test_empty_log_verifies() {
        let log = ContractAuditLog::new("c-1");
        assert!(log.verify());
        assert!(log.last_hash().is_none());
    }
}
