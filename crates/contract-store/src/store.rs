//! SQLite persistence for contracts, clauses and the audit chain

use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use uuid::Uuid;

use contract_types::audit::{ContractAuditAction, ContractAuditEvent, ContractAuditLog};
use contract_types::{
    CanvasSection, ContractClause, ContractContent, ContractStatus, RentalContract,
};

use crate::error::StoreError;

pub struct ContractStore {
    db: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct ContractRow {
    id: String,
    application_id: String,
    status: String,
    content_json: String,
    version: i64,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    approved_at: Option<DateTime<Utc>>,
    approved_by: Option<String>,
    sent_to_signature_at: Option<DateTime<Utc>>,
}

impl ContractRow {
    fn into_contract(self) -> Result<RentalContract, StoreError> {
        let status = ContractStatus::parse(&self.status)
            .ok_or_else(|| StoreError::Corrupt(format!("unknown status '{}'", self.status)))?;
        let content: ContractContent = serde_json::from_str(&self.content_json)?;
        Ok(RentalContract {
            id: self.id,
            application_id: self.application_id,
            status,
            content,
            version: self.version as u32,
            notes: self.notes,
            created_at: self.created_at,
            updated_at: self.updated_at,
            approved_at: self.approved_at,
            approved_by: self.approved_by,
            sent_to_signature_at: self.sent_to_signature_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct ClauseRow {
    id: String,
    contract_id: String,
    clause_number: String,
    clause_title: String,
    clause_content: String,
    canvas_section: String,
    sort_order: i64,
}

impl ClauseRow {
    fn into_clause(self) -> Result<ContractClause, StoreError> {
        let canvas_section = CanvasSection::parse(&self.canvas_section).ok_or_else(|| {
            StoreError::Corrupt(format!("unknown canvas section '{}'", self.canvas_section))
        })?;
        Ok(ContractClause {
            id: self.id,
            contract_id: self.contract_id,
            clause_number: self.clause_number,
            clause_title: self.clause_title,
            clause_content: self.clause_content,
            canvas_section,
            sort_order: self.sort_order,
        })
    }
}

#[derive(sqlx::FromRow)]
struct AuditRow {
    event_id: String,
    contract_id: String,
    timestamp: String,
    action_json: String,
    actor: String,
    previous_hash: Option<String>,
    details: Option<String>,
}

impl AuditRow {
    fn into_event(self) -> Result<ContractAuditEvent, StoreError> {
        let action: ContractAuditAction = serde_json::from_str(&self.action_json)?;
        Ok(ContractAuditEvent {
            event_id: self.event_id,
            timestamp: self.timestamp,
            action,
            actor: self.actor,
            contract_id: self.contract_id,
            previous_hash: self.previous_hash,
            details: self.details,
        })
    }
}

impl ContractStore {
    /// Connect and run migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database: {}", database_url);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(database_url)
            .await?;
        let store = Self { db: pool };
        store.run_migrations().await?;
        Ok(store)
    }

    /// Single-connection in-memory store, for tests
    pub async fn in_memory() -> Result<Self, StoreError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        let store = Self { db: pool };
        store.run_migrations().await?;
        Ok(store)
    }

    async fn run_migrations(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contracts (
                id TEXT PRIMARY KEY,
                application_id TEXT NOT NULL UNIQUE,
                status TEXT NOT NULL DEFAULT 'draft',
                content_json TEXT NOT NULL,
                version INTEGER NOT NULL DEFAULT 1,
                notes TEXT,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL,
                approved_at TEXT,
                approved_by TEXT,
                sent_to_signature_at TEXT
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_contracts_status ON contracts(status)
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS clauses (
                id TEXT PRIMARY KEY,
                contract_id TEXT NOT NULL REFERENCES contracts(id),
                clause_number TEXT NOT NULL,
                clause_title TEXT NOT NULL,
                clause_content TEXT NOT NULL,
                canvas_section TEXT NOT NULL,
                sort_order INTEGER NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_clauses_contract ON clauses(contract_id, sort_order)
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS audit_log (
                event_id TEXT PRIMARY KEY,
                contract_id TEXT NOT NULL,
                timestamp TEXT NOT NULL,
                action_json TEXT NOT NULL,
                actor TEXT NOT NULL,
                previous_hash TEXT,
                details TEXT
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        sqlx::query(
            r#"
            CREATE INDEX IF NOT EXISTS idx_audit_contract ON audit_log(contract_id)
            "#,
        )
        .execute(&self.db)
        .await?;

        tracing::info!("Migrations complete");
        Ok(())
    }

    /// Fetch a contract by id; absence is `NotFound`, not a transport error
    pub async fn get(&self, id: &str) -> Result<RentalContract, StoreError> {
        let row: Option<ContractRow> = sqlx::query_as(
            r#"
            SELECT id, application_id, status, content_json, version, notes,
                   created_at, updated_at, approved_at, approved_by, sent_to_signature_at
            FROM contracts
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db)
        .await?;

        row.ok_or_else(|| StoreError::NotFound(id.to_string()))?
            .into_contract()
    }

    /// Fetch the contract tied to an application, if one exists
    pub async fn find_by_application(
        &self,
        application_id: &str,
    ) -> Result<Option<RentalContract>, StoreError> {
        let row: Option<ContractRow> = sqlx::query_as(
            r#"
            SELECT id, application_id, status, content_json, version, notes,
                   created_at, updated_at, approved_at, approved_by, sent_to_signature_at
            FROM contracts
            WHERE application_id = ?
            "#,
        )
        .bind(application_id)
        .fetch_optional(&self.db)
        .await?;

        row.map(|r| r.into_contract()).transpose()
    }

    /// Insert a fresh draft contract for an application at version 1.
    ///
    /// The UNIQUE constraint on `application_id` enforces the one-contract-
    /// per-application invariant; losing the creation race degrades to
    /// fetching the row the winner inserted.
    pub async fn insert_default(
        &self,
        application_id: &str,
        content: &ContractContent,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        let id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let content_json = serde_json::to_string(content)?;

        let result = sqlx::query(
            r#"
            INSERT INTO contracts (id, application_id, status, content_json, version, created_at, updated_at)
            VALUES (?, ?, 'draft', ?, 1, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(application_id)
        .bind(&content_json)
        .bind(now.to_rfc3339())
        .bind(now.to_rfc3339())
        .execute(&self.db)
        .await;

        match result {
            Ok(_) => {
                tracing::info!("Created contract {} for application {}", id, application_id);
                self.append_audit(&id, ContractAuditAction::Created, actor, None)
                    .await?;
                self.get(&id).await
            }
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => self
                .find_by_application(application_id)
                .await?
                .ok_or_else(|| StoreError::NotFound(application_id.to_string())),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the contract content, guarded by compare-and-swap on
    /// `version`.
    ///
    /// A stale `expected_version` yields `Conflict` with the version actually
    /// on the row; a successful save increments `version` by exactly 1.
    pub async fn save_content(
        &self,
        id: &str,
        expected_version: u32,
        content: &ContractContent,
        notes: Option<&str>,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        let content_json = serde_json::to_string(content)?;
        let now = Utc::now();

        let result = sqlx::query(
            r#"
            UPDATE contracts
            SET content_json = ?, notes = ?, version = version + 1, updated_at = ?
            WHERE id = ? AND version = ?
            "#,
        )
        .bind(&content_json)
        .bind(notes)
        .bind(now.to_rfc3339())
        .bind(id)
        .bind(expected_version as i64)
        .execute(&self.db)
        .await?;

        if result.rows_affected() == 0 {
            let current = self.get(id).await?;
            return Err(StoreError::Conflict {
                expected: expected_version,
                actual: current.version,
            });
        }

        self.append_audit(
            id,
            ContractAuditAction::ContentSaved {
                version: expected_version + 1,
            },
            actor,
            None,
        )
        .await?;

        self.get(id).await
    }

    /// Apply a status transition, stamping the one-time timestamps on first
    /// entry into `approved` and `sent_to_signature`
    pub async fn update_status(
        &self,
        id: &str,
        new_status: ContractStatus,
        actor: &str,
    ) -> Result<RentalContract, StoreError> {
        let current = self.get(id).await?;
        if !current.status.can_transition_to(new_status) {
            return Err(StoreError::InvalidTransition {
                from: current.status,
                to: new_status,
            });
        }

        let now = Utc::now();
        let first_approval =
            new_status == ContractStatus::Approved && current.approved_at.is_none();
        let approved_at = if first_approval {
            Some(now)
        } else {
            current.approved_at
        };
        let approved_by = if first_approval {
            Some(actor.to_string())
        } else {
            current.approved_by.clone()
        };
        let sent_to_signature_at = if new_status == ContractStatus::SentToSignature
            && current.sent_to_signature_at.is_none()
        {
            Some(now)
        } else {
            current.sent_to_signature_at
        };

        sqlx::query(
            r#"
            UPDATE contracts
            SET status = ?, approved_at = ?, approved_by = ?, sent_to_signature_at = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(new_status.as_str())
        .bind(approved_at.map(|t| t.to_rfc3339()))
        .bind(approved_by)
        .bind(sent_to_signature_at.map(|t| t.to_rfc3339()))
        .bind(now.to_rfc3339())
        .bind(id)
        .execute(&self.db)
        .await?;

        if current.status != new_status {
            tracing::info!(
                "Contract {} status: {} -> {}",
                id,
                current.status,
                new_status
            );
            self.append_audit(
                id,
                ContractAuditAction::StatusChanged {
                    from: current.status,
                    to: new_status,
                },
                actor,
                None,
            )
            .await?;
        }

        self.get(id).await
    }

    /// Swap a contract's clause set atomically
    pub async fn replace_clauses(
        &self,
        contract_id: &str,
        clauses: &[ContractClause],
    ) -> Result<(), StoreError> {
        let mut tx = self.db.begin().await?;

        sqlx::query("DELETE FROM clauses WHERE contract_id = ?")
            .bind(contract_id)
            .execute(&mut *tx)
            .await?;

        for clause in clauses {
            sqlx::query(
                r#"
                INSERT INTO clauses (id, contract_id, clause_number, clause_title, clause_content, canvas_section, sort_order)
                VALUES (?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(&clause.id)
            .bind(contract_id)
            .bind(&clause.clause_number)
            .bind(&clause.clause_title)
            .bind(&clause.clause_content)
            .bind(clause.canvas_section.as_str())
            .bind(clause.sort_order)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// A contract's clauses in `sort_order`
    pub async fn list_clauses(&self, contract_id: &str) -> Result<Vec<ContractClause>, StoreError> {
        let rows: Vec<ClauseRow> = sqlx::query_as(
            r#"
            SELECT id, contract_id, clause_number, clause_title, clause_content, canvas_section, sort_order
            FROM clauses
            WHERE contract_id = ?
            ORDER BY sort_order
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.db)
        .await?;

        rows.into_iter().map(|r| r.into_clause()).collect()
    }

    /// Append an event to a contract's audit chain, linked to the current
    /// chain head
    pub async fn append_audit(
        &self,
        contract_id: &str,
        action: ContractAuditAction,
        actor: &str,
        details: Option<String>,
    ) -> Result<(), StoreError> {
        let previous_hash = self.last_audit_hash(contract_id).await?;
        let event = ContractAuditEvent::new(action, actor, contract_id, previous_hash, details);

        sqlx::query(
            r#"
            INSERT INTO audit_log (event_id, contract_id, timestamp, action_json, actor, previous_hash, details)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&event.event_id)
        .bind(contract_id)
        .bind(&event.timestamp)
        .bind(serde_json::to_string(&event.action)?)
        .bind(&event.actor)
        .bind(&event.previous_hash)
        .bind(&event.details)
        .execute(&self.db)
        .await?;

        Ok(())
    }

    async fn last_audit_hash(&self, contract_id: &str) -> Result<Option<String>, StoreError> {
        let row: Option<AuditRow> = sqlx::query_as(
            r#"
            SELECT event_id, contract_id, timestamp, action_json, actor, previous_hash, details
            FROM audit_log
            WHERE contract_id = ?
            ORDER BY rowid DESC
            LIMIT 1
            "#,
        )
        .bind(contract_id)
        .fetch_optional(&self.db)
        .await?;

        Ok(match row {
            Some(row) => Some(row.into_event()?.compute_hash()),
            None => None,
        })
    }

    /// The persisted audit chain for a contract, in append order
    pub async fn audit_log(&self, contract_id: &str) -> Result<ContractAuditLog, StoreError> {
        let rows: Vec<AuditRow> = sqlx::query_as(
            r#"
            SELECT event_id, contract_id, timestamp, action_json, actor, previous_hash, details
            FROM audit_log
            WHERE contract_id = ?
            ORDER BY rowid
            "#,
        )
        .bind(contract_id)
        .fetch_all(&self.db)
        .await?;

        let mut log = ContractAuditLog::new(contract_id);
        for row in rows {
            log.events.push(row.into_event()?);
        }
        Ok(log)
    }
}
