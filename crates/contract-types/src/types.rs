use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a rental contract
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Approved,
    SentToSignature,
    PartiallySigned,
    FullySigned,
    Cancelled,
}

impl ContractStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContractStatus::Draft => "draft",
            ContractStatus::Approved => "approved",
            ContractStatus::SentToSignature => "sent_to_signature",
            ContractStatus::PartiallySigned => "partially_signed",
            ContractStatus::FullySigned => "fully_signed",
            ContractStatus::Cancelled => "cancelled",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "draft" => Some(ContractStatus::Draft),
            "approved" => Some(ContractStatus::Approved),
            "sent_to_signature" => Some(ContractStatus::SentToSignature),
            "partially_signed" => Some(ContractStatus::PartiallySigned),
            "fully_signed" => Some(ContractStatus::FullySigned),
            "cancelled" => Some(ContractStatus::Cancelled),
            _ => None,
        }
    }

    /// Position in the forward signing progression. `Cancelled` sits outside
    /// the progression and has no rank.
    fn rank(&self) -> Option<u8> {
        match self {
            ContractStatus::Draft => Some(0),
            ContractStatus::Approved => Some(1),
            ContractStatus::SentToSignature => Some(2),
            ContractStatus::PartiallySigned => Some(3),
            ContractStatus::FullySigned => Some(4),
            ContractStatus::Cancelled => None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ContractStatus::FullySigned | ContractStatus::Cancelled)
    }

    /// Whether a status write from `self` to `next` is legal.
    ///
    /// Re-asserting the current status is always accepted (idempotent write).
    /// Forward moves may skip intermediate states: a single-signer contract
    /// goes `sent_to_signature` straight to `fully_signed`. Backward moves
    /// are rejected, and `cancelled` is reachable from any non-terminal
    /// state.
    pub fn can_transition_to(&self, next: ContractStatus) -> bool {
        if *self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        if next == ContractStatus::Cancelled {
            return true;
        }
        match (self.rank(), next.rank()) {
            (Some(from), Some(to)) => to > from,
            _ => false,
        }
    }
}

impl std::fmt::Display for ContractStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the five fixed display slots that compose a contract's canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CanvasSection {
    Header,
    Conditions,
    Obligations,
    Termination,
    Signatures,
}

impl CanvasSection {
    /// Canvas display order, also the concatenation order for round-trips
    pub const ALL: [CanvasSection; 5] = [
        CanvasSection::Header,
        CanvasSection::Conditions,
        CanvasSection::Obligations,
        CanvasSection::Termination,
        CanvasSection::Signatures,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CanvasSection::Header => "header",
            CanvasSection::Conditions => "conditions",
            CanvasSection::Obligations => "obligations",
            CanvasSection::Termination => "termination",
            CanvasSection::Signatures => "signatures",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "header" => Some(CanvasSection::Header),
            "conditions" => Some(CanvasSection::Conditions),
            "obligations" => Some(CanvasSection::Obligations),
            "termination" => Some(CanvasSection::Termination),
            "signatures" => Some(CanvasSection::Signatures),
            _ => None,
        }
    }

    /// Title a section carries before any content lands in it
    pub fn default_title(&self) -> &'static str {
        match self {
            CanvasSection::Header => "Comparecencia",
            CanvasSection::Conditions => "Condiciones del Arriendo",
            CanvasSection::Obligations => "Obligaciones de las Partes",
            CanvasSection::Termination => "Término del Contrato",
            CanvasSection::Signatures => "Firmas",
        }
    }
}

impl std::fmt::Display for CanvasSection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Title plus free-text body of one canvas section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionBody {
    pub title: String,
    pub content: String,
}

impl SectionBody {
    pub fn empty(title: &str) -> Self {
        Self {
            title: title.to_string(),
            content: String::new(),
        }
    }
}

/// The five-section bundle a contract renders from.
///
/// Not persisted independently: it is either parsed out of raw legal text or
/// regenerated from the clause set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractContent {
    pub header: SectionBody,
    pub conditions: SectionBody,
    pub obligations: SectionBody,
    pub termination: SectionBody,
    pub signatures: SectionBody,
}

impl ContractContent {
    /// All five sections at their default titles with empty bodies
    pub fn empty() -> Self {
        Self {
            header: SectionBody::empty(CanvasSection::Header.default_title()),
            conditions: SectionBody::empty(CanvasSection::Conditions.default_title()),
            obligations: SectionBody::empty(CanvasSection::Obligations.default_title()),
            termination: SectionBody::empty(CanvasSection::Termination.default_title()),
            signatures: SectionBody::empty(CanvasSection::Signatures.default_title()),
        }
    }

    pub fn section(&self, section: CanvasSection) -> &SectionBody {
        match section {
            CanvasSection::Header => &self.header,
            CanvasSection::Conditions => &self.conditions,
            CanvasSection::Obligations => &self.obligations,
            CanvasSection::Termination => &self.termination,
            CanvasSection::Signatures => &self.signatures,
        }
    }

    pub fn section_mut(&mut self, section: CanvasSection) -> &mut SectionBody {
        match section {
            CanvasSection::Header => &mut self.header,
            CanvasSection::Conditions => &mut self.conditions,
            CanvasSection::Obligations => &mut self.obligations,
            CanvasSection::Termination => &mut self.termination,
            CanvasSection::Signatures => &mut self.signatures,
        }
    }

    /// True when no section holds any text
    pub fn is_empty(&self) -> bool {
        CanvasSection::ALL
            .iter()
            .all(|s| self.section(*s).content.is_empty())
    }

    /// Section bodies joined in canvas order, used to check that parsing
    /// preserved the source text
    pub fn concatenated(&self) -> String {
        CanvasSection::ALL
            .iter()
            .map(|s| self.section(*s).content.as_str())
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for ContractContent {
    fn default() -> Self {
        Self::empty()
    }
}

/// One contract row, tied 1:1 to a rental application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RentalContract {
    pub id: String,
    pub application_id: String,
    pub status: ContractStatus,
    pub content: ContractContent,
    pub version: u32,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_at: Option<DateTime<Utc>>,
    pub approved_by: Option<String>,
    pub sent_to_signature_at: Option<DateTime<Utc>>,
}

/// A numbered unit of legal text belonging to a contract, mapped to exactly
/// one canvas section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractClause {
    pub id: String,
    pub contract_id: String,
    /// Ordinal legal label, e.g. "PRIMERA"
    pub clause_number: String,
    pub clause_title: String,
    pub clause_content: String,
    pub canvas_section: CanvasSection,
    pub sort_order: i64,
}
