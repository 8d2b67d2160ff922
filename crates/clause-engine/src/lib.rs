pub mod ordinals;
pub mod parser;
pub mod projection;
pub mod sections;
pub mod template;
pub mod tokenizer;

use contract_types::{ContractClause, ContractContent};

pub use parser::{parse_contract_text, SIGNATURE_BLOCK_MARKER};
pub use projection::{project_clauses, segments_to_clauses};
pub use sections::SectionRouter;
pub use template::{default_content, TemplateError, TemplateFields};
pub use tokenizer::{ClauseSegment, ClauseTokenizer};

/// ClauseEngine entry point
pub struct ClauseEngine;

impl ClauseEngine {
    pub fn new() -> Self {
        Self
    }

    /// Parse raw legal text into the five-section canvas shape
    pub fn parse_text(&self, text: &str) -> ContractContent {
        parser::parse_contract_text(text)
    }

    /// Tokenize raw legal text into clause rows for a contract
    pub fn extract_clauses(&self, contract_id: &str, text: &str) -> Vec<ContractClause> {
        let segments = ClauseTokenizer::new().tokenize(text);
        projection::segments_to_clauses(contract_id, &segments)
    }

    /// Regenerate canvas content from a contract's clause set
    pub fn project(&self, clauses: &[ContractClause]) -> ContractContent {
        projection::project_clauses(clauses)
    }
}

impl Default for ClauseEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_parses_and_extracts_consistently() {
        let engine = ClauseEngine::new();
        let text = "CLÁUSULA PRIMERA: COMPARECIENCIA\nFoo\nCLÁUSULA SEGUNDA: OBJETO\nBar";

        let content = engine.parse_text(text);
        let clauses = engine.extract_clauses("c-1", text);

        assert_eq!(clauses.len(), 2);
        // Projecting the extracted clauses reproduces the parsed placement
        let projected = engine.project(&clauses);
        assert_eq!(
            projected.header.content.contains("COMPARECIENCIA"),
            content.header.content.contains("COMPARECIENCIA")
        );
        assert!(projected.conditions.content.contains("Bar"));
    }

    #[test]
    fn test_engine_handles_unparseable_text() {
        let engine = ClauseEngine::new();
        assert!(engine.parse_text("sin cláusulas").is_empty());
        assert!(engine.extract_clauses("c-1", "sin cláusulas").is_empty());
    }
}
