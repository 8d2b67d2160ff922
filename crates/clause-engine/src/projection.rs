//! Clause set to canvas content
//!
//! The clause rows are the source of truth; the canvas content is a derived
//! aggregate regenerated from them on demand.

use uuid::Uuid;

use contract_types::{CanvasSection, ContractClause, ContractContent};

use crate::sections::SectionRouter;
use crate::tokenizer::ClauseSegment;

/// Render one clause back into its heading-plus-body display form
fn render_clause(clause: &ContractClause) -> String {
    if clause.clause_content.is_empty() {
        format!("CLÁUSULA {}: {}", clause.clause_number, clause.clause_title)
    } else {
        format!(
            "CLÁUSULA {}: {}\n{}",
            clause.clause_number, clause.clause_title, clause.clause_content
        )
    }
}

/// Project an ordered clause set onto the five canvas sections.
///
/// Pure and deterministic: clauses concatenate into their assigned section in
/// `sort_order`. Duplicate or gapped sort orders are not validated; they
/// simply dictate concatenation order (ties keep input order). Sections with
/// no clauses keep their default title and an empty body.
pub fn project_clauses(clauses: &[ContractClause]) -> ContractContent {
    let mut ordered: Vec<&ContractClause> = clauses.iter().collect();
    ordered.sort_by_key(|c| c.sort_order);

    let mut content = ContractContent::empty();
    for section in CanvasSection::ALL {
        let rendered: Vec<String> = ordered
            .iter()
            .filter(|c| c.canvas_section == section)
            .map(|c| render_clause(c))
            .collect();
        if !rendered.is_empty() {
            content.section_mut(section).content = rendered.join("\n\n");
        }
    }
    content
}

/// Turn tokenized segments into clause rows for a contract.
///
/// Sections are assigned through the same router the parser uses, so import
/// and sync agree on placement.
pub fn segments_to_clauses(contract_id: &str, segments: &[ClauseSegment]) -> Vec<ContractClause> {
    let router = SectionRouter::new();
    segments
        .iter()
        .enumerate()
        .map(|(index, segment)| ContractClause {
            id: Uuid::new_v4().to_string(),
            contract_id: contract_id.to_string(),
            clause_number: segment.ordinal.clone(),
            clause_title: segment.title.clone(),
            clause_content: segment.body.trim().to_string(),
            canvas_section: router.route(segment.rank, &segment.text),
            sort_order: index as i64,
        })
        .collect()
}
