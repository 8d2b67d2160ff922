//! Raw contract text to canvas content
//!
//! Converts a flat, ordinal-numbered legal document into the five-section
//! canvas shape. Parse misses degrade silently: text with no recognized
//! heading produces empty sections, never an error.

use lazy_static::lazy_static;
use regex::Regex;

use contract_types::{CanvasSection, ContractContent};

use crate::sections::SectionRouter;
use crate::tokenizer::ClauseTokenizer;

/// Literal phrase that opens the signature block, case-sensitive
pub const SIGNATURE_BLOCK_MARKER: &str = "Firmado en dos ejemplares";

lazy_static! {
    static ref EXCESS_NEWLINES: Regex = Regex::new(r"\n{3,}").unwrap();
}

/// Collapse 3+ consecutive newlines to exactly 2 and trim the ends
fn normalize_section(text: &str) -> String {
    EXCESS_NEWLINES
        .replace_all(text, "\n\n")
        .trim()
        .to_string()
}

/// Parse a full contract document into canvas content.
///
/// The signature tail (everything from [`SIGNATURE_BLOCK_MARKER`] to the end
/// of input) is cut off first and lands verbatim in `signatures`; the rest is
/// segmented by clause heading and routed section by section. Absent a
/// signature marker, `signatures` stays empty.
pub fn parse_contract_text(text: &str) -> ContractContent {
    let (clause_text, signature_tail) = match text.find(SIGNATURE_BLOCK_MARKER) {
        Some(idx) => (&text[..idx], Some(&text[idx..])),
        None => (text, None),
    };

    let tokenizer = ClauseTokenizer::new();
    let router = SectionRouter::new();

    let mut content = ContractContent::empty();
    let mut buckets: Vec<(CanvasSection, Vec<String>)> = Vec::new();

    for segment in tokenizer.tokenize(clause_text) {
        let section = router.route(segment.rank, &segment.text);
        match buckets.iter_mut().find(|(s, _)| *s == section) {
            Some((_, texts)) => texts.push(segment.text),
            None => buckets.push((section, vec![segment.text])),
        }
    }

    for (section, texts) in buckets {
        content.section_mut(section).content = normalize_section(&texts.join("\n\n"));
    }

    if let Some(tail) = signature_tail {
        content.signatures.content = normalize_section(tail);
    }

    content
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strip all whitespace; round-trip comparisons ignore normalization
    fn squash(text: &str) -> String {
        text.chars().filter(|c| !c.is_whitespace()).collect()
    }

    fn clause_title() -> impl Strategy<Value = String> {
        "[A-Z]{3,14}"
    }

    /// Body text that cannot collide with the heading grammar or the
    /// signature marker (lowercase only)
    fn clause_body() -> impl Strategy<Value = String> {
        "[a-záéíóúñ ]{1,60}"
    }

    prop_compose! {
        fn clause_document()(
            count in 1usize..=5,
            titles in prop::collection::vec(clause_title(), 5),
            bodies in prop::collection::vec(clause_body(), 5),
        ) -> String {
            let ordinals = ["PRIMERA", "SEGUNDA", "TERCERA", "CUARTA", "QUINTA"];
            (0..count)
                .map(|i| format!("CLÁUSULA {}: {}\n{}\n", ordinals[i], titles[i], bodies[i]))
                .collect::<String>()
        }
    }

    proptest! {
        /// Property: parsing then re-concatenating the five sections in
        /// canvas order preserves every character of clause text, modulo
        /// whitespace
        #[test]
        fn round_trip_preserves_clause_text(document in clause_document()) {
            let content = parse_contract_text(&document);
            prop_assert_eq!(squash(&content.concatenated()), squash(&document));
        }

        /// Property: well-formed PRIMERA..QUINTA documents always populate
        /// header, conditions and obligations
        #[test]
        fn five_clauses_fill_the_fixed_sections(
            titles in prop::collection::vec(clause_title(), 5),
            bodies in prop::collection::vec(clause_body(), 5),
        ) {
            let ordinals = ["PRIMERA", "SEGUNDA", "TERCERA", "CUARTA", "QUINTA"];
            let document: String = (0..5)
                .map(|i| format!("CLÁUSULA {}: {}\n{}\n", ordinals[i], titles[i], bodies[i]))
                .collect();
            let content = parse_contract_text(&document);

            prop_assert!(!content.header.content.is_empty());
            prop_assert!(!content.conditions.content.is_empty());
            prop_assert!(!content.obligations.content.is_empty());
        }

        /// Property: text without the heading literal never produces content
        /// outside `signatures`
        #[test]
        fn headingless_text_stays_empty(text in "[a-z \n]{0,200}") {
            let content = parse_contract_text(&text);
            prop_assert!(content.header.content.is_empty());
            prop_assert!(content.conditions.content.is_empty());
            prop_assert!(content.obligations.content.is_empty());
            prop_assert!(content.termination.content.is_empty());
        }
    }
}
