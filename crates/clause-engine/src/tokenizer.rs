//! Clause heading scanner for numbered legal text
//!
//! Recognizes the strict heading form `CLÁUSULA <ORDINAL>:` over a closed
//! ordinal vocabulary and cuts the document into contiguous segments, one per
//! heading. Spacing, accenting and colon placement must match exactly; a
//! heading that deviates is skipped without error.

use crate::ordinals::{match_ordinal_at, ORDINALS};

/// Literal that opens every clause heading, trailing space included
pub const HEADING_KEYWORD: &str = "CLÁUSULA ";

/// One clause segment cut out of the source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClauseSegment {
    /// Ordinal position in the legal numbering (PRIMERA = 1)
    pub rank: u32,
    /// The ordinal word exactly as written in the heading
    pub ordinal: String,
    /// Heading text after the colon, trimmed
    pub title: String,
    /// Full segment: heading line plus body, up to the next heading
    pub text: String,
    /// Body only, without the heading line
    pub body: String,
}

/// Scanner over a configurable ordinal vocabulary
pub struct ClauseTokenizer {
    vocabulary: &'static [(&'static str, u32)],
}

impl ClauseTokenizer {
    pub fn new() -> Self {
        Self {
            vocabulary: ORDINALS,
        }
    }

    /// Use a custom ordinal list instead of the built-in one
    pub fn with_vocabulary(vocabulary: &'static [(&'static str, u32)]) -> Self {
        Self { vocabulary }
    }

    /// Cut `text` into clause segments, one per recognized heading.
    ///
    /// Text before the first heading belongs to no clause and is dropped.
    /// No recognized heading means an empty result, never an error.
    pub fn tokenize(&self, text: &str) -> Vec<ClauseSegment> {
        // (segment start, ordinal token, rank, offset just past the colon)
        let mut headings: Vec<(usize, &str, u32, usize)> = Vec::new();

        for (idx, _) in text.match_indices(HEADING_KEYWORD) {
            let after_keyword = &text[idx + HEADING_KEYWORD.len()..];
            if let Some((token, rank)) = match_ordinal_at(self.vocabulary, after_keyword) {
                let after_ordinal = &after_keyword[token.len()..];
                // The colon must sit directly after the ordinal
                if after_ordinal.starts_with(':') {
                    let title_offset = idx + HEADING_KEYWORD.len() + token.len() + 1;
                    headings.push((idx, token, rank, title_offset));
                }
            }
        }

        headings
            .iter()
            .enumerate()
            .map(|(i, &(start, token, rank, title_offset))| {
                let end = headings
                    .get(i + 1)
                    .map(|&(next_start, ..)| next_start)
                    .unwrap_or(text.len());

                let segment = &text[start..end];
                let after_colon = &text[title_offset..end];
                let title = after_colon.lines().next().unwrap_or("").trim().to_string();
                let body = match after_colon.find('\n') {
                    Some(nl) => after_colon[nl + 1..].to_string(),
                    None => String::new(),
                };

                ClauseSegment {
                    rank,
                    ordinal: token.to_string(),
                    title,
                    text: segment.to_string(),
                    body,
                }
            })
            .collect()
    }
}

impl Default for ClauseTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tokenize_two_clauses() {
        let text = "CLÁUSULA PRIMERA: COMPARECIENCIA\nFoo\nCLÁUSULA SEGUNDA: OBJETO\nBar";
        let segments = ClauseTokenizer::new().tokenize(text);

        assert_eq!(segments.len(), 2);
        assert_eq!(segments[0].rank, 1);
        assert_eq!(segments[0].ordinal, "PRIMERA");
        assert_eq!(segments[0].title, "COMPARECIENCIA");
        assert_eq!(segments[0].body, "Foo\n");
        assert_eq!(segments[1].rank, 2);
        assert_eq!(segments[1].title, "OBJETO");
        assert_eq!(segments[1].body, "Bar");
    }

    #[test]
    fn test_segment_text_covers_the_whole_document() {
        let text = "CLÁUSULA PRIMERA: A\nuno\nCLÁUSULA SEGUNDA: B\ndos";
        let segments = ClauseTokenizer::new().tokenize(text);
        let rejoined: String = segments.iter().map(|s| s.text.as_str()).collect();
        assert_eq!(rejoined, text);
    }

    #[test]
    fn test_no_heading_yields_no_segments() {
        let segments = ClauseTokenizer::new().tokenize("Texto libre sin numeración alguna.");
        assert!(segments.is_empty());
    }

    #[test]
    fn test_strict_spacing_and_colon() {
        // Double space between keyword and ordinal
        assert!(ClauseTokenizer::new()
            .tokenize("CLÁUSULA  PRIMERA: X\ncuerpo")
            .is_empty());
        // Space before the colon
        assert!(ClauseTokenizer::new()
            .tokenize("CLÁUSULA PRIMERA : X\ncuerpo")
            .is_empty());
        // Missing accent on the keyword
        assert!(ClauseTokenizer::new()
            .tokenize("CLAUSULA PRIMERA: X\ncuerpo")
            .is_empty());
    }

    #[test]
    fn test_unknown_ordinal_is_skipped_but_later_ones_match() {
        let text = "CLÁUSULA CUADRAGÉSIMA: FUERA DE RANGO\nx\nCLÁUSULA QUINTA: OBLIGACIONES\ny";
        let segments = ClauseTokenizer::new().tokenize(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].rank, 5);
        // The skipped heading's text rides along in no segment; it preceded
        // the first recognized heading
        assert!(segments[0].text.starts_with("CLÁUSULA QUINTA:"));
    }

    #[test]
    fn test_compound_ordinal_heading() {
        let text = "CLÁUSULA VIGÉSIMA PRIMERA: MASCOTAS\nSe prohíben.";
        let segments = ClauseTokenizer::new().tokenize(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].rank, 21);
        assert_eq!(segments[0].ordinal, "VIGÉSIMA PRIMERA");
        assert_eq!(segments[0].title, "MASCOTAS");
    }

    #[test]
    fn test_heading_without_body() {
        let text = "CLÁUSULA PRIMERA: SOLO TÍTULO";
        let segments = ClauseTokenizer::new().tokenize(text);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].title, "SOLO TÍTULO");
        assert_eq!(segments[0].body, "");
    }
}
