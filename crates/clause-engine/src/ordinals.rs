//! The closed Spanish ordinal vocabulary used in clause headings

/// Ordinal words recognized in clause headings, PRIMERA (1) through
/// TRIGÉSIMA (30), including the compound and variant spellings in common
/// notarial use. Matching is exact on accents and case.
pub const ORDINALS: &[(&str, u32)] = &[
    ("PRIMERA", 1),
    ("SEGUNDA", 2),
    ("TERCERA", 3),
    ("CUARTA", 4),
    ("QUINTA", 5),
    ("SEXTA", 6),
    ("SÉPTIMA", 7),
    ("OCTAVA", 8),
    ("NOVENA", 9),
    ("DÉCIMA", 10),
    ("UNDÉCIMA", 11),
    ("DÉCIMA PRIMERA", 11),
    ("DECIMOPRIMERA", 11),
    ("DUODÉCIMA", 12),
    ("DÉCIMA SEGUNDA", 12),
    ("DECIMOSEGUNDA", 12),
    ("DECIMOTERCERA", 13),
    ("DÉCIMA TERCERA", 13),
    ("DECIMOCUARTA", 14),
    ("DÉCIMA CUARTA", 14),
    ("DECIMOQUINTA", 15),
    ("DÉCIMA QUINTA", 15),
    ("DECIMOSEXTA", 16),
    ("DÉCIMA SEXTA", 16),
    ("DECIMOSÉPTIMA", 17),
    ("DÉCIMA SÉPTIMA", 17),
    ("DECIMOCTAVA", 18),
    ("DÉCIMA OCTAVA", 18),
    ("DECIMONOVENA", 19),
    ("DÉCIMA NOVENA", 19),
    ("VIGÉSIMA", 20),
    ("VIGÉSIMA PRIMERA", 21),
    ("VIGÉSIMA SEGUNDA", 22),
    ("VIGÉSIMA TERCERA", 23),
    ("VIGÉSIMA CUARTA", 24),
    ("VIGÉSIMA QUINTA", 25),
    ("VIGÉSIMA SEXTA", 26),
    ("VIGÉSIMA SÉPTIMA", 27),
    ("VIGÉSIMA OCTAVA", 28),
    ("VIGÉSIMA NOVENA", 29),
    ("TRIGÉSIMA", 30),
];

/// Match the longest ordinal token at the start of `text`.
///
/// Longest-match keeps "VIGÉSIMA PRIMERA" from being read as "VIGÉSIMA"
/// followed by stray text.
pub fn match_ordinal_at<'v>(
    vocabulary: &'v [(&'v str, u32)],
    text: &str,
) -> Option<(&'v str, u32)> {
    let mut best: Option<(&str, u32)> = None;
    for &(token, rank) in vocabulary {
        if text.starts_with(token) {
            match best {
                Some((current, _)) if current.len() >= token.len() => {}
                _ => best = Some((token, rank)),
            }
        }
    }
    best
}

/// Rank of an exact ordinal word, if it belongs to the vocabulary
pub fn ordinal_rank(word: &str) -> Option<u32> {
    ORDINALS
        .iter()
        .find(|(token, _)| *token == word)
        .map(|(_, rank)| *rank)
}
