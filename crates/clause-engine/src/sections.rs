//! Data-driven routing of clauses onto canvas sections

use contract_types::CanvasSection;

/// Fixed ordinal-to-section routes for the template's known clause layout
pub const FIXED_ROUTES: &[(u32, CanvasSection)] = &[
    (1, CanvasSection::Header),
    (2, CanvasSection::Conditions),
    (3, CanvasSection::Conditions),
    (4, CanvasSection::Conditions),
    (5, CanvasSection::Obligations),
];

/// Keywords that pull a clause beyond the fixed table into `termination`
pub const TERMINATION_KEYWORDS: &[&str] = &[
    "terminación",
    "término anticipado",
    "desahucio",
    "restitución",
    "resciliación",
    "incumplimiento",
];

/// Maps a clause's ordinal rank (and, past the fixed table, its body text)
/// to a canvas section.
///
/// Placement of clauses past the fixed table is heuristic; callers must not
/// assume it is stable across edits to the clause body.
pub struct SectionRouter {
    fixed: &'static [(u32, CanvasSection)],
    termination_keywords: &'static [&'static str],
}

impl SectionRouter {
    pub fn new() -> Self {
        Self {
            fixed: FIXED_ROUTES,
            termination_keywords: TERMINATION_KEYWORDS,
        }
    }

    /// Use custom routes and keywords instead of the built-in tables
    pub fn with_tables(
        fixed: &'static [(u32, CanvasSection)],
        termination_keywords: &'static [&'static str],
    ) -> Self {
        Self {
            fixed,
            termination_keywords,
        }
    }

    pub fn route(&self, rank: u32, body: &str) -> CanvasSection {
        if let Some((_, section)) = self.fixed.iter().find(|(r, _)| *r == rank) {
            return *section;
        }

        let body_lower = body.to_lowercase();
        if self
            .termination_keywords
            .iter()
            .any(|keyword| body_lower.contains(keyword))
        {
            CanvasSection::Termination
        } else {
            CanvasSection::Obligations
        }
    }
}

impl Default for SectionRouter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_routes() {
        let router = SectionRouter::new();
        assert_eq!(router.route(1, ""), CanvasSection::Header);
        assert_eq!(router.route(2, ""), CanvasSection::Conditions);
        assert_eq!(router.route(3, ""), CanvasSection::Conditions);
        assert_eq!(router.route(4, ""), CanvasSection::Conditions);
        assert_eq!(router.route(5, ""), CanvasSection::Obligations);
    }

    #[test]
    fn test_keyword_fallback_routes_to_termination() {
        let router = SectionRouter::new();
        let body = "El contrato terminará anticipadamente por incumplimiento grave.";
        assert_eq!(router.route(6, body), CanvasSection::Termination);
        assert_eq!(
            router.route(12, "Procede el desahucio con treinta días de aviso."),
            CanvasSection::Termination
        );
    }

    #[test]
    fn test_keyword_fallback_defaults_to_obligations() {
        let router = SectionRouter::new();
        assert_eq!(
            router.route(7, "El arrendatario mantendrá el inmueble aseado."),
            CanvasSection::Obligations
        );
    }

    #[test]
    fn test_keyword_match_is_case_insensitive_on_body() {
        let router = SectionRouter::new();
        assert_eq!(
            router.route(9, "RESTITUCIÓN del inmueble al término del plazo."),
            CanvasSection::Termination
        );
    }
}
