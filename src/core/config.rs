use std::collections::HashMap;

use crate::core::types::FieldKind;

/// Engine tuning knobs. Defaults match the production scoring contract:
/// BM25 k1=1.2 b=0.75, additive field boosts, 1.5x domain-term multiplier.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub k1: f32,
    pub b: f32,
    pub field_boosts: HashMap<FieldKind, f32>,
    pub domain_term_multiplier: f32,
    /// Terms of the procurement vocabulary, in raw (pre-analysis) form.
    /// The engine normalizes them through its analyzer at construction.
    pub domain_vocabulary: Vec<String>,
    pub default_limit: usize,
    pub max_suggestions: usize,
    /// Occurrence cap per term when building highlight fragments.
    pub max_highlights_per_term: usize,
    /// Characters of context on each side of a highlighted match.
    pub highlight_window: usize,
    pub fuzzy_max_distance: usize,
    /// Query terms shorter than this are never fuzzy-expanded.
    pub fuzzy_min_term_len: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        let mut field_boosts = HashMap::new();
        field_boosts.insert(FieldKind::Title, 3.0);
        field_boosts.insert(FieldKind::Tags, 2.0);
        field_boosts.insert(FieldKind::Category, 1.5);
        field_boosts.insert(FieldKind::Summary, 2.5);
        // Content stays at the baseline; its occurrences are already in the
        // base BM25 score.

        EngineConfig {
            k1: 1.2,
            b: 0.75,
            field_boosts,
            domain_term_multiplier: 1.5,
            domain_vocabulary: default_domain_vocabulary(),
            default_limit: 20,
            max_suggestions: 10,
            max_highlights_per_term: 3,
            highlight_window: 50,
            fuzzy_max_distance: 2,
            fuzzy_min_term_len: 4,
        }
    }
}

/// Government-contracting vocabulary that gets the relevance bump.
fn default_domain_vocabulary() -> Vec<String> {
    [
        "contract",
        "award",
        "proposal",
        "solicitation",
        "procurement",
        "naics",
        "rfp",
        "rfq",
        "rfi",
        "sources",
        "sought",
        "set-aside",
        "vendor",
        "bid",
        "opportunity",
        "compliance",
        "subcontract",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
