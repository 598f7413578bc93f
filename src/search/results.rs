use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::{FieldKind, SearchDocument};
use crate::scoring::scorer::TermContribution;

/// Why a document scored what it did: per-term contributions plus the
/// boost table that was in effect.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreExplanation {
    pub total: f32,
    pub terms: Vec<TermContribution>,
    pub field_boost_weights: HashMap<FieldKind, f32>,
}

/// A highlighted fragment of document content around one term match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightFragment {
    pub term: String,
    pub fragment: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub document: SearchDocument,
    pub score: f32,
    pub highlights: Vec<HighlightFragment>,
    pub explanation: ScoreExplanation,
}

/// Facet counts over the full filtered candidate set, computed before
/// pagination.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FacetCounts {
    pub types: HashMap<String, usize>,
    pub classifications: HashMap<String, usize>,
    pub categories: HashMap<String, usize>,
    pub tags: HashMap<String, usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchMetadata {
    /// Terms the query normalized to.
    pub query_terms: Vec<String>,
    /// Terms actually used for retrieval, after synonym/fuzzy expansion.
    pub expanded_terms: Vec<String>,
    /// Candidates surviving permission and attribute filters.
    pub candidates_evaluated: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<SearchResult>,
    /// Matching documents after filters, before pagination.
    pub total_count: usize,
    pub execution_time_ms: u64,
    pub suggestions: Vec<String>,
    pub facets: FacetCounts,
    pub metadata: SearchMetadata,
}

impl SearchResponse {
    /// The well-formed empty response for queries that match nothing.
    pub fn empty(execution_time_ms: u64, metadata: SearchMetadata) -> Self {
        SearchResponse {
            results: Vec::new(),
            total_count: 0,
            execution_time_ms,
            suggestions: Vec::new(),
            facets: FacetCounts::default(),
            metadata,
        }
    }
}
