use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::types::{Classification, DocumentType};

/// Identity of the caller, used for permission filtering before scoring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequesterContext {
    pub user_id: String,
    pub roles: Vec<String>,
}

impl RequesterContext {
    pub fn new(user_id: impl Into<String>) -> Self {
        RequesterContext {
            user_id: user_id.into(),
            roles: Vec::new(),
        }
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = roles;
        self
    }
}

/// Attribute filters, combined with AND semantics: every specified filter
/// must pass. `None` means the dimension is unconstrained; within a list,
/// matching any entry is sufficient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchFilters {
    pub types: Option<Vec<DocumentType>>,
    pub classifications: Option<Vec<Classification>>,
    pub date_from: Option<DateTime<Utc>>,
    pub date_to: Option<DateTime<Utc>>,
    pub owner: Option<String>,
    pub conversation_id: Option<String>,
    pub tags: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub sources: Option<Vec<String>>,
    /// Candidates scoring below this are dropped.
    pub min_score: Option<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchOptions {
    pub limit: Option<usize>,
    pub offset: usize,
    /// Include document bodies in results; when false, content is stripped.
    pub include_content: bool,
    pub highlight: bool,
    /// Expand unmatched query terms to near-spelled indexed terms.
    pub fuzzy: bool,
    /// Apply light stemming to the query (always applied at index time).
    pub stemming: bool,
    /// Union in alternate phrasings from the synonym table.
    pub expand_synonyms: bool,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            limit: None,
            offset: 0,
            include_content: true,
            highlight: false,
            fuzzy: false,
            stemming: true,
            expand_synonyms: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub text: String,
    #[serde(default)]
    pub filters: SearchFilters,
    #[serde(default)]
    pub options: SearchOptions,
    pub requester: RequesterContext,
}

impl SearchQuery {
    pub fn new(text: impl Into<String>, requester: RequesterContext) -> Self {
        SearchQuery {
            text: text.into(),
            filters: SearchFilters::default(),
            options: SearchOptions::default(),
            requester,
        }
    }
}
