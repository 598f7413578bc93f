//! BM25 full-text search over a mutable in-memory document collection.
//!
//! The engine keeps an inverted index with per-term postings (frequency,
//! positions, per-field frequencies) and the derived statistics BM25 needs,
//! maintained incrementally under insert, remove, and re-index. Searches
//! run a single-pass pipeline: normalization, synonym/fuzzy expansion,
//! OR-union candidate retrieval, permission and attribute filtering,
//! scoring with additive field boosts, pagination, highlighting, and
//! faceted aggregation.
//!
//! ```
//! use docsearch::core::types::SearchDocument;
//! use docsearch::query::types::{RequesterContext, SearchQuery};
//! use docsearch::search::engine::SearchEngine;
//!
//! let engine = SearchEngine::default();
//! let mut doc = SearchDocument::new("n-1", "Sources Sought Notice", "small business set aside");
//! doc.permissions.read.push("analyst".to_string());
//! engine.index_document(doc).unwrap();
//!
//! let query = SearchQuery::new("small business", RequesterContext::new("analyst"));
//! let response = engine.search(&query).unwrap();
//! assert_eq!(response.total_count, 1);
//! ```

pub mod analysis;
pub mod core;
pub mod index;
pub mod query;
pub mod scoring;
pub mod search;

pub use crate::core::config::EngineConfig;
pub use crate::core::error::{Error, ErrorKind, Result};
pub use crate::core::stats::IndexStats;
pub use crate::core::types::{
    Classification, DocId, DocumentMetadata, DocumentPermissions, DocumentType, FieldKind,
    SearchDocument,
};
pub use crate::query::types::{RequesterContext, SearchFilters, SearchOptions, SearchQuery};
pub use crate::search::engine::SearchEngine;
pub use crate::search::results::{SearchResponse, SearchResult};
