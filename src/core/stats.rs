use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of index state, for monitoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexStats {
    pub total_documents: usize,
    pub total_terms: usize,
    pub average_document_length: f32,
    /// Rough in-memory footprint of the inverted index. An estimate, not an
    /// allocator measurement.
    pub index_size_estimate_bytes: u64,
    pub documents_per_type: HashMap<String, usize>,
    pub documents_per_classification: HashMap<String, usize>,
}
