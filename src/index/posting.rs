use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::core::types::FieldKind;

/// Per-(term, document) occurrence record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Posting {
    /// Occurrences of the term across the document's searchable text.
    pub term_freq: u32,
    /// Ordered token positions within the searchable text.
    pub positions: Vec<u32>,
    /// Occurrences per structural field, counted by tokenizing each field
    /// independently.
    pub field_freqs: HashMap<FieldKind, u32>,
}

impl Posting {
    pub fn field_freq(&self, field: FieldKind) -> u32 {
        self.field_freqs.get(&field).copied().unwrap_or(0)
    }

    /// Rough memory footprint, for index size estimates.
    pub fn size_estimate(&self) -> u64 {
        4 + self.positions.len() as u64 * 4 + self.field_freqs.len() as u64 * 8
    }
}
