use fst::{IntoStreamer, Map, MapBuilder, Streamer};

use crate::core::error::Result;

/// Common domain queries surfaced as loose suggestions alongside results.
const COMMON_QUERIES: &[&str] = &[
    "sources sought",
    "small business set aside",
    "contract award",
    "request for proposal",
    "request for quote",
    "naics code",
    "proposal deadline",
    "active solicitations",
    "vendor registration",
    "compliance requirements",
];

/// Loose substring matches against the fixed common-query list, in either
/// direction, case-insensitive.
pub fn common_query_suggestions(query: &str, limit: usize) -> Vec<String> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    COMMON_QUERIES
        .iter()
        .filter(|common| common.contains(&needle) || needle.contains(*common))
        .take(limit)
        .map(|s| s.to_string())
        .collect()
}

/// FST-backed prefix completion over the indexed vocabulary plus the
/// domain vocabulary. Rebuilt lazily whenever the index generation moves.
pub struct PrefixIndex {
    fst: Map<Vec<u8>>,
    min_prefix_len: usize,
}

impl PrefixIndex {
    /// Build from terms; input is sorted and deduplicated here, as the FST
    /// requires ordered unique keys.
    pub fn build<I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let mut sorted: Vec<String> = terms.into_iter().map(|t| t.to_lowercase()).collect();
        sorted.sort();
        sorted.dedup();

        let mut builder = MapBuilder::memory();
        for (ordinal, term) in sorted.iter().enumerate() {
            builder.insert(term.as_bytes(), ordinal as u64)?;
        }

        Ok(PrefixIndex {
            fst: builder.into_map(),
            min_prefix_len: 2,
        })
    }

    /// Terms starting with `prefix`, case-insensitive, capped at `limit`.
    /// Inputs shorter than the minimum prefix length yield nothing.
    pub fn complete(&self, prefix: &str, limit: usize) -> Vec<String> {
        let prefix = prefix.trim().to_lowercase();
        if prefix.chars().count() < self.min_prefix_len {
            return Vec::new();
        }

        let prefix_bytes = prefix.as_bytes();
        let mut results = Vec::new();
        let mut stream = self.fst.range().ge(prefix_bytes).into_stream();

        while let Some((term_bytes, _)) = stream.next() {
            if !term_bytes.starts_with(prefix_bytes) || results.len() >= limit {
                break;
            }
            if let Ok(term) = String::from_utf8(term_bytes.to_vec()) {
                results.push(term);
            }
        }

        results
    }
}
