use std::collections::{BTreeMap, HashMap};

use crate::analysis::token::Token;
use crate::core::types::{DocId, FieldKind};
use crate::core::utils::levenshtein_distance;
use crate::index::posting::Posting;

/// In-memory inverted index with the derived statistics BM25 needs.
///
/// Invariants maintained across every mutation:
/// - `doc_freqs[t]` equals the number of documents holding a posting for `t`
/// - a term with zero postings is absent from every map (no empty entries)
/// - `total_token_count` equals the sum of all document lengths
///
/// Mutations are multi-step and must be serialized by the owner; the engine
/// keeps the whole struct behind a write lock.
pub struct InvertedIndex {
    /// term -> (document -> posting). BTreeMap keeps per-term candidate
    /// order deterministic.
    postings: HashMap<String, BTreeMap<DocId, Posting>>,
    /// term -> document frequency.
    doc_freqs: HashMap<String, u32>,
    /// document -> token count of its searchable text.
    doc_lengths: HashMap<DocId, u32>,
    /// document -> distinct terms it contributed. Makes removal O(terms in
    /// doc) instead of O(vocabulary).
    doc_terms: HashMap<DocId, Vec<String>>,
    total_token_count: u64,
}

impl InvertedIndex {
    pub fn new() -> Self {
        InvertedIndex {
            postings: HashMap::new(),
            doc_freqs: HashMap::new(),
            doc_lengths: HashMap::new(),
            doc_terms: HashMap::new(),
            total_token_count: 0,
        }
    }

    pub fn doc_count(&self) -> usize {
        self.doc_lengths.len()
    }

    pub fn term_count(&self) -> usize {
        self.postings.len()
    }

    pub fn avg_doc_length(&self) -> f32 {
        if self.doc_lengths.is_empty() {
            0.0
        } else {
            self.total_token_count as f32 / self.doc_lengths.len() as f32
        }
    }

    pub fn is_indexed(&self, doc_id: &DocId) -> bool {
        self.doc_lengths.contains_key(doc_id)
    }

    pub fn doc_length(&self, doc_id: &DocId) -> Option<u32> {
        self.doc_lengths.get(doc_id).copied()
    }

    pub fn doc_freq(&self, term: &str) -> u32 {
        self.doc_freqs.get(term).copied().unwrap_or(0)
    }

    /// Document frequency cross-checked against the posting map. A mismatch
    /// means the index was corrupted mid-write; scoring must not proceed.
    pub fn checked_doc_freq(&self, term: &str) -> Result<u32, String> {
        let from_map = self.doc_freq(term);
        let from_postings = self.postings.get(term).map_or(0, |docs| docs.len() as u32);
        if from_map != from_postings {
            return Err(format!(
                "term '{}' has doc_freq {} but {} postings",
                term, from_map, from_postings
            ));
        }
        Ok(from_map)
    }

    pub fn postings_for(&self, term: &str) -> Option<&BTreeMap<DocId, Posting>> {
        self.postings.get(term)
    }

    pub fn posting(&self, term: &str, doc_id: &DocId) -> Option<&Posting> {
        self.postings.get(term).and_then(|docs| docs.get(doc_id))
    }

    pub fn terms(&self) -> impl Iterator<Item = &String> {
        self.postings.keys()
    }

    /// Insert or replace a document. Re-indexing an id first removes its
    /// prior postings, so repeated calls never duplicate entries.
    pub fn upsert_document(
        &mut self,
        doc_id: DocId,
        tokens: &[Token],
        field_tokens: &HashMap<FieldKind, Vec<Token>>,
    ) {
        if self.is_indexed(&doc_id) {
            self.remove_document(&doc_id);
        }

        // Group positions per distinct term.
        let mut term_positions: HashMap<&str, Vec<u32>> = HashMap::new();
        for token in tokens {
            term_positions
                .entry(token.text.as_str())
                .or_default()
                .push(token.position);
        }

        // Per-field frequencies, counted from each field's own token stream.
        let mut field_freqs: HashMap<&str, HashMap<FieldKind, u32>> = HashMap::new();
        for (field, tokens) in field_tokens {
            for token in tokens {
                *field_freqs
                    .entry(token.text.as_str())
                    .or_default()
                    .entry(*field)
                    .or_insert(0) += 1;
            }
        }

        let mut terms = Vec::with_capacity(term_positions.len());
        for (term, positions) in term_positions {
            let posting = Posting {
                term_freq: positions.len() as u32,
                positions,
                field_freqs: field_freqs.remove(term).unwrap_or_default(),
            };

            self.postings
                .entry(term.to_string())
                .or_default()
                .insert(doc_id.clone(), posting);
            // Exactly one df increment per newly indexed document.
            *self.doc_freqs.entry(term.to_string()).or_insert(0) += 1;
            terms.push(term.to_string());
        }

        self.doc_lengths.insert(doc_id.clone(), tokens.len() as u32);
        self.doc_terms.insert(doc_id, terms);
        self.total_token_count += tokens.len() as u64;
    }

    /// Delete a document and every derived statistic that references it.
    /// Returns false if the id was never indexed.
    pub fn remove_document(&mut self, doc_id: &DocId) -> bool {
        let Some(length) = self.doc_lengths.remove(doc_id) else {
            return false;
        };
        self.total_token_count -= length as u64;

        let terms = self.doc_terms.remove(doc_id).unwrap_or_default();
        for term in terms {
            if let Some(docs) = self.postings.get_mut(&term) {
                docs.remove(doc_id);
                if docs.is_empty() {
                    // No residual empty entries.
                    self.postings.remove(&term);
                    self.doc_freqs.remove(&term);
                    continue;
                }
            }
            if let Some(df) = self.doc_freqs.get_mut(&term) {
                *df = df.saturating_sub(1);
            }
        }

        true
    }

    pub fn clear(&mut self) {
        self.postings.clear();
        self.doc_freqs.clear();
        self.doc_lengths.clear();
        self.doc_terms.clear();
        self.total_token_count = 0;
    }

    /// Indexed terms within `max_distance` edits of `term`, closest first.
    /// Linear scan over the dictionary; vocabulary sizes here stay small
    /// enough that an automaton is not worth it.
    pub fn fuzzy_expand(&self, term: &str, max_distance: usize) -> Vec<String> {
        let mut matches: Vec<(String, usize)> = self
            .postings
            .keys()
            .filter_map(|candidate| {
                let distance = levenshtein_distance(term, candidate);
                (distance > 0 && distance <= max_distance)
                    .then(|| (candidate.clone(), distance))
            })
            .collect();

        matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        matches.into_iter().map(|(term, _)| term).collect()
    }

    pub fn size_estimate_bytes(&self) -> u64 {
        let mut size = 0u64;
        for (term, docs) in &self.postings {
            size += term.len() as u64;
            for (doc_id, posting) in docs {
                size += doc_id.as_str().len() as u64 + posting.size_estimate();
            }
        }
        size += self.doc_lengths.len() as u64 * 12;
        size
    }
}

impl Default for InvertedIndex {
    fn default() -> Self {
        Self::new()
    }
}
