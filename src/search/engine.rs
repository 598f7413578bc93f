use std::collections::{HashMap, HashSet};
use std::time::Instant;

use parking_lot::{Mutex, RwLock};

use crate::analysis::analyzer::Analyzer;
use crate::analysis::token::Token;
use crate::core::config::EngineConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::stats::IndexStats;
use crate::core::types::{DocId, FieldKind, SearchDocument};
use crate::index::inverted::InvertedIndex;
use crate::query::synonyms::SynonymTable;
use crate::query::types::{SearchFilters, SearchQuery};
use crate::scoring::scorer::{Bm25Scorer, TermContribution};
use crate::search::facets::compute_facets;
use crate::search::highlight::highlight_terms;
use crate::search::results::{
    ScoreExplanation, SearchMetadata, SearchResponse, SearchResult,
};
use crate::search::suggest::{common_query_suggestions, PrefixIndex};

/// Index, document store, and derived statistics. Mutations span several
/// steps, so the whole struct sits behind one write lock.
struct EngineState {
    index: InvertedIndex,
    documents: HashMap<DocId, SearchDocument>,
    /// Bumped on every mutation; lets the suggestion cache detect staleness.
    generation: u64,
}

struct SuggestCache {
    generation: u64,
    index: Option<PrefixIndex>,
}

/// BM25 full-text search engine over a mutable in-memory collection.
///
/// Writes (`index_document`, `remove_document`, `rebuild_index`,
/// `clear_index`) serialize on the internal write lock; reads (`search`,
/// `get_suggestions`, `get_index_stats`) share the read lock. Everything is
/// synchronous and CPU-bound; callers impose deadlines externally.
pub struct SearchEngine {
    config: EngineConfig,
    analyzer: Analyzer,
    /// Query-side pipeline for callers that opt out of stemming.
    unstemmed_analyzer: Analyzer,
    synonyms: SynonymTable,
    scorer: Bm25Scorer,
    state: RwLock<EngineState>,
    suggest_cache: Mutex<SuggestCache>,
}

impl SearchEngine {
    pub fn new(config: EngineConfig) -> Self {
        let analyzer = Analyzer::standard();

        // Normalize the domain vocabulary through the same pipeline the
        // query goes through, so membership checks compare like with like.
        let domain_terms: HashSet<String> = config
            .domain_vocabulary
            .iter()
            .flat_map(|entry| analyzer.analyze(entry))
            .map(|token| token.text)
            .collect();

        let scorer = Bm25Scorer::new(&config, domain_terms);

        SearchEngine {
            config,
            analyzer,
            unstemmed_analyzer: Analyzer::unstemmed(),
            synonyms: SynonymTable::procurement(),
            scorer,
            state: RwLock::new(EngineState {
                index: InvertedIndex::new(),
                documents: HashMap::new(),
                generation: 0,
            }),
            suggest_cache: Mutex::new(SuggestCache {
                generation: 0,
                index: None,
            }),
        }
    }

    /// Index a document, replacing any prior version with the same id.
    pub fn index_document(&self, doc: SearchDocument) -> Result<()> {
        if doc.id.as_str().trim().is_empty() {
            return Err(Error::indexing(doc.id.as_str(), "empty document id"));
        }

        let (tokens, field_tokens) = self.analyze_document(&doc);

        let mut state = self.state.write();
        state.index.upsert_document(doc.id.clone(), &tokens, &field_tokens);
        state.documents.insert(doc.id.clone(), doc);
        state.generation += 1;
        Ok(())
    }

    /// Remove a document and its postings. Returns false for unknown ids.
    pub fn remove_document(&self, id: &DocId) -> bool {
        let mut state = self.state.write();
        let removed = state.index.remove_document(id);
        state.documents.remove(id);
        if removed {
            state.generation += 1;
        }
        removed
    }

    /// Drop and re-create every posting from the retained documents. The
    /// final state is independent of re-indexing order.
    pub fn rebuild_index(&self) {
        let mut state = self.state.write();
        let docs: Vec<SearchDocument> = state.documents.values().cloned().collect();
        state.index.clear();
        for doc in docs {
            let (tokens, field_tokens) = self.analyze_document(&doc);
            state.index.upsert_document(doc.id.clone(), &tokens, &field_tokens);
        }
        state.generation += 1;
    }

    pub fn clear_index(&self) {
        let mut state = self.state.write();
        state.index.clear();
        state.documents.clear();
        state.generation += 1;
    }

    pub fn get_index_stats(&self) -> IndexStats {
        let state = self.state.read();

        let mut documents_per_type = HashMap::new();
        let mut documents_per_classification = HashMap::new();
        for doc in state.documents.values() {
            *documents_per_type
                .entry(doc.doc_type.label().to_string())
                .or_insert(0) += 1;
            *documents_per_classification
                .entry(doc.classification.label().to_string())
                .or_insert(0) += 1;
        }

        IndexStats {
            total_documents: state.index.doc_count(),
            total_terms: state.index.term_count(),
            average_document_length: state.index.avg_doc_length(),
            index_size_estimate_bytes: state.index.size_estimate_bytes(),
            documents_per_type,
            documents_per_classification,
        }
    }

    /// Single-pass search pipeline: normalize, expand, retrieve (OR),
    /// permission-filter, attribute-filter, score, cut, stable-sort,
    /// paginate, highlight, facet.
    pub fn search(&self, query: &SearchQuery) -> Result<SearchResponse> {
        let start = Instant::now();
        let state = self.state.read();

        let analyzer = if query.options.stemming {
            &self.analyzer
        } else {
            &self.unstemmed_analyzer
        };

        let query_terms = dedup_terms(analyzer.analyze(&query.text));
        if query_terms.is_empty() {
            // An empty query is not an error; it matches nothing.
            let mut response = SearchResponse::empty(
                start.elapsed().as_millis() as u64,
                SearchMetadata::default(),
            );
            response.suggestions =
                common_query_suggestions(&query.text, self.config.max_suggestions);
            return Ok(response);
        }

        let expanded_terms = self.expand_terms(&query_terms, query, analyzer, &state.index);

        // OR semantics: one matching term qualifies a document. Term order
        // then posting order keeps the candidate sequence deterministic,
        // which the later stable sort relies on for ties.
        let mut seen = HashSet::new();
        let mut candidates: Vec<DocId> = Vec::new();
        for term in &expanded_terms {
            if let Some(docs) = state.index.postings_for(term) {
                for doc_id in docs.keys() {
                    if seen.insert(doc_id.clone()) {
                        candidates.push(doc_id.clone());
                    }
                }
            }
        }

        // Permission check happens before scoring, never after.
        let mut filtered: Vec<&SearchDocument> = Vec::new();
        for doc_id in &candidates {
            let doc = state.documents.get(doc_id).ok_or_else(|| {
                Error::new(
                    ErrorKind::Query,
                    format!("posting references unknown document '{}'", doc_id),
                )
            })?;
            if !doc
                .permissions
                .readable_by(&query.requester.user_id, &query.requester.roles)
            {
                continue;
            }
            if !matches_filters(doc, &query.filters) {
                continue;
            }
            filtered.push(doc);
        }

        let min_score = query.filters.min_score.unwrap_or(0.0);
        let mut scored: Vec<(&SearchDocument, f32, Vec<TermContribution>)> = Vec::new();
        for &doc in &filtered {
            let mut contributions = Vec::new();
            let mut total = 0.0f32;
            for term in &expanded_terms {
                if let Some(contribution) = self.scorer.score_term(term, &state.index, &doc.id)? {
                    total += contribution.score;
                    contributions.push(contribution);
                }
            }
            if total < min_score {
                continue;
            }
            scored.push((doc, total, contributions));
        }

        // sort_by is stable: equal scores keep candidate order.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        // Facets cover every surviving candidate, min-score cut included,
        // independent of which page is returned.
        let facets = compute_facets(scored.iter().map(|(doc, _, _)| *doc));

        let total_count = scored.len();
        let candidates_evaluated = filtered.len();
        let limit = query.options.limit.unwrap_or(self.config.default_limit);

        let mut results = Vec::new();
        for (doc, score, contributions) in
            scored.into_iter().skip(query.options.offset).take(limit)
        {
            let highlights = if query.options.highlight {
                let matched: Vec<String> =
                    contributions.iter().map(|c| c.term.clone()).collect();
                highlight_terms(
                    &doc.content,
                    &matched,
                    self.config.max_highlights_per_term,
                    self.config.highlight_window,
                )
            } else {
                Vec::new()
            };

            let document = if query.options.include_content {
                doc.clone()
            } else {
                doc.without_content()
            };

            results.push(SearchResult {
                document,
                score,
                highlights,
                explanation: ScoreExplanation {
                    total: score,
                    terms: contributions,
                    field_boost_weights: self.config.field_boosts.clone(),
                },
            });
        }

        Ok(SearchResponse {
            results,
            total_count,
            execution_time_ms: start.elapsed().as_millis() as u64,
            suggestions: common_query_suggestions(&query.text, self.config.max_suggestions),
            facets,
            metadata: SearchMetadata {
                query_terms,
                expanded_terms,
                candidates_evaluated,
            },
        })
    }

    /// Prefix completion over the indexed vocabulary and the domain
    /// vocabulary. Case-insensitive, minimum two characters, capped output.
    pub fn get_suggestions(&self, partial: &str, limit: usize) -> Vec<String> {
        let state = self.state.read();
        let mut cache = self.suggest_cache.lock();

        if cache.index.is_none() || cache.generation != state.generation {
            let terms = state
                .index
                .terms()
                .cloned()
                .chain(self.config.domain_vocabulary.iter().cloned());
            cache.index = PrefixIndex::build(terms).ok();
            cache.generation = state.generation;
        }

        match &cache.index {
            Some(index) => index.complete(partial, limit),
            None => Vec::new(),
        }
    }

    /// Searchable text plus per-field token streams. A document with no
    /// content indexes as if the content were empty; this never fails.
    fn analyze_document(
        &self,
        doc: &SearchDocument,
    ) -> (Vec<Token>, HashMap<FieldKind, Vec<Token>>) {
        let tags = doc.metadata.tags.join(" ");
        let category = doc.metadata.category.clone().unwrap_or_default();
        let source = doc.metadata.source.clone().unwrap_or_default();
        let searchable = format!(
            "{} {} {} {} {}",
            doc.title, doc.content, tags, category, source
        );
        let tokens = self.analyzer.analyze(&searchable);

        let mut field_tokens = HashMap::new();
        field_tokens.insert(FieldKind::Title, self.analyzer.analyze(&doc.title));
        field_tokens.insert(FieldKind::Content, self.analyzer.analyze(&doc.content));
        field_tokens.insert(FieldKind::Tags, self.analyzer.analyze(&tags));
        field_tokens.insert(FieldKind::Category, self.analyzer.analyze(&category));
        if let Some(summary) = &doc.metadata.summary {
            field_tokens.insert(FieldKind::Summary, self.analyzer.analyze(summary));
        }

        (tokens, field_tokens)
    }

    /// Union in synonym phrasings and, for unmatched terms, fuzzy
    /// alternatives. Expanded terms participate exactly like originals.
    fn expand_terms(
        &self,
        query_terms: &[String],
        query: &SearchQuery,
        analyzer: &Analyzer,
        index: &InvertedIndex,
    ) -> Vec<String> {
        let mut expanded: Vec<String> = query_terms.to_vec();
        let mut seen: HashSet<String> = query_terms.iter().cloned().collect();

        if query.options.expand_synonyms {
            for term in query_terms {
                if let Some(phrases) = self.synonyms.phrases_for(term) {
                    for phrase in phrases {
                        for token in analyzer.analyze(phrase) {
                            if seen.insert(token.text.clone()) {
                                expanded.push(token.text);
                            }
                        }
                    }
                }
            }
        }

        if query.options.fuzzy {
            let unmatched: Vec<String> = expanded
                .iter()
                .filter(|term| {
                    index.doc_freq(term) == 0
                        && term.chars().count() >= self.config.fuzzy_min_term_len
                })
                .cloned()
                .collect();
            for term in unmatched {
                for alternative in index.fuzzy_expand(&term, self.config.fuzzy_max_distance) {
                    if seen.insert(alternative.clone()) {
                        expanded.push(alternative);
                    }
                }
            }
        }

        expanded
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        SearchEngine::new(EngineConfig::default())
    }
}

fn dedup_terms(tokens: Vec<Token>) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();
    for token in tokens {
        if seen.insert(token.text.clone()) {
            terms.push(token.text);
        }
    }
    terms
}

fn matches_filters(doc: &SearchDocument, filters: &SearchFilters) -> bool {
    if let Some(types) = &filters.types {
        if !types.contains(&doc.doc_type) {
            return false;
        }
    }
    if let Some(classifications) = &filters.classifications {
        if !classifications.contains(&doc.classification) {
            return false;
        }
    }
    if let Some(from) = filters.date_from {
        match doc.metadata.created_at {
            Some(created) if created >= from => {}
            _ => return false,
        }
    }
    if let Some(to) = filters.date_to {
        match doc.metadata.created_at {
            Some(created) if created <= to => {}
            _ => return false,
        }
    }
    if let Some(owner) = &filters.owner {
        if doc.metadata.owner.as_deref() != Some(owner.as_str()) {
            return false;
        }
    }
    if let Some(conversation_id) = &filters.conversation_id {
        if doc.metadata.conversation_id.as_deref() != Some(conversation_id.as_str()) {
            return false;
        }
    }
    if let Some(tags) = &filters.tags {
        if !tags.iter().any(|tag| doc.metadata.tags.contains(tag)) {
            return false;
        }
    }
    if let Some(categories) = &filters.categories {
        match &doc.metadata.category {
            Some(category) if categories.contains(category) => {}
            _ => return false,
        }
    }
    if let Some(sources) = &filters.sources {
        match &doc.metadata.source {
            Some(source) if sources.contains(source) => {}
            _ => return false,
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{Classification, DocumentType};
    use crate::query::types::RequesterContext;

    fn public_doc(id: &str, title: &str, content: &str) -> SearchDocument {
        let mut doc = SearchDocument::new(id, title, content);
        doc.permissions.read = vec!["tester".to_string()];
        doc
    }

    fn query(text: &str) -> SearchQuery {
        SearchQuery::new(text, RequesterContext::new("tester"))
    }

    #[test]
    fn empty_query_is_not_an_error() {
        let engine = SearchEngine::default();
        engine
            .index_document(public_doc("a", "Title", "some content"))
            .unwrap();

        let response = engine.search(&query("")).unwrap();
        assert_eq!(response.total_count, 0);
        assert!(response.results.is_empty());
    }

    #[test]
    fn empty_id_is_an_indexing_error() {
        let engine = SearchEngine::default();
        let err = engine
            .index_document(public_doc("  ", "Title", "content"))
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Indexing);
    }

    #[test]
    fn filters_combine_with_and_semantics() {
        let mut doc = public_doc("a", "Contract", "small business award");
        doc.doc_type = DocumentType::Contract;
        doc.classification = Classification::Public;
        doc.metadata.owner = Some("alice".to_string());

        assert!(matches_filters(
            &doc,
            &SearchFilters {
                types: Some(vec![DocumentType::Contract]),
                owner: Some("alice".to_string()),
                ..Default::default()
            }
        ));
        assert!(!matches_filters(
            &doc,
            &SearchFilters {
                types: Some(vec![DocumentType::Contract]),
                owner: Some("bob".to_string()),
                ..Default::default()
            }
        ));
    }

    #[test]
    fn suggestion_cache_tracks_mutations() {
        let engine = SearchEngine::default();
        engine
            .index_document(public_doc("a", "Widget", "widgetry text"))
            .unwrap();
        assert!(!engine.get_suggestions("widget", 10).is_empty());

        engine.clear_index();
        // Domain vocabulary still completes; the removed document term must
        // not.
        assert!(engine.get_suggestions("widgetry", 10).is_empty());
        assert!(!engine.get_suggestions("contra", 10).is_empty());
    }
}
