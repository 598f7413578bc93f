use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::config::EngineConfig;
use crate::core::error::{Error, ErrorKind, Result};
use crate::core::types::{DocId, FieldKind};
use crate::index::inverted::InvertedIndex;

/// Raw IDF can go negative once a term appears in more than half the
/// corpus; matched documents must still clear the default min-score cut,
/// so contributions are floored here.
const MIN_IDF: f32 = 0.01;

/// One query term's contribution to a document score, kept for relevance
/// explanations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermContribution {
    pub term: String,
    pub term_freq: u32,
    pub idf: f32,
    /// Additive boost applied from structural fields, per field.
    pub field_boosts: HashMap<FieldKind, f32>,
    pub domain_term: bool,
    pub score: f32,
}

/// BM25 scorer with additive field boosts and a domain-vocabulary
/// multiplier.
///
/// Field boosting is additive on top of the base score rather than a
/// per-field multiplier, and the domain multiplier applies after field
/// accumulation. Unusual, but contractual; do not "fix" it to a
/// conventional BM25F.
pub struct Bm25Scorer {
    pub k1: f32,
    pub b: f32,
    field_boosts: HashMap<FieldKind, f32>,
    domain_multiplier: f32,
    /// Domain vocabulary, already normalized through the analyzer so it
    /// compares against query terms directly.
    domain_terms: HashSet<String>,
}

impl Bm25Scorer {
    pub fn new(config: &EngineConfig, domain_terms: HashSet<String>) -> Self {
        Bm25Scorer {
            k1: config.k1,
            b: config.b,
            field_boosts: config.field_boosts.clone(),
            domain_multiplier: config.domain_term_multiplier,
            domain_terms,
        }
    }

    pub fn is_domain_term(&self, term: &str) -> bool {
        self.domain_terms.contains(term)
    }

    /// Score one query term against one document. Returns `None` when the
    /// document holds no posting for the term (absent terms contribute 0).
    ///
    /// Statistics are cross-checked before use; a mismatch aborts the whole
    /// search, since BM25 is only meaningful against a consistent snapshot.
    pub fn score_term(
        &self,
        term: &str,
        index: &InvertedIndex,
        doc_id: &DocId,
    ) -> Result<Option<TermContribution>> {
        let Some(posting) = index.posting(term, doc_id) else {
            return Ok(None);
        };

        let df = index
            .checked_doc_freq(term)
            .map_err(|cause| Error::new(ErrorKind::Query, cause))?;
        let total_docs = index.doc_count() as f32;
        let avg_len = index.avg_doc_length();
        let doc_len = index.doc_length(doc_id).ok_or_else(|| {
            Error::new(
                ErrorKind::Query,
                format!("document '{}' has postings but no length entry", doc_id),
            )
        })? as f32;
        if avg_len <= 0.0 {
            return Err(Error::new(
                ErrorKind::Query,
                "average document length is zero while postings exist",
            ));
        }

        let tf = posting.term_freq as f32;
        let idf = ((total_docs - df as f32 + 0.5) / (df as f32 + 0.5))
            .ln()
            .max(MIN_IDF);
        let tf_component =
            tf * (self.k1 + 1.0) / (tf + self.k1 * (1.0 - self.b + self.b * doc_len / avg_len));
        let base_score = idf * tf_component;

        // Additive field boosts on top of the base score. Content has no
        // extra weight; its occurrences are already in base_score.
        let mut score = base_score;
        let mut applied = HashMap::new();
        for (field, weight) in &self.field_boosts {
            let field_freq = posting.field_freq(*field);
            if field_freq > 0 {
                let bonus = base_score * weight * field_freq as f32;
                score += bonus;
                applied.insert(*field, bonus);
            }
        }

        let domain_term = self.is_domain_term(term);
        if domain_term {
            score *= self.domain_multiplier;
        }

        Ok(Some(TermContribution {
            term: term.to_string(),
            term_freq: posting.term_freq,
            idf,
            field_boosts: applied,
            domain_term,
            score,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::analyzer::Analyzer;

    fn build_index(docs: &[(&str, &str, &str)]) -> InvertedIndex {
        // (id, title, content)
        let analyzer = Analyzer::standard();
        let mut index = InvertedIndex::new();
        for (id, title, content) in docs {
            let searchable = format!("{} {}", title, content);
            let tokens = analyzer.analyze(&searchable);
            let mut field_tokens = HashMap::new();
            field_tokens.insert(FieldKind::Title, analyzer.analyze(title));
            field_tokens.insert(FieldKind::Content, analyzer.analyze(content));
            index.upsert_document(DocId::from(*id), &tokens, &field_tokens);
        }
        index
    }

    fn scorer() -> Bm25Scorer {
        Bm25Scorer::new(&EngineConfig::default(), HashSet::new())
    }

    #[test]
    fn absent_term_contributes_nothing() {
        let index = build_index(&[("a", "", "cat dog")]);
        let result = scorer()
            .score_term("zebra", &index, &DocId::from("a"))
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn higher_term_freq_never_scores_lower() {
        // Same lengths and corpus, increasing frequency of the query term.
        let index = build_index(&[
            ("a", "", "widget filler filler filler"),
            ("b", "", "widget widget filler filler"),
            ("c", "", "widget widget widget filler"),
        ]);

        let s = scorer();
        let score = |id: &str| {
            s.score_term("widget", &index, &DocId::from(id))
                .unwrap()
                .unwrap()
                .score
        };

        assert!(score("b") >= score("a"));
        assert!(score("c") >= score("b"));
    }

    #[test]
    fn title_match_outscores_content_match() {
        let index = build_index(&[
            ("title-hit", "widget overview", "general text here"),
            ("content-hit", "general overview", "widget text here"),
        ]);

        let s = scorer();
        let title = s
            .score_term("widget", &index, &DocId::from("title-hit"))
            .unwrap()
            .unwrap();
        let content = s
            .score_term("widget", &index, &DocId::from("content-hit"))
            .unwrap()
            .unwrap();

        assert!(title.score > content.score);
        assert!(title.field_boosts.contains_key(&FieldKind::Title));
        assert!(!content.field_boosts.contains_key(&FieldKind::Title));
    }

    #[test]
    fn domain_terms_get_multiplied() {
        let index = build_index(&[("a", "", "contract filler"), ("b", "", "widget filler")]);

        let config = EngineConfig::default();
        let plain = Bm25Scorer::new(&config, HashSet::new());
        let domain = Bm25Scorer::new(&config, HashSet::from(["contract".to_string()]));

        let base = plain
            .score_term("contract", &index, &DocId::from("a"))
            .unwrap()
            .unwrap()
            .score;
        let bumped = domain
            .score_term("contract", &index, &DocId::from("a"))
            .unwrap()
            .unwrap();

        assert!(bumped.domain_term);
        assert!((bumped.score - base * 1.5).abs() < 1e-5);
    }

    #[test]
    fn matched_common_term_stays_positive() {
        // A term present in every document drives raw IDF negative; the
        // floor keeps matches above the default min-score cut.
        let index = build_index(&[("a", "", "shared text"), ("b", "", "shared words")]);
        let contribution = scorer()
            .score_term("shared", &index, &DocId::from("a"))
            .unwrap()
            .unwrap();
        assert!(contribution.score > 0.0);
    }
}
