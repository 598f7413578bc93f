use crate::core::types::SearchDocument;
use crate::search::results::FacetCounts;

/// Aggregate counts by type, classification, category, and tag over the
/// filtered candidate set. Runs before pagination so the counts are
/// independent of which page is returned.
pub fn compute_facets<'a, I>(documents: I) -> FacetCounts
where
    I: Iterator<Item = &'a SearchDocument>,
{
    let mut facets = FacetCounts::default();

    for doc in documents {
        *facets
            .types
            .entry(doc.doc_type.label().to_string())
            .or_insert(0) += 1;
        *facets
            .classifications
            .entry(doc.classification.label().to_string())
            .or_insert(0) += 1;
        if let Some(category) = &doc.metadata.category {
            *facets.categories.entry(category.clone()).or_insert(0) += 1;
        }
        for tag in &doc.metadata.tags {
            *facets.tags.entry(tag.clone()).or_insert(0) += 1;
        }
    }

    facets
}
