use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::Rng;

use docsearch::core::types::{Classification, DocumentType, SearchDocument};
use docsearch::query::types::{RequesterContext, SearchQuery};
use docsearch::search::engine::SearchEngine;

/// Helper to create test documents
fn create_test_document(id: u64, content_words: usize) -> SearchDocument {
    let mut rng = rand::thread_rng();
    let words = [
        "contract", "award", "proposal", "solicitation", "small", "business", "sources",
        "sought", "vendor", "schedule", "review", "pipeline", "cloud", "services",
    ];
    let content: String = (0..content_words)
        .map(|_| words[rng.gen_range(0..words.len())])
        .collect::<Vec<_>>()
        .join(" ");

    let mut doc = SearchDocument::new(
        format!("doc-{}", id),
        format!("Document {}", id),
        content,
    );
    doc.doc_type = DocumentType::Document;
    doc.classification = Classification::Public;
    doc.metadata.category = Some(format!("category_{}", id % 10));
    doc.permissions.read = vec!["bench-user".to_string()];
    doc
}

fn populated_engine(docs: usize) -> SearchEngine {
    let engine = SearchEngine::default();
    for id in 0..docs {
        engine
            .index_document(create_test_document(id as u64, 100))
            .unwrap();
    }
    engine
}

/// Benchmark single document indexing
fn bench_index_document(c: &mut Criterion) {
    let engine = SearchEngine::default();

    c.bench_function("index_document", |b| {
        let mut id = 0u64;
        b.iter(|| {
            engine
                .index_document(create_test_document(id, 100))
                .unwrap();
            id += 1;
        });
    });
}

/// Benchmark search over corpora of increasing size
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for corpus_size in [100, 500, 1000].iter() {
        let engine = populated_engine(*corpus_size);
        let query = SearchQuery::new("small business contract", RequesterContext::new("bench-user"));

        group.bench_with_input(
            BenchmarkId::from_parameter(corpus_size),
            corpus_size,
            |b, _| {
                b.iter(|| black_box(engine.search(&query).unwrap()));
            },
        );
    }

    group.finish();
}

/// Benchmark search with highlighting and facets enabled
fn bench_search_with_highlighting(c: &mut Criterion) {
    let engine = populated_engine(500);
    let mut query = SearchQuery::new("contract award", RequesterContext::new("bench-user"));
    query.options.highlight = true;

    c.bench_function("search_with_highlighting", |b| {
        b.iter(|| black_box(engine.search(&query).unwrap()));
    });
}

/// Benchmark prefix suggestions
fn bench_suggestions(c: &mut Criterion) {
    let engine = populated_engine(500);
    // Warm the prefix cache before measuring completion itself.
    engine.get_suggestions("co", 10);

    c.bench_function("get_suggestions", |b| {
        b.iter(|| black_box(engine.get_suggestions("con", 10)));
    });
}

criterion_group!(
    benches,
    bench_index_document,
    bench_search,
    bench_search_with_highlighting,
    bench_suggestions
);
criterion_main!(benches);
