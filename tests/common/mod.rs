//! Shared test utilities and fixtures.

#![allow(dead_code)]

use quarry::SearchEngine;

/// A small corpus with overlapping vocabulary, used across test files.
pub const FIXTURE_DOCS: &[(&str, &str)] = &[
    ("rust.md:0", "rust is a systems programming language"),
    ("rust.md:1", "ownership and borrowing make rust memory safe"),
    ("go.md:0", "go is a garbage collected programming language"),
    ("search.md:0", "bm25 ranks documents by term frequency and rarity"),
    ("search.md:1", "an inverted index maps terms to documents"),
];

/// Build an engine pre-loaded with `FIXTURE_DOCS`.
pub fn fixture_engine() -> SearchEngine {
    let engine = SearchEngine::new();
    for (id, text) in FIXTURE_DOCS {
        engine.add_document(id, text).unwrap();
    }
    engine
}

/// Ids of the results, in rank order.
pub fn ranked_ids(matches: &[quarry::Bm25Match]) -> Vec<String> {
    matches.iter().map(|m| m.document_id.clone()).collect()
}
