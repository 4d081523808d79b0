//! In-memory BM25 ranked full-text retrieval.
//!
//! This crate provides an inverted index over tokenized documents, a
//! statistically-grounded BM25 scorer, and a thread-safe engine that lets
//! indexing and querying share that index safely.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ tokenizer.rs │────▶│  index.rs   │────▶│ scoring.rs  │
//! │  (tokenize)  │     │ (store +    │     │ (BM25 idf,  │
//! │              │     │  postings)  │     │  params)    │
//! └──────────────┘     └─────────────┘     └─────────────┘
//!        │                    │                   │
//!        ▼                    ▼                   ▼
//! ┌─────────────────────────────────────────────────────┐
//! │                      engine.rs                       │
//! │   (SearchEngine: Arc<Mutex<Index>>, add/search,      │
//! │    ranking via search.rs, one exclusion boundary)    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! One tokenizer backs both the write and read paths — the cross-cutting
//! invariant the whole design hangs on. Both `add_document` and `search`
//! hold the single index lock for their full duration; scoring is pure CPU
//! work with no suspension points under the lock.
//!
//! # Usage
//!
//! ```
//! use quarry::SearchEngine;
//!
//! let engine = SearchEngine::new();
//! engine.add_document("readme.md:0", "quarry is a bm25 search engine")?;
//! engine.add_document("guide.md:0", "ranking documents with bm25")?;
//!
//! let matches = engine.search("bm25 ranking", 10)?;
//! assert_eq!(matches[0].document_id, "guide.md:0");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod engine;
mod error;
mod index;
mod scoring;
mod search;
mod tokenizer;
mod types;

pub use engine::SearchEngine;
pub use error::{IndexError, QueryError};
pub use index::Index;
pub use scoring::{idf, score_document, Bm25Params};
pub use search::rank;
pub use tokenizer::tokenize;
pub use types::{Bm25Match, CorpusStats, DocumentMeta, Posting, PostingList};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corpus_accounting_holds_after_many_inserts() {
        let engine = SearchEngine::new();
        let mut expected_tokens = 0u64;
        for i in 0..50 {
            let text = format!("document number {i} with some shared words");
            expected_tokens += tokenize(&text).len() as u64;
            engine.add_document(&format!("doc:{i}"), &text).unwrap();
        }

        let stats = engine.stats();
        assert_eq!(stats.total_documents, 50);
        assert_eq!(stats.total_token_count, expected_tokens);
        let quotient = stats.total_token_count as f64 / stats.total_documents as f64;
        assert!((stats.average_document_length - quotient).abs() < 1e-9);
    }

    #[test]
    fn indexed_text_is_findable_with_query_tokenization() {
        // The same tokenizer runs on both paths, so any indexed term must be
        // reachable through a query containing it in any casing/punctuation.
        let engine = SearchEngine::new();
        engine
            .add_document("d1", "Pin<Box<dyn Future>> explained")
            .unwrap();

        for query in ["pin", "PIN!", "box", "future"] {
            let results = engine.search(query, 10).unwrap();
            assert_eq!(results.len(), 1, "query {query:?} should match");
        }
    }
}
