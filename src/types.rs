//! The building blocks of the BM25 index.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Posting**: `term_frequency == positions.len()`, positions strictly
//!   ascending.
//! - **PostingList**: `document_frequency` equals the number of distinct
//!   `document_id`s in `postings`; no two postings share a `document_id`.
//! - **CorpusStats**: `average_document_length` is always the exact quotient
//!   `total_token_count / total_documents` when the corpus is non-empty.
//!
//! `Index::check_well_formed` (test builds) verifies all of these.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One (term, document) pair in the inverted index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Posting {
    /// Caller-minted document identifier.
    pub document_id: String,
    /// Occurrences of the term in this document.
    pub term_frequency: u32,
    /// Ordinals of each occurrence within the document's term sequence.
    pub positions: Vec<u32>,
}

/// All postings for a single term, with its document frequency.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostingList {
    pub postings: Vec<Posting>,
    /// Number of distinct documents containing the term. Kept in lockstep
    /// with `postings`; never recomputed lazily.
    pub document_frequency: u32,
}

/// Corpus-wide aggregates, snapshot at read time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorpusStats {
    pub total_documents: u64,
    pub total_token_count: u64,
    /// Derived: `total_token_count / total_documents` (0.0 for an empty
    /// corpus).
    pub average_document_length: f64,
}

/// Opaque positional metadata attached to a document at indexing time.
///
/// The engine stores and returns this but never interprets it. Callers that
/// chunk files typically record the origin path and the chunk's line span.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMeta {
    pub source_path: Option<String>,
    /// Half-open `(start, end)` range in whatever unit the caller chose.
    pub span: Option<(u32, u32)>,
}

/// A ranked search result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bm25Match {
    pub document_id: String,
    /// Total BM25 score. Always finite; a non-finite value fails the query
    /// instead of being returned.
    pub score: f32,
    /// Per-term contributions, for explainability. Terms absent from the
    /// document contribute zero and are omitted.
    pub term_scores: HashMap<String, f32>,
}
