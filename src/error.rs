//! Error taxonomy for indexing and querying.
//!
//! Indexing errors fail the single `add_document` call and leave prior state
//! untouched. Query errors fail the single `search` call and never poison the
//! engine. Every variant carries the identifiers needed for test assertions;
//! none expose lock internals.

use thiserror::Error;

/// Errors from mutating operations on the index.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndexError {
    /// The document id is already indexed. Re-indexing in place would corrupt
    /// corpus statistics; callers wanting overwrite semantics use
    /// `replace_document` instead.
    #[error("document {document_id:?} is already indexed")]
    DuplicateDocumentId { document_id: String },

    /// The document id is not in the index (remove/replace only).
    #[error("document {document_id:?} not found in index")]
    DocumentNotFound { document_id: String },

    /// The index lock is held by another operation and the caller asked not
    /// to wait. Raised only by the non-blocking `try_*` entry points.
    #[error("index lock unavailable, another operation is in progress")]
    LockUnavailable,
}

/// Errors from read-side search operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    /// The query tokenized to nothing searchable. Distinct from "searched but
    /// found nothing", which is an empty `Ok` result.
    #[error("query produced no searchable terms")]
    EmptyQuery,

    /// Scoring produced NaN or infinity for a document. This indicates
    /// corrupted corpus statistics and is surfaced rather than zeroed.
    #[error("non-finite BM25 score {score} for document {document_id:?}")]
    NonFiniteScore { document_id: String, score: f32 },

    /// The index lock is held by another operation and the caller asked not
    /// to wait. Raised only by the non-blocking `try_*` entry points.
    #[error("index lock unavailable, another operation is in progress")]
    LockUnavailable,
}
