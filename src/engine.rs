//! The engine: shared index behind one mutual-exclusion boundary.
//!
//! Indexing callers and query callers may run concurrently; there is exactly
//! one mutable resource (the combined store + inverted index) and both
//! `add_document` and `search` hold its lock for their full duration. Readers
//! deliberately serialize behind writers and each other — the copy-on-write
//! alternative buys read concurrency at a complexity cost this engine does
//! not need until read throughput is a measured bottleneck.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **NO_AWAIT_UNDER_LOCK**: tokenization runs before the lock is taken and
//!    scoring is pure CPU work under it. Nothing blocks or yields while the
//!    lock is held.
//! 2. **NO_POISONING**: `parking_lot::Mutex` does not poison on panic, so a
//!    panicking writer cannot leave the lock in an unusable state. (A failed
//!    insertion also never leaves a partial mutation behind; see `Index`.)
//! 3. **CANCEL_BEFORE_LOCK**: the `try_*` variants give callers a way to bail
//!    out before an operation starts executing; once scoring begins it runs
//!    to completion, bounded by corpus size.

use crate::error::{IndexError, QueryError};
use crate::index::Index;
use crate::scoring::Bm25Params;
use crate::search::rank;
use crate::tokenizer::tokenize;
use crate::types::{Bm25Match, CorpusStats, DocumentMeta};
use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, trace};

/// A cloneable handle to a BM25 index shared across threads.
///
/// Construction makes the engine ready; dropping the last handle releases all
/// state. Nothing is persisted.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine {
    index: Arc<Mutex<Index>>,
    params: Bm25Params,
}

impl SearchEngine {
    /// New engine with the conventional BM25 parameters.
    pub fn new() -> Self {
        Self::with_params(Bm25Params::default())
    }

    /// New engine with caller-tuned BM25 parameters.
    pub fn with_params(params: Bm25Params) -> Self {
        SearchEngine {
            index: Arc::new(Mutex::new(Index::new())),
            params,
        }
    }

    /// The parameters this engine scores with.
    pub fn params(&self) -> Bm25Params {
        self.params
    }

    /// Tokenize and index a document under a caller-minted unique id.
    ///
    /// Fails with `DuplicateDocumentId` if the id is already indexed, leaving
    /// the index exactly as it was.
    pub fn add_document(&self, document_id: &str, text: &str) -> Result<(), IndexError> {
        self.add_document_with_meta(document_id, text, None)
    }

    /// As `add_document`, attaching opaque positional metadata.
    pub fn add_document_with_meta(
        &self,
        document_id: &str,
        text: &str,
        meta: Option<DocumentMeta>,
    ) -> Result<(), IndexError> {
        // INVARIANT: NO_AWAIT_UNDER_LOCK (tokenize first, lock second)
        let terms = tokenize(text);
        trace!(document_id, term_count = terms.len(), "indexing document");

        let mut index = self.index.lock();
        index.add_document(document_id, &terms, meta)?;
        debug!(
            document_id,
            total_documents = index.len(),
            "document indexed"
        );
        Ok(())
    }

    /// Non-blocking `add_document`: fails with `LockUnavailable` instead of
    /// waiting for an in-flight operation.
    pub fn try_add_document(&self, document_id: &str, text: &str) -> Result<(), IndexError> {
        let terms = tokenize(text);
        let mut index = self.index.try_lock().ok_or(IndexError::LockUnavailable)?;
        index.add_document(document_id, &terms, None)
    }

    /// Atomically replace an indexed document with new text.
    ///
    /// The old postings' contribution to document frequencies and corpus
    /// totals is removed and the new text added under a single lock
    /// acquisition — replace is an explicit operation, never a side effect of
    /// `add_document`. Fails with `DocumentNotFound` if the id was never
    /// indexed, in which case nothing changes.
    pub fn replace_document(
        &self,
        document_id: &str,
        text: &str,
        meta: Option<DocumentMeta>,
    ) -> Result<(), IndexError> {
        let terms = tokenize(text);
        let mut index = self.index.lock();
        index.remove_document(document_id)?;
        // Cannot fail: the id was just removed, and insertion after the
        // duplicate check is infallible.
        index.add_document(document_id, &terms, meta)?;
        debug!(document_id, "document replaced");
        Ok(())
    }

    /// Remove a document from the index. Returns its token count.
    pub fn remove_document(&self, document_id: &str) -> Result<u32, IndexError> {
        let mut index = self.index.lock();
        let removed = index.remove_document(document_id)?;
        debug!(document_id, removed_tokens = removed, "document removed");
        Ok(removed)
    }

    /// Rank documents against a query, best first.
    ///
    /// Fails with `EmptyQuery` when the query tokenizes to nothing — "nothing
    /// meaningful to search for" is distinguishable from "searched and found
    /// nothing", which returns an empty `Ok`.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Bm25Match>, QueryError> {
        // INVARIANT: NO_AWAIT_UNDER_LOCK (tokenize first, lock second)
        let terms = tokenize(query);
        if terms.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let index = self.index.lock();
        let matches = rank(&index, &self.params, &terms, limit)?;
        debug!(
            query,
            candidates = matches.len(),
            limit,
            "search completed"
        );
        Ok(matches)
    }

    /// Non-blocking `search`: fails with `LockUnavailable` instead of waiting
    /// for an in-flight operation.
    pub fn try_search(&self, query: &str, limit: usize) -> Result<Vec<Bm25Match>, QueryError> {
        let terms = tokenize(query);
        if terms.is_empty() {
            return Err(QueryError::EmptyQuery);
        }

        let index = self.index.try_lock().ok_or(QueryError::LockUnavailable)?;
        rank(&index, &self.params, &terms, limit)
    }

    /// Snapshot of the corpus aggregates.
    pub fn stats(&self) -> CorpusStats {
        self.index.lock().stats()
    }

    /// Token count of an indexed document.
    pub fn document_length(&self, document_id: &str) -> Option<u32> {
        self.index.lock().document_length(document_id)
    }

    /// Caller-supplied metadata for an indexed document, if any.
    pub fn metadata(&self, document_id: &str) -> Option<DocumentMeta> {
        self.index.lock().metadata(document_id).cloned()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.index.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.lock().is_empty()
    }

    /// Drop every document and statistic. The engine stays usable.
    pub fn clear(&self) {
        self.index.lock().clear();
        debug!("index cleared");
    }
}
