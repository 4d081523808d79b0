//! Document store and inverted index.
//!
//! One structure owns both the per-document bookkeeping (lengths, metadata)
//! and the term → posting-list map, because every mutation touches both and
//! the corpus aggregates must never drift apart.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **STATS_EXACT**: `average_document_length` is derived from
//!    `total_token_count / total_documents` at read time, so it cannot drift.
//! 2. **DOC_FREQ_CORRECT**: each term's `document_frequency` equals the
//!    number of distinct documents in its posting list.
//! 3. **TF_MATCHES_POSITIONS**: `term_frequency == positions.len()` for every
//!    posting.
//! 4. **NO_DUPLICATE_POSTINGS**: at most one posting per (term, document).
//! 5. **ALL_OR_NOTHING**: a failed insertion leaves the index untouched. The
//!    duplicate check runs before any mutation, and nothing after it can fail.

use crate::error::IndexError;
use crate::types::{CorpusStats, DocumentMeta, Posting, PostingList};
use std::collections::HashMap;

/// The combined document/corpus store and inverted index.
///
/// This type is not synchronized; `SearchEngine` wraps it in a mutex and is
/// the only concurrent entry point.
#[derive(Debug, Default)]
pub struct Index {
    /// term -> posting list with document frequency.
    postings: HashMap<String, PostingList>,
    /// document id -> token count.
    document_lengths: HashMap<String, u32>,
    /// document id -> opaque caller metadata, if any was supplied.
    metadata: HashMap<String, DocumentMeta>,
    /// Sum of all indexed documents' token counts.
    total_token_count: u64,
}

impl Index {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of indexed documents.
    pub fn len(&self) -> usize {
        self.document_lengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_lengths.is_empty()
    }

    /// Insert a document's term sequence under a fresh id.
    ///
    /// Rejects an already-indexed id with `DuplicateDocumentId` before
    /// mutating anything, so corpus statistics stay exactly as they were.
    pub fn add_document(
        &mut self,
        document_id: &str,
        terms: &[String],
        meta: Option<DocumentMeta>,
    ) -> Result<(), IndexError> {
        if self.document_lengths.contains_key(document_id) {
            return Err(IndexError::DuplicateDocumentId {
                document_id: document_id.to_string(),
            });
        }

        // Group positions per distinct term first; everything past this point
        // is infallible, which is what makes the insertion all-or-nothing.
        let mut term_positions: HashMap<&str, Vec<u32>> = HashMap::new();
        for (position, term) in terms.iter().enumerate() {
            term_positions
                .entry(term.as_str())
                .or_default()
                .push(position as u32);
        }

        for (term, positions) in term_positions {
            let entry = self.postings.entry(term.to_string()).or_default();
            entry.postings.push(Posting {
                document_id: document_id.to_string(),
                term_frequency: positions.len() as u32,
                positions,
            });
            // Once per document, regardless of repeat occurrences.
            entry.document_frequency += 1;
        }

        self.document_lengths
            .insert(document_id.to_string(), terms.len() as u32);
        if let Some(meta) = meta {
            self.metadata.insert(document_id.to_string(), meta);
        }
        self.total_token_count += terms.len() as u64;

        Ok(())
    }

    /// Remove a document and every trace of it from the posting lists.
    ///
    /// Walks the whole term map, which is O(vocabulary); removal is expected
    /// to be rare next to insertion and search. Returns the removed token
    /// count.
    pub fn remove_document(&mut self, document_id: &str) -> Result<u32, IndexError> {
        let length = self.document_lengths.remove(document_id).ok_or_else(|| {
            IndexError::DocumentNotFound {
                document_id: document_id.to_string(),
            }
        })?;

        self.postings.retain(|_, list| {
            if let Some(pos) = list
                .postings
                .iter()
                .position(|p| p.document_id == document_id)
            {
                list.postings.swap_remove(pos);
                list.document_frequency -= 1;
            }
            // Terms no longer backed by any document leave the map entirely.
            !list.postings.is_empty()
        });

        self.metadata.remove(document_id);
        self.total_token_count -= u64::from(length);
        Ok(length)
    }

    /// Token count of an indexed document.
    pub fn document_length(&self, document_id: &str) -> Option<u32> {
        self.document_lengths.get(document_id).copied()
    }

    /// Caller-supplied metadata for an indexed document, if any.
    pub fn metadata(&self, document_id: &str) -> Option<&DocumentMeta> {
        self.metadata.get(document_id)
    }

    /// Postings for a term. Unknown terms yield an empty slice, not an error.
    pub fn postings(&self, term: &str) -> &[Posting] {
        self.postings
            .get(term)
            .map_or(&[], |list| list.postings.as_slice())
    }

    /// Document frequency of a term (0 if never indexed).
    pub fn document_frequency(&self, term: &str) -> u32 {
        self.postings
            .get(term)
            .map_or(0, |list| list.document_frequency)
    }

    /// Snapshot of the corpus aggregates.
    pub fn stats(&self) -> CorpusStats {
        let total_documents = self.document_lengths.len() as u64;
        let average_document_length = if total_documents == 0 {
            0.0
        } else {
            self.total_token_count as f64 / total_documents as f64
        };
        CorpusStats {
            total_documents,
            total_token_count: self.total_token_count,
            average_document_length,
        }
    }

    /// Drop every document, posting, and aggregate.
    pub fn clear(&mut self) {
        self.postings.clear();
        self.document_lengths.clear();
        self.metadata.clear();
        self.total_token_count = 0;
    }

    /// Verify the structural invariants hold (test builds only).
    #[cfg(any(debug_assertions, test))]
    #[allow(dead_code)]
    pub fn check_well_formed(&self) -> bool {
        // STATS_EXACT
        let summed: u64 = self.document_lengths.values().map(|l| u64::from(*l)).sum();
        if summed != self.total_token_count {
            return false;
        }

        for list in self.postings.values() {
            if list.postings.is_empty() {
                return false;
            }

            // DOC_FREQ_CORRECT and NO_DUPLICATE_POSTINGS
            let mut ids: Vec<&str> = list
                .postings
                .iter()
                .map(|p| p.document_id.as_str())
                .collect();
            ids.sort_unstable();
            let before = ids.len();
            ids.dedup();
            if ids.len() != before || list.document_frequency as usize != ids.len() {
                return false;
            }

            for posting in &list.postings {
                // TF_MATCHES_POSITIONS
                if posting.term_frequency as usize != posting.positions.len() {
                    return false;
                }
                if !posting.positions.windows(2).all(|w| w[0] < w[1]) {
                    return false;
                }
                // Every posting points at a stored document.
                if !self.document_lengths.contains_key(&posting.document_id) {
                    return false;
                }
            }
        }

        true
    }
}
