//! Candidate selection and ranking.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **UNION_SEMANTICS**: candidates are the union (OR) of the posting-list
//!    document ids across query terms. BM25 already downweights partial
//!    matches; intersecting (AND) would reject documents that are highly
//!    relevant via a subset of terms.
//! 2. **NO_SCORE_FILTERING**: candidates are never discarded for a low or
//!    zero score, only for a non-finite one. A near-zero IDF on a ubiquitous
//!    term is a valid low-information score, not a non-match.
//! 3. **DETERMINISTIC_ORDER**: ties on score break by `document_id`
//!    ascending, so equal-scoring documents rank identically run to run.

use crate::error::QueryError;
use crate::index::Index;
use crate::scoring::{score_candidate, Bm25Params};
use crate::types::Bm25Match;
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::BTreeSet;

/// Rank every document matching at least one query term.
///
/// `query_terms` must already be tokenized; duplicates are collapsed here so
/// a repeated query term cannot multiply-count. The result is sorted by score
/// descending, then `document_id` ascending, and truncated to `limit`.
pub fn rank(
    index: &Index,
    params: &Bm25Params,
    query_terms: &[String],
    limit: usize,
) -> Result<Vec<Bm25Match>, QueryError> {
    if query_terms.is_empty() {
        return Err(QueryError::EmptyQuery);
    }

    // Distinct terms, deterministically ordered.
    let distinct: Vec<String> = query_terms
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    // INVARIANT: UNION_SEMANTICS
    let candidates: Vec<String> = distinct
        .iter()
        .flat_map(|term| index.postings(term).iter().map(|p| p.document_id.clone()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let mut matches = score_candidates(index, params, &distinct, &candidates)?;

    // INVARIANT: DETERMINISTIC_ORDER
    // Scores are verified finite by the scorer, so partial_cmp cannot
    // actually fail here.
    matches.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.document_id.cmp(&b.document_id))
    });
    matches.truncate(limit);
    Ok(matches)
}

/// Score all candidates in parallel. Ordering is re-established by the sort
/// in `rank`, so results are identical to the sequential version.
#[cfg(feature = "parallel")]
fn score_candidates(
    index: &Index,
    params: &Bm25Params,
    terms: &[String],
    candidates: &[String],
) -> Result<Vec<Bm25Match>, QueryError> {
    candidates
        .par_iter()
        .map(|document_id| score_candidate(index, params, terms, document_id))
        .collect()
}

#[cfg(not(feature = "parallel"))]
fn score_candidates(
    index: &Index,
    params: &Bm25Params,
    terms: &[String],
    candidates: &[String],
) -> Result<Vec<Bm25Match>, QueryError> {
    candidates
        .iter()
        .map(|document_id| score_candidate(index, params, terms, document_id))
        .collect()
}
