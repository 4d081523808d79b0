//! BM25 relevance scoring.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **IDF_NON_NEGATIVE**: the IDF formula carries a `+ 1` inside the
//!    logarithm. The unsmoothed variant goes negative once a term appears in
//!    more than half the corpus and silently *subtracts* relevance; the
//!    smoothing is a deliberate design decision, not an accident.
//! 2. **FINITE_OR_ERROR**: a non-finite score is reported as
//!    `NonFiniteScore`, never coerced to zero or dropped. NaN here means the
//!    corpus statistics are corrupted, and callers need to know.
//! 3. **DISTINCT_TERMS**: a query term contributes once per document no
//!    matter how often it repeats in the query; only the document-side term
//!    frequency multiplies its weight.

use crate::error::QueryError;
use crate::index::Index;
use crate::types::Bm25Match;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Tunable BM25 parameters.
///
/// - `k1` controls term-frequency saturation; higher values let repeated
///   occurrences keep adding weight for longer.
/// - `b` controls document-length normalization; 0.0 disables it, 1.0
///   normalizes fully against the corpus average.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bm25Params {
    pub k1: f32,
    pub b: f32,
}

impl Default for Bm25Params {
    /// The conventional defaults (k1=1.2, b=0.75), a good fit for most
    /// corpora.
    fn default() -> Self {
        Bm25Params { k1: 1.2, b: 0.75 }
    }
}

/// Smoothed inverse document frequency of a term.
///
/// `ln((N - df + 0.5) / (df + 0.5) + 1)`. Monotonically decreasing in `df`
/// and non-negative for every `df <= N` (INVARIANT: IDF_NON_NEGATIVE).
pub fn idf(index: &Index, term: &str) -> f64 {
    let n = index.stats().total_documents as f64;
    let df = f64::from(index.document_frequency(term));
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// BM25 score of one document against a set of distinct query terms.
///
/// Returns the total score plus the per-term breakdown. Terms with zero
/// frequency in the document contribute nothing and are omitted from the
/// breakdown.
pub fn score_document(
    index: &Index,
    params: &Bm25Params,
    query_terms: &[String],
    document_id: &str,
) -> Result<(f32, HashMap<String, f32>), QueryError> {
    let doc_len = f64::from(index.document_length(document_id).unwrap_or(0));
    let mut avg_len = index.stats().average_document_length;
    if avg_len <= 0.0 {
        // Degenerate corpus: substitute the document's own length so the
        // normalization ratio stays defined.
        avg_len = doc_len;
    }
    let length_ratio = if avg_len > 0.0 { doc_len / avg_len } else { 0.0 };

    let k1 = f64::from(params.k1);
    let b = f64::from(params.b);
    let norm = 1.0 - b + b * length_ratio;

    let mut total = 0.0f64;
    let mut term_scores = HashMap::new();

    for term in query_terms {
        let tf = index
            .postings(term)
            .iter()
            .find(|p| p.document_id == document_id)
            .map_or(0.0, |p| f64::from(p.term_frequency));
        if tf == 0.0 {
            continue;
        }

        let term_score = idf(index, term) * (tf * (k1 + 1.0)) / (tf + k1 * norm);
        if !term_score.is_finite() {
            return Err(QueryError::NonFiniteScore {
                document_id: document_id.to_string(),
                score: term_score as f32,
            });
        }
        total += term_score;
        term_scores.insert(term.clone(), term_score as f32);
    }

    let score = total as f32;
    if !score.is_finite() {
        return Err(QueryError::NonFiniteScore {
            document_id: document_id.to_string(),
            score,
        });
    }
    Ok((score, term_scores))
}

/// Convenience wrapper producing a ready `Bm25Match`.
pub(crate) fn score_candidate(
    index: &Index,
    params: &Bm25Params,
    query_terms: &[String],
    document_id: &str,
) -> Result<Bm25Match, QueryError> {
    let (score, term_scores) = score_document(index, params, query_terms, document_id)?;
    Ok(Bm25Match {
        document_id: document_id.to_string(),
        score,
        term_scores,
    })
}
