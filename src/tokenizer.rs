//! Term extraction shared by the indexing and query paths.
//!
//! # INVARIANTS (DO NOT VIOLATE)
//!
//! 1. **SINGLE_TOKENIZER**: `add_document` and `search` call this exact
//!    function. Two diverging copies silently break retrieval: a term indexed
//!    one way and queried another never matches.
//! 2. **TERM_SHAPE**: every returned term is lowercase ASCII alphanumerics
//!    or `_`, has length > 1, and is not composed solely of digits.
//! 3. **PURE**: no hidden state; identical input yields identical output.

/// Tokenize raw text into normalized terms.
///
/// Splits on whitespace, keeps ASCII alphanumerics and `_`, lowercases what
/// remains, and drops tokens that end up empty, single-character, or
/// all-digit. The position of a term is its ordinal in the returned sequence.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter_map(normalize_token)
        .collect()
}

/// Normalize a single whitespace-delimited token, or reject it.
fn normalize_token(raw: &str) -> Option<String> {
    let term: String = raw
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();

    if term.len() <= 1 {
        return None;
    }
    if term.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(term)
}
