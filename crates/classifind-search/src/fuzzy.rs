//! Approximate token matching between a query and catalog listings.

use classifind_core::ProductRecord;

use crate::normalize::tokenize;

/// Query tokens up to this many characters tolerate one edit; longer ones two.
const SHORT_TOKEN_LEN: usize = 4;

/// An abbreviation must leave out at least this many characters of the word
/// it stands for (`apto` → `apartamento`), so that near-identical words like
/// `casa`/`camisa` are not treated as abbreviations of each other.
const MIN_ABBREVIATED_CHARS: usize = 3;

/// Shortest query token considered as an abbreviation. Two-letter tokens
/// (`tv`, `pc`) are subsequences of too many words.
const MIN_ABBREVIATION_LEN: usize = 3;

/// Trailing characters an abbreviation shares with its word (`apto` and
/// `apartamento` both end in `to`).
const SHARED_SUFFIX_LEN: usize = 2;

/// Levenshtein edit distance between `a` and `b`, counted in `char`s.
#[must_use]
pub fn distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    // dp[i][j]: distance between the first i chars of b and the first j chars of a.
    let mut dp = vec![vec![0usize; a.len() + 1]; b.len() + 1];
    for (i, row) in dp.iter_mut().enumerate() {
        row[0] = i;
    }
    for (j, cell) in dp[0].iter_mut().enumerate() {
        *cell = j;
    }

    for i in 1..=b.len() {
        for j in 1..=a.len() {
            let substitution = usize::from(a[j - 1] != b[i - 1]);
            dp[i][j] = (dp[i - 1][j] + 1)
                .min(dp[i][j - 1] + 1)
                .min(dp[i - 1][j - 1] + substitution);
        }
    }

    dp[b.len()][a.len()]
}

/// Edit budget for a query token.
fn tolerance(query_token: &str) -> usize {
    if query_token.chars().count() <= SHORT_TOKEN_LEN {
        1
    } else {
        2
    }
}

/// Whether a listing token satisfies a query token: substring containment in
/// either direction, or an edit distance within the query token's tolerance.
#[must_use]
pub fn token_matches(candidate: &str, query_token: &str) -> bool {
    if candidate.is_empty() || query_token.is_empty() {
        return false;
    }
    if candidate.contains(query_token) || query_token.contains(candidate) {
        return true;
    }
    distance(candidate, query_token) <= tolerance(query_token)
}

/// Whether `short` reads as an abbreviation of `long`: at least three
/// characters, same first character and same last two, its characters appear
/// in order inside `long`, and enough of `long` was left out.
#[must_use]
pub fn abbreviates(short: &str, long: &str) -> bool {
    let short_len = short.chars().count();
    let long_len = long.chars().count();
    if short_len < MIN_ABBREVIATION_LEN || long_len < short_len + MIN_ABBREVIATED_CHARS {
        return false;
    }
    if short.chars().next() != long.chars().next() {
        return false;
    }
    let suffix: String = short.chars().skip(short_len - SHARED_SUFFIX_LEN).collect();
    if !long.ends_with(&suffix) {
        return false;
    }

    let mut remaining = long.chars();
    short.chars().all(|c| remaining.any(|l| l == c))
}

/// Whether every query token is satisfied by at least one token of the
/// record's searchable text.
///
/// `query_tokens` must already be normalized (see [`tokenize`]). An empty
/// token list never matches, nor does a record without any text.
#[must_use]
pub fn matches_query(record: &ProductRecord, query_tokens: &[String]) -> bool {
    if query_tokens.is_empty() {
        return false;
    }
    let record_tokens = tokenize(&record.searchable_text());
    if record_tokens.is_empty() {
        return false;
    }

    query_tokens.iter().all(|query| {
        record_tokens
            .iter()
            .any(|candidate| token_matches(candidate, query) || abbreviates(query, candidate))
    })
}

/// Clones the records that satisfy [`matches_query`], keeping their order.
#[must_use]
pub fn filter_matching(records: &[ProductRecord], query_tokens: &[String]) -> Vec<ProductRecord> {
    records
        .iter()
        .filter(|r| matches_query(r, query_tokens))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "fuzzy_test.rs"]
mod tests;
