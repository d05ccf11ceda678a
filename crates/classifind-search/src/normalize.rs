//! Text folding for query matching.
//!
//! Both user queries and listing text go through [`normalize`] so that
//! `"Imóveis"`, `"IMOVEIS"` and `"imoveis!"` compare equal.

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases, strips combining diacritics, and reduces everything outside
/// `[a-z0-9]` to single spaces. The result has no leading, trailing, or
/// repeated spaces.
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;

    for c in text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
    {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            pending_space = false;
            out.push(c);
        } else {
            pending_space = true;
        }
    }

    out
}

/// Normalizes `text` and splits it into non-empty tokens.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    normalize(text)
        .split(' ')
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}
