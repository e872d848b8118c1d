//! Canonical normalization for lookup keys.
//!
//! Queries and headwords go through the same function so that visually
//! identical strings with different code point sequences compare equal,
//! e.g. a precomposed `ā` (U+0101) and `a` followed by U+0304.

use unicode_normalization::UnicodeNormalization;

/// Trim surrounding whitespace and apply NFC composition.
pub fn normalize(input: &str) -> String {
    input.trim().nfc().collect()
}

/// Like [`normalize`], with an absent input normalizing to the empty string.
pub fn normalize_opt(input: Option<&str>) -> String {
    input.map(normalize).unwrap_or_default()
}
