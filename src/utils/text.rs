// src/utils/text.rs

//! Canonical comparison form for news text.
//!
//! Matching across titles, summaries, synonyms and search terms is done on
//! normalized text so that case, accents and punctuation never matter:
//! "Jerusalém!" and "JERUSALEM" compare equal.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;
use unicode_segmentation::UnicodeSegmentation;

/// Normalize text for case-, diacritic- and punctuation-insensitive matching.
///
/// The result is lowercase, contains only Unicode letters, digits and single
/// spaces, and has no leading or trailing whitespace. Applying it twice gives
/// the same result as applying it once.
pub fn normalize(text: &str) -> String {
    let stripped: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter_map(|c| {
            if c.is_alphanumeric() {
                Some(c)
            } else if c.is_whitespace() {
                Some(' ')
            } else {
                None
            }
        })
        .collect();

    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Split text into normalized search tokens.
pub fn tokens(text: &str) -> Vec<String> {
    normalize(text)
        .unicode_words()
        .map(String::from)
        .collect()
}
