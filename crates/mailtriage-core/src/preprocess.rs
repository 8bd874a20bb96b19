//! # Text Preprocessing
//!
//! Normalises email text into the token stream that is echoed back to
//! clients as `preprocessed`:
//!
//! 1. lowercase,
//! 2. strip ASCII punctuation,
//! 3. strip ASCII digits,
//! 4. split on whitespace and drop English stopwords,
//! 5. Porter-stem each remaining token,
//! 6. join with single spaces.
//!
//! Classification always runs on the original text, not on this output.

use crate::porter;
use crate::stopwords::is_stopword;

/// Preprocess email text for display and downstream analysis.
pub fn preprocess(text: &str) -> String {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_ascii_punctuation() && !c.is_ascii_digit())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| !is_stopword(word))
        .map(porter::stem)
        .collect::<Vec<_>>()
        .join(" ")
}
