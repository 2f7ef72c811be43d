// ============================================================
// Layer 4: Text Preprocessor
// ============================================================
// Turns a raw SMS message into the list of terms the TF-IDF
// vectorizer counts.
//
// Steps (applied in order):
//   1. Lowercase the whole message
//   2. Extract tokens of two or more word characters
//      (pattern \b\w\w+\b, Unicode aware)
//   3. Drop English stop words (optional)
//
// Single characters ("u", "r", "2") never become terms,
// which matches the usual bag-of-words setup for this dataset.
//
// Reference: Rust Book §8 (Strings in Rust)
//            regex crate documentation

use std::sync::LazyLock;

use regex::Regex;

use crate::data::stop_words::is_stop_word;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

#[derive(Debug, Clone, Copy)]
pub struct Preprocessor {
    remove_stop_words: bool,
}

impl Preprocessor {
    /// Preprocessor with English stop-word removal enabled
    pub fn new() -> Self {
        Self { remove_stop_words: true }
    }

    /// Preprocessor that keeps stop words
    pub fn keep_stop_words() -> Self {
        Self { remove_stop_words: false }
    }

    pub fn removes_stop_words(&self) -> bool {
        self.remove_stop_words
    }

    /// Split a message into lowercase terms.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let lowered = text.to_lowercase();
        TOKEN_PATTERN
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .filter(|t| !(self.remove_stop_words && is_stop_word(t)))
            .map(str::to_string)
            .collect()
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
