//! Keyword extraction: normalize free text into a canonical token set

use crate::scoring::stopwords::StopwordList;
use regex::Regex;
use std::collections::BTreeSet;

/// Normalizes text into a deduplicated, sorted set of significant tokens.
///
/// Pure and total: any input string, including empty or all-punctuation text,
/// yields a (possibly empty) set and never an error.
pub struct KeywordExtractor {
    stopwords: StopwordList,
    strip_pattern: Regex,
}

impl Default for KeywordExtractor {
    fn default() -> Self {
        Self::new(StopwordList::default())
    }
}

impl KeywordExtractor {
    pub fn new(stopwords: StopwordList) -> Self {
        let strip_pattern = Regex::new(r"[^a-z0-9\s]").expect("Invalid strip regex");
        Self {
            stopwords,
            strip_pattern,
        }
    }

    /// Extract the significant tokens from `text`.
    ///
    /// Lowercases, deletes every character that is not an ASCII lowercase
    /// letter, digit, or whitespace, splits on whitespace, then drops tokens
    /// of length <= 1 and stop-words. The BTreeSet makes iteration order
    /// alphabetical, so anything rendered from it is deterministic.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let lowered = text.to_lowercase();
        let stripped = self.strip_pattern.replace_all(&lowered, "");

        stripped
            .split_whitespace()
            .filter(|w| w.len() > 1 && !self.stopwords.contains(w))
            .map(|w| w.to_string())
            .collect()
    }

    pub fn stopwords(&self) -> &StopwordList {
        &self.stopwords
    }
}
