//! Stop-word list used to filter non-discriminating tokens

use std::collections::HashSet;

/// Immutable stop-word set. Built once at construction and injected into the
/// keyword extractor; never mutated afterwards, so it is safe to share across
/// concurrent scoring calls.
#[derive(Debug, Clone)]
pub struct StopwordList {
    words: HashSet<String>,
}

impl Default for StopwordList {
    fn default() -> Self {
        Self {
            words: BUILTIN_STOPWORDS.iter().map(|&s| s.to_string()).collect(),
        }
    }
}

impl StopwordList {
    /// Build a list from an explicit word set, replacing the built-in one.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| w.into().to_lowercase()).collect(),
        }
    }

    /// Extend the list with deployment-specific terms, returning a new list.
    pub fn with_extra<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words
            .extend(extra.into_iter().map(|w| w.into().to_lowercase()));
        self
    }

    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Common English words plus generic job-posting boilerplate. Terms like
/// "experience", "team", or "skills" appear in nearly every posting and carry
/// no discriminating signal.
const BUILTIN_STOPWORDS: &[&str] = &[
    "am", "an", "and", "are", "as", "be",
    "about", "above", "across", "after", "against", "along", "among", "apart",
    "around", "at", "because", "before", "behind", "being", "below", "beneath",
    "beside", "between", "beyond", "both", "but", "by", "can", "cannot",
    "come", "could", "did", "do", "does", "doing", "down", "during", "each",
    "else", "even", "ever", "every", "for", "from", "get", "got", "had",
    "has", "have", "he", "her", "here", "hers", "herself", "him", "himself",
    "his", "how", "if", "in", "into", "is", "it", "its", "itself", "just",
    "kept", "know", "less", "let", "like", "likely", "make", "many", "may",
    "me", "might", "more", "most", "much", "must", "my", "myself", "near",
    "need", "no", "nor", "not", "now", "of", "off", "often", "on", "once",
    "one", "only", "or", "other", "our", "ours", "ourselves", "out", "over",
    "own", "said", "same", "say", "see", "shall", "she", "should", "since",
    "so", "some", "such", "than", "that", "the", "their", "them", "then",
    "there", "these", "they", "this", "those", "through", "to", "too",
    "towards", "under", "until", "up", "upon", "us", "use", "used", "uses",
    "very", "want", "was", "way", "we", "well", "were", "what", "when",
    "where", "which", "while", "who", "whom", "whose", "why", "will", "with",
    "within", "without", "would", "yes", "yet", "you", "your", "yours",
    "yourself",
    // job-posting boilerplate
    "job", "description", "requirements", "role", "overview",
    "responsibilities", "qualifications", "looking", "seeking", "ability",
    "experience", "year", "years", "work", "team", "skills", "using",
    "strong", "proficient", "knowledge", "creating", "working", "candidate",
    "ideal", "opportunity",
];
