//! Stop words excluded from phrase rankings.

use std::collections::HashSet;

use camino::Utf8Path;

use crate::error::{RankError, RankResult};

/// Built-in English stop words.
pub const BUILTIN: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "am", "an", "and", "any", "are",
    "as", "at", "be", "because", "been", "before", "being", "below", "between", "both", "but",
    "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few", "for",
    "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers", "herself",
    "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its", "itself", "me",
    "more", "most", "my", "myself", "of", "off", "on", "once", "only", "or", "other", "our",
    "ours", "ourselves", "out", "over", "own", "same", "she", "should", "so", "some", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these",
    "they", "this", "those", "through", "to", "too", "under", "until", "up", "very", "was", "we",
    "were", "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
    "would", "you", "your", "yours", "yourself", "yourselves",
];

/// A set of lowercase words to drop before scoring.
///
/// Built once at startup and handed to [`crate::rank::rank`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// An empty set: nothing is filtered.
    pub fn none() -> Self {
        Self::default()
    }

    /// The built-in English list.
    pub fn builtin() -> Self {
        BUILTIN.iter().copied().collect()
    }

    /// Parse a newline-separated list. Blank lines are ignored.
    pub fn parse(text: &str) -> Self {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }

    /// Read a newline-separated list from disk.
    pub fn from_file(path: &Utf8Path) -> RankResult<Self> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|source| RankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let words = Self::parse(&text);
        tracing::debug!(path = %path, count = words.len(), "stop words loaded");
        Ok(words)
    }

    /// Whether `word` (already lowercase) is a stop word.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of stop words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            words: iter
                .into_iter()
                .map(|w| w.as_ref().to_lowercase())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use camino::Utf8PathBuf;
    use tempfile::TempDir;

    #[test]
    fn builtin_has_common_words() {
        let words = StopWords::builtin();
        assert!(words.contains("the"));
        assert!(words.contains("you"));
        assert!(!words.contains("nope"));
    }

    #[test]
    fn parse_skips_blank_lines_and_lowercases() {
        let words = StopWords::parse("The\n\n  and \nOR\n");
        assert_eq!(words.len(), 3);
        assert!(words.contains("the"));
        assert!(words.contains("and"));
        assert!(words.contains("or"));
    }

    #[test]
    fn reads_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stop_words.txt");
        std::fs::write(&path, "a\nan\nthe\n").unwrap();
        let path = Utf8PathBuf::try_from(path).unwrap();

        let words = StopWords::from_file(&path).unwrap();
        assert_eq!(words.len(), 3);
    }

    #[test]
    fn missing_file_errors() {
        let result = StopWords::from_file(Utf8Path::new("/nonexistent/stop_words.txt"));
        assert!(matches!(result, Err(RankError::Read { .. })));
    }

    #[test]
    fn none_is_empty() {
        assert!(StopWords::none().is_empty());
    }
}
