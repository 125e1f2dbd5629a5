//! Phrase ranking from community-rated dictionary definitions.
//!
//! For every contiguous word n-gram of a phrase, each definition of that
//! n-gram votes for the words it uses. A vote is the word's frequency
//! within the definition scaled by the definition's rating:
//!
//! `score(word) += frequency(word) * (thumbs_up - thumbs_down) / 100`
//!
//! Frequency is the word's count divided by the number of *distinct* words
//! in the definition, so it can exceed 1 for repetitive definitions.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::LazyLock;

use camino::Utf8Path;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RankError, RankResult};
use crate::stop_words::StopWords;

/// Characters stripped from definition words.
static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9]+").expect("valid regex"));

/// One community definition of a term.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Definition {
    /// Definition text.
    pub definition: String,
    /// Up-votes.
    #[serde(default)]
    pub thumbs_up: i64,
    /// Down-votes.
    #[serde(default)]
    pub thumbs_down: i64,
}

/// Anything that can look up the definitions of a term.
pub trait DefinitionSource {
    /// All definitions of `term`. Unknown terms have none.
    fn definitions(&self, term: &str) -> RankResult<Vec<Definition>>;
}

impl DefinitionSource for HashMap<String, Vec<Definition>> {
    fn definitions(&self, term: &str) -> RankResult<Vec<Definition>> {
        Ok(self.get(term).cloned().unwrap_or_default())
    }
}

/// Dictionary response body for a single term.
#[derive(Deserialize)]
struct DefineResponse {
    #[serde(default)]
    list: Vec<Definition>,
}

/// Definitions saved from the dictionary API.
///
/// The file is a JSON object mapping each term to the API's response for
/// it: `{"naw": {"list": [{"definition": "...", "thumbs_up": 10, "thumbs_down": 2}]}}`.
#[derive(Debug, Clone, Default)]
pub struct DefinitionFile {
    terms: HashMap<String, Vec<Definition>>,
}

impl DefinitionFile {
    /// Load a saved definitions file.
    #[tracing::instrument(skip_all, fields(path = %path))]
    pub fn load(path: &Utf8Path) -> RankResult<Self> {
        let text = std::fs::read_to_string(path.as_std_path()).map_err(|source| RankError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let responses: HashMap<String, DefineResponse> =
            serde_json::from_str(&text).map_err(|source| RankError::Malformed {
                path: path.to_path_buf(),
                source,
            })?;
        let terms: HashMap<String, Vec<Definition>> = responses
            .into_iter()
            .map(|(term, response)| (term, response.list))
            .collect();
        tracing::debug!(terms = terms.len(), "definitions loaded");
        Ok(Self { terms })
    }

    /// Number of terms in the file.
    pub fn len(&self) -> usize {
        self.terms.len()
    }

    /// Whether the file defines no terms.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

impl DefinitionSource for DefinitionFile {
    fn definitions(&self, term: &str) -> RankResult<Vec<Definition>> {
        self.terms.definitions(term)
    }
}

/// Every contiguous run of words in `phrase`.
///
/// `"hey you"` yields `{"hey", "hey you", "you"}`.
pub fn ngrams(phrase: &str) -> BTreeSet<String> {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let mut grams = BTreeSet::new();
    for start in 0..words.len() {
        for end in start + 1..=words.len() {
            grams.insert(words[start..end].join(" "));
        }
    }
    grams
}

/// Community rating of a definition, scaled down so it does not swamp
/// word frequencies.
pub fn definition_rating(thumbs_up: i64, thumbs_down: i64) -> f64 {
    (thumbs_up - thumbs_down) as f64 / 100.0
}

/// Lowercase, strip non-alphanumerics, then drop empties and stop words.
pub fn clean_words<'a, I>(words: I, stop_words: &StopWords) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    words
        .into_iter()
        .map(|word| NON_ALPHANUMERIC.replace_all(&word.to_lowercase(), "").into_owned())
        .filter(|word| !word.is_empty() && !stop_words.contains(word))
        .collect()
}

/// Per-word count divided by the number of distinct words.
pub fn word_frequency(words: &[String]) -> BTreeMap<&str, f64> {
    let mut counts: BTreeMap<&str, f64> = BTreeMap::new();
    for word in words {
        *counts.entry(word.as_str()).or_insert(0.0) += 1.0;
    }
    let distinct = counts.len() as f64;
    for count in counts.values_mut() {
        *count /= distinct;
    }
    counts
}

/// A word and its accumulated score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordScore {
    /// The word.
    pub word: String,
    /// Accumulated score across all definitions.
    pub score: f64,
}

/// Accumulated scores for every word seen in definitions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    scores: BTreeMap<String, f64>,
}

impl Ranking {
    /// Add `delta` to `word`'s score.
    pub fn add(&mut self, word: &str, delta: f64) {
        *self.scores.entry(word.to_string()).or_insert(0.0) += delta;
    }

    /// Score of `word`, if it was seen.
    pub fn score(&self, word: &str) -> Option<f64> {
        self.scores.get(word).copied()
    }

    /// Number of distinct words scored.
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Whether nothing was scored.
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Words ordered by ascending score, ties alphabetical.
    pub fn sorted(&self) -> Vec<WordScore> {
        let mut rows: Vec<WordScore> = self
            .scores
            .iter()
            .map(|(word, score)| WordScore {
                word: word.clone(),
                score: *score,
            })
            .collect();
        rows.sort_by(|a, b| a.score.total_cmp(&b.score));
        rows
    }
}

/// Rank the words that describe `phrase`.
#[tracing::instrument(skip(source, stop_words))]
pub fn rank<S>(phrase: &str, source: &S, stop_words: &StopWords) -> RankResult<Ranking>
where
    S: DefinitionSource + ?Sized,
{
    let grams = ngrams(phrase);
    if grams.is_empty() {
        return Err(RankError::EmptyPhrase);
    }

    let mut ranking = Ranking::default();
    for gram in &grams {
        let definitions = source.definitions(gram)?;
        tracing::debug!(ngram = %gram, definitions = definitions.len(), "scoring n-gram");

        for definition in &definitions {
            let rating = definition_rating(definition.thumbs_up, definition.thumbs_down);
            let words = clean_words(definition.definition.split_whitespace(), stop_words);
            for (word, frequency) in word_frequency(&words) {
                ranking.add(word, frequency * rating);
            }
        }
    }

    Ok(ranking)
}
