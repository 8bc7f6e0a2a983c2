//! Sentence scoring against a frequency table.

use std::collections::{BTreeMap, HashSet};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::FrequencyTable;
use crate::linguistics::Linguistics;

/// How a frequency-table entry is matched against a sentence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum MatchMode {
    /// The sentence is tokenized and stemmed; an entry matches when it is one
    /// of the sentence's stems.
    #[default]
    Token,
    /// An entry matches when it occurs anywhere in the lowercased sentence,
    /// including inside unrelated longer words ("cat" in "category").
    ///
    /// Scores in this mode are not independent of stop words: inserting
    /// "this" into a sentence makes the entry "hi" match it.
    Substring,
}

impl MatchMode {
    /// Returns the mode as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Token => "token",
            Self::Substring => "substring",
        }
    }
}

impl std::fmt::Display for MatchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sentence index -> normalized score.
///
/// Sentences that matched no table entry have no score at all, which is
/// different from a score of zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct SentenceScores(BTreeMap<usize, f64>);

impl SentenceScores {
    /// Score of the sentence at `index`, if it matched anything.
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(&index).copied()
    }

    /// Number of scored sentences.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no sentence was scored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(index, score)` pairs in sentence order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(&index, &score)| (index, score))
    }

    /// Iterate scores in sentence order.
    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.values().copied()
    }
}

impl FromIterator<(usize, f64)> for SentenceScores {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Score every sentence against `table`.
///
/// A sentence's score is the sum of the counts of the table entries it
/// matches, divided by how many entries it matches. Each entry counts at most
/// once per sentence however often it appears there.
#[tracing::instrument(skip_all, fields(sentences = sentences.len(), table = table.len(), %mode))]
pub fn score_sentences(
    sentences: &[String],
    table: &FrequencyTable,
    linguistics: &Linguistics,
    mode: MatchMode,
) -> SentenceScores {
    let scores: SentenceScores = sentences
        .iter()
        .enumerate()
        .filter_map(|(index, sentence)| {
            let matcher = Matcher::new(sentence, linguistics, mode);
            let (total, matched) = table
                .iter()
                .filter(|(stem, _)| matcher.matches(stem))
                .fold((0usize, 0usize), |(total, matched), (_, count)| {
                    (total + count, matched + 1)
                });
            (matched > 0).then(|| (index, total as f64 / matched as f64))
        })
        .collect();

    tracing::debug!(scored = scores.len(), "scored sentences");
    scores
}

enum Matcher {
    Stems(HashSet<String>),
    Lowercase(String),
}

impl Matcher {
    fn new(sentence: &str, linguistics: &Linguistics, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Token => Self::Stems(
                linguistics
                    .words(sentence)
                    .iter()
                    .map(|word| linguistics.stem(word))
                    .collect(),
            ),
            MatchMode::Substring => Self::Lowercase(sentence.to_lowercase()),
        }
    }

    fn matches(&self, stem: &str) -> bool {
        match self {
            Self::Stems(stems) => stems.contains(stem),
            Self::Lowercase(sentence) => sentence.contains(stem),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarize::build_frequency_table;

    const FIXTURE: &str = "The cat sat. The cat sat on the hot mat. Cats sit.";

    fn sentences(text: &str) -> Vec<String> {
        Linguistics::english().sentences(text)
    }

    fn score(text: &str, mode: MatchMode) -> SentenceScores {
        let ling = Linguistics::english();
        let table = build_frequency_table(text, &ling);
        score_sentences(&sentences(text), &table, &ling, mode)
    }

    #[test]
    fn fixture_scores() {
        let scores = score(FIXTURE, MatchMode::Token);
        // cat:3 + sat:2 over 2 matches; cat+sat+hot+mat over 4; cat+sit over 2
        assert_eq!(scores.iter().collect::<Vec<_>>(), vec![(0, 2.5), (1, 1.75), (2, 2.0)]);
    }

    #[test]
    fn substring_mode_agrees_on_fixture() {
        assert_eq!(
            score(FIXTURE, MatchMode::Substring),
            score(FIXTURE, MatchMode::Token)
        );
    }

    #[test]
    fn substring_mode_matches_inside_longer_words() {
        let text = "The cat slept. A category was chosen.";
        let ling = Linguistics::english();
        let table = build_frequency_table("cat cat", &ling);
        let sentences = sentences(text);

        let substring = score_sentences(&sentences, &table, &ling, MatchMode::Substring);
        assert_eq!(substring.get(1), Some(2.0), "cat matches inside category");

        let token = score_sentences(&sentences, &table, &ling, MatchMode::Token);
        assert_eq!(token.get(0), Some(2.0));
        assert_eq!(token.get(1), None);
    }

    #[test]
    fn stop_words_only_affect_substring_scores() {
        let ling = Linguistics::english();
        let plain = "Hi friend. Hello friend.";
        let padded = "Hi friend. Hello this friend.";
        let table = build_frequency_table(plain, &ling);
        assert_eq!(table, build_frequency_table(padded, &ling));

        let token =
            |text: &str| score_sentences(&sentences(text), &table, &ling, MatchMode::Token);
        assert_eq!(token(plain), token(padded));

        let substring =
            |text: &str| score_sentences(&sentences(text), &table, &ling, MatchMode::Substring);
        assert_eq!(substring(plain).get(0), substring(padded).get(0));
        assert_ne!(substring(plain).get(1), substring(padded).get(1));
    }

    #[test]
    fn unmatched_sentences_are_absent() {
        let ling = Linguistics::english();
        let table = build_frequency_table("apple", &ling);
        let sentences = vec!["Nothing relevant here.".to_string(), "An apple.".to_string()];
        let scores = score_sentences(&sentences, &table, &ling, MatchMode::Token);
        assert_eq!(scores.len(), 1);
        assert_eq!(scores.get(0), None);
        assert_eq!(scores.get(1), Some(1.0));
    }

    #[test]
    fn shared_prefix_sentences_scored_independently() {
        // Both sentences start with the same ten characters.
        let text = "Rust compilers are fast. Rust compilers reject unsafe aliasing.";
        let scores = score(text, MatchMode::Token);
        let list = sentences(text);
        assert_eq!(list[0][..10], list[1][..10]);

        // rust:2 compil:2 fast:1 -> 5/3
        assert_eq!(scores.get(0), Some(5.0 / 3.0));
        // rust:2 compil:2 reject:1 unsaf:1 alias:1 -> 7/5
        assert_eq!(scores.get(1), Some(7.0 / 5.0));
    }

    #[test]
    fn repeated_word_counts_once_per_sentence() {
        let ling = Linguistics::english();
        let table = build_frequency_table("dog dog dog", &ling);
        let sentences = vec!["Dog eats dog world.".to_string()];
        let scores = score_sentences(&sentences, &table, &ling, MatchMode::Token);
        assert_eq!(scores.get(0), Some(3.0));
    }
}
