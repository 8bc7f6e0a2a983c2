//! Threshold-based sentence selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::SentenceScores;

/// A sentence kept in the summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SelectedSentence {
    /// Position in the original sentence sequence.
    pub index: usize,
    /// The sentence, exactly as it appeared in the input.
    pub text: String,
    /// The sentence's normalized score.
    pub score: f64,
}

/// Keep every scored sentence whose score is at least `threshold`, in
/// original order.
pub fn select_sentences(
    sentences: &[String],
    scores: &SentenceScores,
    threshold: f64,
) -> Vec<SelectedSentence> {
    sentences
        .iter()
        .enumerate()
        .filter_map(|(index, sentence)| {
            let score = scores.get(index)?;
            (score >= threshold).then(|| SelectedSentence {
                index,
                text: sentence.clone(),
                score,
            })
        })
        .collect()
}

/// Build the summary text: the selected sentences joined by single spaces.
pub fn generate_summary(sentences: &[String], scores: &SentenceScores, threshold: f64) -> String {
    join_sentences(&select_sentences(sentences, scores, threshold))
}

pub(crate) fn join_sentences(selected: &[SelectedSentence]) -> String {
    selected
        .iter()
        .map(|s| s.text.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}
