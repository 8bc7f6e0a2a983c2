//! Extractive summarization by word-frequency sentence scoring.
//!
//! The pipeline has four stages, each a plain function:
//!
//! 1. [`build_frequency_table`] counts stemmed content words in the text.
//! 2. [`score_sentences`] gives each sentence the mean count of the table
//!    entries it contains.
//! 3. [`average`] takes the mean of all sentence scores.
//! 4. [`generate_summary`] keeps the sentences scoring at least
//!    `scale_factor × mean`, in their original order.
//!
//! [`Summarizer`] runs the stages end to end and turns the two per-request
//! failure conditions (no sentences, nothing scored) into an empty
//! [`Summary`] instead of an error.

mod frequency;
mod scoring;
mod selection;
mod threshold;

pub use frequency::{FrequencyTable, build_frequency_table};
pub use scoring::{MatchMode, SentenceScores, score_sentences};
pub use selection::{SelectedSentence, generate_summary, select_sentences};
pub use threshold::average;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::{SummaryError, SummaryResult};
use crate::linguistics::{Linguistics, StopWords};

/// Default multiplier applied to the mean score to get the threshold.
pub const DEFAULT_SCALE_FACTOR: f64 = 1.2;

/// How a summarization request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Sentences were scored and the threshold applied.
    Summarized,
    /// The input held no sentences.
    EmptyInput,
    /// No sentence contained a content word.
    NoMatches,
}

impl Outcome {
    /// Returns the outcome as a snake_case string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Summarized => "summarized",
            Self::EmptyInput => "empty_input",
            Self::NoMatches => "no_matches",
        }
    }
}

/// Tunable parameters of one summarization run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    scale_factor: f64,
    match_mode: MatchMode,
}

impl SummaryOptions {
    /// Options with a validated scale factor.
    ///
    /// Any positive, finite factor is accepted. Values above 1.0 keep only
    /// above-average sentences; values below 1.0 admit below-average ones.
    pub fn new(scale_factor: f64, match_mode: MatchMode) -> SummaryResult<Self> {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            return Err(SummaryError::InvalidScaleFactor(scale_factor));
        }
        Ok(Self {
            scale_factor,
            match_mode,
        })
    }

    /// The threshold multiplier.
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// The matching strategy.
    pub const fn match_mode(&self) -> MatchMode {
        self.match_mode
    }

    /// Copy with a different scale factor.
    pub fn with_scale_factor(self, scale_factor: f64) -> SummaryResult<Self> {
        Self::new(scale_factor, self.match_mode)
    }

    /// Copy with a different match mode.
    pub const fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            scale_factor: DEFAULT_SCALE_FACTOR,
            match_mode: MatchMode::default(),
        }
    }
}

/// Result of summarizing one text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Summary {
    /// Selected sentences joined by single spaces; empty if none qualified.
    pub text: String,
    /// The selected sentences with their positions and scores.
    pub sentences: Vec<SelectedSentence>,
    /// Number of sentences found in the input.
    pub total_sentences: usize,
    /// Number of sentences that matched at least one content word.
    pub scored_sentences: usize,
    /// Mean sentence score (absent when nothing was scored).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean_score: Option<f64>,
    /// Minimum score for selection (absent when nothing was scored).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    /// Multiplier applied to the mean score.
    pub scale_factor: f64,
    /// Matching strategy used.
    pub match_mode: MatchMode,
    /// How the run ended.
    pub outcome: Outcome,
}

impl Summary {
    fn empty(outcome: Outcome, total_sentences: usize, options: SummaryOptions) -> Self {
        Self {
            text: String::new(),
            sentences: Vec::new(),
            total_sentences,
            scored_sentences: 0,
            mean_score: None,
            threshold: None,
            scale_factor: options.scale_factor,
            match_mode: options.match_mode,
            outcome,
        }
    }

    /// Whether no sentence was selected.
    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

/// Runs the summarization pipeline with a fixed set of collaborators.
///
/// Holds only read-only state, so a single instance can be shared (for
/// example behind an `Arc`) by concurrent requests.
#[derive(Debug, Default)]
pub struct Summarizer {
    linguistics: Linguistics,
    options: SummaryOptions,
}

impl Summarizer {
    /// Create a summarizer with default options.
    pub fn new(linguistics: Linguistics) -> Self {
        Self {
            linguistics,
            options: SummaryOptions::default(),
        }
    }

    /// Build collaborators and options from configuration.
    ///
    /// Fails if a configured stop-word file cannot be read or the configured
    /// scale factor is invalid.
    #[tracing::instrument(skip_all)]
    pub fn from_config(config: &Config) -> SummaryResult<Self> {
        let mut stop_words = StopWords::english();
        if let Some(extra) = &config.extra_stop_words {
            stop_words.extend(extra.iter().map(|w| w.to_lowercase()));
        }
        if let Some(path) = &config.stop_words_file {
            stop_words.extend_from_file(path)?;
        }

        let options = SummaryOptions::new(
            config.scale_factor.unwrap_or(DEFAULT_SCALE_FACTOR),
            config.match_mode.unwrap_or_default(),
        )?;
        tracing::debug!(
            stop_words = stop_words.len(),
            scale_factor = options.scale_factor,
            match_mode = %options.match_mode,
            "summarizer configured"
        );

        Ok(Self {
            linguistics: Linguistics::english().with_stop_words(stop_words),
            options,
        })
    }

    /// Set the default scale factor.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> SummaryResult<Self> {
        self.options = self.options.with_scale_factor(scale_factor)?;
        Ok(self)
    }

    /// Set the default match mode.
    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.options = self.options.with_match_mode(match_mode);
        self
    }

    /// The default options used by [`summarize`](Self::summarize).
    pub const fn options(&self) -> SummaryOptions {
        self.options
    }

    /// The collaborators in use.
    pub const fn linguistics(&self) -> &Linguistics {
        &self.linguistics
    }

    /// Summarize `text` with the default options.
    ///
    /// Never fails: empty input and text without content words produce an
    /// empty summary whose [`outcome`](Summary::outcome) says why.
    pub fn summarize(&self, text: &str) -> Summary {
        self.summarize_with(text, self.options)
    }

    /// Summarize `text` with explicit options, degrading per-request
    /// failures to an empty summary.
    pub fn summarize_with(&self, text: &str, options: SummaryOptions) -> Summary {
        match self.try_summarize_with(text, options) {
            Ok(summary) => summary,
            Err(SummaryError::NoMatches) => {
                let total = self.linguistics.sentences(text).len();
                tracing::info!(total_sentences = total, "no sentence matched a content word");
                Summary::empty(Outcome::NoMatches, total, options)
            }
            Err(SummaryError::EmptyInput) => {
                tracing::info!("nothing to summarize");
                Summary::empty(Outcome::EmptyInput, 0, options)
            }
            // Options are validated on construction and collaborators are
            // loaded before the first request.
            Err(
                err @ (SummaryError::InvalidScaleFactor(_)
                | SummaryError::CollaboratorUnavailable { .. }),
            ) => {
                tracing::error!(error = %err, "setup error during summarization");
                Summary::empty(Outcome::EmptyInput, 0, options)
            }
        }
    }

    /// Summarize `text` with the default options, surfacing
    /// [`SummaryError::EmptyInput`] and [`SummaryError::NoMatches`].
    pub fn try_summarize(&self, text: &str) -> SummaryResult<Summary> {
        self.try_summarize_with(text, self.options)
    }

    /// Summarize `text` with explicit options, surfacing per-request errors.
    #[tracing::instrument(skip(self, text), fields(text_len = text.len()))]
    pub fn try_summarize_with(
        &self,
        text: &str,
        options: SummaryOptions,
    ) -> SummaryResult<Summary> {
        let sentences = self.linguistics.sentences(text);
        if sentences.is_empty() {
            return Err(SummaryError::EmptyInput);
        }

        let table = build_frequency_table(text, &self.linguistics);
        let scores = score_sentences(&sentences, &table, &self.linguistics, options.match_mode);
        let mean = average(&scores)?;
        // A single-sentence text is its own summary.
        let threshold = if sentences.len() == 1 {
            mean
        } else {
            options.scale_factor * mean
        };

        let selected = select_sentences(&sentences, &scores, threshold);
        tracing::debug!(
            total = sentences.len(),
            scored = scores.len(),
            selected = selected.len(),
            mean,
            threshold,
            "selected sentences"
        );

        Ok(Summary {
            text: selection::join_sentences(&selected),
            sentences: selected,
            total_sentences: sentences.len(),
            scored_sentences: scores.len(),
            mean_score: Some(mean),
            threshold: Some(threshold),
            scale_factor: options.scale_factor,
            match_mode: options.match_mode,
            outcome: Outcome::Summarized,
        })
    }
}
