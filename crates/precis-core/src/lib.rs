//! Core library for precis.
//!
//! This crate implements extractive summarization by word-frequency sentence
//! scoring, along with the configuration and linguistic resources used by the
//! `precis` CLI and any downstream consumers.
//!
//! # Modules
//!
//! - [`summarize`] - The scoring and selection pipeline
//! - [`linguistics`] - Sentence splitter, tokenizer, stemmer and stop-word seams
//! - [`config`] - Configuration loading and management
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use precis_core::{Linguistics, Summarizer};
//!
//! let summarizer = Summarizer::new(Linguistics::english());
//! let summary = summarizer.summarize("The cat sat. The cat sat on the hot mat. Cats sit.");
//!
//! assert_eq!(summary.text, "The cat sat.");
//! ```
#![deny(unsafe_code)]

pub mod config;
pub mod dictionaries;
pub mod error;
pub mod linguistics;
pub mod markdown;
pub mod stem;
pub mod summarize;
pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, LogLevel};
pub use error::{ConfigError, ConfigResult, SummaryError, SummaryResult};
pub use linguistics::{Linguistics, SentenceSplitter, Stemmer, StopWords, WordTokenizer};
pub use summarize::{
    DEFAULT_SCALE_FACTOR, FrequencyTable, MatchMode, Outcome, SelectedSentence, SentenceScores,
    Summarizer, Summary, SummaryOptions, average, build_frequency_table, generate_summary,
    score_sentences,
};

/// Default maximum input size in bytes (5 MiB).
pub const DEFAULT_MAX_INPUT_BYTES: usize = 5 * 1024 * 1024;
