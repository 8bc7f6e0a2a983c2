//! Error types for precis-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),

    /// Configuration file not found after searching all locations.
    #[error("no configuration file found")]
    NotFound,
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while summarizing text.
///
/// `EmptyInput` and `NoMatches` are per-request conditions that
/// [`Summarizer::summarize`](crate::Summarizer::summarize) degrades to an
/// empty summary. `CollaboratorUnavailable` only happens while building the
/// linguistic resources at startup.
#[derive(Error, Debug)]
pub enum SummaryError {
    /// The input text contains no sentences.
    #[error("input contains no sentences")]
    EmptyInput,

    /// No sentence matched any entry of the frequency table.
    #[error("no sentence shares a content word with the frequency table")]
    NoMatches,

    /// The scale factor is not a positive finite number.
    #[error("invalid scale factor {0}: must be a positive, finite number")]
    InvalidScaleFactor(f64),

    /// A linguistic resource could not be loaded.
    #[error("failed to load {resource} from {path}")]
    CollaboratorUnavailable {
        /// Which resource failed (e.g. "stop-word list").
        resource: &'static str,
        /// Where it was loaded from.
        path: Utf8PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
}

impl SummaryError {
    /// Whether this error is a per-request condition rather than a setup fault.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::EmptyInput | Self::NoMatches)
    }
}

/// Result type alias using [`SummaryError`].
pub type SummaryResult<T> = Result<T, SummaryError>;
