//! Linguistic collaborators used by the summarization pipeline.
//!
//! The pipeline only sees these through traits, so a caller with a better
//! sentence splitter or a stemmer for another language can plug it in.
//! [`Linguistics::english`] bundles the built-in English implementations.

use std::collections::HashSet;
use std::fmt;

use camino::Utf8Path;

use crate::dictionaries::stop_words;
use crate::error::{SummaryError, SummaryResult};
use crate::stem::PorterStemmer;
use crate::text;

/// Splits raw text into an ordered sequence of sentences.
pub trait SentenceSplitter: Send + Sync {
    /// Split `text` into sentences, in document order.
    fn split(&self, text: &str) -> Vec<String>;
}

/// Splits a string into an ordered sequence of word tokens.
pub trait WordTokenizer: Send + Sync {
    /// Tokenize `text` into words.
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Reduces a word to its root form.
pub trait Stemmer: Send + Sync {
    /// Stem a single word token.
    fn stem(&self, word: &str) -> String;
}

/// Rule-based splitter from [`text::split_sentences`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RuleSentenceSplitter;

impl SentenceSplitter for RuleSentenceSplitter {
    fn split(&self, text: &str) -> Vec<String> {
        text::split_sentences(text)
    }
}

/// Whitespace tokenizer from [`text::tokenize_words`].
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceTokenizer;

impl WordTokenizer for WhitespaceTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text::tokenize_words(text)
    }
}

/// A set of words excluded from frequency counting.
///
/// Membership is case-sensitive. The built-in list is lowercase, which matches
/// the output of [`PorterStemmer`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    /// The built-in English list.
    pub fn english() -> Self {
        Self::from_words(stop_words::ENGLISH.iter().copied())
    }

    /// An empty set (nothing is filtered).
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a set from arbitrary words, stored exactly as given.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
        }
    }

    /// Add more words to the set.
    pub fn extend<I, S>(&mut self, words: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.words.extend(words.into_iter().map(Into::into));
    }

    /// Add words from a file, one per line. Blank lines and lines starting
    /// with `#` are skipped; entries are lowercased.
    pub fn extend_from_file(&mut self, path: &Utf8Path) -> SummaryResult<()> {
        let content = std::fs::read_to_string(path.as_std_path()).map_err(|source| {
            SummaryError::CollaboratorUnavailable {
                resource: "stop-word list",
                path: path.to_path_buf(),
                source,
            }
        })?;
        let before = self.words.len();
        self.extend(
            content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !line.starts_with('#'))
                .map(str::to_lowercase),
        );
        tracing::debug!(
            path = %path,
            added = self.words.len() - before,
            "loaded stop words from file"
        );
        Ok(())
    }

    /// Case-sensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    /// Number of words in the set.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// The full set of collaborators the pipeline needs.
///
/// Built once at startup and only read afterwards, so one instance can be
/// shared by any number of concurrent requests.
pub struct Linguistics {
    splitter: Box<dyn SentenceSplitter>,
    tokenizer: Box<dyn WordTokenizer>,
    stemmer: Box<dyn Stemmer>,
    stop_words: StopWords,
}

impl Linguistics {
    /// Built-in English collaborators: rule-based sentence splitting,
    /// whitespace tokenization, Porter stemming and the English stop-word list.
    pub fn english() -> Self {
        Self {
            splitter: Box::new(RuleSentenceSplitter),
            tokenizer: Box::new(WhitespaceTokenizer),
            stemmer: Box::new(PorterStemmer),
            stop_words: StopWords::english(),
        }
    }

    /// Replace the sentence splitter.
    pub fn with_splitter(mut self, splitter: impl SentenceSplitter + 'static) -> Self {
        self.splitter = Box::new(splitter);
        self
    }

    /// Replace the word tokenizer.
    pub fn with_tokenizer(mut self, tokenizer: impl WordTokenizer + 'static) -> Self {
        self.tokenizer = Box::new(tokenizer);
        self
    }

    /// Replace the stemmer.
    pub fn with_stemmer(mut self, stemmer: impl Stemmer + 'static) -> Self {
        self.stemmer = Box::new(stemmer);
        self
    }

    /// Replace the stop-word set.
    pub fn with_stop_words(mut self, stop_words: StopWords) -> Self {
        self.stop_words = stop_words;
        self
    }

    /// Split text into sentences.
    pub fn sentences(&self, text: &str) -> Vec<String> {
        self.splitter.split(text)
    }

    /// Tokenize text into words.
    pub fn words(&self, text: &str) -> Vec<String> {
        self.tokenizer.tokenize(text)
    }

    /// Stem one word.
    pub fn stem(&self, word: &str) -> String {
        self.stemmer.stem(word)
    }

    /// The active stop-word set.
    pub const fn stop_words(&self) -> &StopWords {
        &self.stop_words
    }

    /// Stems of the content words in `text`, in order.
    ///
    /// A token is dropped when its stem is a stop word, or when the token
    /// itself (lowercased) is one. The second test keeps words like "was",
    /// whose stem "wa" is not on the list, out of the result.
    pub fn content_stems(&self, text: &str) -> Vec<String> {
        self.words(text)
            .into_iter()
            .filter_map(|token| {
                let stem = self.stem(&token);
                let is_stop = self.stop_words.contains(&stem)
                    || self.stop_words.contains(&token.to_lowercase());
                (!is_stop).then_some(stem)
            })
            .collect()
    }
}

impl Default for Linguistics {
    fn default() -> Self {
        Self::english()
    }
}

impl fmt::Debug for Linguistics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Linguistics")
            .field("stop_words", &self.stop_words.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn english_stop_words_loaded() {
        let stop = StopWords::english();
        assert!(stop.contains("the"));
        assert!(!stop.contains("The"), "membership is case-sensitive");
        assert_eq!(stop.len(), 179);
    }

    #[test]
    fn content_stems_drop_stop_words() {
        let ling = Linguistics::english();
        let stems = ling.content_stems("The cats were running on the mat.");
        assert_eq!(stems, vec!["cat", "run", "mat"]);
    }

    #[test]
    fn stop_word_with_unlisted_stem_is_dropped() {
        let ling = Linguistics::english();
        assert_eq!(ling.stem("was"), "wa");
        assert!(ling.content_stems("was").is_empty());
    }

    #[test]
    fn custom_stemmer_is_used() {
        struct Identity;
        impl Stemmer for Identity {
            fn stem(&self, word: &str) -> String {
                word.to_string()
            }
        }

        let ling = Linguistics::english().with_stemmer(Identity);
        assert_eq!(ling.content_stems("Cats sit"), vec!["Cats", "sit"]);
    }

    #[test]
    fn stop_words_from_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("stop.txt");
        fs::write(&path, "# project jargon\nWidget\n\n  gizmo \n").unwrap();
        let path = camino::Utf8PathBuf::try_from(path).unwrap();

        let mut stop = StopWords::empty();
        stop.extend_from_file(&path).unwrap();
        assert!(stop.contains("widget"));
        assert!(stop.contains("gizmo"));
        assert_eq!(stop.len(), 2);
    }

    #[test]
    fn missing_stop_word_file_is_collaborator_error() {
        let mut stop = StopWords::empty();
        let err = stop
            .extend_from_file(Utf8Path::new("/nonexistent/precis/stop.txt"))
            .unwrap_err();
        assert!(matches!(err, SummaryError::CollaboratorUnavailable { .. }));
        assert!(!err.is_recoverable());
    }
}
