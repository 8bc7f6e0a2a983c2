//! Word frequency table.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::linguistics::Linguistics;

/// Stemmed content word -> number of occurrences in the source text.
///
/// No key is a stop word and every count is at least 1. Keys are kept
/// sorted so iteration and serialized output are deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FrequencyTable(BTreeMap<String, usize>);

impl FrequencyTable {
    /// Count of `stem`, if present.
    pub fn get(&self, stem: &str) -> Option<usize> {
        self.0.get(stem).copied()
    }

    /// Number of distinct stems.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether no content word was found.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate `(stem, count)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.0.iter().map(|(stem, &count)| (stem.as_str(), count))
    }

    fn record(&mut self, stem: String) {
        *self.0.entry(stem).or_insert(0) += 1;
    }
}

impl FromIterator<String> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = String>>(stems: I) -> Self {
        let mut table = Self::default();
        for stem in stems {
            table.record(stem);
        }
        table
    }
}

/// Build the frequency table for `text`.
///
/// Every token is stemmed; stems that are stop words are discarded and the
/// rest are counted.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn build_frequency_table(text: &str, linguistics: &Linguistics) -> FrequencyTable {
    let table: FrequencyTable = linguistics.content_stems(text).into_iter().collect();
    tracing::debug!(distinct = table.len(), "built frequency table");
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_stemmed_content_words() {
        let table = build_frequency_table(
            "The cat sat. The cat sat on the hot mat. Cats sit.",
            &Linguistics::english(),
        );
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(
            entries,
            vec![("cat", 3), ("hot", 1), ("mat", 1), ("sat", 2), ("sit", 1)]
        );
    }

    #[test]
    fn empty_text_gives_empty_table() {
        assert!(build_frequency_table("", &Linguistics::english()).is_empty());
        assert!(build_frequency_table("   \n", &Linguistics::english()).is_empty());
    }

    #[test]
    fn only_stop_words_gives_empty_table() {
        let table = build_frequency_table("It is what it is, and so on.", &Linguistics::english());
        assert!(table.is_empty(), "{table:?}");
    }

    #[test]
    fn stop_word_membership_is_case_sensitive_on_stems() {
        use crate::linguistics::{Stemmer, StopWords};

        struct Upper;
        impl Stemmer for Upper {
            fn stem(&self, word: &str) -> String {
                word.to_uppercase()
            }
        }

        let table_with = |stop: &[&str]| {
            let ling = Linguistics::english()
                .with_stemmer(Upper)
                .with_stop_words(StopWords::from_words(stop.iter().copied()));
            build_frequency_table("the cat", &ling)
        };

        // Neither "CAT" nor "cat" is on a list holding only "Cat".
        assert_eq!(table_with(&["Cat"]).get("CAT"), Some(1));
        // The stem itself is on the list.
        assert_eq!(table_with(&["THE"]).get("THE"), None);
        // The lowercased surface token is on the list.
        assert_eq!(table_with(&["the"]).get("THE"), None);
    }

    #[test]
    fn serializes_as_plain_map() {
        let table: FrequencyTable = ["b".to_string(), "a".to_string(), "b".to_string()]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"{"a":1,"b":2}"#);
    }
}
