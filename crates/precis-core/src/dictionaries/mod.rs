//! Built-in word lists.
//!
//! Provides the abbreviation set used by sentence splitting and the English
//! stop-word set used by frequency counting.

pub mod abbreviations;
pub mod stop_words;
