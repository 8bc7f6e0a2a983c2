//! Sentence splitting and word tokenization.
//!
//! Sentences are returned as trimmed slices of the input, so every sentence a
//! summary selects is reproduced exactly as it was written.

use regex::Regex;
use std::sync::LazyLock;

use crate::dictionaries::abbreviations::is_abbreviation;
use crate::dictionaries::stop_words;

/// Regex for decimal numbers (3.14, 2.5, etc.).
static DECIMAL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+\.\d+$").expect("valid regex"));

/// Regex for URLs.
static URL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:https?://|www\.)\S+$").expect("valid regex"));

/// Regex for email addresses.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid regex")
});

/// Regex for initials (J.K., U.S.A., etc.).
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]\.)+$").expect("valid regex"));

/// Sentences shorter than this (in bytes, after trimming) are dropped as noise.
const MIN_SENTENCE_LEN: usize = 3;

/// Split text into sentences, in document order.
///
/// Terminators are `.`, `!` and `?`. Closing quotes and brackets directly
/// after a terminator stay with the sentence they close. A period does not
/// end a sentence when it follows a known abbreviation or an initial, sits
/// inside a decimal number, URL or e-mail address, is part of an ellipsis, or
/// is followed by a lowercase letter.
#[tracing::instrument(skip_all, fields(text_len = text.len()))]
pub fn split_sentences(text: &str) -> Vec<String> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    for (pos, &(offset, ch)) in chars.iter().enumerate() {
        if !matches!(ch, '.' | '!' | '?') {
            continue;
        }
        let closed = chars[pos + 1..]
            .iter()
            .take_while(|&&(_, c)| is_closing_mark(c))
            .count();
        let end = chars
            .get(pos + 1 + closed)
            .map_or(text.len(), |&(next_offset, _)| next_offset);
        let terminated = &text[start..offset + ch.len_utf8()];
        if is_boundary(terminated, ch, &text[end..]) {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if sentence.len() >= MIN_SENTENCE_LEN {
        sentences.push(sentence.to_string());
    }
}

/// Decide whether `terminator`, the last character of `current`, closes the
/// sentence. `rest` is the text after the terminator and any closing marks.
fn is_boundary(current: &str, terminator: char, rest: &str) -> bool {
    let Some(next) = rest.chars().find(|c| !c.is_whitespace()) else {
        return true;
    };

    // A terminator glued to the next character ("3.14", "e.g.x") is never a boundary.
    if rest.chars().next().is_some_and(|c| !c.is_whitespace()) {
        return false;
    }

    if terminator != '.' {
        return starts_sentence(next, rest);
    }

    let word = word_before(current);
    if is_abbreviation(word) || is_initial(word, next_word(rest)) {
        return false;
    }
    if current.ends_with("..") {
        return false;
    }

    let body = current.trim_end_matches('.');
    if DECIMAL_PATTERN.is_match(body) || URL_PATTERN.is_match(body) || EMAIL_PATTERN.is_match(body)
    {
        return false;
    }

    !next.is_lowercase()
}

/// For `!` and `?`: the next sentence should open with an uppercase letter,
/// possibly behind a quotation mark.
fn starts_sentence(next: char, rest: &str) -> bool {
    if next == '"' || next == '\'' {
        return rest
            .chars()
            .filter(|c| !c.is_whitespace())
            .nth(1)
            .is_none_or(|c| !c.is_lowercase());
    }
    !next.is_lowercase()
}

const fn is_closing_mark(c: char) -> bool {
    matches!(c, '"' | '\'' | ')' | ']' | '\u{201d}' | '\u{2019}')
}

/// The last whitespace-delimited word of `sentence`, without surrounding
/// punctuation other than interior periods.
fn word_before(sentence: &str) -> &str {
    sentence
        .split_whitespace()
        .next_back()
        .unwrap_or("")
        .trim_start_matches(|c: char| !c.is_alphanumeric())
        .trim_end_matches('.')
}

/// The first word of `rest`, stripped of surrounding punctuation.
fn next_word(rest: &str) -> &str {
    rest.split_whitespace()
        .next()
        .unwrap_or("")
        .trim_matches(|c: char| !c.is_alphanumeric())
}

/// Dotted initials ("U.S.A") always count. A lone capital ("J") counts unless
/// the following word is a multi-letter function word, as in "Plan B. We left."
fn is_initial(word: &str, next: &str) -> bool {
    let mut letters = word.chars();
    let single_capital =
        letters.next().is_some_and(char::is_uppercase) && letters.next().is_none();
    if single_capital {
        let next = next.to_lowercase();
        return next.chars().count() < 2 || !stop_words::ENGLISH.contains(next.as_str());
    }
    INITIALS_PATTERN.is_match(&format!("{word}."))
}

/// Split text into word tokens.
///
/// Splits on whitespace and trims surrounding punctuation, keeping interior
/// apostrophes and hyphens ("don't", "well-known"). Case is preserved.
/// Tokens with no alphanumeric character are dropped.
pub fn tokenize_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|w| w.chars().any(char::is_alphanumeric))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_sentences() {
        let sentences = split_sentences("This is a sentence. This is another sentence.");
        assert_eq!(
            sentences,
            vec!["This is a sentence.", "This is another sentence."]
        );
    }

    #[test]
    fn short_sentences_with_common_words() {
        let sentences = split_sentences("The cat sat. The cat sat on the hot mat. Cats sit.");
        assert_eq!(
            sentences,
            vec!["The cat sat.", "The cat sat on the hot mat.", "Cats sit."]
        );
    }

    #[test]
    fn abbreviations_not_split() {
        let sentences = split_sentences("Dr. Smith went to the store. He bought milk.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "Dr. Smith went to the store.");
    }

    #[test]
    fn initials_not_split() {
        let sentences = split_sentences("J. K. Rowling wrote it. The U.S.A. agreed. Fine.");
        assert_eq!(
            sentences,
            vec!["J. K. Rowling wrote it.", "The U.S.A. agreed.", "Fine."]
        );
    }

    #[test]
    fn lone_capital_before_function_word_ends_sentence() {
        let sentences = split_sentences("We chose Plan B. We moved on quickly.");
        assert_eq!(sentences, vec!["We chose Plan B.", "We moved on quickly."]);

        let sentences = split_sentences("J. D. Salinger wrote it. John F. Kennedy spoke.");
        assert_eq!(
            sentences,
            vec!["J. D. Salinger wrote it.", "John F. Kennedy spoke."]
        );
    }

    #[test]
    fn closing_marks_stay_with_their_sentence() {
        let sentences = split_sentences("He shouted \"Stop.\" Then the dog barked.");
        assert_eq!(
            sentences,
            vec!["He shouted \"Stop.\"", "Then the dog barked."]
        );

        let sentences = split_sentences("She asked (why?) Nobody knew. It was 'done.'");
        assert_eq!(
            sentences,
            vec!["She asked (why?)", "Nobody knew.", "It was 'done.'"]
        );
    }

    #[test]
    fn closing_mark_before_lowercase_does_not_split() {
        let sentences = split_sentences("He said \"stop.\" then left. Fine.");
        assert_eq!(sentences, vec!["He said \"stop.\" then left.", "Fine."]);
    }

    #[test]
    fn decimal_numbers_not_split() {
        let sentences = split_sentences("The price is 3.14 dollars. That's cheap.");
        assert_eq!(sentences.len(), 2);
        assert!(sentences[0].contains("3.14"));
    }

    #[test]
    fn urls_not_split() {
        let sentences = split_sentences("See www.example.com for more. Then stop.");
        assert_eq!(sentences.len(), 2);
        assert_eq!(sentences[0], "See www.example.com for more.");
    }

    #[test]
    fn lowercase_continuation_not_split() {
        let sentences = split_sentences("It costs approx. ten dollars. Done now.");
        assert_eq!(sentences.len(), 2);
    }

    #[test]
    fn question_and_exclamation() {
        let sentences = split_sentences("Are you serious? I can't believe it! This is amazing.");
        assert_eq!(sentences.len(), 3);
    }

    #[test]
    fn trailing_text_without_terminator_is_kept() {
        let sentences = split_sentences("First one. and then a fragment without end");
        assert_eq!(sentences.len(), 1);
        let sentences = split_sentences("First one. Second without end");
        assert_eq!(sentences, vec!["First one.", "Second without end"]);
    }

    #[test]
    fn sentences_are_unmodified_slices() {
        let text = "  Spacing   is  kept.\nNew line here!  ";
        let sentences = split_sentences(text);
        assert_eq!(sentences, vec!["Spacing   is  kept.", "New line here!"]);
    }

    #[test]
    fn empty_input() {
        assert!(split_sentences("").is_empty());
        assert!(split_sentences("   ").is_empty());
    }

    #[test]
    fn tokenize_preserves_case_and_drops_punctuation() {
        let words = tokenize_words("Hello, world! Don't -- stop (now).");
        assert_eq!(words, vec!["Hello", "world", "Don't", "stop", "now"]);
    }
}
