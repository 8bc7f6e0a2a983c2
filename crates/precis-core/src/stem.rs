//! Porter stemmer.
//!
//! M. F. Porter, "An algorithm for suffix stripping" (1980). Words are
//! lowercased first, and words of two characters or fewer are returned as-is.
//! Words containing non-ASCII characters are only lowercased.
//!
//! Notation used below: `m` is the measure of a stem, the number of
//! vowel-consonant sequences in it; `*o` means the stem ends
//! consonant-vowel-consonant where the final consonant is not `w`, `x` or `y`.

use crate::linguistics::Stemmer;

/// The classic Porter suffix-stripping stemmer for English.
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl Stemmer for PorterStemmer {
    fn stem(&self, word: &str) -> String {
        porter_stem(word)
    }
}

/// Stem a single word.
pub fn porter_stem(word: &str) -> String {
    let lower = word.to_lowercase();
    if lower.len() <= 2 || !lower.is_ascii() {
        return lower;
    }

    let mut w = Word {
        b: lower.into_bytes(),
    };
    w.step1a();
    w.step1b();
    w.step1c();
    w.step2();
    w.step3();
    w.step4();
    w.step5();

    // Only ASCII bytes were ever written.
    String::from_utf8(w.b).unwrap_or_default()
}

const STEP2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("abli", "able"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
];

const STEP3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP4: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

struct Word {
    b: Vec<u8>,
}

impl Word {
    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// `m` of the first `len` bytes.
    fn measure(&self, len: usize) -> usize {
        (1..len)
            .filter(|&i| self.is_consonant(i) && !self.is_consonant(i - 1))
            .count()
    }

    fn has_vowel(&self, len: usize) -> bool {
        (0..len).any(|i| !self.is_consonant(i))
    }

    fn ends_double_consonant(&self, len: usize) -> bool {
        len >= 2 && self.b[len - 1] == self.b[len - 2] && self.is_consonant(len - 1)
    }

    /// `*o` on the first `len` bytes.
    fn ends_cvc(&self, len: usize) -> bool {
        len >= 3
            && self.is_consonant(len - 1)
            && !self.is_consonant(len - 2)
            && self.is_consonant(len - 3)
            && !matches!(self.b[len - 1], b'w' | b'x' | b'y')
    }

    fn ends_with(&self, suffix: &str) -> bool {
        self.b.ends_with(suffix.as_bytes())
    }

    /// Length of the stem left after removing `suffix`.
    fn stem_len(&self, suffix: &str) -> usize {
        self.b.len() - suffix.len()
    }

    fn replace_suffix(&mut self, suffix: &str, replacement: &str) {
        let stem = self.stem_len(suffix);
        self.b.truncate(stem);
        self.b.extend_from_slice(replacement.as_bytes());
    }

    /// Apply the first rule whose suffix matches, if its stem has `m > min_measure`.
    fn apply_rules(&mut self, rules: &[(&str, &str)], min_measure: usize) {
        if let Some(&(suffix, replacement)) = rules.iter().find(|(s, _)| self.ends_with(s))
            && self.measure(self.stem_len(suffix)) > min_measure
        {
            self.replace_suffix(suffix, replacement);
        }
    }

    /// Plurals: sses -> ss, ies -> i, ss -> ss, s -> (removed).
    fn step1a(&mut self) {
        if self.ends_with("sses") || self.ends_with("ies") {
            self.b.truncate(self.b.len() - 2);
        } else if !self.ends_with("ss") && self.ends_with("s") {
            self.b.pop();
        }
    }

    /// Past tense and progressive: eed, ed, ing.
    fn step1b(&mut self) {
        if self.ends_with("eed") {
            if self.measure(self.stem_len("eed")) > 0 {
                self.b.pop();
            }
            return;
        }

        let Some(suffix) = ["ed", "ing"]
            .into_iter()
            .find(|s| self.ends_with(s) && self.has_vowel(self.stem_len(s)))
        else {
            return;
        };
        self.replace_suffix(suffix, "");

        let len = self.b.len();
        if self.ends_with("at") || self.ends_with("bl") || self.ends_with("iz") {
            self.b.push(b'e');
        } else if self.ends_double_consonant(len)
            && !matches!(self.b[len - 1], b'l' | b's' | b'z')
        {
            self.b.pop();
        } else if self.measure(len) == 1 && self.ends_cvc(len) {
            self.b.push(b'e');
        }
    }

    /// Terminal y -> i when the stem contains a vowel.
    fn step1c(&mut self) {
        if self.ends_with("y") && self.has_vowel(self.b.len() - 1) {
            let last = self.b.len() - 1;
            self.b[last] = b'i';
        }
    }

    fn step2(&mut self) {
        self.apply_rules(STEP2, 0);
    }

    fn step3(&mut self) {
        self.apply_rules(STEP3, 0);
    }

    fn step4(&mut self) {
        let Some(suffix) = STEP4.iter().copied().find(|s| self.ends_with(s)) else {
            return;
        };
        let stem = self.stem_len(suffix);
        if self.measure(stem) <= 1 {
            return;
        }
        if suffix == "ion" && !(stem > 0 && matches!(self.b[stem - 1], b's' | b't')) {
            return;
        }
        self.b.truncate(stem);
    }

    /// Tidy up: drop a final e, and reduce a final ll.
    fn step5(&mut self) {
        if self.ends_with("e") {
            let stem = self.b.len() - 1;
            let m = self.measure(stem);
            if m > 1 || (m == 1 && !self.ends_cvc(stem)) {
                self.b.pop();
            }
        }

        let len = self.b.len();
        if self.ends_with("ll") && self.measure(len) > 1 {
            self.b.pop();
        }
    }
}
