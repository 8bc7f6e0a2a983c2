//! Abbreviations that should not end a sentence when followed by a period.
//!
//! Entries that double as ordinary English words ("sat", "sun", "no", "in",
//! "miss", ...) are left out: summaries are built from whole sentences, and
//! gluing "The cat sat. The dog ran." into one sentence is worse than
//! occasionally splitting after "Sat." in a date.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Lowercased abbreviations, stored without their trailing period.
pub static ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "messrs", "mmes", "msgr", "hon",
        "esq", "phd", "capt", "col", "gen", "lt", "maj", "sgt", "cpl", "pvt", "adm", "cmdr", "sen",
        "gov", "pres",
    ]);

    // Academic degrees
    set.extend([
        "b.a", "b.s", "m.a", "m.s", "m.b.a", "ph.d", "m.d", "j.d", "ll.b", "ll.m", "d.d.s",
        "d.v.m", "ed.d", "psy.d",
    ]);

    // Latin and editorial
    set.extend([
        "etc", "vs", "e.g", "i.e", "cf", "viz", "ibid", "n.b", "p.s", "r.s.v.p", "et al",
    ]);

    // Time and dates
    set.extend([
        "a.m", "p.m", "b.c", "a.d", "c.e", "b.c.e", "jan", "feb", "apr", "jun", "jul", "aug",
        "sep", "sept", "oct", "nov", "dec", "tue", "tues", "thu", "thur", "thurs",
    ]);

    // Places and organizations
    set.extend([
        "st", "ave", "blvd", "rd", "bldg", "dept", "u.s", "u.k", "u.s.a", "e.u", "n.y", "calif",
        "inc", "corp", "ltd", "llc", "bros", "assn", "mfg", "intl",
    ]);

    // Units and references
    set.extend([
        "oz", "lb", "lbs", "kg", "mg", "ml", "cm", "mm", "km", "ft", "yd", "mph", "kph", "rpm",
        "vol", "nos", "pp", "ch", "eq", "approx", "avg", "misc", "refs", "eds", "encl",
    ]);

    set
});

/// Check if a word is a known abbreviation (case-insensitive, periods ignored
/// at either end).
pub fn is_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    ABBREVIATIONS.contains(word_lower.trim_matches('.'))
}
