use lazy_static::lazy_static;
use regex::Regex;

/// Words shorter than this are never indexed.
pub const MIN_WORD_LEN: usize = 3;

lazy_static! {
    static ref RE: Regex = Regex::new(r"[A-Za-z]+").expect("valid regex");
}

/// Lowercase a word that is entirely ASCII-alphabetic; anything else is rejected.
pub fn normalize_word(word: &str) -> Option<String> {
    if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    Some(word.to_ascii_lowercase())
}

/// Split free text into candidate words: maximal runs of ASCII letters, in
/// order. Any other character, including a non-ASCII letter, ends a run.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    RE.find_iter(text).map(|m| m.as_str())
}

/// Candidate words that would actually become index keys.
pub fn indexable_words(text: &str) -> impl Iterator<Item = String> + '_ {
    words(text)
        .filter(|w| w.len() >= MIN_WORD_LEN)
        .filter_map(normalize_word)
}
