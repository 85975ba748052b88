use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_WORD: Regex = Regex::new(r"[^\p{L}\p{N}_]+").expect("valid regex");
}

/// Normalize a single token: lowercase, then drop every character that is not
/// a letter, digit or ASCII underscore, wherever it occurs. Combining marks
/// and connector punctuation are dropped too.
///
/// The result can be empty, e.g. for a token made only of punctuation. Empty
/// terms are kept and indexed like any other term.
pub fn normalize(token: &str) -> String {
    let lowered = token.to_lowercase();
    NON_WORD.replace_all(&lowered, "").into_owned()
}

/// Split text on whitespace and normalize each token, in text order.
pub fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(normalize)
}
