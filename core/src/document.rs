use crate::error::{IndexError, Result};
use crate::tokenizer::{normalize, tokenize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// One corpus file reduced to a bag of normalized terms.
#[derive(Debug, Clone)]
pub struct Document {
    identifier: String,
    /// term -> raw count / number of distinct terms
    frequencies: HashMap<String, f64>,
}

impl Document {
    /// Read and index the file at `path`. The path, rendered as a string, is
    /// the document identifier.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| IndexError::DocumentUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(path.to_string_lossy(), text.as_str()))
    }

    pub fn from_text(identifier: impl Into<String>, text: &str) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for term in tokenize(text) {
            *counts.entry(term).or_insert(0) += 1;
        }
        // Frequencies are relative to the number of distinct terms, not to the
        // total token count.
        let distinct = counts.len() as f64;
        let frequencies = counts
            .into_iter()
            .map(|(term, count)| (term, count as f64 / distinct))
            .collect();
        Self { identifier: identifier.into(), frequencies }
    }

    /// Frequency of `word` after normalization, `0.0` when absent.
    pub fn term_frequency(&self, word: &str) -> f64 {
        self.normalized_frequency(&normalize(word))
    }

    /// Lookup for a term that is already normalized.
    pub(crate) fn normalized_frequency(&self, term: &str) -> f64 {
        self.frequencies.get(term).copied().unwrap_or(0.0)
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Distinct normalized terms, in no particular order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.frequencies.keys().map(String::as_str)
    }

    /// Number of distinct terms.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn frequency_divides_by_distinct_terms() {
        // 4 tokens, 3 distinct terms
        let doc = Document::from_text("d", "apple apple banana cherry");
        assert!(close(doc.term_frequency("apple"), 2.0 / 3.0));
        assert!(close(doc.term_frequency("banana"), 1.0 / 3.0));
        assert_eq!(doc.len(), 3);
    }

    #[test]
    fn lookup_is_normalized() {
        let doc = Document::from_text("d", "The cat sat.");
        assert!(close(doc.term_frequency("CAT"), 1.0 / 3.0));
        assert!(close(doc.term_frequency("sat!"), 1.0 / 3.0));
        assert_eq!(doc.term_frequency("dog"), 0.0);
    }

    #[test]
    fn normalized_lookup_skips_normalization() {
        let doc = Document::from_text("d", "Cat cat dog");
        assert!(close(doc.normalized_frequency("cat"), 1.0));
        assert_eq!(doc.normalized_frequency("Cat"), 0.0);
    }

    #[test]
    fn terms_are_distinct_and_normalized() {
        let doc = Document::from_text("d", "Rust rust RUST, systems");
        let terms: HashSet<&str> = doc.terms().collect();
        assert_eq!(terms, HashSet::from(["rust", "systems"]));
    }

    #[test]
    fn punctuation_token_is_an_empty_term() {
        let doc = Document::from_text("d", "wait ... what");
        assert!(doc.terms().any(|t| t.is_empty()));
        assert!(close(doc.term_frequency("!!"), 1.0 / 3.0));
    }

    #[test]
    fn empty_text_has_no_terms() {
        let doc = Document::from_text("d", "   \n ");
        assert!(doc.is_empty());
        assert_eq!(doc.term_frequency("anything"), 0.0);
    }

    #[test]
    fn load_uses_path_as_identifier() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Cat - Wikipedia.html");
        fs::write(&path, "cat\ncat dog\n").unwrap();
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.identifier(), path.to_string_lossy());
        assert!(close(doc.term_frequency("cat"), 1.0));
    }

    #[test]
    fn load_missing_file_is_unreadable() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path().join("nope.txt")).unwrap_err();
        assert!(matches!(err, IndexError::DocumentUnreadable { .. }));
    }
}
