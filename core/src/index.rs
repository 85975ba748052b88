use crate::document::Document;
use crate::error::{IndexError, Result};
use crate::tokenizer::{normalize, tokenize};
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    pub num_docs: usize,
    pub num_terms: usize,
}

/// Immutable inverted index over a corpus snapshot.
///
/// Postings hold positions into `documents`, in scan order, one entry per
/// document that contains the term.
#[derive(Debug, Default)]
pub struct Index {
    documents: Vec<Document>,
    postings: HashMap<String, Vec<usize>>,
}

impl Index {
    /// Build the index from the immediate children of `dir`.
    ///
    /// Files are read in file-name order. Any unreadable file aborts the
    /// whole build; subdirectories are skipped.
    pub fn build<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();
        let snapshot = scan_corpus(dir)?;
        let mut documents = Vec::with_capacity(snapshot.len());
        for path in &snapshot {
            tracing::debug!(path = %path.display(), "loading document");
            documents.push(Document::load(path)?);
        }
        let index = Self::from_documents(documents);
        tracing::info!(
            corpus = %dir.display(),
            num_docs = index.len(),
            num_terms = index.num_terms(),
            "index built"
        );
        Ok(index)
    }

    /// Assemble an index from documents, keeping their order for postings.
    pub fn from_documents(documents: Vec<Document>) -> Self {
        let mut postings: HashMap<String, Vec<usize>> = HashMap::new();
        for (pos, doc) in documents.iter().enumerate() {
            for term in doc.terms() {
                postings.entry(term.to_owned()).or_default().push(pos);
            }
        }
        Self { documents, postings }
    }

    /// Identifiers of matching documents, most relevant first.
    ///
    /// Unknown terms are ignored and documents with a zero score are left
    /// out, so an empty or unmatched query yields an empty vector.
    pub fn search(&self, query: &str) -> Vec<String> {
        self.rank(query)
            .into_iter()
            .map(|(pos, _)| self.documents[pos].identifier().to_owned())
            .collect()
    }

    fn rank(&self, query: &str) -> Vec<(usize, f64)> {
        // (document position, score) in first-encounter order
        let mut scores: Vec<(usize, f64)> = Vec::new();
        let mut slots: HashMap<usize, usize> = HashMap::new();
        for term in tokenize(query) {
            let Some(docs) = self.postings.get(&term) else {
                continue;
            };
            let idf = self.idf_for(docs.len());
            for &pos in docs {
                let contribution = self.documents[pos].normalized_frequency(&term) * idf;
                let slot = *slots.entry(pos).or_insert_with(|| {
                    scores.push((pos, 0.0));
                    scores.len() - 1
                });
                scores[slot].1 += contribution;
            }
        }
        scores.retain(|&(_, score)| score > 0.0);
        // stable: ties keep first-encounter order
        scores.sort_by(|a, b| b.1.total_cmp(&a.1));
        scores
    }

    /// `ln(N / df)`, or `0.0` for a term no document contains.
    pub fn idf(&self, term: &str) -> f64 {
        match self.document_frequency(term) {
            0 => 0.0,
            df => self.idf_for(df),
        }
    }

    fn idf_for(&self, df: usize) -> f64 {
        (self.documents.len() as f64 / df as f64).ln()
    }

    /// Number of documents containing `term` (normalized first).
    pub fn document_frequency(&self, term: &str) -> usize {
        self.postings.get(&normalize(term)).map_or(0, Vec::len)
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn num_terms(&self) -> usize {
        self.postings.len()
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats { num_docs: self.len(), num_terms: self.num_terms() }
    }
}

/// Ordered snapshot of the files directly inside `dir`.
fn scan_corpus(dir: &Path) -> Result<Vec<PathBuf>> {
    let unavailable = |source: io::Error| IndexError::CorpusUnavailable {
        path: dir.to_path_buf(),
        source,
    };
    let meta = fs::metadata(dir).map_err(unavailable)?;
    if !meta.is_dir() {
        return Err(unavailable(io::Error::other("not a directory")));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => return Err(unavailable(err.into())),
            Err(err) => {
                let path = err.path().map_or_else(|| dir.to_path_buf(), Path::to_path_buf);
                return Err(IndexError::DocumentUnreadable { path, source: err.into() });
            }
        };
        if !entry.file_type().is_file() {
            tracing::warn!(path = %entry.path().display(), "skipping non-file corpus entry");
            continue;
        }
        files.push(entry.into_path());
    }
    Ok(files)
}
