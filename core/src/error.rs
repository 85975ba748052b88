use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures while building an index. Both are fatal: no partial index is ever
/// returned.
#[derive(Debug, Error)]
pub enum IndexError {
    /// The corpus directory is missing, not a directory, or cannot be listed.
    #[error("corpus directory {} is unavailable: {source}", path.display())]
    CorpusUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// A file inside the corpus cannot be read as UTF-8 text.
    #[error("document {} is unreadable: {source}", path.display())]
    DocumentUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, IndexError>;
