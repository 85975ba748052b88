//! In-memory TF-IDF search over a directory of text documents.
//!
//! The [`Index`] is built once from a corpus directory and is read-only
//! afterwards, so it can be shared between threads without locking.

pub mod document;
pub mod error;
pub mod index;
pub mod tokenizer;

pub use document::Document;
pub use error::{IndexError, Result};
pub use index::{Index, IndexStats};
