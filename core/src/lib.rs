//! Keyword retrieval over a small movie collection: BM25 ranking and exact
//! boolean lookup through a persisted inverted index.

pub mod bm25;
pub mod document;
pub mod error;
pub mod index;
pub mod persist;
pub mod service;
pub mod source;
pub mod tokenizer;

pub use bm25::{Bm25Config, Bm25Engine};
pub use document::{DocId, Document, SearchResult};
pub use error::{Error, Result};
pub use index::{DocMap, IndexStats, InvertedIndex, Postings};
pub use persist::{FileIndexStore, IndexMeta, IndexPaths, IndexStore, StoredIndex};
pub use service::{IndexService, SearchService};
pub use source::{DocumentSource, JsonDocumentSource, StopwordFile, StopwordSource};
pub use tokenizer::{PorterStemmer, Stemmer, Stopwords, Tokenizer};
