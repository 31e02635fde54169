use crate::bm25::Bm25Engine;
use crate::document::{DocId, Document};
use crate::error::Result;
use crate::index::{IndexStats, InvertedIndex};
use crate::persist::IndexStore;
use crate::source::{DocumentSource, StopwordSource};
use crate::tokenizer::{PorterStemmer, Stemmer, Tokenizer};

/// Ranked keyword search over the full document collection.
pub struct SearchService<D, W, S = PorterStemmer> {
    documents: D,
    stopwords: W,
    tokenizer: Tokenizer<S>,
    engine: Bm25Engine,
}

impl<D: DocumentSource, W: StopwordSource, S: Stemmer> SearchService<D, W, S> {
    pub fn new(documents: D, stopwords: W, tokenizer: Tokenizer<S>, engine: Bm25Engine) -> Self {
        Self { documents, stopwords, tokenizer, engine }
    }

    /// A blank query returns the first `limit` documents in collection
    /// order. A query that tokenizes to nothing otherwise returns no results.
    pub fn search(&self, query: &str, limit: usize) -> Result<Vec<Document>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut documents = self.documents.load_documents()?;
        let stopwords = self.stopwords.load_stopwords()?;
        let query_tokens = self.tokenizer.tokenize(query, &stopwords);

        if query_tokens.is_empty() {
            if query.trim().is_empty() {
                documents.truncate(limit);
                return Ok(documents);
            }
            tracing::debug!(query, "query has no searchable tokens");
            return Ok(Vec::new());
        }

        let corpus_tokens: Vec<Vec<String>> =
            documents.iter().map(|doc| self.tokenizer.tokenize(&doc.content(), &stopwords)).collect();
        let ranked = self.engine.rank(&documents, &corpus_tokens, &query_tokens, limit);
        Ok(ranked.into_iter().map(|result| result.document).collect())
    }
}

/// Builds, persists and queries the exact-match inverted index.
pub struct IndexService<D, W, St, S = PorterStemmer> {
    documents: D,
    stopwords: W,
    store: St,
    tokenizer: Tokenizer<S>,
    index: InvertedIndex,
}

impl<D: DocumentSource, W: StopwordSource, St: IndexStore, S: Stemmer> IndexService<D, W, St, S> {
    pub fn new(documents: D, stopwords: W, store: St, tokenizer: Tokenizer<S>) -> Self {
        Self { documents, stopwords, store, tokenizer, index: InvertedIndex::new() }
    }

    pub fn build(&mut self) -> Result<()> {
        let documents = self.documents.load_documents()?;
        let stopwords = self.stopwords.load_stopwords()?;
        self.index.build(&documents, &stopwords, &self.tokenizer);
        Ok(())
    }

    /// Ids of documents containing every token of `term`.
    pub fn lookup(&self, term: &str) -> Result<Vec<DocId>> {
        let stopwords = self.stopwords.load_stopwords()?;
        let term_tokens = self.tokenizer.tokenize(term, &stopwords);
        Ok(self.index.lookup(&term_tokens))
    }

    pub fn save(&self) -> Result<()> {
        self.store.save(&self.index.export_index(), &self.index.export_docmap())
    }

    pub fn load(&mut self) -> Result<()> {
        let stored = self.store.load()?;
        self.index.import_data(&stored.index, &stored.docmap);
        Ok(())
    }

    pub fn stats(&self) -> IndexStats {
        self.index.stats()
    }
}
