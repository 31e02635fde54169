use crate::document::{DocId, Document};
use crate::tokenizer::{Stemmer, Stopwords, Tokenizer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};

pub type Postings = HashMap<String, HashSet<DocId>>;
pub type DocMap = HashMap<DocId, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub token_count: usize,
    pub document_count: usize,
}

/// Token to document-id postings plus the content each document was indexed from.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    postings: Postings,
    docmap: DocMap,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    /// Replaces the whole index with the given documents. A repeated id
    /// overwrites the earlier document's content.
    pub fn build<S: Stemmer>(&mut self, documents: &[Document], stopwords: &Stopwords, tokenizer: &Tokenizer<S>) {
        self.clear();
        for doc in documents {
            let content = doc.content();
            let tokens: HashSet<String> = tokenizer.tokenize(&content, stopwords).into_iter().collect();
            for token in tokens {
                self.postings.entry(token).or_default().insert(doc.id);
            }
            self.docmap.insert(doc.id, content);
        }
        tracing::info!(tokens = self.postings.len(), documents = self.docmap.len(), "built inverted index");
    }

    pub fn clear(&mut self) {
        self.postings.clear();
        self.docmap.clear();
    }

    /// Ids of documents containing every token, ascending. An empty token
    /// list matches nothing.
    pub fn lookup(&self, term_tokens: &[String]) -> Vec<DocId> {
        let Some((first, rest)) = term_tokens.split_first() else {
            return Vec::new();
        };
        let mut matched: HashSet<DocId> = match self.postings.get(first) {
            Some(ids) => ids.clone(),
            None => return Vec::new(),
        };
        for token in rest {
            if matched.is_empty() {
                break;
            }
            match self.postings.get(token) {
                Some(ids) => matched.retain(|id| ids.contains(id)),
                None => return Vec::new(),
            }
        }
        let mut ids: Vec<DocId> = matched.into_iter().collect();
        ids.sort_unstable();
        ids
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats { token_count: self.postings.len(), document_count: self.docmap.len() }
    }

    pub fn export_index(&self) -> Postings {
        self.postings.clone()
    }

    pub fn export_docmap(&self) -> DocMap {
        self.docmap.clone()
    }

    /// Replaces the in-memory state with previously persisted postings.
    /// Nothing is re-tokenized.
    pub fn import_data(&mut self, index: &BTreeMap<String, Vec<DocId>>, docmap: &BTreeMap<DocId, String>) {
        self.postings = index
            .iter()
            .map(|(token, ids)| (token.clone(), ids.iter().copied().collect()))
            .collect();
        self.docmap = docmap.iter().map(|(id, content)| (*id, content.clone())).collect();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(words: &[&str]) -> Vec<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    fn built(documents: &[Document], stop: &[&str]) -> InvertedIndex {
        let stopwords: Stopwords = stop.iter().map(|w| w.to_string()).collect();
        let mut index = InvertedIndex::new();
        index.build(documents, &stopwords, &Tokenizer::new());
        index
    }

    #[test]
    fn build_lookup_and_stats() {
        let index = built(
            &[Document::new(1, "The Matrix", "Sci-fi"), Document::new(2, "Matrix Reloaded", "Sci-fi sequel")],
            &["the"],
        );
        assert_eq!(index.lookup(&tokens(&["matrix"])), vec![1, 2]);
        let stats = index.stats();
        assert_eq!(stats.document_count, 2);
        assert!(stats.token_count > 0);
    }

    #[test]
    fn lookup_is_an_intersection() {
        let index = built(&[Document::new(1, "The Matrix", "Sci-fi"), Document::new(2, "Matrix", "Drama")], &["the"]);
        assert_eq!(index.lookup(&tokens(&["matrix", "scifi"])), vec![1]);
    }

    #[test]
    fn unknown_or_empty_terms_match_nothing() {
        let index = built(&[Document::new(1, "Matrix", "Action")], &[]);
        assert!(index.lookup(&[]).is_empty());
        assert!(index.lookup(&tokens(&["missing"])).is_empty());
        assert!(index.lookup(&tokens(&["matrix", "missing"])).is_empty());
        assert!(index.lookup(&tokens(&["missing", "matrix"])).is_empty());
    }

    #[test]
    fn rebuild_discards_previous_state() {
        let mut index = built(&[Document::new(1, "Matrix", "Action")], &[]);
        index.build(&[Document::new(7, "Inception", "Dream")], &Stopwords::new(), &Tokenizer::new());
        assert!(index.lookup(&tokens(&["matrix"])).is_empty());
        assert_eq!(index.stats().document_count, 1);
    }

    #[test]
    fn duplicate_ids_overwrite_content() {
        let index = built(&[Document::new(1, "Matrix", ""), Document::new(1, "Inception", "")], &[]);
        assert_eq!(index.export_docmap().get(&1).map(String::as_str), Some("Inception "));
    }

    #[test]
    fn export_import_roundtrip() {
        let index = built(&[Document::new(10, "Matrix", "Action"), Document::new(3, "Heat", "Action")], &[]);
        let exported: BTreeMap<String, Vec<DocId>> = index
            .export_index()
            .into_iter()
            .map(|(token, ids)| {
                let mut ids: Vec<DocId> = ids.into_iter().collect();
                ids.sort_unstable();
                (token, ids)
            })
            .collect();
        let docmap: BTreeMap<DocId, String> = index.export_docmap().into_iter().collect();

        let mut restored = InvertedIndex::new();
        restored.import_data(&exported, &docmap);
        assert_eq!(restored.lookup(&tokens(&["matrix"])), vec![10]);
        assert_eq!(restored.lookup(&tokens(&["action"])), vec![3, 10]);
        assert_eq!(restored.stats(), index.stats());
    }
}
