//! Okapi BM25 ranking over a tokenized corpus.
//!
//! For each query token with a non-zero document frequency:
//!
//! ```text
//! idf   = ln((N - df + 0.5) / (df + 0.5) + 1)
//! score += idf * tf * (k1 + 1) / (tf + k1 * (1 - b + b * dl / avgdl))
//! ```
//!
//! Statistics are recomputed on every call; nothing is cached.

use crate::document::{Document, SearchResult};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bm25Config {
    /// Term frequency saturation.
    pub k1: f64,
    /// Length normalization strength.
    pub b: f64,
}

impl Default for Bm25Config {
    fn default() -> Self {
        Self { k1: 1.5, b: 0.75 }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Bm25Engine {
    config: Bm25Config,
}

impl Bm25Engine {
    pub fn new(config: Bm25Config) -> Self {
        Self { config }
    }

    pub fn config(&self) -> Bm25Config {
        self.config
    }

    /// Ranks `documents` against `query_tokens`. `corpus_tokens[i]` holds the
    /// tokens of `documents[i]`. Results are ordered by descending score, ties
    /// by ascending id, and only documents with a positive score are kept.
    pub fn rank(
        &self,
        documents: &[Document],
        corpus_tokens: &[Vec<String>],
        query_tokens: &[String],
        limit: usize,
    ) -> Vec<SearchResult> {
        if limit == 0 || documents.is_empty() || query_tokens.is_empty() || corpus_tokens.is_empty() {
            return Vec::new();
        }

        let total_len: usize = corpus_tokens.iter().map(Vec::len).sum();
        let avgdl = total_len as f64 / corpus_tokens.len() as f64;
        if avgdl == 0.0 {
            tracing::debug!("corpus has no tokens, nothing to rank");
            return Vec::new();
        }

        let n = documents.len() as f64;
        let df = document_frequencies(corpus_tokens, query_tokens);
        let Bm25Config { k1, b } = self.config;

        let mut scored: Vec<SearchResult> = Vec::new();
        for (doc, tokens) in documents.iter().zip(corpus_tokens) {
            let doc_len = tokens.len() as f64;
            let mut tf: HashMap<&str, usize> = HashMap::new();
            for token in tokens {
                *tf.entry(token.as_str()).or_insert(0) += 1;
            }

            let mut score = 0.0;
            for token in query_tokens {
                let df_t = df.get(token.as_str()).copied().unwrap_or(0);
                if df_t == 0 {
                    continue;
                }
                let df_t = df_t as f64;
                let idf = ((n - df_t + 0.5) / (df_t + 0.5) + 1.0).ln();
                let tf_t = tf.get(token.as_str()).copied().unwrap_or(0) as f64;
                let denom = tf_t + k1 * (1.0 - b + b * doc_len / avgdl);
                if denom > 0.0 {
                    score += idf * tf_t * (k1 + 1.0) / denom;
                }
            }
            if score > 0.0 {
                scored.push(SearchResult { document: doc.clone(), score });
            }
        }

        scored.sort_by(|lhs, rhs| {
            rhs.score
                .total_cmp(&lhs.score)
                .then_with(|| lhs.document.id.cmp(&rhs.document.id))
        });
        tracing::debug!(candidates = documents.len(), hits = scored.len(), limit, "ranked corpus");
        scored.truncate(limit);
        scored
    }
}

/// Number of documents containing each distinct query token.
fn document_frequencies<'q>(corpus_tokens: &[Vec<String>], query_tokens: &'q [String]) -> HashMap<&'q str, usize> {
    let distinct: HashSet<&str> = query_tokens.iter().map(String::as_str).collect();
    let mut df: HashMap<&str, usize> = HashMap::new();
    for tokens in corpus_tokens {
        let present: HashSet<&str> = tokens.iter().map(String::as_str).collect();
        for token in &distinct {
            if present.contains(token) {
                *df.entry(*token).or_insert(0) += 1;
            }
        }
    }
    df
}
