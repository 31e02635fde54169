//! Data and cache locations, resolved from flags, then environment, then defaults.
//! Relative paths, including the defaults, resolve against the working directory.

use clap::Args;
use moviesearch_core::{
    Bm25Config, Bm25Engine, FileIndexStore, IndexService, JsonDocumentSource, SearchService, StopwordFile, Tokenizer,
};
use std::path::PathBuf;

pub const MOVIES_ENV: &str = "MOVIE_SEARCH_MOVIES";
pub const STOPWORDS_ENV: &str = "MOVIE_SEARCH_STOPWORDS";
pub const CACHE_DIR_ENV: &str = "MOVIE_SEARCH_CACHE_DIR";

#[derive(Args, Debug, Clone)]
pub struct Settings {
    /// Movie collection JSON file, relative to the working directory
    #[arg(long, global = true, env = MOVIES_ENV, default_value = "data/movies.json")]
    pub movies: PathBuf,

    /// Stopword list, one word per line, relative to the working directory
    #[arg(long, global = true, env = STOPWORDS_ENV, default_value = "data/stopwords.txt")]
    pub stopwords: PathBuf,

    /// Directory holding the persisted inverted index, relative to the working directory
    #[arg(long, global = true, env = CACHE_DIR_ENV, default_value = "cache")]
    pub cache_dir: PathBuf,
}

pub type CliSearchService = SearchService<JsonDocumentSource, StopwordFile>;
pub type CliIndexService = IndexService<JsonDocumentSource, StopwordFile, FileIndexStore>;

impl Settings {
    pub fn search_service(&self, bm25: Bm25Config) -> CliSearchService {
        SearchService::new(
            JsonDocumentSource::new(&self.movies),
            StopwordFile::new(&self.stopwords),
            Tokenizer::new(),
            Bm25Engine::new(bm25),
        )
    }

    pub fn index_service(&self) -> CliIndexService {
        IndexService::new(
            JsonDocumentSource::new(&self.movies),
            StopwordFile::new(&self.stopwords),
            FileIndexStore::new(&self.cache_dir),
            Tokenizer::new(),
        )
    }
}

/// Accepts finite, non-negative BM25 parameters.
pub fn parse_bm25_param(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|_| format!("`{raw}` is not a number"))?;
    if !value.is_finite() || value < 0.0 {
        return Err(format!("`{raw}` must be a finite, non-negative number"));
    }
    Ok(value)
}
