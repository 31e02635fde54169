use regex::Regex;
use rust_stemmers::Algorithm;
use std::borrow::Cow;
use std::collections::HashSet;

/// Lowercased words excluded from tokenization.
pub type Stopwords = HashSet<String>;

/// Reduces an inflected word to its stem.
pub trait Stemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str>;
}

/// Snowball English (Porter2) stemmer backed by `rust-stemmers`.
pub struct PorterStemmer(rust_stemmers::Stemmer);

impl PorterStemmer {
    pub fn new() -> Self {
        Self(rust_stemmers::Stemmer::create(Algorithm::English))
    }
}

impl Default for PorterStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for PorterStemmer {
    fn stem<'a>(&self, word: &'a str) -> Cow<'a, str> {
        self.0.stem(word)
    }
}

/// Text normalizer shared by indexing and ranking. Build one per process
/// and hand it to whichever service needs it.
pub struct Tokenizer<S = PorterStemmer> {
    punctuation: Regex,
    stemmer: S,
}

impl Tokenizer<PorterStemmer> {
    pub fn new() -> Self {
        Self::with_stemmer(PorterStemmer::new())
    }
}

impl Default for Tokenizer<PorterStemmer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Stemmer> Tokenizer<S> {
    pub fn with_stemmer(stemmer: S) -> Self {
        // ASCII punctuation only, so "Spider-Man" and "Spider'Man" both become "spiderman".
        let punctuation = Regex::new(r"[[:punct:]]+").expect("valid regex");
        Self { punctuation, stemmer }
    }

    /// Lowercase, strip punctuation, split on whitespace, drop stopwords, then stem.
    pub fn tokenize(&self, text: &str, stopwords: &Stopwords) -> Vec<String> {
        let lowered = text.to_lowercase();
        let stripped = self.punctuation.replace_all(&lowered, "");
        stripped
            .split_whitespace()
            .filter(|token| !stopwords.contains(*token))
            .map(|token| self.stemmer.stem(token).into_owned())
            .collect()
    }
}
