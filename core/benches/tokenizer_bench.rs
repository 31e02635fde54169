use criterion::{criterion_group, criterion_main, Criterion};
use moviesearch_core::{Bm25Engine, Document, Stopwords, Tokenizer};

const TEXT: &str = "A computer hacker learns from mysterious rebels about the true nature of his reality \
and his role in the war against its controllers. Spider-Man's running battles, the runners' dreams.";

fn bench_tokenize(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();
    let stopwords: Stopwords = ["the", "and", "of", "in", "a"].iter().map(|w| w.to_string()).collect();
    c.bench_function("tokenize_paragraph", |b| b.iter(|| tokenizer.tokenize(TEXT, &stopwords)));
}

fn bench_rank(c: &mut Criterion) {
    let tokenizer = Tokenizer::new();
    let stopwords = Stopwords::new();
    let documents: Vec<Document> = (0..500)
        .map(|i| Document::new(i, format!("Movie {i}"), TEXT.repeat((i % 4 + 1) as usize)))
        .collect();
    let corpus: Vec<Vec<String>> = documents.iter().map(|d| tokenizer.tokenize(&d.content(), &stopwords)).collect();
    let query = tokenizer.tokenize("hacker reality war", &stopwords);
    let engine = Bm25Engine::default();
    c.bench_function("bm25_rank_500", |b| b.iter(|| engine.rank(&documents, &corpus, &query, 10)));
}

criterion_group!(benches, bench_tokenize, bench_rank);
criterion_main!(benches);
