//! Text and JSON rendering for command results.

use clap::ValueEnum;
use moviesearch_core::{DocId, Document, IndexStats};
use std::io::{self, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Text,
    Json,
}

pub fn write_search(out: &mut impl Write, movies: &[Document], format: Format) -> io::Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string(movies)?),
        Format::Text if movies.is_empty() => writeln!(out, "No results found."),
        Format::Text => {
            for movie in movies {
                writeln!(out, "{}: {}", movie.id, movie.title)?;
            }
            Ok(())
        }
    }
}

pub fn write_lookup(out: &mut impl Write, doc_ids: &[DocId], format: Format) -> io::Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string(doc_ids)?),
        Format::Text if doc_ids.is_empty() => writeln!(out, "No documents found."),
        Format::Text => {
            for id in doc_ids {
                writeln!(out, "{id}")?;
            }
            Ok(())
        }
    }
}

pub fn write_stats(out: &mut impl Write, stats: IndexStats, format: Format) -> io::Result<()> {
    match format {
        Format::Json => writeln!(out, "{}", serde_json::to_string(&stats)?),
        Format::Text => {
            writeln!(out, "Documents: {}", stats.document_count)?;
            writeln!(out, "Tokens: {}", stats.token_count)
        }
    }
}

pub fn write_build_summary(out: &mut impl Write, stats: IndexStats) -> io::Result<()> {
    writeln!(out, "Indexed {} documents across {} tokens.", stats.document_count, stats.token_count)
}
