pub mod config;
pub mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use config::{parse_bm25_param, Settings};
use moviesearch_core::Bm25Config;
use output::Format;
use std::io::Write;

#[derive(Parser, Debug)]
#[command(name = "moviesearch", version)]
#[command(about = "Keyword search over the movie collection", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    /// Log progress to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Rank movies against a query with BM25
    Search {
        query: String,
        /// Maximum number of movies to return
        #[arg(long, default_value_t = 5, allow_negative_numbers = true)]
        limit: i64,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
        /// Term frequency saturation
        #[arg(long, default_value_t = 1.5, value_parser = parse_bm25_param)]
        k1: f64,
        /// Length normalization
        #[arg(long, default_value_t = 0.75, value_parser = parse_bm25_param)]
        b: f64,
    },
    /// Inverted index operations
    Index {
        #[command(subcommand)]
        command: IndexCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum IndexCommand {
    /// Build the inverted index and persist it to the cache directory
    Build,
    /// List ids of movies containing every token of a term
    Lookup {
        term: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show token and document counts of the cached index
    Stats {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

/// Executes one command, writing its output to `out`.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<()> {
    let settings = &cli.settings;
    match &cli.command {
        Commands::Search { query, limit, format, k1, b } => {
            let service = settings.search_service(Bm25Config { k1: *k1, b: *b });
            // Negative limits behave like zero.
            let limit = usize::try_from(*limit).unwrap_or(0);
            let movies = service.search(query, limit)?;
            tracing::info!(query = %query, hits = movies.len(), "search complete");
            output::write_search(out, &movies, *format)?;
        }
        Commands::Index { command } => match command {
            IndexCommand::Build => {
                let mut service = settings.index_service();
                service.build()?;
                service.save()?;
                output::write_build_summary(out, service.stats())?;
            }
            IndexCommand::Lookup { term, format } => {
                let mut service = settings.index_service();
                service.load()?;
                let doc_ids = service.lookup(term)?;
                output::write_lookup(out, &doc_ids, *format)?;
            }
            IndexCommand::Stats { format } => {
                let mut service = settings.index_service();
                service.load()?;
                output::write_stats(out, service.stats(), *format)?;
            }
        },
    }
    Ok(())
}
