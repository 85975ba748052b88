use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use search_core::Index;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build an in-memory TF-IDF index over a corpus directory and inspect it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print document and term counts as JSON
    Stats {
        /// Corpus directory
        #[arg(long)]
        corpus: PathBuf,
    },
    /// Run a query and print matching document paths, best first
    Query {
        /// Corpus directory
        #[arg(long)]
        corpus: PathBuf,
        /// Print at most this many results
        #[arg(long)]
        limit: Option<usize>,
        /// Query text; multiple words are joined with spaces
        #[arg(required = true)]
        query: Vec<String>,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Stats { corpus } => stats(&corpus),
        Commands::Query { corpus, limit, query } => run_query(&corpus, &query.join(" "), limit),
    }
}

fn load(corpus: &Path) -> Result<Index> {
    Index::build(corpus).with_context(|| format!("indexing {}", corpus.display()))
}

fn stats(corpus: &Path) -> Result<()> {
    let index = load(corpus)?;
    println!("{}", serde_json::to_string_pretty(&index.stats())?);
    Ok(())
}

fn run_query(corpus: &Path, query: &str, limit: Option<usize>) -> Result<()> {
    let index = load(corpus)?;
    let results = index.search(query);
    tracing::info!(query, hits = results.len(), "query complete");

    let mut out = io::stdout().lock();
    for path in results.iter().take(limit.unwrap_or(usize::MAX)) {
        writeln!(out, "{path}")?;
    }
    Ok(())
}
