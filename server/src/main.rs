use anyhow::{Context, Result};
use axum::Router;
use clap::Parser;
use search_core::Index;
use server::{build_app, ServerConfig};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Corpus directory; every file directly inside it is indexed
    #[arg(long, default_value = "./corpus")]
    corpus: PathBuf,
    /// Home page served at / and /index.html
    #[arg(long, default_value = "./home/index.html")]
    home: PathBuf,
    /// Base URL corpus links are redirected to
    #[arg(long, default_value = "https://en.wikipedia.org/wiki/")]
    redirect_base: String,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8000)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    // Absolute, so result identifiers resolve as URL paths.
    let corpus = std::path::absolute(&args.corpus)
        .with_context(|| format!("resolving corpus path {}", args.corpus.display()))?;
    let index = Index::build(&corpus).context("building search index")?;
    let stats = index.stats();
    tracing::info!(num_docs = stats.num_docs, num_terms = stats.num_terms, "index ready");

    let config = ServerConfig::new(&corpus, args.home, args.redirect_base);
    let app: Router = build_app(Arc::new(index), config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
