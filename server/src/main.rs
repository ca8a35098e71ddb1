use anyhow::Result;
use axum::Router;
use clap::Parser;
use search_core::config::{DEFAULT_MAX_RESULT_DOCUMENT_COUNT, DEFAULT_REQUEST_WINDOW};
use search_core::SearchConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};
use server::build_app_from_corpus;
use tokio::net::TcpListener;

#[derive(Parser)]
struct Args {
    /// Corpus file (.json, or .jsonl with --stop-words)
    #[arg(long, default_value = "./corpus.json")]
    corpus: PathBuf,
    /// Extra stop words, space separated
    #[arg(long)]
    stop_words: Option<String>,
    /// Maximum number of documents per search
    #[arg(long, default_value_t = DEFAULT_MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    /// Number of recent requests kept for no-result statistics
    #[arg(long, default_value_t = DEFAULT_REQUEST_WINDOW)]
    request_window: u64,
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();
    let config = SearchConfig { max_result_document_count: args.max_results, request_window: args.request_window };
    let app: Router = build_app_from_corpus(&args.corpus, args.stop_words.as_deref(), config)?;

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
