use anyhow::Result;
use clap::{Parser, Subcommand};
use search_core::config::{DEFAULT_MAX_RESULT_DOCUMENT_COUNT, DEFAULT_REQUEST_WINDOW};
use search_core::corpus::{load_corpus_file, read_line, read_line_corpus};
use search_core::{DocId, Document, DocumentStatus, SearchConfig, SearchServer};
use serde::Serialize;
use tracing_subscriber::{fmt, EnvFilter};

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(about = "Rank short documents against a query with TF-IDF", long_about = None)]
struct Cli {
    /// Maximum number of documents per result
    #[arg(long, global = true, default_value_t = DEFAULT_MAX_RESULT_DOCUMENT_COUNT)]
    max_results: usize,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Read stop words, a document count, the documents and a query line from stdin
    Stdin,
    /// Search a .json or .jsonl corpus file
    Query {
        #[arg(long)]
        corpus: PathBuf,
        /// Stop words applied before the corpus' own (the only source for .jsonl)
        #[arg(long)]
        stop_words: Option<String>,
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = DocumentStatus::Actual)]
        status: DocumentStatus,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the query words a single document matches
    Match {
        #[arg(long)]
        corpus: PathBuf,
        #[arg(long)]
        stop_words: Option<String>,
        #[arg(long)]
        query: String,
        #[arg(long)]
        id: DocId,
    },
}

#[derive(Serialize)]
struct MatchOutput<'a> {
    document_id: DocId,
    status: DocumentStatus,
    words: &'a [String],
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(io::stderr).init();
    let cli = Cli::parse();
    let config = SearchConfig { max_result_document_count: cli.max_results, request_window: DEFAULT_REQUEST_WINDOW };

    match cli.command {
        Commands::Stdin => run_stdin(config),
        Commands::Query { corpus, stop_words, query, status, json } => {
            let server = load_corpus_file(&corpus, stop_words.as_deref(), config)?;
            let results = server.find_top_documents_with_status(&query, status);
            if json {
                println!("{}", serde_json::to_string_pretty(&results)?);
                Ok(())
            } else {
                print_results(&results)
            }
        }
        Commands::Match { corpus, stop_words, query, id } => {
            let server = load_corpus_file(&corpus, stop_words.as_deref(), config)?;
            run_match(&server, &query, id)
        }
    }
}

fn run_stdin(config: SearchConfig) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let server = read_line_corpus(&mut input, config)?;
    let query = read_line(&mut input)?.unwrap_or_default();
    print_results(&server.find_top_documents(&query))
}

fn run_match(server: &SearchServer, query: &str, id: DocId) -> Result<()> {
    let (words, status) = server.match_document(query, id)?;
    let out = MatchOutput { document_id: id, status, words: &words };
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn print_results(results: &[Document]) -> Result<()> {
    let mut out = BufWriter::new(io::stdout().lock());
    for document in results {
        writeln!(out, "{document}")?;
    }
    out.flush()?;
    tracing::debug!(hits = results.len(), "printed results");
    Ok(())
}
