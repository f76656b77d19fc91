use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use search_cli::{build_server, load_corpus, run_dedup, run_match, run_queries};
use search_core::{DocId, DocumentStatus, ExecutionMode, SearchConfig};
use std::path::PathBuf;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "search-cli")]
#[command(
    about = "Query an in-memory TF-IDF index built from a JSON/JSONL corpus",
    long_about = None
)]
struct Cli {
    /// Corpus file or directory of .json/.jsonl files
    #[arg(long)]
    input: PathBuf,
    /// Space-separated stop words
    #[arg(long, default_value = "")]
    stop_words: String,
    /// Fail on the first rejected document instead of skipping it
    #[arg(long, default_value_t = false)]
    strict: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the top documents for each query
    Search {
        #[arg(required = true)]
        queries: Vec<String>,
        #[arg(long, value_enum, default_value_t = Status::Actual)]
        status: Status,
        /// Number of documents per query
        #[arg(long, default_value_t = search_core::config::MAX_RESULT_DOCUMENT_COUNT)]
        top: usize,
        /// Lock shards used by parallel queries
        #[arg(long, default_value_t = search_core::config::DEFAULT_SHARD_COUNT)]
        shards: usize,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Print the query terms found in one document
    Match {
        query: String,
        #[arg(long)]
        id: DocId,
        #[arg(long, default_value_t = false)]
        parallel: bool,
    },
    /// Remove documents with identical word sets and print their ids
    Dedup,
}

#[derive(Clone, Copy, ValueEnum)]
enum Status {
    Actual,
    Irrelevant,
    Banned,
    Removed,
}

impl From<Status> for DocumentStatus {
    fn from(s: Status) -> Self {
        match s {
            Status::Actual => DocumentStatus::Actual,
            Status::Irrelevant => DocumentStatus::Irrelevant,
            Status::Banned => DocumentStatus::Banned,
            Status::Removed => DocumentStatus::Removed,
        }
    }
}

fn mode(parallel: bool) -> ExecutionMode {
    if parallel {
        ExecutionMode::Parallel
    } else {
        ExecutionMode::Sequential
    }
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();
    let docs = load_corpus(&cli.input)?;

    match cli.command {
        Commands::Search { queries, status, top, shards, parallel } => {
            let config = SearchConfig::default().with_max_results(top).with_shard_count(shards);
            let server = build_server(&cli.stop_words, config, &docs, cli.strict)?;
            let out = run_queries(&server, &queries, status.into(), mode(parallel))?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Match { query, id, parallel } => {
            let config = SearchConfig::default();
            let server = build_server(&cli.stop_words, config, &docs, cli.strict)?;
            let out = run_match(&server, &query, id, mode(parallel))?;
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Dedup => {
            let config = SearchConfig::default();
            let mut server = build_server(&cli.stop_words, config, &docs, cli.strict)?;
            for id in run_dedup(&mut server) {
                println!("Found duplicate document id {id}");
            }
            tracing::info!(remaining = server.document_count(), "dedup complete");
        }
    }
    Ok(())
}
