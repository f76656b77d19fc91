pub mod batch;
pub mod catalog;
pub mod concurrent_map;
pub mod config;
pub mod dedup;
pub mod document;
pub mod error;
pub mod index;
pub mod query;
pub mod ranker;
pub mod server;
pub mod stop_words;
pub mod tokenizer;

pub use batch::{process_queries, process_queries_joined};
pub use config::SearchConfig;
pub use dedup::remove_duplicates;
pub use document::{DocId, Document, DocumentStatus, Rating};
pub use error::{Result, SearchError};
pub use ranker::ExecutionMode;
pub use server::{MatchDocumentResult, SearchServer};
