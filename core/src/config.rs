use serde::{Deserialize, Serialize};

pub const MAX_RESULT_DOCUMENT_COUNT: usize = 5;
pub const DEFAULT_SHARD_COUNT: usize = 100;
/// Relevances closer than this are ranked by rating instead.
pub const RELEVANCE_EPSILON: f64 = 1e-6;

/// Tunables of a [`SearchServer`](crate::SearchServer).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Number of documents returned by a top-K query.
    pub max_results: usize,
    /// Lock shards used to accumulate relevance in parallel queries.
    pub shard_count: usize,
    pub relevance_epsilon: f64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: MAX_RESULT_DOCUMENT_COUNT,
            shard_count: DEFAULT_SHARD_COUNT,
            relevance_epsilon: RELEVANCE_EPSILON,
        }
    }
}

impl SearchConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_shard_count(mut self, shard_count: usize) -> Self {
        self.shard_count = shard_count.max(1);
        self
    }
}
