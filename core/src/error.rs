use crate::document::DocId;

pub type Result<T> = std::result::Result<T, SearchError>;

/// Errors reported by the search engine. None of them leave the index partially mutated.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Text, query or stop word contains a control character.
    #[error("invalid input: {0:?} contains a control character")]
    InvalidInput(String),
    /// Malformed minus-term in a query.
    #[error("invalid query term {0:?}")]
    InvalidQuery(String),
    #[error("document id {0} is negative")]
    NegativeId(DocId),
    #[error("document id {0} is already indexed")]
    DuplicateId(DocId),
    /// Nothing left to index once stop words are removed.
    #[error("document {0} has no indexable terms")]
    EmptyDocument(DocId),
    #[error("position {index} is out of range for {count} documents")]
    OutOfRange { index: usize, count: usize },
}
