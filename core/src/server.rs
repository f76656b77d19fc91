use crate::catalog::DocumentCatalog;
use crate::config::SearchConfig;
use crate::document::{average_rating, DocId, Document, DocumentStatus, Rating};
use crate::error::{Result, SearchError};
use crate::index::{InvertedIndex, WordFreqs};
use crate::query::Query;
use crate::ranker::{ExecutionMode, Ranker};
use crate::stop_words::StopWordSet;
use crate::tokenizer::tokenize;
use rayon::prelude::*;
use std::iter::Copied;
use std::slice;

/// Terms of a query found in one document, with the document's status.
pub type MatchDocumentResult = (Vec<String>, DocumentStatus);

/// In-memory full-text search engine. Each instance owns all of its state.
///
/// Mutation needs `&mut self`; queries take `&self` and may run concurrently with each other.
#[derive(Debug, Clone, Default)]
pub struct SearchServer {
    stop_words: StopWordSet,
    index: InvertedIndex,
    catalog: DocumentCatalog,
    config: SearchConfig,
}

impl SearchServer {
    pub fn new<I, S>(stop_words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::with_config(stop_words, SearchConfig::default())
    }

    pub fn with_config<I, S>(stop_words: I, config: SearchConfig) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(Self::from_parts(StopWordSet::build(stop_words)?, config))
    }

    /// Build from space-delimited stop words, e.g. `"and in on"`.
    pub fn from_stop_words_text(text: &str) -> Result<Self> {
        Ok(Self::from_parts(StopWordSet::parse(text)?, SearchConfig::default()))
    }

    pub fn from_parts(stop_words: StopWordSet, config: SearchConfig) -> Self {
        Self {
            stop_words,
            index: InvertedIndex::new(),
            catalog: DocumentCatalog::new(),
            config,
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn stop_words(&self) -> &StopWordSet {
        &self.stop_words
    }

    /// Index a document. All validation happens before anything is stored.
    pub fn add_document(
        &mut self,
        doc_id: DocId,
        text: &str,
        status: DocumentStatus,
        ratings: &[Rating],
    ) -> Result<()> {
        if doc_id < 0 {
            return Err(SearchError::NegativeId(doc_id));
        }
        if self.catalog.contains(doc_id) {
            return Err(SearchError::DuplicateId(doc_id));
        }
        let words = self.split_into_words_no_stop(text)?;
        self.index.add(doc_id, &words)?;
        self.catalog.insert(doc_id, average_rating(ratings), status);
        tracing::debug!(
            doc_id,
            terms = self.index.word_frequencies(doc_id).len(),
            "document added"
        );
        Ok(())
    }

    fn split_into_words_no_stop<'t>(&self, text: &'t str) -> Result<Vec<&'t str>> {
        Ok(tokenize(text)?
            .into_iter()
            .filter(|word| !self.stop_words.contains(word))
            .collect())
    }

    pub fn remove_document(&mut self, doc_id: DocId) {
        self.remove_document_with(ExecutionMode::Sequential, doc_id);
    }

    /// Remove a document; absent ids are a no-op. In parallel mode the document's own
    /// term list is collected on the rayon pool before postings are unlinked.
    pub fn remove_document_with(&mut self, mode: ExecutionMode, doc_id: DocId) {
        if self.catalog.remove(doc_id).is_none() {
            return;
        }
        match mode {
            ExecutionMode::Sequential => {
                self.index.remove(doc_id);
            }
            ExecutionMode::Parallel => {
                if let Some(word_freqs) = self.index.take_word_freqs(doc_id) {
                    let terms: Vec<&str> =
                        word_freqs.par_iter().map(|(term, _)| term.as_str()).collect();
                    self.index.unlink_terms(doc_id, terms);
                }
            }
        }
        tracing::debug!(doc_id, ?mode, "document removed");
    }

    pub fn parse_query(&self, raw_query: &str) -> Result<Query> {
        Query::parse(raw_query, &self.stop_words)
    }

    /// Top documents with status [`DocumentStatus::Actual`].
    pub fn find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_by_status(raw_query, DocumentStatus::Actual)
    }

    pub fn find_top_documents_by_status(
        &self,
        raw_query: &str,
        status: DocumentStatus,
    ) -> Result<Vec<Document>> {
        self.find_top_documents_by(raw_query, move |_, s, _| s == status)
    }

    /// Rank documents passing `predicate` on the calling thread.
    pub fn find_top_documents_by<P>(&self, raw_query: &str, predicate: P) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let query = self.parse_query(raw_query)?;
        let documents = self.ranker().find_top(&query, predicate);
        self.log_query(&query, documents.len(), ExecutionMode::Sequential);
        Ok(documents)
    }

    pub fn par_find_top_documents(&self, raw_query: &str) -> Result<Vec<Document>> {
        self.find_top_documents_with(ExecutionMode::Parallel, raw_query, |_, s, _| {
            s == DocumentStatus::Actual
        })
    }

    /// Rank documents passing `predicate`. Output is the same in both execution modes;
    /// the predicate must be `Sync` since parallel mode calls it from worker threads.
    pub fn find_top_documents_with<P>(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        predicate: P,
    ) -> Result<Vec<Document>>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        match mode {
            ExecutionMode::Sequential => self.find_top_documents_by(raw_query, predicate),
            ExecutionMode::Parallel => {
                let query = self.parse_query(raw_query)?;
                let documents = self.ranker().par_find_top(&query, predicate);
                self.log_query(&query, documents.len(), mode);
                Ok(documents)
            }
        }
    }

    fn ranker(&self) -> Ranker<'_> {
        Ranker::new(&self.index, &self.catalog, &self.config)
    }

    fn log_query(&self, query: &Query, hits: usize, mode: ExecutionMode) {
        tracing::debug!(
            plus = query.plus_terms.len(),
            minus = query.minus_terms.len(),
            hits,
            ?mode,
            "query evaluated"
        );
    }

    pub fn match_document(
        &self,
        raw_query: &str,
        doc_id: DocId,
    ) -> Result<Option<MatchDocumentResult>> {
        self.match_document_with(ExecutionMode::Sequential, raw_query, doc_id)
    }

    /// Plus-terms of the query present in the document, sorted; empty if any minus-term
    /// is present. `None` when the id is unknown.
    pub fn match_document_with(
        &self,
        mode: ExecutionMode,
        raw_query: &str,
        doc_id: DocId,
    ) -> Result<Option<MatchDocumentResult>> {
        let query = self.parse_query(raw_query)?;
        let Some(data) = self.catalog.get(doc_id) else {
            return Ok(None);
        };
        let has_term = |term: &String| self.index.contains_posting(term, doc_id);

        let matched = match mode {
            ExecutionMode::Sequential => {
                if query.minus_terms.iter().any(has_term) {
                    Vec::new()
                } else {
                    query.plus_terms.iter().filter(|&t| has_term(t)).cloned().collect()
                }
            }
            ExecutionMode::Parallel => {
                if query.minus_terms.par_iter().any(has_term) {
                    Vec::new()
                } else {
                    let mut words: Vec<String> =
                        query.plus_terms.par_iter().filter(|&t| has_term(t)).cloned().collect();
                    words.par_sort_unstable();
                    words.dedup();
                    words
                }
            }
        };
        Ok(Some((matched, data.status)))
    }

    pub fn document_count(&self) -> usize {
        self.catalog.len()
    }

    /// Id of the document at `index` in insertion order.
    pub fn document_id(&self, index: usize) -> Result<DocId> {
        self.catalog.ids().get(index).copied().ok_or(SearchError::OutOfRange {
            index,
            count: self.catalog.len(),
        })
    }

    pub fn word_frequencies(&self, doc_id: DocId) -> &WordFreqs {
        self.index.word_frequencies(doc_id)
    }

    /// Live ids in insertion order.
    pub fn iter(&self) -> Copied<slice::Iter<'_, DocId>> {
        self.catalog.ids().iter().copied()
    }
}

impl<'a> IntoIterator for &'a SearchServer {
    type Item = DocId;
    type IntoIter = Copied<slice::Iter<'a, DocId>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
