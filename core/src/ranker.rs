//! TF-IDF relevance accumulation and top-K ordering.

use crate::catalog::DocumentCatalog;
use crate::concurrent_map::ConcurrentMap;
use crate::config::SearchConfig;
use crate::document::{DocId, Document, DocumentStatus, Rating};
use crate::index::InvertedIndex;
use crate::query::Query;
use rayon::prelude::*;
use std::collections::BTreeMap;

/// How a single call distributes its work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExecutionMode {
    #[default]
    Sequential,
    /// Fork/join on the rayon pool for the duration of the call.
    Parallel,
}

pub struct Ranker<'a> {
    index: &'a InvertedIndex,
    catalog: &'a DocumentCatalog,
    config: &'a SearchConfig,
}

impl<'a> Ranker<'a> {
    pub fn new(
        index: &'a InvertedIndex,
        catalog: &'a DocumentCatalog,
        config: &'a SearchConfig,
    ) -> Self {
        Self { index, catalog, config }
    }

    /// The best `max_results` documents for `query` that pass `predicate`.
    pub fn find_top<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        if query.plus_terms.is_empty() {
            return Vec::new();
        }
        let relevance = self.accumulate(query, &predicate);
        self.rank(query, relevance)
    }

    /// [`find_top`](Self::find_top) with plus-terms accumulated on the rayon pool.
    pub fn par_find_top<P>(&self, query: &Query, predicate: P) -> Vec<Document>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        if query.plus_terms.is_empty() {
            return Vec::new();
        }
        let relevance = self.accumulate_par(query, &predicate);
        self.rank(query, relevance)
    }

    /// Drop documents containing a minus-term, then order and truncate the rest.
    fn rank(&self, query: &Query, mut relevance: BTreeMap<DocId, f64>) -> Vec<Document> {
        // exclusion runs on this thread, after accumulation has finished
        for term in &query.minus_terms {
            for doc_id in self.index.postings(term).keys() {
                relevance.remove(doc_id);
            }
        }

        let mut documents: Vec<Document> = relevance
            .into_iter()
            .filter_map(|(id, rel)| {
                let data = self.catalog.get(id)?;
                Some(Document::new(id, rel, data.rating))
            })
            .collect();
        sort_documents(&mut documents, self.config.relevance_epsilon);
        documents.truncate(self.config.max_results);
        documents
    }

    fn accumulate<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        let mut relevance = BTreeMap::new();
        for term in &query.plus_terms {
            let Some(idf) = self.index.inverse_document_freq(term) else {
                continue;
            };
            for (&doc_id, &tf) in self.index.postings(term) {
                if self.admits(doc_id, predicate) {
                    *relevance.entry(doc_id).or_insert(0.0) += tf * idf;
                }
            }
        }
        relevance
    }

    fn accumulate_par<P>(&self, query: &Query, predicate: &P) -> BTreeMap<DocId, f64>
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool + Sync,
    {
        let relevance: ConcurrentMap<DocId, f64> = ConcurrentMap::new(self.config.shard_count);
        query.plus_terms.par_iter().for_each(|term| {
            let Some(idf) = self.index.inverse_document_freq(term) else {
                return;
            };
            for (&doc_id, &tf) in self.index.postings(term) {
                if self.admits(doc_id, predicate) {
                    *relevance.access(doc_id) += tf * idf;
                }
            }
        });
        relevance.merge_to_ordinary_map()
    }

    fn admits<P>(&self, doc_id: DocId, predicate: &P) -> bool
    where
        P: Fn(DocId, DocumentStatus, Rating) -> bool,
    {
        self.catalog
            .get(doc_id)
            .is_some_and(|data| predicate(doc_id, data.status, data.rating))
    }
}

/// Order by relevance descending. Documents within `epsilon` of the first document of
/// their run are tied and ordered by rating descending, then id ascending.
pub fn sort_documents(documents: &mut [Document], epsilon: f64) {
    documents.sort_by(|a, b| b.relevance.total_cmp(&a.relevance).then(a.id.cmp(&b.id)));

    let mut start = 0;
    while start < documents.len() {
        let head = documents[start].relevance;
        let end = documents[start..]
            .iter()
            .position(|d| head - d.relevance >= epsilon)
            .map_or(documents.len(), |offset| start + offset);
        documents[start..end].sort_by(|a, b| b.rating.cmp(&a.rating).then(a.id.cmp(&b.id)));
        start = end;
    }
}
