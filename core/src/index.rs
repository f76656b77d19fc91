use crate::document::DocId;
use crate::error::{Result, SearchError};
use std::collections::BTreeMap;

/// Term frequency of one term within one document.
pub type TermFreq = f64;
pub type Postings = BTreeMap<DocId, TermFreq>;
pub type WordFreqs = BTreeMap<String, TermFreq>;

static EMPTY_POSTINGS: Postings = BTreeMap::new();
static EMPTY_WORD_FREQS: WordFreqs = BTreeMap::new();

/// Term-major and document-major views of the same postings, always updated together.
#[derive(Debug, Default, Clone)]
pub struct InvertedIndex {
    word_to_document_freqs: BTreeMap<String, Postings>,
    document_to_word_freqs: BTreeMap<DocId, WordFreqs>,
}

impl InvertedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index already stop-word-filtered tokens of a new document.
    pub fn add<S: AsRef<str>>(&mut self, doc_id: DocId, tokens: &[S]) -> Result<()> {
        if self.document_to_word_freqs.contains_key(&doc_id) {
            return Err(SearchError::DuplicateId(doc_id));
        }
        if tokens.is_empty() {
            return Err(SearchError::EmptyDocument(doc_id));
        }

        let mut counts: BTreeMap<&str, u32> = BTreeMap::new();
        for token in tokens {
            *counts.entry(token.as_ref()).or_insert(0) += 1;
        }
        let total = tokens.len() as f64;

        let mut word_freqs = WordFreqs::new();
        for (term, count) in counts {
            let tf = f64::from(count) / total;
            self.word_to_document_freqs
                .entry(term.to_string())
                .or_default()
                .insert(doc_id, tf);
            word_freqs.insert(term.to_string(), tf);
        }
        self.document_to_word_freqs.insert(doc_id, word_freqs);
        Ok(())
    }

    /// Drop every posting of `doc_id`. Absent ids are ignored.
    pub fn remove(&mut self, doc_id: DocId) -> Option<WordFreqs> {
        let word_freqs = self.document_to_word_freqs.remove(&doc_id)?;
        self.unlink_terms(doc_id, word_freqs.keys().map(String::as_str));
        Some(word_freqs)
    }

    /// Drop the term-major postings of `doc_id` for the given terms after the
    /// document-major entry has been taken out.
    pub(crate) fn unlink_terms<'a, I>(&mut self, doc_id: DocId, terms: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for term in terms {
            if let Some(postings) = self.word_to_document_freqs.get_mut(term) {
                postings.remove(&doc_id);
                if postings.is_empty() {
                    self.word_to_document_freqs.remove(term);
                }
            }
        }
    }

    pub(crate) fn take_word_freqs(&mut self, doc_id: DocId) -> Option<WordFreqs> {
        self.document_to_word_freqs.remove(&doc_id)
    }

    pub fn word_frequencies(&self, doc_id: DocId) -> &WordFreqs {
        self.document_to_word_freqs
            .get(&doc_id)
            .unwrap_or(&EMPTY_WORD_FREQS)
    }

    pub fn postings(&self, term: &str) -> &Postings {
        self.word_to_document_freqs
            .get(term)
            .unwrap_or(&EMPTY_POSTINGS)
    }

    pub fn contains_term(&self, term: &str) -> bool {
        self.word_to_document_freqs.contains_key(term)
    }

    pub fn contains_posting(&self, term: &str, doc_id: DocId) -> bool {
        self.postings(term).contains_key(&doc_id)
    }

    pub fn document_count(&self) -> usize {
        self.document_to_word_freqs.len()
    }

    pub fn term_count(&self) -> usize {
        self.word_to_document_freqs.len()
    }

    /// `ln(N / df)`, or `None` for a term no document contains.
    pub fn inverse_document_freq(&self, term: &str) -> Option<f64> {
        let df = self.word_to_document_freqs.get(term)?.len();
        Some((self.document_count() as f64 / df as f64).ln())
    }
}
