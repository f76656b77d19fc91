use crate::document::{DocId, DocumentStatus, Rating};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentData {
    pub rating: Rating,
    pub status: DocumentStatus,
}

/// Per-document metadata plus the insertion order of live ids.
#[derive(Debug, Default, Clone)]
pub struct DocumentCatalog {
    documents: HashMap<DocId, DocumentData>,
    ids: Vec<DocId>,
}

impl DocumentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false and leaves the catalog untouched when `id` is already present.
    pub fn insert(&mut self, id: DocId, rating: Rating, status: DocumentStatus) -> bool {
        if self.documents.contains_key(&id) {
            return false;
        }
        self.documents.insert(id, DocumentData { rating, status });
        self.ids.push(id);
        true
    }

    pub fn remove(&mut self, id: DocId) -> Option<DocumentData> {
        let data = self.documents.remove(&id)?;
        if let Some(pos) = self.ids.iter().position(|&x| x == id) {
            self.ids.remove(pos);
        }
        Some(data)
    }

    pub fn get(&self, id: DocId) -> Option<&DocumentData> {
        self.documents.get(&id)
    }

    pub fn contains(&self, id: DocId) -> bool {
        self.documents.contains_key(&id)
    }

    /// Live ids in insertion order.
    pub fn ids(&self) -> &[DocId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
