//! Detection of documents built from the same set of words.

use crate::document::DocId;
use crate::index::WordFreqs;
use crate::server::SearchServer;
use std::collections::{BTreeSet, HashSet};

/// Ids whose term set (frequencies and order ignored) was already seen earlier in `ids`.
/// The first document with a given term set is never reported.
pub fn find_duplicates<'a, I, F>(ids: I, word_frequencies: F) -> Vec<DocId>
where
    I: IntoIterator<Item = DocId>,
    F: Fn(DocId) -> &'a WordFreqs,
{
    let mut seen: HashSet<BTreeSet<&'a str>> = HashSet::new();
    let mut duplicates = Vec::new();
    for id in ids {
        let terms: BTreeSet<&str> = word_frequencies(id).keys().map(String::as_str).collect();
        if !seen.insert(terms) {
            duplicates.push(id);
        }
    }
    duplicates
}

/// Remove every duplicate document from the server, returning the removed ids in
/// ascending order. Ids are scanned in ascending order, so the lowest id of each group of
/// identical word sets is kept whatever the insertion order was.
pub fn remove_duplicates(server: &mut SearchServer) -> Vec<DocId> {
    let view: &SearchServer = server;
    let mut ids: Vec<DocId> = view.iter().collect();
    ids.sort_unstable();
    let duplicates = find_duplicates(ids, move |id| view.word_frequencies(id));
    for &id in &duplicates {
        tracing::info!(doc_id = id, "found duplicate document");
        server.remove_document(id);
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;

    #[test]
    fn later_copy_is_removed() {
        let mut server = SearchServer::from_stop_words_text("and with").unwrap();
        let docs = [
            (1, "funny pet and nasty rat"),
            (2, "funny pet with curly hair"),
            (3, "funny pet with curly hair"),
            (4, "funny pet and curly hair"),
            (5, "funny funny pet and nasty nasty rat"),
            (6, "funny pet and not very nasty rat"),
            (7, "very nasty rat and not very funny pet"),
            (8, "pet with rat and rat and rat"),
            (9, "nasty rat with curly hair"),
        ];
        for (id, text) in docs {
            server.add_document(id, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        assert_eq!(server.document_count(), 9);

        assert_eq!(remove_duplicates(&mut server), vec![3, 4, 5, 7]);
        assert_eq!(server.document_count(), 5);
        assert_eq!(server.iter().collect::<Vec<_>>(), vec![1, 2, 6, 8, 9]);
        assert!(remove_duplicates(&mut server).is_empty());
    }

    #[test]
    fn lowest_id_is_kept_regardless_of_insertion_order() {
        let mut server = SearchServer::default();
        server.add_document(5, "cat dog", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(2, "dog cat cat", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(9, "bird", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(7, "cat dog dog", DocumentStatus::Actual, &[]).unwrap();

        assert_eq!(remove_duplicates(&mut server), vec![5, 7]);
        assert_eq!(server.iter().collect::<Vec<_>>(), vec![2, 9]);
        assert_eq!(server.document_id(0), Ok(2));
    }

    #[test]
    fn find_duplicates_follows_given_order() {
        let mut server = SearchServer::default();
        server.add_document(1, "a b", DocumentStatus::Actual, &[]).unwrap();
        server.add_document(2, "b a", DocumentStatus::Actual, &[]).unwrap();
        let found = find_duplicates([2, 1], |id| server.word_frequencies(id));
        assert_eq!(found, vec![1]);
    }
}
