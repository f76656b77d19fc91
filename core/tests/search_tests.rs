use search_core::{DocumentStatus, SearchError, SearchServer};

fn ids(docs: &[search_core::Document]) -> Vec<i32> {
    docs.iter().map(|d| d.id).collect()
}

fn pets() -> SearchServer {
    let mut server = SearchServer::new(["и", "в", "на"]).unwrap();
    let docs = [
        (0, "белый кот и модный ошейник", DocumentStatus::Actual, vec![8, -3]),
        (1, "пушистый кот пушистый хвост", DocumentStatus::Actual, vec![7, 2, 7]),
        (2, "ухоженный пёс выразительные глаза", DocumentStatus::Actual, vec![5, -12, 2, 1]),
        (3, "ухоженный скворец евгений", DocumentStatus::Banned, vec![9]),
    ];
    for (id, text, status, ratings) in docs {
        server.add_document(id, text, status, &ratings).unwrap();
    }
    server
}

#[test]
fn it_ranks_by_tf_idf() {
    let server = pets();
    let hits = server.find_top_documents("пушистый ухоженный кот").unwrap();
    assert_eq!(ids(&hits), vec![1, 0, 2]);
    assert!((hits[0].relevance - 0.866434).abs() < 1e-6);
    assert!((hits[1].relevance - 0.173287).abs() < 1e-6);
    assert!((hits[2].relevance - 0.173287).abs() < 1e-6);
    assert_eq!(hits.iter().map(|d| d.rating).collect::<Vec<_>>(), vec![5, 2, -1]);
}

#[test]
fn it_filters_by_status_and_predicate() {
    let server = pets();
    let banned = server
        .find_top_documents_by_status("пушистый ухоженный кот", DocumentStatus::Banned)
        .unwrap();
    assert_eq!(ids(&banned), vec![3]);
    assert!((banned[0].relevance - 0.231049).abs() < 1e-6);

    let even = server
        .find_top_documents_by("пушистый ухоженный кот", |id, _, _| id % 2 == 0)
        .unwrap();
    assert_eq!(ids(&even), vec![0, 2]);
}

#[test]
fn it_finds_added_document_by_its_term() {
    let mut server = SearchServer::from_stop_words_text("in the").unwrap();
    server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1]).unwrap();
    assert_eq!(ids(&server.find_top_documents("city").unwrap()), vec![42]);
}

#[test]
fn it_never_matches_on_stop_words() {
    let mut server = SearchServer::from_stop_words_text("in the").unwrap();
    server.add_document(42, "cat in the city", DocumentStatus::Actual, &[1]).unwrap();
    assert!(server.find_top_documents("in").unwrap().is_empty());
    assert!(server.find_top_documents("the -dog").unwrap().is_empty());
}

#[test]
fn it_excludes_minus_terms() {
    let server = pets();
    let hits = server.find_top_documents("пушистый ухоженный кот -хвост").unwrap();
    assert_eq!(ids(&hits), vec![0, 2]);
    assert!(server.find_top_documents("-кот").unwrap().is_empty());
}

#[test]
fn it_breaks_relevance_ties_by_rating() {
    let mut server = SearchServer::new(["и", "в", "на"]).unwrap();
    let actual = DocumentStatus::Actual;
    server.add_document(0, "белый кот и модный ошейник", actual, &[8, -3]).unwrap();
    server.add_document(1, "пушистый кот пушистый хвост", actual, &[7, 2, 7]).unwrap();
    let hits = server.find_top_documents("кот").unwrap();
    // both documents contain the term, so idf is zero and rating decides
    assert_eq!(ids(&hits), vec![1, 0]);
    assert!(hits[0].relevance >= hits[1].relevance);
}

#[test]
fn it_removes_documents_idempotently() {
    let mut server = pets();
    server.remove_document(1);
    let after_first = (server.document_count(), server.iter().collect::<Vec<_>>());
    server.remove_document(1);
    assert_eq!(after_first, (server.document_count(), server.iter().collect::<Vec<_>>()));
    assert_eq!(after_first.1, vec![0, 2, 3]);
    assert!(server.word_frequencies(1).is_empty());
    assert!(server.find_top_documents("пушистый").unwrap().is_empty());
}

#[test]
fn it_reports_errors() {
    let mut server = pets();
    assert_eq!(
        server.add_document(-1, "x", DocumentStatus::Actual, &[]),
        Err(SearchError::NegativeId(-1))
    );
    assert_eq!(
        server.find_top_documents("--cat"),
        Err(SearchError::InvalidQuery("--cat".into()))
    );
    assert_eq!(
        server.find_top_documents("кот -"),
        Err(SearchError::InvalidQuery("-".into()))
    );
    assert!(matches!(
        server.find_top_documents("кот\u{1f}"),
        Err(SearchError::InvalidInput(_))
    ));
    assert!(matches!(
        SearchServer::new(["ok", "no\nway"]),
        Err(SearchError::InvalidInput(_))
    ));
    assert_eq!(
        server.document_id(10),
        Err(SearchError::OutOfRange { index: 10, count: 4 })
    );
}

#[test]
fn it_iterates_in_insertion_order() {
    let mut server = SearchServer::default();
    for id in [7, 3, 11, 0] {
        server.add_document(id, "word", DocumentStatus::Actual, &[]).unwrap();
    }
    assert_eq!((&server).into_iter().collect::<Vec<_>>(), vec![7, 3, 11, 0]);
    assert_eq!(server.document_id(1), Ok(3));
}

#[test]
fn it_exposes_word_frequencies() {
    let server = pets();
    let freqs = server.word_frequencies(1);
    assert_eq!(freqs.len(), 3);
    assert_eq!(freqs["пушистый"], 0.5);
    assert_eq!(freqs["хвост"], 0.25);
    assert!(server.word_frequencies(100).is_empty());
}
