//! Evaluating many queries against one server at once.

use crate::document::Document;
use crate::error::Result;
use crate::server::SearchServer;
use rayon::prelude::*;

/// Results of each query, in query order. Queries run on the rayon pool; on failure the
/// error of the earliest failing query is returned.
pub fn process_queries<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Vec<Document>>>
where
    S: AsRef<str> + Sync,
{
    let results: Vec<Result<Vec<Document>>> = queries
        .par_iter()
        .map(|query| server.find_top_documents(query.as_ref()))
        .collect();
    results.into_iter().collect()
}

/// All results of [`process_queries`] flattened in query order.
pub fn process_queries_joined<S>(server: &SearchServer, queries: &[S]) -> Result<Vec<Document>>
where
    S: AsRef<str> + Sync,
{
    Ok(process_queries(server, queries)?.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::DocumentStatus;
    use crate::error::SearchError;

    fn server() -> SearchServer {
        let mut server = SearchServer::from_stop_words_text("and with").unwrap();
        let texts = [
            "funny pet and nasty rat",
            "funny pet with curly hair",
            "funny pet and not very nasty rat",
            "pet with rat and rat and rat",
            "nasty rat with curly hair",
        ];
        for (id, text) in texts.iter().enumerate() {
            server.add_document(id as i32 + 1, text, DocumentStatus::Actual, &[1, 2]).unwrap();
        }
        server
    }

    #[test]
    fn preserves_query_order() {
        let server = server();
        let queries = ["nasty rat -not", "not very funny nasty pet", "curly hair"];
        let results = process_queries(&server, &queries).unwrap();
        assert_eq!(results.len(), 3);
        for (query, result) in queries.iter().zip(&results) {
            assert_eq!(result, &server.find_top_documents(query).unwrap());
        }
        assert_eq!(results[0].len(), 3);
        assert_eq!(results[2].len(), 2);

        let joined = process_queries_joined(&server, &queries).unwrap();
        assert_eq!(joined.len(), results.iter().map(Vec::len).sum::<usize>());
        assert_eq!(joined[..3], results[0][..]);
    }

    #[test]
    fn first_error_is_reported() {
        let server = server();
        let err = process_queries(&server, &["rat", "--rat"]).unwrap_err();
        assert_eq!(err, SearchError::InvalidQuery("--rat".into()));
    }
}
