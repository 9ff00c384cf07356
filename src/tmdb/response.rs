//! Response decoding for the TMDB `search/movie` endpoint.
//!
//! The host reports transport-level failures (DNS, TLS, refused connection)
//! as a non-2xx status with the error text as body, so every non-2xx status
//! maps to [`SearchError::NetworkFailure`]. Details are logged, never surfaced.

use crate::domain::{Movie, SearchError};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct SearchMoviesResponse {
    results: Vec<Movie>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    status_message: Option<String>,
}

/// Maps an HTTP status and body to a search outcome.
///
/// # Errors
///
/// - [`SearchError::NetworkFailure`] for non-2xx statuses
/// - [`SearchError::DecodeFailure`] for 2xx bodies that are not a search page
pub fn decode_response(status: u16, body: &[u8]) -> Result<Vec<Movie>, SearchError> {
    if !(200..300).contains(&status) {
        let detail = serde_json::from_slice::<ErrorBody>(body)
            .ok()
            .and_then(|b| b.status_message)
            .unwrap_or_else(|| String::from_utf8_lossy(body).chars().take(200).collect());
        tracing::warn!(status, detail = %detail, "TMDB request failed");
        return Err(SearchError::NetworkFailure);
    }

    match serde_json::from_slice::<SearchMoviesResponse>(body) {
        Ok(page) => {
            tracing::debug!(count = page.results.len(), "decoded TMDB search page");
            Ok(page.results)
        }
        Err(e) => {
            tracing::warn!(error = %e, body_len = body.len(), "failed to decode TMDB response");
            Err(SearchError::DecodeFailure)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_search_page() {
        let body = br#"{
            "page": 1,
            "results": [
                {"id": 268, "title": "Batman", "release_date": "1989-06-23", "poster_path": "/b.jpg", "overview": "Gotham"},
                {"id": 414906, "title": "The Batman", "release_date": "", "poster_path": null}
            ],
            "total_pages": 1,
            "total_results": 2
        }"#;
        let movies = decode_response(200, body).unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[0].poster_path.as_deref(), Some("/b.jpg"));
        assert_eq!(movies[1].release_year(), None);
    }

    #[test]
    fn empty_results_are_success() {
        assert_eq!(decode_response(200, br#"{"page":1,"results":[]}"#), Ok(vec![]));
    }

    #[test]
    fn malformed_body_is_decode_failure() {
        assert_eq!(decode_response(200, b"<html>"), Err(SearchError::DecodeFailure));
        assert_eq!(decode_response(200, br#"{"page":1}"#), Err(SearchError::DecodeFailure));
    }

    #[test]
    fn error_status_is_network_failure() {
        let body = br#"{"status_code":7,"status_message":"Invalid API key","success":false}"#;
        assert_eq!(decode_response(401, body), Err(SearchError::NetworkFailure));
        assert_eq!(decode_response(400, b"error sending request"), Err(SearchError::NetworkFailure));
    }
}
