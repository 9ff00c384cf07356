//! Request construction for the TMDB `search/movie` endpoint.

use crate::domain::error::{MarqueeError, Result};
use crate::domain::SearchError;
use std::collections::BTreeMap;

/// Default TMDB v3 API root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// How requests authenticate against TMDB.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// v3 API key, sent as the `api_key` query parameter.
    ApiKey(String),
    /// v4 read access token, sent as a bearer `Authorization` header.
    AccessToken(String),
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ApiKey(_) => f.write_str("ApiKey(<redacted>)"),
            Self::AccessToken(_) => f.write_str("AccessToken(<redacted>)"),
        }
    }
}

/// A fully built HTTP GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmdbRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
}

/// Builds search requests for one TMDB account.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    base_url: String,
    credentials: Credentials,
    language: String,
    include_adult: bool,
}

impl TmdbClient {
    /// Creates a client.
    ///
    /// # Errors
    ///
    /// Returns [`MarqueeError::Config`] when the credential is blank or the
    /// base URL is not http(s).
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self> {
        let secret = match &credentials {
            Credentials::ApiKey(s) | Credentials::AccessToken(s) => s,
        };
        if secret.trim().is_empty() {
            return Err(MarqueeError::Config("TMDB credential is empty".to_string()));
        }

        let base_url = base_url.trim().trim_end_matches('/');
        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(MarqueeError::Config(format!(
                "base_url must start with http:// or https://, got {base_url:?}"
            )));
        }

        Ok(Self {
            base_url: base_url.to_string(),
            credentials,
            language: "en-US".to_string(),
            include_adult: false,
        })
    }

    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    #[must_use]
    pub const fn with_include_adult(mut self, include_adult: bool) -> Self {
        self.include_adult = include_adult;
        self
    }

    /// Builds the request for `query`.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::EmptyQueryRejected`] for blank queries; no
    /// request is issued for them.
    pub fn search_request(&self, query: &str) -> std::result::Result<TmdbRequest, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQueryRejected);
        }

        let mut url = format!(
            "{}/search/movie?query={}&include_adult={}&language={}&page=1",
            self.base_url,
            percent_encode(query),
            self.include_adult,
            percent_encode(&self.language),
        );

        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        match &self.credentials {
            Credentials::ApiKey(key) => {
                url.push_str("&api_key=");
                url.push_str(&percent_encode(key.trim()));
            }
            Credentials::AccessToken(token) => {
                headers.insert("Authorization".to_string(), format!("Bearer {}", token.trim()));
            }
        }

        Ok(TmdbRequest { url, headers })
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(char::from(byte));
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
