//! TMDB search transport.
//!
//! Builds `search/movie` requests and folds raw responses into the
//! `Result<Vec<Movie>, SearchError>` contract the coordinator consumes. The
//! runtime performs the actual HTTP call through the host's `web_request`,
//! so everything here is pure and testable off-host.
//!
//! - [`request`]: credentials, URL construction, query encoding
//! - [`response`]: status and body mapping into search outcomes

pub mod request;
pub mod response;

pub use request::{Credentials, TmdbClient, TmdbRequest, DEFAULT_BASE_URL};
pub use response::decode_response;
