//! Error types for the Marquee plugin.
//!
//! Two kinds of failure live here. [`MarqueeError`] covers plugin plumbing
//! (configuration, themes, trace file I/O, worker payloads) and is propagated with `?` through
//! the crate via the [`Result`] alias. [`SearchError`] is the normalized
//! category a failed search is folded into; it is the only failure type that
//! ever reaches the visible search state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for Marquee plugin operations.
///
/// # Examples
///
/// ```
/// use marquee::domain::MarqueeError;
///
/// fn validate_config() -> Result<(), MarqueeError> {
///     Err(MarqueeError::Config("missing api_key".to_string()))
/// }
/// assert!(validate_config().is_err());
/// ```
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or loading failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// A JSON payload could not be encoded or decoded.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),
}

/// A specialized `Result` type for Marquee operations.
pub type Result<T> = std::result::Result<T, MarqueeError>;

/// Normalized failure category of a single search attempt.
///
/// Transports translate whatever went wrong (HTTP status, socket error,
/// malformed JSON) into one of these variants before the coordinator sees it.
/// `Cancelled` is internal: the coordinator swallows it and it is never shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum SearchError {
    /// The transport refused to run a search for an empty query.
    #[error("empty query rejected")]
    EmptyQueryRejected,

    /// The request never produced a usable response.
    #[error("network failure")]
    NetworkFailure,

    /// A response arrived but its body could not be decoded.
    #[error("decode failure")]
    DecodeFailure,

    /// The request was superseded before it finished.
    #[error("cancelled")]
    Cancelled,
}

impl SearchError {
    /// One-line message shown in the results area for a failed search.
    #[must_use]
    pub const fn user_message(self) -> &'static str {
        match self {
            Self::EmptyQueryRejected => "Type a title to search for movies.",
            Self::NetworkFailure => "Error: couldn't reach the movie database. Keep typing to retry.",
            Self::DecodeFailure => "Error: the movie database sent an unexpected response.",
            Self::Cancelled => "",
        }
    }

    /// Whether this failure should ever be surfaced to the user.
    #[must_use]
    pub const fn is_visible(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}
