//! Domain layer for the Marquee plugin.
//!
//! Core types shared by the coordinator, the transports, and the UI, kept free
//! of Zellij APIs.
//!
//! - [`error`]: crate error type, result alias, and search failure categories
//! - [`movie`]: the `Movie` search hit

pub mod error;
pub mod movie;

pub use error::{MarqueeError, Result, SearchError};
pub use movie::{Movie, MovieId};
