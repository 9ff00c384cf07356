//! Search result state and generation tokens.
//!
//! Exactly one [`SearchResultState`] variant holds at a time. `Loading` carries
//! the generation of the request it waits for, so "one outstanding request for
//! the current generation" holds by construction and a completion is current
//! only if it matches that generation.

use crate::domain::{Movie, SearchError};

/// Monotonic token identifying one search attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// The generation that supersedes this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for Generation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Generation {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

/// Observable outcome of the latest settled query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SearchResultState {
    /// No query typed, or the query was cleared.
    #[default]
    Idle,
    /// A search is in flight for the given generation.
    Loading(Generation),
    /// The last completed search succeeded.
    Loaded(Vec<Movie>),
    /// The last completed search failed.
    Failed(SearchError),
}

impl SearchResultState {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading(_))
    }

    /// Generation this state is waiting on, if any.
    #[must_use]
    pub const fn awaiting(&self) -> Option<Generation> {
        match self {
            Self::Loading(generation) => Some(*generation),
            _ => None,
        }
    }

    /// Whether a completion tagged `generation` may change this state.
    #[must_use]
    pub fn accepts(&self, generation: Generation) -> bool {
        self.awaiting() == Some(generation)
    }

    /// Movies of the last successful search; empty in every other state.
    #[must_use]
    pub fn movies(&self) -> &[Movie] {
        match self {
            Self::Loaded(movies) => movies,
            _ => &[],
        }
    }

    #[must_use]
    pub const fn error(&self) -> Option<SearchError> {
        match self {
            Self::Failed(err) => Some(*err),
            _ => None,
        }
    }
}
