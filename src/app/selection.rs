//! Detail-view selection sub-state.
//!
//! Holds a copy of the movie the user drilled into. The copy is taken from the
//! results at selection time, so later searches can replace the list without
//! disturbing an open detail pane and closing it needs no re-fetch.

use crate::domain::{Movie, MovieId};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    current: Option<Movie>,
}

impl Selection {
    /// Selects the movie with `id` out of `results`.
    ///
    /// Returns `false` and leaves the selection untouched when `id` is not
    /// among the results.
    pub fn choose(&mut self, id: MovieId, results: &[Movie]) -> bool {
        match results.iter().find(|m| m.id == id) {
            Some(movie) => {
                self.current = Some(movie.clone());
                true
            }
            None => false,
        }
    }

    /// Clears the selection; returns whether anything was selected.
    pub fn dismiss(&mut self) -> bool {
        self.current.take().is_some()
    }

    #[must_use]
    pub const fn movie(&self) -> Option<&Movie> {
        self.current.as_ref()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.current.is_some()
    }
}
