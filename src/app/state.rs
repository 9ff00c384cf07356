//! Coordinator state and view model computation.
//!
//! [`AppState`] is the single owner of everything the search coordinator
//! tracks: the raw query text, the debouncer, the result state with its
//! generation counter, the detail selection, and the list cursor. The handler
//! mutates it only through the transition methods below, one event at a time,
//! so none of it needs locking.
//!
//! # Transitions
//!
//! | Method            | Effect                                                    |
//! |-------------------|-----------------------------------------------------------|
//! | `set_query`       | update raw text, restart debounce, result state untouched |
//! | `settle`          | cancel in-flight search; start a new one or go `Idle`     |
//! | `complete`        | fold a result in if its generation is current             |
//! | `choose`/`dismiss`| open or close the detail selection                        |
//! | `teardown`        | silence timers and searches, ignore all later events      |
//!
//! # Example
//!
//! ```rust
//! use marquee::app::AppState;
//! use marquee::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), std::time::Duration::from_millis(500));
//! state.set_query("alien".to_string());
//! assert_eq!(state.query, "alien");
//! let viewmodel = state.compute_viewmodel(24, 80);
//! assert!(viewmodel.detail.is_none());
//! ```

use super::actions::Action;
use super::debounce::{Debouncer, TimerRequest};
use super::search_state::{Generation, SearchResultState};
use super::selection::Selection;
use crate::domain::{Movie, MovieId, SearchError};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, DisplayItem, FooterInfo, HeaderInfo, ResultsBody, SearchBarInfo, StatusMessage,
    UIViewModel,
};
use fuzzy_matcher::skim::SkimMatcherV2;
use std::time::Duration;

/// Rows used by everything except the result list: blank line, header,
/// border, three-line search bar, border, footer, and one spare.
const CHROME_ROWS: usize = 9;

/// Width reserved for the release-year column plus spacing.
const YEAR_COLUMN_WIDTH: usize = 8;

/// Central coordinator state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Raw query text, updated on every keystroke.
    pub query: String,

    /// Outcome of the latest settled query.
    pub result: SearchResultState,

    /// Movie open in the detail pane, if any.
    pub selection: Selection,

    pub debouncer: Debouncer,

    /// Highlighted row within the loaded results.
    pub cursor: usize,

    pub theme: Theme,

    /// Last generation handed to a transport.
    issued: Generation,

    /// Movies of the most recent `Loaded` state. Survives later `Loading`
    /// and `Failed` states so a pick made mid-search still resolves.
    last_loaded: Vec<Movie>,

    torn_down: bool,
}

impl AppState {
    #[must_use]
    pub fn new(theme: Theme, quiet_period: Duration) -> Self {
        Self {
            query: String::new(),
            result: SearchResultState::Idle,
            selection: Selection::default(),
            debouncer: Debouncer::new(quiet_period),
            cursor: 0,
            theme,
            issued: Generation::default(),
            last_loaded: Vec::new(),
            torn_down: false,
        }
    }

    #[must_use]
    pub const fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    /// Generation of the most recently started search.
    #[must_use]
    pub const fn latest_generation(&self) -> Generation {
        self.issued
    }

    /// Records new query text and restarts the quiet period.
    ///
    /// The result state is untouched, so results for the previous settled
    /// query stay visible while the user keeps typing.
    pub fn set_query(&mut self, text: String) -> TimerRequest {
        self.query.clone_from(&text);
        self.debouncer.push(text)
    }

    /// Applies a settled query value.
    ///
    /// Whitespace-only values count as empty. Returns the actions needed to
    /// cancel the superseded search and start the new one.
    pub fn settle(&mut self, value: &str) -> Vec<Action> {
        let mut actions = Vec::with_capacity(2);

        if let Some(stale) = self.result.awaiting() {
            tracing::debug!(generation = %stale, "cancelling superseded search");
            actions.push(Action::CancelSearch { generation: stale });
        }

        let query = value.trim();
        if query.is_empty() {
            tracing::debug!("settled on empty query, clearing results");
            self.result = SearchResultState::Idle;
            self.last_loaded.clear();
            self.cursor = 0;
            return actions;
        }

        self.issued = self.issued.next();
        self.result = SearchResultState::Loading(self.issued);

        tracing::debug!(generation = %self.issued, query_len = query.len(), "starting search");

        actions.push(Action::StartSearch {
            generation: self.issued,
            query: query.to_string(),
        });
        actions
    }

    /// Folds a search outcome into the result state.
    ///
    /// Outcomes for any generation other than the one `Loading` waits on are
    /// dropped, as is `Cancelled`. Returns whether the visible state changed.
    pub fn complete(
        &mut self,
        generation: Generation,
        outcome: std::result::Result<Vec<Movie>, SearchError>,
    ) -> bool {
        if !self.result.accepts(generation) {
            tracing::debug!(
                generation = %generation,
                awaiting = ?self.result.awaiting(),
                "discarding stale search response"
            );
            return false;
        }

        match outcome {
            Ok(movies) => {
                tracing::debug!(generation = %generation, count = movies.len(), "search loaded");
                self.last_loaded.clone_from(&movies);
                self.result = SearchResultState::Loaded(movies);
                self.cursor = 0;
                true
            }
            Err(err) if !err.is_visible() => {
                tracing::debug!(generation = %generation, "search reported cancelled, ignoring");
                false
            }
            Err(err) => {
                tracing::warn!(generation = %generation, error = %err, "search failed");
                self.result = SearchResultState::Failed(err);
                true
            }
        }
    }

    /// Movie under the list cursor.
    #[must_use]
    pub fn highlighted_movie(&self) -> Option<&Movie> {
        self.result.movies().get(self.cursor)
    }

    /// Moves the cursor down one row, wrapping to the top.
    pub fn move_cursor_down(&mut self) -> bool {
        let len = self.result.movies().len();
        if len == 0 {
            return false;
        }
        self.cursor = (self.cursor + 1) % len;
        true
    }

    /// Moves the cursor up one row, wrapping to the bottom.
    pub fn move_cursor_up(&mut self) -> bool {
        let len = self.result.movies().len();
        if len == 0 {
            return false;
        }
        self.cursor = if self.cursor == 0 { len - 1 } else { self.cursor - 1 };
        true
    }

    /// Opens the detail pane for `id`.
    ///
    /// `id` must belong to the most recent `Loaded` list, which stays
    /// selectable while a newer search is loading or after it failed.
    pub fn choose(&mut self, id: MovieId) -> bool {
        self.selection.choose(id, &self.last_loaded)
    }

    pub fn dismiss(&mut self) -> bool {
        self.selection.dismiss()
    }

    /// Stops all pending work and marks the coordinator dead.
    pub fn teardown(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();

        self.debouncer.cancel();
        if let Some(generation) = self.result.awaiting() {
            actions.push(Action::CancelSearch { generation });
        }
        self.result = SearchResultState::Idle;
        self.last_loaded.clear();
        self.selection.dismiss();
        self.torn_down = true;

        actions.push(Action::ClosePlugin);
        actions
    }

    /// Computes a renderable view model for a pane of `rows` x `cols`.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        UIViewModel {
            header: self.compute_header(),
            search_bar: self.compute_search_bar(),
            body: self.compute_body(rows, cols),
            detail: self.selection.movie().map(Self::compute_detail),
            footer: self.compute_footer(),
        }
    }

    fn compute_header(&self) -> HeaderInfo {
        let title = match &self.result {
            SearchResultState::Loaded(movies) => format!(" Movies ({}) ", movies.len()),
            _ => " Movies ".to_string(),
        };
        HeaderInfo { title }
    }

    fn compute_search_bar(&self) -> SearchBarInfo {
        let activity = if self.result.is_loading() {
            Some("searching...".to_string())
        } else if self.debouncer.is_pending() {
            Some("...".to_string())
        } else {
            None
        };

        SearchBarInfo {
            query: self.query.clone(),
            activity,
        }
    }

    /// Picks the results-area content, mirroring the order the checks are
    /// made in: empty query, loading, results, error, no results.
    fn compute_body(&self, rows: usize, cols: usize) -> ResultsBody {
        if self.query.trim().is_empty() {
            return ResultsBody::Message(StatusMessage {
                message: "Enter a keyword to search a movie".to_string(),
                subtitle: "Results appear as you type".to_string(),
                is_error: false,
            });
        }

        match &self.result {
            SearchResultState::Loading(_) => ResultsBody::Message(StatusMessage {
                message: "Searching...".to_string(),
                subtitle: String::new(),
                is_error: false,
            }),
            SearchResultState::Loaded(movies) if !movies.is_empty() => {
                self.compute_list(movies, rows, cols)
            }
            SearchResultState::Failed(err) => ResultsBody::Message(StatusMessage {
                message: err.user_message().to_string(),
                subtitle: String::new(),
                is_error: true,
            }),
            SearchResultState::Loaded(_) => ResultsBody::Message(StatusMessage {
                message: "No results!".to_string(),
                subtitle: String::new(),
                is_error: false,
            }),
            SearchResultState::Idle => ResultsBody::Message(StatusMessage {
                message: String::new(),
                subtitle: String::new(),
                is_error: false,
            }),
        }
    }

    /// Windows the result list around the cursor, keeping the cursor near the
    /// middle and filling the window when close to either end.
    fn compute_list(&self, movies: &[Movie], rows: usize, cols: usize) -> ResultsBody {
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.cursor.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(movies.len());
        if visible_end - visible_start < available_rows && movies.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let matcher = SkimMatcherV2::default();
        let title_width = cols.saturating_sub(YEAR_COLUMN_WIDTH + 2).max(4);

        let items = movies[visible_start..visible_end]
            .iter()
            .enumerate()
            .map(|(offset, movie)| DisplayItem {
                title: truncate_chars(&movie.title, title_width),
                year: movie.release_year().unwrap_or_default(),
                is_selected: visible_start + offset == self.cursor,
                highlight_ranges: self.compute_highlight_ranges(&movie.title, &matcher),
            })
            .collect();

        ResultsBody::List {
            items,
            selected_index: self.cursor.saturating_sub(visible_start),
        }
    }

    /// Coalesces fuzzy-match indices of the query in `text` into
    /// `(start, end)` character ranges.
    fn compute_highlight_ranges(&self, text: &str, matcher: &SkimMatcherV2) -> Vec<(usize, usize)> {
        use fuzzy_matcher::FuzzyMatcher;

        let Some((_score, indices)) = matcher.fuzzy_indices(text, self.query.trim()) else {
            return vec![];
        };

        let mut ranges: Vec<(usize, usize)> = Vec::new();
        for idx in indices {
            match ranges.last_mut() {
                Some((_, end)) if *end == idx => *end = idx + 1,
                _ => ranges.push((idx, idx + 1)),
            }
        }
        ranges
    }

    fn compute_detail(movie: &Movie) -> DetailInfo {
        DetailInfo {
            title: movie.title.clone(),
            release_date: movie.display_release_date(),
            poster_url: movie.poster_url(),
            overview: movie.overview.clone().filter(|o| !o.trim().is_empty()),
        }
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = if self.selection.is_open() {
            "ESC/Backspace: back  Ctrl+c: quit"
        } else if self.result.movies().is_empty() {
            "Type to search  Ctrl+u: clear  ESC: hide  Ctrl+c: quit"
        } else {
            "Type to search  ↑/↓: navigate  Enter: details  ESC: clear  Ctrl+c: quit"
        };

        FooterInfo {
            keybindings: keybindings.to_string(),
        }
    }
}

/// Truncates to `max` characters, ending in "..." when shortened.
fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
