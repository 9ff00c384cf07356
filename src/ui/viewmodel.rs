//! View model types representing renderable UI state.
//!
//! View models are computed from `AppState` by `AppState::compute_viewmodel`
//! and consumed by the renderer. They carry display-ready data only: truncated
//! titles, formatted years, highlight ranges, and the one message the results
//! area should show.

/// Complete UI view model for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,
    pub body: ResultsBody,
    /// Present while a movie is open in the detail pane.
    pub detail: Option<DetailInfo>,
    pub footer: FooterInfo,
}

/// What the area below the search bar shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultsBody {
    /// Centered status text (placeholder, loading, no results, error).
    Message(StatusMessage),
    /// Windowed result rows.
    List {
        items: Vec<DisplayItem>,
        /// Index of the highlighted row within `items`.
        selected_index: usize,
    },
}

/// One result row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    pub title: String,
    /// Release year, or an empty string when unknown.
    pub year: String,
    pub is_selected: bool,
    /// Character ranges `(start, end)` of the title matching the query.
    pub highlight_ranges: Vec<(usize, usize)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    pub keybindings: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,
    /// Right-aligned hint: "searching..." while loading, "..." while typing.
    pub activity: Option<String>,
}

/// Centered message with an optional dimmed subtitle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub message: String,
    pub subtitle: String,
    pub is_error: bool,
}

/// Detail pane contents for the selected movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,
    pub release_date: String,
    pub poster_url: Option<String>,
    pub overview: Option<String>,
}
