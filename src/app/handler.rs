//! Event handling: the search coordinator.
//!
//! [`handle_event`] is the only place coordinator state changes. The runtime
//! calls it serially, one event at a time, for keystrokes, fired timers, and
//! search completions alike, so transitions never race. Each call returns
//! whether the UI should re-render and the actions the runtime must execute.
//!
//! # Transitions
//!
//! | State   | Event                         | Actions                          | Next        |
//! |---------|-------------------------------|----------------------------------|-------------|
//! | any     | `QueryChanged`                | `ScheduleDebounce`               | unchanged   |
//! | any     | settled non-empty             | `CancelSearch`?, `StartSearch`   | `Loading`   |
//! | any     | settled empty                 | `CancelSearch`?                  | `Idle`      |
//! | Loading | `SearchCompleted` current     | none                             | `Loaded`/`Failed` |
//! | any     | `SearchCompleted` stale       | none                             | unchanged   |
//! | any     | `MovieChosen` / `Dismiss`     | none                             | unchanged   |
//! | any     | `Teardown`                    | `CancelSearch`?, `ClosePlugin`   | torn down   |
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{handle_event, Action, AppState, Event};
//! use marquee::ui::Theme;
//!
//! let mut state = AppState::new(Theme::default(), std::time::Duration::from_millis(500));
//! let (_render, actions) = handle_event(&mut state, &Event::QueryChanged("batman".into()))?;
//! assert!(matches!(actions[0], Action::ScheduleDebounce { .. }));
//! # Ok::<(), marquee::MarqueeError>(())
//! ```

use super::actions::Action;
use super::search_state::Generation;
use super::state::AppState;
use crate::domain::error::Result;
use crate::domain::{Movie, MovieId, SearchError};

/// Events fed into the coordinator by the presentation layer and the runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The query text changed; carries the full new text.
    QueryChanged(String),

    /// A debounce timer scheduled via [`Action::ScheduleDebounce`] fired.
    DebounceElapsed,

    /// A transport finished the search started for `generation`.
    SearchCompleted {
        generation: Generation,
        outcome: std::result::Result<Vec<Movie>, SearchError>,
    },

    /// The user opened a result in the detail pane.
    MovieChosen(MovieId),

    /// The user closed the detail pane.
    Dismiss,

    /// Highlight the next result row.
    CursorDown,

    /// Highlight the previous result row.
    CursorUp,

    /// Hide the plugin pane.
    Close,

    /// Shut the coordinator down for good.
    Teardown,
}

impl Event {
    const fn name(&self) -> &'static str {
        match self {
            Self::QueryChanged(_) => "QueryChanged",
            Self::DebounceElapsed => "DebounceElapsed",
            Self::SearchCompleted { .. } => "SearchCompleted",
            Self::MovieChosen(_) => "MovieChosen",
            Self::Dismiss => "Dismiss",
            Self::CursorDown => "CursorDown",
            Self::CursorUp => "CursorUp",
            Self::Close => "Close",
            Self::Teardown => "Teardown",
        }
    }
}

/// Processes one event, mutates state, and returns `(should_render, actions)`.
///
/// After [`Event::Teardown`] every event is ignored: nothing renders and no
/// actions are produced, so late timers and responses reach nothing.
///
/// # Errors
///
/// Currently infallible; the `Result` leaves room for transitions that
/// validate runtime input.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event.name()).entered();

    if state.is_torn_down() {
        tracing::debug!("coordinator torn down, dropping event");
        return Ok((false, vec![]));
    }

    match event {
        Event::QueryChanged(text) => {
            let timer = state.set_query(text.clone());
            tracing::trace!(query = %state.query, epoch = timer.epoch, "query updated");
            Ok((
                true,
                vec![Action::ScheduleDebounce {
                    epoch: timer.epoch,
                    after: timer.after,
                }],
            ))
        }
        Event::DebounceElapsed => match state.debouncer.timer_fired() {
            Some(settled) => {
                tracing::debug!(query_len = settled.len(), "query settled");
                Ok((true, state.settle(&settled)))
            }
            None => Ok((false, vec![])),
        },
        Event::SearchCompleted {
            generation,
            outcome,
        } => {
            let changed = state.complete(*generation, outcome.clone());
            Ok((changed, vec![]))
        }
        Event::MovieChosen(id) => {
            if state.choose(*id) {
                tracing::debug!(movie_id = id, "movie selected");
                Ok((true, vec![]))
            } else {
                tracing::debug!(movie_id = id, "ignoring selection of movie not in results");
                Ok((false, vec![]))
            }
        }
        Event::Dismiss => Ok((state.dismiss(), vec![])),
        Event::CursorDown => Ok((state.move_cursor_down(), vec![])),
        Event::CursorUp => Ok((state.move_cursor_up(), vec![])),
        Event::Close => Ok((false, vec![Action::HidePlugin])),
        Event::Teardown => {
            tracing::debug!("tearing down coordinator");
            Ok((false, state.teardown()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::search_state::SearchResultState;
    use crate::ui::Theme;
    use std::time::Duration;

    fn state() -> AppState {
        AppState::new(Theme::default(), Duration::from_millis(500))
    }

    fn send(state: &mut AppState, event: Event) -> (bool, Vec<Action>) {
        handle_event(state, &event).unwrap()
    }

    #[test]
    fn query_change_only_schedules_debounce() {
        let mut state = state();
        let (render, actions) = send(&mut state, Event::QueryChanged("al".into()));
        assert!(render);
        assert_eq!(
            actions,
            vec![Action::ScheduleDebounce { epoch: 1, after: Duration::from_millis(500) }]
        );
        assert_eq!(state.result, SearchResultState::Idle);
    }

    #[test]
    fn query_change_keeps_loaded_results_visible() {
        let mut state = state();
        send(&mut state, Event::QueryChanged("heat".into()));
        send(&mut state, Event::DebounceElapsed);
        send(
            &mut state,
            Event::SearchCompleted { generation: Generation::new(1), outcome: Ok(vec![Movie::new(949, "Heat")]) },
        );
        send(&mut state, Event::QueryChanged("heat 1".into()));
        assert_eq!(state.result.movies().len(), 1);
        assert_eq!(state.query, "heat 1");
    }

    #[test]
    fn stale_timer_does_not_render() {
        let mut state = state();
        send(&mut state, Event::QueryChanged("a".into()));
        send(&mut state, Event::QueryChanged("ab".into()));
        assert_eq!(send(&mut state, Event::DebounceElapsed), (false, vec![]));
        let (render, actions) = send(&mut state, Event::DebounceElapsed);
        assert!(render);
        assert_eq!(
            actions,
            vec![Action::StartSearch { generation: Generation::new(1), query: "ab".into() }]
        );
    }

    #[test]
    fn failure_of_current_generation_is_recorded() {
        let mut state = state();
        send(&mut state, Event::QueryChanged("xyz".into()));
        send(&mut state, Event::DebounceElapsed);
        let (render, _) = send(
            &mut state,
            Event::SearchCompleted {
                generation: Generation::new(1),
                outcome: Err(SearchError::DecodeFailure),
            },
        );
        assert!(render);
        assert_eq!(state.result, SearchResultState::Failed(SearchError::DecodeFailure));
    }

    #[test]
    fn choosing_unknown_movie_is_ignored() {
        let mut state = state();
        assert_eq!(send(&mut state, Event::MovieChosen(7)), (false, vec![]));
        assert!(!state.selection.is_open());
    }

    #[test]
    fn dismiss_without_selection_does_not_render() {
        let mut state = state();
        assert_eq!(send(&mut state, Event::Dismiss), (false, vec![]));
    }

    #[test]
    fn close_hides_without_teardown() {
        let mut state = state();
        assert_eq!(send(&mut state, Event::Close), (false, vec![Action::HidePlugin]));
        assert!(!state.is_torn_down());
    }

    #[test]
    fn events_after_teardown_are_dropped() {
        let mut state = state();
        send(&mut state, Event::QueryChanged("alien".into()));
        let (_, actions) = send(&mut state, Event::Teardown);
        assert_eq!(actions, vec![Action::ClosePlugin]);

        assert_eq!(send(&mut state, Event::DebounceElapsed), (false, vec![]));
        assert_eq!(send(&mut state, Event::QueryChanged("x".into())), (false, vec![]));
        assert_eq!(state.result, SearchResultState::Idle);
    }
}
