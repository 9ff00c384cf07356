//! End-to-end coordinator scenarios.
//!
//! The harness plays the host: it records scheduled timers and started
//! searches, fires timers on demand and delivers search outcomes in any
//! order the test chooses.

use marquee::app::{handle_event, Action, AppState, Event, Generation, SearchResultState};
use marquee::domain::{Movie, SearchError};
use marquee::ui::{ResultsBody, Theme};
use marquee::worker::Catalog;
use std::time::Duration;

#[derive(Default)]
struct Host {
    pending_timers: usize,
    started: Vec<(Generation, String)>,
    cancelled: Vec<Generation>,
    hidden: bool,
    closed: bool,
}

struct Harness {
    state: AppState,
    host: Host,
}

impl Harness {
    fn new() -> Self {
        Self {
            state: AppState::new(Theme::default(), Duration::from_millis(500)),
            host: Host::default(),
        }
    }

    fn send(&mut self, event: Event) -> bool {
        let (render, actions) = handle_event(&mut self.state, &event).unwrap();
        for action in actions {
            match action {
                Action::ScheduleDebounce { .. } => self.host.pending_timers += 1,
                Action::StartSearch { generation, query } => self.host.started.push((generation, query)),
                Action::CancelSearch { generation } => self.host.cancelled.push(generation),
                Action::HidePlugin => self.host.hidden = true,
                Action::ClosePlugin => self.host.closed = true,
            }
        }
        render
    }

    fn type_query(&mut self, text: &str) {
        self.send(Event::QueryChanged(text.to_string()));
    }

    /// Fires every scheduled timer in order, as the host would after the
    /// quiet period.
    fn elapse(&mut self) {
        while self.host.pending_timers > 0 {
            self.host.pending_timers -= 1;
            self.send(Event::DebounceElapsed);
        }
    }

    fn settle(&mut self, text: &str) {
        self.type_query(text);
        self.elapse();
    }

    fn respond(&mut self, generation: Generation, outcome: Result<Vec<Movie>, SearchError>) -> bool {
        self.send(Event::SearchCompleted { generation, outcome })
    }

    fn last_started(&self) -> (Generation, String) {
        self.host.started.last().cloned().expect("a search was started")
    }

    /// Answers the newest search from the offline catalog.
    fn answer_from_catalog(&mut self) {
        let (generation, query) = self.last_started();
        let outcome = Catalog::default().search(&query);
        self.respond(generation, outcome);
    }
}

fn movies(titles: &[&str]) -> Vec<Movie> {
    titles
        .iter()
        .enumerate()
        .map(|(i, title)| Movie::new(i as u64 + 1, *title))
        .collect()
}

#[test]
fn typing_bat_then_batman_fires_one_search() {
    let mut h = Harness::new();
    h.type_query("bat");
    h.type_query("batman");
    h.elapse();

    assert_eq!(h.host.started, vec![(Generation::new(1), "batman".to_string())]);
    assert!(h.state.result.is_loading());

    h.answer_from_catalog();
    let loaded = h.state.result.movies();
    assert!(!loaded.is_empty());
    assert!(loaded.iter().all(|m| m.title.to_lowercase().contains("bat")));
}

#[test]
fn burst_of_edits_settles_once_on_last_value() {
    let mut h = Harness::new();
    for text in ["a", "al", "ali", "alie", "alien"] {
        h.type_query(text);
    }
    h.elapse();

    assert_eq!(h.host.started.len(), 1);
    assert_eq!(h.last_started().1, "alien");
}

#[test]
fn failure_is_fully_replaced_by_next_success() {
    let mut h = Harness::new();
    h.settle("xyz");
    let (g1, _) = h.last_started();
    h.respond(g1, Err(SearchError::NetworkFailure));
    assert_eq!(h.state.result, SearchResultState::Failed(SearchError::NetworkFailure));

    h.settle("movie");
    let (g2, _) = h.last_started();
    h.respond(g2, Ok(movies(&["Movie 43", "Scary Movie"])));

    assert_eq!(h.state.result.movies().len(), 2);
    assert_eq!(h.state.result.error(), None);
    assert!(matches!(
        h.state.compute_viewmodel(24, 80).body,
        ResultsBody::List { .. }
    ));
}

#[test]
fn clearing_during_slow_search_goes_idle_and_ignores_late_response() {
    let mut h = Harness::new();
    h.settle("a");
    let (stale, _) = h.last_started();

    h.settle("");
    assert_eq!(h.state.result, SearchResultState::Idle);
    assert_eq!(h.host.cancelled, vec![stale]);
    assert_eq!(h.host.started.len(), 1);

    let rendered = h.respond(stale, Ok(movies(&["Alien"])));
    assert!(!rendered);
    assert_eq!(h.state.result, SearchResultState::Idle);
}

#[test]
fn overlapping_searches_only_newest_lands() {
    let mut h = Harness::new();
    h.settle("heat");
    let (g1, _) = h.last_started();
    h.settle("heathers");
    let (g2, _) = h.last_started();
    assert!(g2 > g1);
    assert_eq!(h.host.cancelled, vec![g1]);

    h.respond(g1, Ok(movies(&["Heat"])));
    assert_eq!(h.state.result, SearchResultState::Loading(g2));

    h.respond(g2, Ok(movies(&["Heathers"])));
    h.respond(g1, Err(SearchError::NetworkFailure));
    assert_eq!(h.state.result.movies()[0].title, "Heathers");
}

#[test]
fn settling_empty_is_idle_from_any_state() {
    let mut h = Harness::new();
    h.settle("jaws");
    let (g1, _) = h.last_started();
    h.respond(g1, Err(SearchError::DecodeFailure));
    h.settle("   ");
    assert_eq!(h.state.result, SearchResultState::Idle);

    h.settle("jaws");
    let (g2, _) = h.last_started();
    h.respond(g2, Ok(movies(&["Jaws"])));
    h.settle("");
    assert_eq!(h.state.result, SearchResultState::Idle);
    assert!(h.state.result.movies().is_empty());
}

#[test]
fn choose_then_dismiss_leaves_results_untouched() {
    let mut h = Harness::new();
    h.settle("batman");
    h.answer_from_catalog();
    let before = h.state.result.clone();
    let id = h.state.highlighted_movie().unwrap().id;

    assert!(h.send(Event::MovieChosen(id)));
    assert_eq!(h.state.selection.movie().map(|m| m.id), Some(id));
    assert!(h.state.compute_viewmodel(24, 80).detail.is_some());

    assert!(h.send(Event::Dismiss));
    assert!(!h.state.selection.is_open());
    assert_eq!(h.state.result, before);
}

#[test]
fn cursor_picks_which_movie_opens() {
    let mut h = Harness::new();
    h.settle("dark");
    let (generation, _) = h.last_started();
    h.respond(generation, Ok(movies(&["The Dark Knight", "The Dark Knight Rises", "Dark City"])));

    h.send(Event::CursorDown);
    h.send(Event::CursorDown);
    h.send(Event::CursorDown);
    assert_eq!(h.state.highlighted_movie().unwrap().title, "The Dark Knight");

    h.send(Event::CursorUp);
    let id = h.state.highlighted_movie().unwrap().id;
    h.send(Event::MovieChosen(id));
    assert_eq!(h.state.selection.movie().unwrap().title, "Dark City");
}

#[test]
fn offline_catalog_rejects_blank_query() {
    assert_eq!(Catalog::default().search(" "), Err(SearchError::EmptyQueryRejected));
}

#[test]
fn teardown_silences_everything() {
    let mut h = Harness::new();
    h.settle("alien");
    let (generation, _) = h.last_started();
    h.type_query("aliens");

    h.send(Event::Teardown);
    assert!(h.host.closed);
    assert_eq!(h.host.cancelled, vec![generation]);

    h.elapse();
    h.respond(generation, Ok(movies(&["Alien"])));
    assert_eq!(h.host.started.len(), 1);
    assert_eq!(h.state.result, SearchResultState::Idle);
}

#[test]
fn close_only_hides() {
    let mut h = Harness::new();
    h.send(Event::Close);
    assert!(h.host.hidden);
    assert!(!h.host.closed);

    h.settle("heat");
    assert_eq!(h.host.started.len(), 1);
}

#[test]
fn previous_results_can_be_opened_while_next_search_loads() {
    let mut h = Harness::new();
    h.settle("batman");
    let (g1, _) = h.last_started();
    h.respond(g1, Ok(vec![Movie::new(268, "Batman")]));

    h.settle("batman r");
    assert!(h.state.result.is_loading());

    assert!(h.send(Event::MovieChosen(268)));
    assert_eq!(h.state.selection.movie().map(|m| m.title.as_str()), Some("Batman"));
}

mod proptest_search_flow {
    use super::*;
    use proptest::prelude::*;

    /// Generations `1..=n` in a random delivery order, with a success flag
    /// per generation.
    fn deliveries() -> impl Strategy<Value = (usize, Vec<u64>, Vec<bool>)> {
        (2usize..7).prop_flat_map(|n| {
            (
                Just(n),
                Just((1..=n as u64).collect::<Vec<_>>()).prop_shuffle(),
                prop::collection::vec(any::<bool>(), n),
            )
        })
    }

    fn outcome_for(generation: u64, ok: bool) -> Result<Vec<Movie>, SearchError> {
        if ok {
            Ok(vec![Movie::new(generation, format!("Movie {generation}"))])
        } else {
            Err(SearchError::NetworkFailure)
        }
    }

    proptest! {
        /// Any burst typed inside one quiet period starts exactly one search,
        /// for the trimmed last value.
        #[test]
        fn prop_burst_starts_one_search(burst in prop::collection::vec("[a-z]{1,8}", 1..15)) {
            let mut h = Harness::new();
            for text in &burst {
                h.type_query(text);
            }
            h.elapse();

            prop_assert_eq!(
                h.host.started.clone(),
                vec![(Generation::new(1), burst.last().cloned().unwrap())]
            );
        }

        /// However responses interleave, only the newest generation's outcome
        /// ever lands in the result state.
        #[test]
        fn prop_stale_responses_never_land((n, order, oks) in deliveries()) {
            let mut h = Harness::new();
            for i in 0..n {
                h.settle(&format!("query {i}"));
            }
            let latest = h.last_started().0;
            prop_assert_eq!(latest, Generation::new(n as u64));

            for generation in order {
                let ok = oks[generation as usize - 1];
                let before = h.state.result.clone();
                h.respond(Generation::new(generation), outcome_for(generation, ok));

                if Generation::new(generation) == latest {
                    let expected = match outcome_for(generation, ok) {
                        Ok(movies) => SearchResultState::Loaded(movies),
                        Err(err) => SearchResultState::Failed(err),
                    };
                    prop_assert_eq!(&h.state.result, &expected);
                } else {
                    prop_assert_eq!(&h.state.result, &before);
                }
            }
        }
    }
}
