//! Zellij plugin entry point.
//!
//! Translates host events into coordinator events and executes the
//! coordinator's actions with host calls. No search logic lives here.
//!
//! ```text
//! Key ─────────────────┐
//! Timer ───────────────┤
//! WebRequestResult ────┼─▶ Event ─▶ handle_event ─▶ Actions ─▶ set_timeout
//! CustomMessage ───────┘                                       web_request
//!   (offline worker)                                           post_message_to
//!                                                              hide_self / close_self
//! ```
//!
//! # Keybindings
//!
//! - characters: edit the query
//! - `Backspace`: delete a character, or close the detail pane
//! - `Ctrl+u`: clear the query
//! - `Down`/`Ctrl+n`, `Up`/`Ctrl+p`: move through results
//! - `Enter`: open the highlighted movie
//! - `Esc`: close details, else clear the query, else hide the pane
//! - `Ctrl+c`: shut the plugin down

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use marquee::tmdb::decode_response;
use marquee::worker::{MarqueeWorker, WorkerMessage, WorkerResponse};
use marquee::{handle_event, Action, Config, Event, Generation, SearchBackend};

register_plugin!(State);
register_worker!(MarqueeWorker, marquee_worker, MARQUEE_WORKER);

const WORKER_NAME: &str = "marquee";
const GENERATION_KEY: &str = "generation";

struct State {
    app: marquee::AppState,
    backend: SearchBackend,
}

impl Default for State {
    fn default() -> Self {
        let config = Config::default();
        Self {
            app: marquee::initialize(&config),
            backend: SearchBackend::Offline {
                latency: std::time::Duration::from_millis(config.offline_latency_ms),
            },
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        if let Err(e) = marquee::observability::init_tracing(&config) {
            eprintln!("marquee: tracing disabled: {e}");
        }

        let _span = tracing::debug_span!("plugin_load").entered();

        self.app = marquee::initialize(&config);
        self.backend = config.search_backend().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to offline catalog");
            SearchBackend::Offline {
                latency: std::time::Duration::from_millis(config.offline_latency_ms),
            }
        });
        tracing::info!(backend = ?config.backend_kind(), debounce_ms = config.debounce_ms, "plugin loaded");

        if matches!(self.backend, SearchBackend::Tmdb(_)) {
            request_permission(&[PermissionType::WebAccess]);
        }

        subscribe(&[
            EventType::Key,
            EventType::Timer,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
        ]);
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let _span = tracing::debug_span!("plugin_update_event", event_type = %event_name).entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::Timer(_) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, &body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_worker_response(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(status) => {
                if matches!(status, PermissionStatus::Denied) {
                    tracing::warn!("web access denied, TMDB searches will fail");
                }
                return false;
            }
            _ => return false,
        };

        self.dispatch(our_event)
    }

    fn render(&mut self, rows: usize, cols: usize) {
        marquee::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Runs `event` through the coordinator, executing actions and any
    /// events they produce synchronously.
    fn dispatch(&mut self, event: Event) -> bool {
        let mut queue = vec![event];
        let mut should_render = false;

        while let Some(event) = queue.pop() {
            match handle_event(&mut self.app, &event) {
                Ok((render, actions)) => {
                    should_render |= render;
                    for action in &actions {
                        if let Some(follow_up) = self.execute_action(action) {
                            queue.push(follow_up);
                        }
                    }
                }
                Err(e) => tracing::warn!(error = %e, "error handling event"),
            }
        }

        should_render
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::Timer(_) => "Timer".to_string(),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        let detail_open = self.app.selection.is_open();

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('c') => Some(Event::Teardown),
                BareKey::Char('u') => Some(Event::QueryChanged(String::new())),
                BareKey::Char('n') => Some(Event::CursorDown),
                BareKey::Char('p') => Some(Event::CursorUp),
                _ => None,
            };
        }

        Some(match key.bare_key {
            BareKey::Down => Event::CursorDown,
            BareKey::Up => Event::CursorUp,
            BareKey::Enter => Event::MovieChosen(self.app.highlighted_movie()?.id),
            BareKey::Esc if detail_open => Event::Dismiss,
            BareKey::Esc if !self.app.query.is_empty() => Event::QueryChanged(String::new()),
            BareKey::Esc => Event::Close,
            BareKey::Backspace if detail_open => Event::Dismiss,
            BareKey::Backspace => {
                let mut query = self.app.query.clone();
                query.pop()?;
                Event::QueryChanged(query)
            }
            BareKey::Char(c) => Event::QueryChanged(format!("{}{c}", self.app.query)),
            _ => return None,
        })
    }

    fn map_web_result(status: u16, body: &[u8], context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(generation) = context.get(GENERATION_KEY).and_then(|g| g.parse::<Generation>().ok()) else {
            tracing::debug!("ignoring web response without a generation");
            return None;
        };

        Some(Event::SearchCompleted {
            generation,
            outcome: decode_response(status, body),
        })
    }

    fn map_worker_response(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(WorkerResponse::SearchFinished { generation, outcome }) => Some(Event::SearchCompleted {
                generation: Generation::new(generation),
                outcome,
            }),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) -> marquee::Result<()> {
        let payload = serde_json::to_string(message)?;
        post_message_to(PluginMessage {
            worker_name: Some(WORKER_NAME.to_string()),
            name: WORKER_NAME.to_string(),
            payload,
        });
        Ok(())
    }

    /// Performs `action`; returns an event when the outcome is known at once.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) -> Option<Event> {
        match action {
            Action::ScheduleDebounce { after, .. } => {
                set_timeout(after.as_secs_f64());
                None
            }
            Action::StartSearch { generation, query } => self.start_search(*generation, query),
            Action::CancelSearch { generation } => {
                // Host requests can't be aborted; the late response is dropped by generation.
                tracing::debug!(%generation, "search superseded");
                None
            }
            Action::HidePlugin => {
                hide_self();
                None
            }
            Action::ClosePlugin => {
                close_self();
                None
            }
        }
    }

    fn start_search(&self, generation: Generation, query: &str) -> Option<Event> {
        match &self.backend {
            SearchBackend::Tmdb(client) => match client.search_request(query) {
                Ok(request) => {
                    let context = BTreeMap::from([(GENERATION_KEY.to_string(), generation.to_string())]);
                    web_request(request.url, HttpVerb::Get, request.headers, vec![], context);
                    None
                }
                Err(e) => Some(Event::SearchCompleted {
                    generation,
                    outcome: Err(e),
                }),
            },
            SearchBackend::Offline { latency } => {
                let latency_ms = u64::try_from(latency.as_millis()).unwrap_or(u64::MAX);
                let message = WorkerMessage::search(generation.value(), query.to_string(), latency_ms);
                match Self::post_worker_message(&message) {
                    Ok(()) => None,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to post search to worker");
                        Some(Event::SearchCompleted {
                            generation,
                            outcome: Err(marquee::SearchError::NetworkFailure),
                        })
                    }
                }
            }
        }
    }
}
