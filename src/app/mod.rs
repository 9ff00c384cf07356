//! Application layer: the search coordinator.
//!
//! Sits between the plugin runtime (`main.rs`) and the domain, transport, and
//! UI layers. Data flows one way:
//!
//! ```text
//! Keys / Timers / Responses → Event → handle_event → AppState mutations → Actions
//!         ↑                                                                  ↓
//!         └──────────── runtime executes timers, searches, pane ops ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: side effects requested by the handler
//! - [`debounce`]: epoch-tagged input debouncer
//! - [`handler`]: event processing and transition table
//! - [`search_state`]: result state variants and generation tokens
//! - [`selection`]: detail-pane selection
//! - [`state`]: coordinator state and view model computation

pub mod actions;
pub mod debounce;
pub mod handler;
pub mod search_state;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use debounce::{Debouncer, Epoch, TimerRequest, DEFAULT_QUIET_PERIOD};
pub use handler::{handle_event, Event};
pub use search_state::{Generation, SearchResultState};
pub use selection::Selection;
pub use state::AppState;
