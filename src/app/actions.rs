//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` and
//! the runtime (`main.rs`) turns each action into timer, network, worker, or
//! pane calls, in order. Tests stand in for the runtime by inspecting the
//! returned actions and feeding the matching completion events back.
//!
//! # Example
//!
//! ```rust
//! use marquee::app::{Action, Generation};
//!
//! let actions = vec![Action::StartSearch {
//!     generation: Generation::new(1),
//!     query: "alien".to_string(),
//! }];
//! assert_eq!(actions.len(), 1);
//! ```

use super::debounce::Epoch;
use super::search_state::Generation;
use std::time::Duration;

/// Commands executed by the plugin runtime on the handler's behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Schedules one debounce timer.
    ///
    /// The runtime reports expiry with [`Event::DebounceElapsed`](super::Event::DebounceElapsed).
    /// Timers cannot be revoked; the debouncer discards stale ones by epoch.
    ScheduleDebounce {
        /// Epoch the timer belongs to (diagnostic only).
        epoch: Epoch,
        /// Delay before the timer fires.
        after: Duration,
    },

    /// Starts a search on the configured transport.
    ///
    /// The runtime must hand `generation` back unchanged in the matching
    /// [`Event::SearchCompleted`](super::Event::SearchCompleted).
    StartSearch {
        generation: Generation,
        query: String,
    },

    /// Signals that the search for `generation` is no longer wanted.
    ///
    /// Cancellation is cooperative: the transport may still deliver a
    /// response, which the coordinator then drops as stale.
    CancelSearch {
        generation: Generation,
    },

    /// Hides the plugin pane; the coordinator keeps its state.
    HidePlugin,

    /// Unloads the plugin after teardown.
    ClosePlugin,
}
