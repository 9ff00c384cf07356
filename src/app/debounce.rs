//! Input debouncing for the search query.
//!
//! The host timer service can schedule a deferred callback but cannot cancel
//! one, and a fired timer carries no identity. The debouncer therefore only
//! counts: every requested timer queues an epoch, and every fired timer
//! retires the oldest queued one. The newest epoch is retired by the last of
//! the outstanding timers to fire, whichever host timer that is, and only
//! that retirement settles a value. Earlier fires settle nothing. Each push
//! restarts a full quiet period, so the last fire lands no sooner than one
//! quiet period after the last edit.
//!
//! ```text
//!  push("b")  push("ba")  push("bat")        quiet period
//!     │           │           │ ─────────────────────────▶ settle("bat")
//!   e=1 ✗       e=2 ✗       e=3 ✓
//! ```

use std::collections::VecDeque;
use std::time::Duration;

/// Default quiet period before a query is considered settled.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(500);

/// Monotonic marker identifying one scheduled debounce timer.
pub type Epoch = u64;

/// A timer the host must schedule on the debouncer's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub epoch: Epoch,
    pub after: Duration,
}

/// Turns a burst of query edits into a single settled value.
#[derive(Debug, Clone)]
pub struct Debouncer {
    quiet_period: Duration,
    epoch: Epoch,
    pending: Option<String>,
    scheduled: VecDeque<Epoch>,
}

impl Debouncer {
    #[must_use]
    pub fn new(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            epoch: 0,
            pending: None,
            scheduled: VecDeque::new(),
        }
    }

    #[must_use]
    pub const fn quiet_period(&self) -> Duration {
        self.quiet_period
    }

    /// Whether a value is waiting for its quiet period to elapse.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Records a new input value and restarts the quiet period.
    ///
    /// Any value recorded earlier is superseded and will never settle.
    pub fn push(&mut self, value: String) -> TimerRequest {
        self.epoch += 1;
        self.pending = Some(value);
        self.scheduled.push_back(self.epoch);

        tracing::trace!(epoch = self.epoch, outstanding = self.scheduled.len(), "debounce timer requested");

        TimerRequest {
            epoch: self.epoch,
            after: self.quiet_period,
        }
    }

    /// Consumes one fired host timer.
    ///
    /// Returns the settled value when the fired timer is the newest one and a
    /// value is still pending, `None` for stale or cancelled timers.
    pub fn timer_fired(&mut self) -> Option<String> {
        let Some(fired) = self.scheduled.pop_front() else {
            tracing::debug!("timer fired with no debounce outstanding");
            return None;
        };

        if fired != self.epoch {
            tracing::trace!(fired, current = self.epoch, "stale debounce timer ignored");
            return None;
        }

        self.pending.take()
    }

    /// Drops the pending value; timers already scheduled fire into nothing.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!(epoch = self.epoch, "pending debounce cancelled");
        }
        self.epoch += 1;
    }
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(DEFAULT_QUIET_PERIOD)
    }
}
