//! Session State Module
//!
//! Tracks whether the current credential is known to be dead.
//!
//! The state is an explicit, injectable object rather than a module-level
//! flag, so each client (and each test) gets its own instance.

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::time::Instant;

// == Session Phase ==
/// The two phases of the session lifecycle.
///
/// Transitions:
/// - `Active -> LoggedOut`: refresh failure (no deadline, sticky until
///   `login`) or explicit logout (deadline = now + cooldown).
/// - `LoggedOut -> Active`: explicit `login`, or the cooldown deadline passing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    LoggedOut { until: Option<Instant> },
}

// == Session State ==
/// Shared session state consulted by the HTTP client before any refresh attempt.
///
/// While logged out, no request is eligible for refresh-and-retry; a 401 is
/// propagated to the caller as-is.
#[derive(Debug, Clone)]
pub struct SessionState {
    inner: Arc<Mutex<Phase>>,
}

impl SessionState {
    // == Constructor ==
    /// Creates a new session state in the `Active` phase.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Phase::Active)),
        }
    }

    // == Is Logged Out ==
    /// Returns true while the session is logged out.
    ///
    /// A cooldown deadline that has passed transitions the session back to
    /// `Active` on this read, so callers never observe an expired cooldown.
    pub fn is_logged_out(&self) -> bool {
        let mut phase = self.lock();
        match *phase {
            Phase::Active => false,
            Phase::LoggedOut { until: Some(until) } if Instant::now() >= until => {
                *phase = Phase::Active;
                false
            }
            Phase::LoggedOut { .. } => true,
        }
    }

    // == Login ==
    /// Resets the session to `Active`, called after a confirmed authentication.
    pub fn login(&self) {
        *self.lock() = Phase::Active;
    }

    // == Mark Logged Out ==
    /// Marks the session logged out with no deadline.
    ///
    /// Used on refresh failure and at the start of an explicit logout; only
    /// `login` or a subsequent cooldown brings the session back.
    pub fn mark_logged_out(&self) {
        *self.lock() = Phase::LoggedOut { until: None };
    }

    // == Start Cooldown ==
    /// Marks the session logged out until the cooldown elapses.
    ///
    /// Called once the logout server call has settled, so a subsequent login
    /// is not blocked forever by the stale flag.
    pub fn start_cooldown(&self, cooldown: Duration) {
        *self.lock() = Phase::LoggedOut {
            until: Some(Instant::now() + cooldown),
        };
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Phase> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}
