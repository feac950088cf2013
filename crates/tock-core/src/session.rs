//! Timer session state machine.
//!
//! A [`TimerSession`] is either idle or running. Starting captures the
//! current instant; stopping rounds the elapsed time and appends exactly one
//! record to the injected [`EntryStore`]. Transitions that make no sense
//! (start while running, stop while idle) are rejected with an error and
//! leave the state untouched.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::clock::{Clock, SystemClock};
use crate::duration::round_to_billable_minutes;
use crate::entry::{EntryStore, NewTimeEntry, TimeEntry};

/// Current phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Running { started_at: DateTime<Utc> },
}

/// Errors from session transitions.
#[derive(Debug, Error)]
pub enum SessionError<E>
where
    E: std::error::Error + 'static,
{
    /// `start` was requested while a session was already running.
    #[error("timer is already running")]
    AlreadyRunning,
    /// `stop` was requested with no running session.
    #[error("timer is not running")]
    NotRunning,
    /// `stop` was requested with an empty category.
    #[error("category must not be empty")]
    EmptyCategory,
    /// The store failed to persist the finished session.
    #[error("failed to save time entry")]
    Store(#[source] E),
}

impl<E> SessionError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns true for rejected transitions, false for persistence failures.
    pub const fn is_rejected_transition(&self) -> bool {
        !matches!(self, Self::Store(_))
    }
}

/// A stopwatch bound to a record store.
pub struct TimerSession<S, C = SystemClock> {
    store: S,
    clock: C,
    state: SessionState,
}

impl<S: EntryStore> TimerSession<S> {
    /// Creates an idle session using the system clock.
    pub fn with_system_clock(store: S) -> Self {
        Self::new(store, SystemClock)
    }
}

impl<S: EntryStore, C: Clock> TimerSession<S, C> {
    /// Creates an idle session.
    pub const fn new(store: S, clock: C) -> Self {
        Self {
            store,
            clock,
            state: SessionState::Idle,
        }
    }

    pub const fn state(&self) -> SessionState {
        self.state
    }

    pub const fn is_running(&self) -> bool {
        matches!(self.state, SessionState::Running { .. })
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the session, handing back the store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Idle -> Running. Returns the captured start instant.
    pub fn start(&mut self) -> Result<DateTime<Utc>, SessionError<S::Error>> {
        if self.is_running() {
            return Err(SessionError::AlreadyRunning);
        }
        let started_at = self.clock.now();
        self.state = SessionState::Running { started_at };
        tracing::info!(%started_at, "timer started");
        Ok(started_at)
    }

    /// Seconds since start, or `None` while idle.
    pub fn elapsed_secs(&self) -> Option<f64> {
        match self.state {
            SessionState::Idle => None,
            SessionState::Running { started_at } => Some(self.seconds_since(started_at)),
        }
    }

    /// Running -> Idle, recording the rounded elapsed time under `category`.
    ///
    /// The category is stored exactly as given. If the store write fails the
    /// session is still idle afterwards.
    pub fn stop(&mut self, category: &str) -> Result<TimeEntry, SessionError<S::Error>> {
        let SessionState::Running { started_at } = self.state else {
            return Err(SessionError::NotRunning);
        };
        if category.is_empty() {
            return Err(SessionError::EmptyCategory);
        }

        let elapsed = self.seconds_since(started_at);
        self.state = SessionState::Idle;

        let entry = NewTimeEntry {
            category: category.to_string(),
            time_spent_mins: round_to_billable_minutes(elapsed),
        };
        let saved = self.store.append(&entry).map_err(SessionError::Store)?;
        tracing::info!(
            category = %saved.category,
            elapsed_secs = elapsed,
            minutes = saved.time_spent_mins,
            "timer stopped"
        );
        Ok(saved)
    }

    /// Abandons a running session without recording it.
    ///
    /// Returns the elapsed seconds that were dropped, or `None` if idle.
    pub fn discard(&mut self) -> Option<f64> {
        let elapsed = self.elapsed_secs()?;
        self.state = SessionState::Idle;
        Some(elapsed)
    }

    #[expect(
        clippy::cast_precision_loss,
        reason = "millisecond counts stay far below 2^52"
    )]
    fn seconds_since(&self, started_at: DateTime<Utc>) -> f64 {
        let millis = (self.clock.now() - started_at).num_milliseconds();
        (millis.max(0) as f64) / 1000.0
    }
}
