//! Core domain logic for the tock timer.
//!
//! This crate contains the fundamental types and logic for:
//! - Duration rounding: turning elapsed seconds into billable minutes
//! - Timer sessions: the guarded idle/running state machine
//! - Event dispatch: the front-end agnostic [`TimerApp`]

mod app;
mod clock;
pub mod duration;
mod entry;
mod session;

pub use app::{AppEvent, Control, TimerApp};
#[cfg(any(test, feature = "test-support"))]
pub use clock::ManualClock;
pub use clock::{Clock, SystemClock};
pub use duration::{IDLE_DISPLAY, format_elapsed, round_to_billable_minutes};
pub use entry::{CategoryTotal, EntryStore, NewTimeEntry, TimeEntry};
pub use session::{SessionError, SessionState, TimerSession};

#[cfg(test)]
mod test_support;
