//! Front-end agnostic event dispatch.
//!
//! A front end feeds [`AppEvent`]s into [`TimerApp::handle`] and re-renders
//! from the accessors afterwards. All session mutation happens here, on the
//! caller's thread.

use crate::clock::Clock;
use crate::duration::{IDLE_DISPLAY, format_elapsed};
use crate::entry::EntryStore;
use crate::session::{SessionError, TimerSession};

/// Named events a front end can dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Periodic refresh of the elapsed readout.
    Tick,
    StartRequested,
    StopRequested,
    /// The category input text changed.
    CategoryChanged(String),
    Quit,
}

/// Whether the event loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Session plus the view state a front end renders.
pub struct TimerApp<S, C> {
    session: TimerSession<S, C>,
    category: String,
    display: String,
    categories: Vec<String>,
    status: Option<String>,
}

impl<S: EntryStore, C: Clock> TimerApp<S, C> {
    /// Builds the app, loading known categories from the store.
    ///
    /// Categories are kept sorted; the first one is preselected.
    pub fn new(session: TimerSession<S, C>) -> Result<Self, S::Error> {
        let mut categories = session.store().distinct_categories()?;
        categories.sort_unstable();
        categories.dedup();
        let category = categories.first().cloned().unwrap_or_default();
        Ok(Self {
            session,
            category,
            display: IDLE_DISPLAY.to_string(),
            categories,
            status: None,
        })
    }

    /// Applies one event.
    ///
    /// Rejected transitions are reported through [`status`](Self::status);
    /// only store failures are returned as errors.
    pub fn handle(&mut self, event: AppEvent) -> Result<Control, S::Error> {
        match event {
            AppEvent::Tick => {
                if let Some(elapsed) = self.session.elapsed_secs() {
                    self.display = format_elapsed(elapsed);
                }
            }
            AppEvent::StartRequested => match self.session.start() {
                Ok(_) => {
                    self.display = IDLE_DISPLAY.to_string();
                    self.status = Some("Timer started".to_string());
                }
                Err(err) => self.reject(err)?,
            },
            AppEvent::StopRequested => match self.session.stop(&self.category) {
                Ok(entry) => {
                    self.display = IDLE_DISPLAY.to_string();
                    if let Err(index) = self.categories.binary_search(&entry.category) {
                        self.categories.insert(index, entry.category.clone());
                    }
                    self.status = Some(format!(
                        "Saved {} min to {}",
                        entry.time_spent_mins, entry.category
                    ));
                }
                Err(err) => {
                    if !self.session.is_running() {
                        self.display = IDLE_DISPLAY.to_string();
                    }
                    self.reject(err)?;
                }
            },
            AppEvent::CategoryChanged(category) => {
                self.status = Some(format!("Category: {category}"));
                self.category = category;
            }
            AppEvent::Quit => {
                if let Some(elapsed) = self.session.discard() {
                    tracing::warn!(
                        elapsed = %format_elapsed(elapsed),
                        "quitting with a running timer, session not recorded"
                    );
                }
                return Ok(Control::Exit);
            }
        }
        Ok(Control::Continue)
    }

    fn reject(&mut self, err: SessionError<S::Error>) -> Result<(), S::Error> {
        match err {
            SessionError::Store(source) => Err(source),
            rejected => {
                tracing::debug!(%rejected, "transition rejected");
                self.status = Some(capitalize(&rejected.to_string()));
                Ok(())
            }
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Current elapsed readout, `00:00:00` while idle.
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Categories offered for selection.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Message describing the outcome of the last command, if any.
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Clears and returns the pending status message.
    pub fn take_status(&mut self) -> Option<String> {
        self.status.take()
    }

    pub const fn is_running(&self) -> bool {
        self.session.is_running()
    }

    pub const fn session(&self) -> &TimerSession<S, C> {
        &self.session
    }
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
