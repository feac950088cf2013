//! Interactive timer driven by terminal input.
//!
//! A single-threaded loop on a current-thread Tokio runtime. Each iteration
//! waits for either a line of input or, while the timer runs, the next
//! readout tick, turns it into an [`AppEvent`] and hands it to the
//! [`TimerApp`]. Nothing else touches session state.

use std::io::Write;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tock_core::{AppEvent, Clock, Control, EntryStore, TimerApp, TimerSession};
use tock_db::Database;

use crate::Config;

const HELP: &str = "\
Commands:
  start              start the timer
  stop               stop the timer and save the rounded time
  category <name>    set the category (alias: c)
  category           show the current category
  categories         list known categories (alias: ls)
  use <n>            pick category number <n> from the list
  help               show this help
  quit               exit without saving a running timer (alias: exit, q)";

/// A parsed line of terminal input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forwarded to the app unchanged.
    Event(AppEvent),
    CurrentCategory,
    ListCategories,
    /// One-based index into the listed categories.
    Select(usize),
    Help,
    Blank,
    Unknown(String),
}

/// Parses one line of input. Command words are case-insensitive.
pub fn parse_input(line: &str) -> Input {
    let line = line.trim();
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    match word.to_ascii_lowercase().as_str() {
        "" => Input::Blank,
        "start" => Input::Event(AppEvent::StartRequested),
        "stop" => Input::Event(AppEvent::StopRequested),
        "category" | "c" if rest.is_empty() => Input::CurrentCategory,
        "category" | "c" => Input::Event(AppEvent::CategoryChanged(rest.to_string())),
        "categories" | "ls" => Input::ListCategories,
        "use" => rest
            .parse()
            .map_or_else(|_| Input::Unknown(line.to_string()), Input::Select),
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Event(AppEvent::Quit),
        _ => Input::Unknown(line.to_string()),
    }
}

/// Runs the interactive timer against the terminal.
pub fn run(db: Database, config: &Config, category: Option<String>) -> Result<()> {
    let session = TimerSession::with_system_clock(db);
    let mut app = TimerApp::new(session).context("failed to load categories")?;
    if let Some(category) = category {
        app.handle(AppEvent::CategoryChanged(category))?;
        app.take_status();
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .context("failed to start event loop")?;

    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let mut out = std::io::stdout();
    let result = runtime.block_on(event_loop(&mut app, input, &mut out, config.tick_interval()));

    // A pending stdin read would otherwise hold up shutdown.
    runtime.shutdown_timeout(Duration::from_millis(100));
    result
}

/// Dispatches input lines and ticks to `app` until quit or end of input.
pub async fn event_loop<S, C, R, W>(
    app: &mut TimerApp<S, C>,
    input: R,
    out: &mut W,
    tick: Duration,
) -> Result<()>
where
    S: EntryStore,
    C: Clock,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    let mut ticker: Option<Interval> = None;
    // Set while the cursor sits at the end of an in-place readout.
    let mut readout_open = false;

    writeln!(out, "Type 'help' for commands.")?;
    write_category(app, out)?;

    loop {
        let event = tokio::select! {
            line = lines.next_line() => match line.context("failed to read input")? {
                None => {
                    close_readout(&mut readout_open, out)?;
                    AppEvent::Quit
                }
                Some(line) => {
                    close_readout(&mut readout_open, out)?;
                    match parse_input(&line) {
                        Input::Event(event) => event,
                        other => {
                            respond(app, other, out)?;
                            continue;
                        }
                    }
                }
            },
            () = next_tick(&mut ticker) => AppEvent::Tick,
        };

        let is_tick = event == AppEvent::Tick;
        let was_running = app.is_running();
        if app.handle(event).context("failed to save time entry")? == Control::Exit {
            if was_running {
                writeln!(out, "Running timer discarded, nothing saved.")?;
            }
            out.flush()?;
            return Ok(());
        }

        if is_tick {
            write!(out, "\r{} [{}]", app.display(), app.category())?;
            out.flush()?;
            readout_open = true;
        } else if let Some(status) = app.take_status() {
            writeln!(out, "{status}")?;
        }

        sync_ticker(&mut ticker, app.is_running(), tick);
    }
}

/// Ends an open readout line so the next message starts on its own line.
fn close_readout<W: Write>(readout_open: &mut bool, out: &mut W) -> Result<()> {
    if std::mem::take(readout_open) {
        writeln!(out)?;
    }
    Ok(())
}

/// Handles input that does not change session state.
fn respond<S, C, W>(app: &mut TimerApp<S, C>, input: Input, out: &mut W) -> Result<()>
where
    S: EntryStore,
    C: Clock,
    W: Write,
{
    match input {
        Input::Event(_) | Input::Blank => {}
        Input::CurrentCategory => write_category(app, out)?,
        Input::ListCategories => {
            if app.categories().is_empty() {
                writeln!(out, "No categories yet. Set one with 'category <name>'.")?;
            }
            for (index, category) in app.categories().iter().enumerate() {
                let marker = if category == app.category() { '*' } else { ' ' };
                writeln!(out, "{marker} {:>2}. {category}", index + 1)?;
            }
        }
        Input::Select(number) => {
            let picked = number
                .checked_sub(1)
                .and_then(|index| app.categories().get(index))
                .cloned();
            match picked {
                Some(category) => {
                    app.handle(AppEvent::CategoryChanged(category))?;
                    if let Some(status) = app.take_status() {
                        writeln!(out, "{status}")?;
                    }
                }
                None => writeln!(out, "No category #{number}. Run 'categories' to list them.")?,
            }
        }
        Input::Help => writeln!(out, "{HELP}")?,
        Input::Unknown(line) => {
            writeln!(out, "Unknown command: {line}. Type 'help' for commands.")?;
        }
    }
    Ok(())
}

fn write_category<S, C, W: Write>(app: &TimerApp<S, C>, out: &mut W) -> Result<()>
where
    S: EntryStore,
    C: Clock,
{
    let category = app.category();
    if category.is_empty() {
        writeln!(out, "No category selected.")?;
    } else {
        writeln!(out, "Category: {category}")?;
    }
    Ok(())
}

/// Creates the readout ticker on start and drops it on stop.
fn sync_ticker(ticker: &mut Option<Interval>, running: bool, period: Duration) {
    match (running, ticker.is_some()) {
        (true, false) => {
            let mut interval = tokio::time::interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            *ticker = Some(interval);
        }
        (false, true) => *ticker = None,
        _ => {}
    }
}

/// Resolves on the next tick, or never while no ticker exists.
async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
