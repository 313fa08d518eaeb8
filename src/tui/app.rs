//! Main TUI application.

use std::io;
use std::time::{Duration, Instant};

use chrono::{Local, Utc};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info, warn};

use crate::client::LogSource;
use crate::fetcher::{FetchOutcome, FetchResult, Fetcher, QueryKind};
use crate::poller::{PollConfig, Poller};
use crate::query::Refresh;

use super::event::{Event, EventHandler};
use super::input::{KeyAction, handle_key};
use super::render::render;
use super::state::AppState;

/// Drives state changes: key actions, poll ticks and query results.
///
/// Kept separate from the terminal loop so it can be exercised without a TTY.
pub struct Controller {
    pub state: AppState,
    fetcher: Fetcher,
    poller: Poller,
}

impl Controller {
    pub fn new(state: AppState, fetcher: Fetcher, poll: PollConfig) -> Self {
        Self {
            state,
            fetcher,
            poller: Poller::new(poll),
        }
    }

    /// Issues the initial stat query. Polling starts once it is answered.
    pub fn start(&mut self) {
        self.dispatch(Refresh::Stat);
    }

    /// Timer tick: issues a follow-mode refresh when one is due.
    pub fn on_tick(&mut self, now: Instant) {
        if self.poller.poll(now, self.state.filter.follow()) {
            debug!("follow poll");
            let query = self.state.filter.stat_query().clone();
            self.fetcher.submit(QueryKind::Stat, query, true);
        }
    }

    /// Applies a key action. Returns `false` when the application should quit.
    pub fn on_action(&mut self, action: KeyAction) -> bool {
        match action {
            KeyAction::None => {}
            KeyAction::Quit => return false,
            KeyAction::Fetch(refresh) => self.dispatch(refresh),
            KeyAction::ApplyEdit => {
                let refresh = self.state.apply_edit(Utc::now());
                self.dispatch(refresh);
            }
        }
        true
    }

    /// Issues the query named by `refresh`.
    pub fn dispatch(&mut self, refresh: Refresh) {
        match refresh {
            Refresh::None => {}
            Refresh::Stat => {
                let query = self.state.filter.stat_query().clone();
                self.fetcher.submit(QueryKind::Stat, query, false);
            }
            Refresh::List => {
                let query = self.state.filter.list_query().clone();
                self.fetcher.submit(QueryKind::List, query, false);
            }
        }
    }

    /// Applies a finished query.
    pub fn on_fetched(&mut self, result: FetchResult, now: Instant) {
        if result.outcome.kind() == QueryKind::Stat && !self.poller.is_started() {
            self.poller.start(now);
        }
        if result.polled {
            self.poller.complete(now, result.outcome.is_ok());
        }
        if !self.fetcher.is_current(&result) {
            debug!(seq = result.seq, kind = ?result.outcome.kind(), "discarding stale response");
            return;
        }

        match result.outcome {
            FetchOutcome::Stat(Ok(stat)) => {
                self.state.stat_error = None;
                self.state.last_update = Some(Local::now());
                self.state.stats.update(&stat);
                // Re-applying the preserved selection refreshes the list.
                let refresh = self.state.apply_selection();
                self.dispatch(refresh);
            }
            FetchOutcome::Stat(Err(e)) => {
                warn!(error = %e, failures = self.poller.failures(), "stat query failed");
                self.state.stat_error = Some(format!("stat: {e}"));
            }
            FetchOutcome::List(Ok(entries)) => {
                self.state.list_error = None;
                self.state.status_message = (entries.is_empty() && self.state.filter.offset() > 0)
                    .then(|| format!("no entries on page {}", self.state.filter.page() + 1));
                self.state.entries.load(entries);
            }
            FetchOutcome::List(Err(e)) => {
                warn!(error = %e, "list query failed");
                self.state.list_error = Some(format!("list: {e}"));
            }
        }
    }

    pub fn poller(&self) -> &Poller {
        &self.poller
    }
}

/// Main TUI application.
pub struct App {
    source: Box<dyn LogSource>,
    state: AppState,
    poll: PollConfig,
}

impl App {
    /// Creates a new App reading from the given source.
    pub fn new(source: Box<dyn LogSource>, state: AppState, poll: PollConfig) -> Self {
        Self {
            source,
            state,
            poll,
        }
    }

    /// Runs the TUI application.
    pub fn run(self, tick_rate: Duration) -> io::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let events = EventHandler::new(tick_rate);
        let results = events.sender();
        let fetcher = Fetcher::spawn(self.source, move |r| results.send(Event::Fetched(r)).is_ok());
        let mut controller = Controller::new(self.state, fetcher, self.poll);

        info!(server = %controller.state.server, "starting");
        controller.start();

        let outcome = run_loop(&mut terminal, &events, &mut controller);

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        outcome
    }
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    events: &EventHandler,
    controller: &mut Controller,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| render(frame, &mut controller.state))?;

        match events.next() {
            Ok(Event::Tick) => controller.on_tick(Instant::now()),
            Ok(Event::Key(key)) => {
                let action = handle_key(&mut controller.state, key);
                if !controller.on_action(action) {
                    info!("quit requested");
                    return Ok(());
                }
            }
            Ok(Event::Resize) => {}
            Ok(Event::Fetched(result)) => controller.on_fetched(result, Instant::now()),
            Err(_) => return Ok(()),
        }
    }
}
