//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! The reducer stays pure and returns effects; every side effect (spawning a
//! search, canceling one, opening a browser) happens here.
//!
//! ## Inbox Pattern
//!
//! Spawned search tasks send `UiEvent::SearchCompleted` to `inbox_tx`. The
//! runtime drains `inbox_rx` each frame, so results reach the reducer on the
//! same thread as key presses and no state is ever shared across tasks.

use std::io::Stdout;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ghsearch_core::client::{GithubClient, UserSearch};
use ghsearch_core::config::Config;
use ghsearch_core::search::debounced_fetch;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

type UiEventSender = mpsc::UnboundedSender<UiEvent>;
type UiEventReceiver = mpsc::UnboundedReceiver<UiEvent>;

/// Tick cadence while something animates (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Tick cadence when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen search runtime.
///
/// Terminal state is restored and any in-flight search is canceled on drop.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<dyn UserSearch>,
    inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: &Config) -> Result<Self> {
        let client: Arc<dyn UserSearch> = Arc::new(GithubClient::new(config)?);
        Self::with_client(client, config.debounce())
    }

    pub fn with_client(client: Arc<dyn UserSearch>, debounce: Duration) -> Result<Self> {
        // Panic hook goes in before the alternate screen.
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let now = Instant::now();
        Ok(Self {
            terminal,
            state: AppState::new(debounce),
            client,
            inbox_tx,
            inbox_rx,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;

        let result = self.event_loop();

        let _ = terminal::disable_input_features();

        result
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            // Layout first, so hit-testing in this batch sees the current size.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Frame alone changes nothing visible.
                if !matches!(&event, UiEvent::Frame { .. }) {
                    dirty = true;
                }

                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects inbox and terminal events, plus a Tick when one is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.is_animating() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        // Block until the next tick unless there is already work queued.
        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::StartSearch {
                id,
                query,
                delay,
                cancel,
            } => {
                let client = Arc::clone(&self.client);
                let tx = self.inbox_tx.clone();
                tokio::spawn(async move {
                    let outcome = debounced_fetch(client.as_ref(), &query, delay, cancel).await;
                    let _ = tx.send(UiEvent::SearchCompleted { id, outcome });
                });
            }
            UiEffect::CancelSearch { token } => token.cancel(),
            UiEffect::OpenBrowser { url } => {
                if let Err(error) = open::that(&url) {
                    tracing::warn!(%url, "failed to open browser: {error}");
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        if self.state.search.is_mounted() {
            for effect in self.state.search.unmount() {
                self.execute_effect(effect.into());
            }
        }
        let _ = terminal::restore_terminal();
    }
}
