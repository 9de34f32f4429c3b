//! Headless search driver.
//!
//! Plays the role of the UI runtime for callers without a terminal: feeds
//! input into `SearchState`, spawns the fetches it asks for, and applies their
//! outcomes as they arrive on the inbox. Must be used inside a tokio runtime.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;

use super::fetch::{FetchOutcome, debounced_fetch};
use super::state::{Applied, SearchCommand, SearchState};
use super::task::RequestId;
use crate::client::UserSearch;

#[derive(Debug)]
struct Completion {
    id: RequestId,
    outcome: FetchOutcome,
}

pub struct SearchSession {
    state: SearchState,
    client: Arc<dyn UserSearch>,
    debounce: Duration,
    inbox_tx: mpsc::UnboundedSender<Completion>,
    inbox_rx: mpsc::UnboundedReceiver<Completion>,
}

impl SearchSession {
    pub fn new(client: Arc<dyn UserSearch>, debounce: Duration) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        Self {
            state: SearchState::new(),
            client,
            debounce,
            inbox_tx,
            inbox_rx,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// Feeds one input change (one keystroke's worth of text).
    pub fn input(&mut self, text: &str) {
        let commands = self.state.on_input(text, self.debounce);
        self.execute(commands);
    }

    /// Waits for the next fetch to finish and applies it.
    pub async fn next(&mut self) -> Applied {
        match self.inbox_rx.recv().await {
            Some(Completion { id, outcome }) => self.state.on_completed(id, outcome),
            None => Applied::Ignored,
        }
    }

    /// Applies outcomes until no request is pending.
    ///
    /// Returns the last outcome that changed state, if any.
    pub async fn settle(&mut self) -> Option<Applied> {
        let mut last = None;
        while self.state.pending_id().is_some() {
            match self.next().await {
                Applied::Ignored => {}
                applied => last = Some(applied),
            }
        }
        last
    }

    /// Cancels any pending request; later completions are dropped.
    pub fn unmount(&mut self) {
        let commands = self.state.unmount();
        self.execute(commands);
    }

    fn execute(&self, commands: Vec<SearchCommand>) {
        for command in commands {
            match command {
                SearchCommand::Cancel { token } => token.cancel(),
                SearchCommand::Start {
                    id,
                    query,
                    delay,
                    cancel,
                } => {
                    let client = Arc::clone(&self.client);
                    let tx = self.inbox_tx.clone();
                    tokio::spawn(async move {
                        let outcome = debounced_fetch(client.as_ref(), &query, delay, cancel).await;
                        let _ = tx.send(Completion { id, outcome });
                    });
                }
            }
        }
    }
}

impl Drop for SearchSession {
    fn drop(&mut self) {
        if self.state.is_mounted() {
            self.unmount();
        }
    }
}
