//! UI event types.
//!
//! Everything the reducer reacts to arrives as a `UiEvent`: the runtime's own
//! timer and frame ticks, raw terminal input, and completions sent back by
//! spawned search tasks through the inbox.

use crossterm::event::Event as CrosstermEvent;
use ghsearch_core::search::{FetchOutcome, RequestId};

#[derive(Debug)]
pub enum UiEvent {
    /// Timer tick (spinner animation, press flash expiry).
    Tick,

    /// Emitted once per frame, before other events, with the terminal size.
    Frame { width: u16, height: u16 },

    /// Terminal input event (key, mouse, paste, resize).
    Terminal(CrosstermEvent),

    /// A debounced search finished, was canceled, or failed.
    SearchCompleted { id: RequestId, outcome: FetchOutcome },
}
