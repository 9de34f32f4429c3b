//! Application state.
//!
//! ```text
//! AppState
//! ├── input: SearchInput     (query editor)
//! ├── search: SearchState    (debounced request lifecycle, results)
//! └── results: ResultsView   (selection, scroll, hover, press flash)
//! ```
//!
//! Only the reducer mutates this; render reads it by shared reference.

use std::time::Duration;

use ghsearch_core::search::SearchState;
use ghsearch_core::users::UserRecord;

use crate::input::SearchInput;
use crate::results::ResultsView;

#[derive(Debug)]
pub struct AppState {
    pub should_quit: bool,
    pub input: SearchInput,
    pub search: SearchState,
    pub results: ResultsView,
    /// Quiet period applied to every input change.
    pub debounce: Duration,
    /// Spinner animation frame counter.
    pub spinner_frame: usize,
}

impl AppState {
    pub fn new(debounce: Duration) -> Self {
        Self {
            should_quit: false,
            input: SearchInput::default(),
            search: SearchState::new(),
            results: ResultsView::default(),
            debounce,
            spinner_frame: 0,
        }
    }

    /// The user row currently selected, if any.
    pub fn selected_user(&self) -> Option<&UserRecord> {
        self.search.results().get(self.results.selected)
    }

    /// Whether the runtime should tick at frame rate.
    pub fn is_animating(&self) -> bool {
        self.search.is_loading() || self.results.has_pending_flash()
    }
}
