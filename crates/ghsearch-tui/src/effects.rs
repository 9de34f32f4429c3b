//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! The reducer decides when to start or cancel a search; the runtime owns the
//! HTTP client and the tokio tasks.

use std::time::Duration;

use ghsearch_core::search::{RequestId, SearchCommand};
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
pub enum UiEffect {
    /// Quit the application.
    Quit,

    /// Spawn a debounced fetch for `query`; its outcome comes back as
    /// `UiEvent::SearchCompleted { id, .. }`.
    StartSearch {
        id: RequestId,
        query: String,
        delay: Duration,
        cancel: CancellationToken,
    },

    /// Cancel a superseded or abandoned search.
    CancelSearch { token: CancellationToken },

    /// Open a URL in the user's browser.
    OpenBrowser { url: String },
}

impl From<SearchCommand> for UiEffect {
    fn from(command: SearchCommand) -> Self {
        match command {
            SearchCommand::Start {
                id,
                query,
                delay,
                cancel,
            } => UiEffect::StartSearch {
                id,
                query,
                delay,
                cancel,
            },
            SearchCommand::Cancel { token } => UiEffect::CancelSearch { token },
        }
    }
}
