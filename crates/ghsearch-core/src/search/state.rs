//! Search state machine.
//!
//! `SearchState` is owned by a single widget and mutated only through the
//! transitions below. Transitions never perform I/O; they return
//! `SearchCommand`s for whoever drives the widget (the TUI runtime or a
//! `SearchSession`) to execute.
//!
//! ```text
//!            non-blank input                 response
//!   Idle ───────────────────────▶ Loading ───────────────▶ Loaded
//!    ▲                            │    ▲                    │
//!    │         blank input        │    │ newer input        │
//!    └────────────────────────────┘    └─(cancels prior)────┘
//! ```

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::fetch::FetchOutcome;
use super::task::{PendingRequest, RequestId, RequestSeq};
use crate::client::SearchError;
use crate::filter::filter_and_sort;
use crate::users::UserRecord;
use crate::view::{TableModel, USER_COLUMNS};

/// Commands returned by transitions for the driver to execute.
#[derive(Debug)]
pub enum SearchCommand {
    /// Spawn `debounced_fetch` for `query` and report back with `id`.
    Start {
        id: RequestId,
        query: String,
        delay: Duration,
        cancel: CancellationToken,
    },
    /// Cancel a superseded request.
    Cancel { token: CancellationToken },
}

/// Coarse state for display and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Loading,
    Loaded,
}

/// What `on_completed` did with an outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Results replaced with the filtered, sorted response.
    Results,
    /// Request failed; loading cleared, results kept.
    Failed(SearchError),
    /// Stale, canceled, or arrived after unmount. Nothing changed.
    Ignored,
}

#[derive(Debug)]
pub struct SearchState {
    query: String,
    results: Vec<UserRecord>,
    loading: bool,
    pending: PendingRequest,
    seq: RequestSeq,
    mounted: bool,
}

impl Default for SearchState {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchState {
    pub fn new() -> Self {
        Self {
            query: String::new(),
            results: Vec::new(),
            loading: false,
            pending: PendingRequest::default(),
            seq: RequestSeq::default(),
            mounted: true,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn results(&self) -> &[UserRecord] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn pending_id(&self) -> Option<RequestId> {
        self.pending.active
    }

    pub fn phase(&self) -> SearchPhase {
        if self.loading {
            SearchPhase::Loading
        } else if self.query.trim().is_empty() {
            SearchPhase::Idle
        } else {
            SearchPhase::Loaded
        }
    }

    /// View binding for the rendering layer.
    pub fn table(&self) -> TableModel<'_> {
        TableModel {
            columns: USER_COLUMNS,
            data_source: &self.results,
            row_key: "id",
            loading: self.loading,
        }
    }

    /// Applies an input change.
    ///
    /// Any pending request is canceled. A blank query clears results right away;
    /// anything else starts a new debounced request.
    pub fn on_input(&mut self, text: &str, delay: Duration) -> Vec<SearchCommand> {
        if !self.mounted || text == self.query {
            return Vec::new();
        }
        self.query = text.to_string();

        let mut commands = Vec::new();
        if let Some(token) = self.pending.take_cancel() {
            commands.push(SearchCommand::Cancel { token });
        }

        if text.trim().is_empty() {
            self.results.clear();
            self.loading = false;
            return commands;
        }

        let id = self.seq.next_id();
        let cancel = CancellationToken::new();
        self.pending.start(id, cancel.clone());
        self.loading = true;
        commands.push(SearchCommand::Start {
            id,
            query: self.query.clone(),
            delay,
            cancel,
        });
        commands
    }

    /// Applies the outcome of request `id`.
    ///
    /// Only the pending request may mutate state, and only while mounted.
    pub fn on_completed(&mut self, id: RequestId, outcome: FetchOutcome) -> Applied {
        if !self.mounted || !self.pending.is_current(id) {
            return Applied::Ignored;
        }

        match outcome {
            FetchOutcome::Cancelled => Applied::Ignored,
            FetchOutcome::Loaded(items) => {
                self.pending.finish_if_active(id);
                self.results = filter_and_sort(&items, &self.query);
                self.loading = false;
                tracing::debug!(
                    query = %self.query,
                    received = items.len(),
                    shown = self.results.len(),
                    "search results applied"
                );
                Applied::Results
            }
            FetchOutcome::Failed(error) => {
                self.pending.finish_if_active(id);
                self.loading = false;
                tracing::warn!(
                    query = %self.query,
                    kind = %error.kind,
                    details = error.details.as_deref().unwrap_or(""),
                    "user search failed: {error}"
                );
                Applied::Failed(error)
            }
        }
    }

    /// Tears the widget down: cancels the pending request and ignores
    /// everything that arrives afterwards.
    pub fn unmount(&mut self) -> Vec<SearchCommand> {
        self.mounted = false;
        self.loading = false;
        self.pending
            .take_cancel()
            .map(|token| SearchCommand::Cancel { token })
            .into_iter()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::SearchErrorKind;

    const DELAY: Duration = Duration::from_millis(300);

    fn started_id(commands: &[SearchCommand]) -> RequestId {
        commands
            .iter()
            .find_map(|c| match c {
                SearchCommand::Start { id, .. } => Some(*id),
                SearchCommand::Cancel { .. } => None,
            })
            .expect("start command")
    }

    fn sample() -> Vec<UserRecord> {
        vec![
            UserRecord::new(1, "abc", 10),
            UserRecord::new(2, "abcd", 50),
            UserRecord::new(3, "xyz", 5),
        ]
    }

    #[test]
    fn test_starts_idle() {
        let state = SearchState::new();
        assert_eq!(state.phase(), SearchPhase::Idle);
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_input_starts_request_and_sets_loading() {
        let mut state = SearchState::new();
        let commands = state.on_input("abc", DELAY);

        assert_eq!(commands.len(), 1);
        assert!(matches!(
            &commands[0],
            SearchCommand::Start { query, delay, .. } if query == "abc" && *delay == DELAY
        ));
        assert_eq!(state.phase(), SearchPhase::Loading);
        assert!(state.pending_id().is_some());
    }

    #[test]
    fn test_completion_filters_and_sorts() {
        let mut state = SearchState::new();
        let id = started_id(&state.on_input("abc", DELAY));

        let applied = state.on_completed(id, FetchOutcome::Loaded(sample()));

        assert_eq!(applied, Applied::Results);
        let ids: Vec<u64> = state.results().iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![2, 1]);
        assert_eq!(state.phase(), SearchPhase::Loaded);
        assert_eq!(state.pending_id(), None);
    }

    #[test]
    fn test_new_input_cancels_previous_request() {
        let mut state = SearchState::new();
        let first = state.on_input("ab", DELAY);
        let SearchCommand::Start { cancel, .. } = &first[0] else {
            panic!("expected start");
        };
        let first_token = cancel.clone();

        let second = state.on_input("abc", DELAY);

        assert_eq!(second.len(), 2);
        let SearchCommand::Cancel { token } = &second[0] else {
            panic!("expected cancel");
        };
        token.cancel();
        assert!(first_token.is_cancelled());
        assert!(matches!(second[1], SearchCommand::Start { .. }));
        assert_eq!(state.phase(), SearchPhase::Loading);
    }

    #[test]
    fn test_older_response_after_newer_is_discarded() {
        let mut state = SearchState::new();
        let old = started_id(&state.on_input("ab", DELAY));
        let new = started_id(&state.on_input("abc", DELAY));

        let newer = vec![UserRecord::new(2, "abcd", 50)];
        assert_eq!(
            state.on_completed(new, FetchOutcome::Loaded(newer.clone())),
            Applied::Results
        );
        let older = vec![UserRecord::new(9, "abzzz", 900)];
        assert_eq!(
            state.on_completed(old, FetchOutcome::Loaded(older)),
            Applied::Ignored
        );

        assert_eq!(state.results(), newer.as_slice());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_blank_input_clears_without_request() {
        let mut state = SearchState::new();
        let id = started_id(&state.on_input("abc", DELAY));
        state.on_completed(id, FetchOutcome::Loaded(sample()));
        assert!(!state.results().is_empty());

        let commands = state.on_input("   ", DELAY);

        assert!(commands.is_empty());
        assert!(state.results().is_empty());
        assert!(!state.is_loading());
        assert_eq!(state.phase(), SearchPhase::Idle);
    }

    #[test]
    fn test_blank_input_while_loading_cancels() {
        let mut state = SearchState::new();
        let id = started_id(&state.on_input("abc", DELAY));

        let commands = state.on_input("", DELAY);

        assert_eq!(commands.len(), 1);
        assert!(matches!(commands[0], SearchCommand::Cancel { .. }));
        assert!(!state.is_loading());
        assert_eq!(
            state.on_completed(id, FetchOutcome::Loaded(sample())),
            Applied::Ignored
        );
        assert!(state.results().is_empty());
    }

    #[test]
    fn test_same_query_is_noop() {
        let mut state = SearchState::new();
        state.on_input("abc", DELAY);
        assert!(state.on_input("abc", DELAY).is_empty());
        assert_eq!(state.on_input("", DELAY).len(), 1);
        assert!(state.on_input("", DELAY).is_empty());
    }

    #[test]
    fn test_failure_keeps_previous_results() {
        let mut state = SearchState::new();
        let id = started_id(&state.on_input("abc", DELAY));
        state.on_completed(id, FetchOutcome::Loaded(sample()));
        let before = state.results().to_vec();

        let id = started_id(&state.on_input("abcd", DELAY));
        let error = SearchError::new(SearchErrorKind::Network, "Connection failed");
        let applied = state.on_completed(id, FetchOutcome::Failed(error.clone()));

        assert_eq!(applied, Applied::Failed(error));
        assert_eq!(state.results(), before.as_slice());
        assert!(!state.is_loading());
    }

    #[test]
    fn test_cancelled_outcome_changes_nothing() {
        let mut state = SearchState::new();
        let id = started_id(&state.on_input("abc", DELAY));

        assert_eq!(
            state.on_completed(id, FetchOutcome::Cancelled),
            Applied::Ignored
        );
        assert!(state.is_loading());
        assert_eq!(state.pending_id(), Some(id));
    }

    #[test]
    fn test_unmount_cancels_and_ignores_late_results() {
        let mut state = SearchState::new();
        let commands = state.on_input("abc", DELAY);
        let id = started_id(&commands);
        let SearchCommand::Start { cancel, .. } = &commands[0] else {
            panic!("expected start");
        };
        let token = cancel.clone();

        let cleanup = state.unmount();

        assert_eq!(cleanup.len(), 1);
        let SearchCommand::Cancel { token: cleanup_token } = &cleanup[0] else {
            panic!("expected cancel");
        };
        cleanup_token.cancel();
        assert!(token.is_cancelled());
        assert!(!state.is_loading());
        assert_eq!(
            state.on_completed(id, FetchOutcome::Loaded(sample())),
            Applied::Ignored
        );
        assert!(state.results().is_empty());
        assert!(state.on_input("xyz", DELAY).is_empty());
        assert_eq!(state.query(), "abc");
    }

    #[test]
    fn test_table_model_binds_results_and_loading() {
        let mut state = SearchState::new();
        state.on_input("abc", DELAY);

        let table = state.table();
        assert!(table.loading);
        assert_eq!(table.row_key, "id");
        assert_eq!(table.columns[0].data_index, "login");
        assert!(table.data_source.is_empty());
    }
}
