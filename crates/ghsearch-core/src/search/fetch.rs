//! Debounced, cancelable fetch.
//!
//! One call covers the whole life of a request: wait out the quiet period,
//! then issue the search. Both phases race against the cancellation token, so
//! a superseded keystroke never reaches the network and a superseded response
//! never reaches the state.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::client::{SearchError, UserSearch};
use crate::users::UserRecord;

/// How a request ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Raw items from the API (not yet filtered or sorted).
    Loaded(Vec<UserRecord>),
    Failed(SearchError),
    /// Superseded or unmounted before completion. Not an error.
    Cancelled,
}

/// Sleeps for `delay`, then searches for `query`, unless `cancel` fires first.
pub async fn debounced_fetch<C>(
    client: &C,
    query: &str,
    delay: Duration,
    cancel: CancellationToken,
) -> FetchOutcome
where
    C: UserSearch + ?Sized,
{
    let work = async {
        tokio::time::sleep(delay).await;
        client.search_users(query).await
    };

    let outcome = tokio::select! {
        biased;
        () = cancel.cancelled() => return FetchOutcome::Cancelled,
        result = work => result,
    };

    // A response that lands in the same instant as cancellation is still stale.
    if cancel.is_cancelled() {
        return FetchOutcome::Cancelled;
    }

    match outcome {
        Ok(items) => FetchOutcome::Loaded(items),
        Err(error) => FetchOutcome::Failed(error),
    }
}
