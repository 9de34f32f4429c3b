//! Debounced, cancelable, race-free search-as-you-type.
//!
//! - `task.rs`: request ids and the single pending-request slot
//! - `state.rs`: the widget's `SearchState` and its transitions
//! - `fetch.rs`: the debounced, cancelable request future
//! - `session.rs`: headless driver that executes commands on tokio

mod fetch;
mod session;
mod state;
mod task;

pub use fetch::{FetchOutcome, debounced_fetch};
pub use session::SearchSession;
pub use state::{Applied, SearchCommand, SearchPhase, SearchState};
pub use task::{PendingRequest, RequestId, RequestSeq};
