//! Client-side post-processing of search results.

use std::cmp::Reverse;

use crate::users::UserRecord;

/// Keeps users whose login contains `query` (case-sensitive) and orders them
/// by follower count, most followed first.
///
/// The sort is stable, so users with equal follower counts keep the order the
/// API returned them in.
pub fn filter_and_sort(items: &[UserRecord], query: &str) -> Vec<UserRecord> {
    let mut matched: Vec<UserRecord> = items
        .iter()
        .filter(|user| user.login.contains(query))
        .cloned()
        .collect();
    matched.sort_by_key(|user| Reverse(user.followers));
    matched
}
