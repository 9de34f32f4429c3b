//! User records returned by the search API.

use serde::{Deserialize, Serialize};

/// A single user from the search results.
///
/// Immutable once received; the widget never edits records locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: u64,
    pub login: String,
    /// Search items may omit the follower count; missing counts sort last.
    #[serde(default)]
    pub followers: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<String>,
}

impl UserRecord {
    pub fn new(id: u64, login: impl Into<String>, followers: u64) -> Self {
        Self {
            id,
            login: login.into(),
            followers,
            html_url: None,
        }
    }

    /// Profile page for this user.
    pub fn profile_url(&self) -> String {
        self.html_url
            .clone()
            .unwrap_or_else(|| format!("https://github.com/{}", self.login))
    }

    /// Display value for a table column, looked up by its data index.
    pub fn field(&self, data_index: &str) -> Option<String> {
        match data_index {
            "id" => Some(self.id.to_string()),
            "login" => Some(self.login.clone()),
            "followers" => Some(self.followers.to_string()),
            _ => None,
        }
    }
}

/// Response body of `GET /search/users`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub items: Vec<UserRecord>,
}
