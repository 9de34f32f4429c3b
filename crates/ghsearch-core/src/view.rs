//! Table model handed to renderers.
//!
//! Both the TUI table and the CLI's printed table are driven from the same
//! column list, so adding a column here shows up everywhere.

use crate::users::UserRecord;

/// A table column: header title, the record field it shows, and a stable key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Column {
    pub title: &'static str,
    pub data_index: &'static str,
    pub key: &'static str,
}

pub const USER_COLUMNS: &[Column] = &[
    Column {
        title: "Username",
        data_index: "login",
        key: "login",
    },
    Column {
        title: "Followers",
        data_index: "followers",
        key: "followers",
    },
];

/// Everything a renderer needs to draw the results table.
#[derive(Debug, Clone, Copy)]
pub struct TableModel<'a> {
    pub columns: &'a [Column],
    pub data_source: &'a [UserRecord],
    /// Field that uniquely identifies a row.
    pub row_key: &'static str,
    pub loading: bool,
}

impl TableModel<'_> {
    /// Header titles in column order.
    pub fn headers(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.title).collect()
    }

    /// Cell values for every row, in column order.
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.data_source
            .iter()
            .map(|user| {
                self.columns
                    .iter()
                    .map(|c| user.field(c.data_index).unwrap_or_default())
                    .collect()
            })
            .collect()
    }
}
