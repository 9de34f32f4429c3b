//! Core ghsearch library (config, API client, search controller).

pub mod client;
pub mod config;
pub mod filter;
pub mod logging;
pub mod search;
pub mod users;
pub mod view;
