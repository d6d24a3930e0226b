//! This crate turns seminar announcements filed as GitHub issues into a Markdown/HTML fragment.
//!
//! Issues are read from <https://api.github.com>.
//! Every issue whose title carries the `[SEMINAR]` marker is parsed into a [`seminar::Seminar`],
//! collected into a [`seminar_list::SeminarList`] and rendered as a list of collapsible entries,
//! preceded by a month calendar and split into upcoming and past seminars.

pub use chrono;

pub mod calendar;
pub mod config;
pub mod date_parser;
pub mod error;
pub mod github_client;
pub mod issue;
pub mod markdown;
pub mod markup;
pub mod page;
pub mod seminar;
pub mod seminar_list;
