//! Errors of the seminar pipeline.
//!
//! Configuration and client errors abort a run, extraction errors only drop a single issue.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("the {var} environment variable is not set, please provide a GitHub API token")]
    MissingToken { var: &'static str },
    #[error("the {var} environment variable has the unknown value {value:?}")]
    InvalidValue { var: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("GitHub API token is invalid, please set the GITHUB_TOKEN environment variable")]
    BadCredentials,
    #[error("{url} responded with {status}: {message}")]
    Status {
        url: String,
        status: StatusCode,
        message: String,
    },
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ClientError {
    /// Whether the error is caused by the configured credentials rather than by the remote.
    pub fn is_configuration(&self) -> bool {
        matches!(self, ClientError::BadCredentials)
    }
}

/// Reasons for rejecting a single issue.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("the issue has no title")]
    MissingTitle,
    #[error("the title lacks the seminar marker")]
    NotASeminar,
    #[error("the title is empty once the seminar marker is removed")]
    EmptyTitle,
    #[error("the issue has no body")]
    MissingBody,
    #[error("the body lacks the date marker")]
    MissingDateMarker,
    #[error("the issue has neither an assignee nor an author")]
    MissingSpeaker,
    #[error("the date {0:?} could not be parsed")]
    UnparsableDate(String),
}
