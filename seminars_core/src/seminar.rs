//! Extraction of a single seminar from an issue.

use chrono::NaiveDateTime;

use crate::{
    date_parser,
    error::ExtractError,
    issue::{Issue, Profile},
};

/// The marker in an issue title which identifies a seminar announcement.
pub static SEMINAR_TITLE_MARKER: &str = "[SEMINAR]";
/// The marker in an issue body which separates the description from the date.
pub static DATE_MARKER: &str = "**Date**:";

static PROFILE_URL: &str = "https://github.com";

/// Whether the issue announces a seminar.
pub fn is_seminar(issue: &Issue) -> bool {
    issue
        .title
        .as_deref()
        .map_or(false, |title| title.contains(SEMINAR_TITLE_MARKER))
}

/// The person giving a seminar.
///
/// Extraction only knows the login. The profile is attached in a separate step, see
/// [`crate::seminar_list::SeminarList::resolve_speakers`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Speaker {
    pub login: String,
    pub profile: Option<Profile>,
}

impl Speaker {
    pub fn new(login: impl Into<String>) -> Self {
        Speaker {
            login: login.into(),
            profile: None,
        }
    }

    /// The full name if the profile has one, the `@login` otherwise.
    pub fn display_name(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|profile| profile.name.as_deref())
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .unwrap_or_else(|| format!("@{}", self.login))
    }

    /// The profile page reported by the API, `https://github.com/{login}` if it is unknown.
    pub fn url(&self) -> String {
        self.profile
            .as_ref()
            .and_then(|profile| profile.html_url.clone())
            .unwrap_or_else(|| format!("{PROFILE_URL}/{}", self.login))
    }

    pub fn avatar_url(&self) -> Option<&str> {
        self.profile
            .as_ref()
            .and_then(|profile| profile.avatar_url.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seminar {
    pub title: String,
    pub speaker: Speaker,
    /// Markdown, rendered when the seminar is emitted.
    pub description: String,
    pub date: NaiveDateTime,
}

impl Seminar {
    /// Parse an issue into a seminar.
    ///
    /// Everything after the first line following the date marker is dropped.
    /// Relative dates like `next friday` are resolved against `now`.
    pub fn from_issue(issue: &Issue, now: NaiveDateTime) -> Result<Self, ExtractError> {
        let title = issue.title.as_deref().ok_or(ExtractError::MissingTitle)?;
        if !title.contains(SEMINAR_TITLE_MARKER) {
            return Err(ExtractError::NotASeminar);
        }
        let title = title.replace(SEMINAR_TITLE_MARKER, "").trim().to_string();
        if title.is_empty() {
            return Err(ExtractError::EmptyTitle);
        }
        let body = issue.body.as_deref().ok_or(ExtractError::MissingBody)?;
        let (description, date_text) = body
            .split_once(DATE_MARKER)
            .ok_or(ExtractError::MissingDateMarker)?;
        let date_text = date_text.lines().next().unwrap_or_default().trim();
        let date = date_parser::parse(date_text, now)
            .ok_or_else(|| ExtractError::UnparsableDate(date_text.to_string()))?;
        let speaker = issue
            .assignees
            .first()
            .or(issue.user.as_ref())
            .ok_or(ExtractError::MissingSpeaker)?;
        Ok(Seminar {
            title,
            speaker: Speaker::new(speaker.login.as_str()),
            description: description.trim().to_string(),
            date,
        })
    }
}
