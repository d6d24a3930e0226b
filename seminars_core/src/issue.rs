//! Records as returned by the GitHub REST API.
//!
//! Only the fields used to build seminars are deserialized, everything else is ignored.
//! Missing or `null` fields are accepted here and rejected per issue during extraction, so one
//! malformed record can't fail a whole page.

use serde::{Deserialize, Deserializer};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Issue {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub assignees: Vec<User>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<User>, D::Error> {
    Ok(Option::<Vec<User>>::deserialize(deserializer)?.unwrap_or_default())
}

/// The public profile of a GitHub user, see `GET /users/{login}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Profile {
    pub login: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}
