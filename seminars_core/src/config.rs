//! Configuration of a run.
//!
//! Everything is read from the environment. The token is required, the repository and the
//! rendering policies fall back to fixed defaults when their variable is unset or empty.

use std::{env, fmt};

use crate::{
    error::ConfigError,
    github_client::API_URL,
    markdown::{RenderOptions, SectionOrder},
    seminar_list::{Boundary, SortOrder},
};

/// The environment variable holding the GitHub API token.
pub static TOKEN_VAR: &str = "GITHUB_TOKEN";
pub static API_URL_VAR: &str = "GITHUB_API_URL";
pub static OWNER_VAR: &str = "SEMINARS_OWNER";
pub static REPO_VAR: &str = "SEMINARS_REPO";
/// `ascending` or `descending`.
pub static SORT_VAR: &str = "SEMINARS_SORT";
/// `upcoming-first` or `past-first`.
pub static SECTION_ORDER_VAR: &str = "SEMINARS_SECTION_ORDER";
/// `instant` or `day`.
pub static BOUNDARY_VAR: &str = "SEMINARS_BOUNDARY";
pub static CALENDAR_VAR: &str = "SEMINARS_CALENDAR";
pub static PROFILES_VAR: &str = "SEMINARS_PROFILES";
/// Set to an empty value to drop the call to action.
pub static INSTRUCTIONS_URL_VAR: &str = "SEMINARS_INSTRUCTIONS_URL";

pub static DEFAULT_OWNER: &str = "geem-lab";
pub static DEFAULT_REPO: &str = "seminars";

#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    pub owner: String,
    pub repo: String,
    pub api_url: String,
    pub token: String,
    pub sort_order: SortOrder,
    /// Look up the GitHub profile of every speaker before rendering.
    pub resolve_profiles: bool,
    pub render: RenderOptions,
}

impl Config {
    /// The default configuration with the given token.
    pub fn new(token: impl Into<String>) -> Self {
        Config {
            owner: String::from(DEFAULT_OWNER),
            repo: String::from(DEFAULT_REPO),
            api_url: String::from(API_URL),
            token: token.into(),
            sort_order: SortOrder::default(),
            resolve_profiles: true,
            render: RenderOptions::default(),
        }
    }

    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Config::from_vars(|var| env::var(var).ok())
    }

    /// Read the configuration from `var`, which looks up a variable by name.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Config::new(validate_token(var(TOKEN_VAR))?);
        if let Some(owner) = non_empty(var(OWNER_VAR)) {
            config.owner = owner;
        }
        if let Some(repo) = non_empty(var(REPO_VAR)) {
            config.repo = repo;
        }
        if let Some(api_url) = non_empty(var(API_URL_VAR)) {
            config.api_url = api_url;
        }
        config.sort_order = policy(var(SORT_VAR), SORT_VAR, config.sort_order, sort_order)?;
        config.resolve_profiles = policy(
            var(PROFILES_VAR),
            PROFILES_VAR,
            config.resolve_profiles,
            switch,
        )?;
        let render = &mut config.render;
        render.section_order = policy(
            var(SECTION_ORDER_VAR),
            SECTION_ORDER_VAR,
            render.section_order,
            section_order,
        )?;
        render.boundary = policy(var(BOUNDARY_VAR), BOUNDARY_VAR, render.boundary, boundary)?;
        render.calendar = policy(var(CALENDAR_VAR), CALENDAR_VAR, render.calendar, switch)?;
        if let Some(url) = var(INSTRUCTIONS_URL_VAR) {
            render.instructions_url = non_empty(Some(url));
        }
        Ok(config)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("api_url", &self.api_url)
            .field("token", &"<redacted>")
            .field("sort_order", &self.sort_order)
            .field("resolve_profiles", &self.resolve_profiles)
            .field("render", &self.render)
            .finish()
    }
}

fn validate_token(value: Option<String>) -> Result<String, ConfigError> {
    non_empty(value).ok_or(ConfigError::MissingToken { var: TOKEN_VAR })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Parse a policy variable, an unset or empty variable keeps `default`.
fn policy<T>(
    value: Option<String>,
    var: &'static str,
    default: T,
    parse: fn(&str) -> Option<T>,
) -> Result<T, ConfigError> {
    match non_empty(value) {
        None => Ok(default),
        Some(value) => {
            parse(&value.to_lowercase()).ok_or(ConfigError::InvalidValue { var, value })
        }
    }
}

fn sort_order(value: &str) -> Option<SortOrder> {
    match value {
        "ascending" | "asc" => Some(SortOrder::Ascending),
        "descending" | "desc" => Some(SortOrder::Descending),
        _ => None,
    }
}

fn section_order(value: &str) -> Option<SectionOrder> {
    match value {
        "upcoming-first" => Some(SectionOrder::UpcomingFirst),
        "past-first" => Some(SectionOrder::PastFirst),
        _ => None,
    }
}

fn boundary(value: &str) -> Option<Boundary> {
    match value {
        "instant" => Some(Boundary::Instant),
        "day" => Some(Boundary::Day),
        _ => None,
    }
}

fn switch(value: &str) -> Option<bool> {
    match value {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
