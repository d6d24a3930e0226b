//! The whole run: fetch the issues, build the seminars and render them.

use chrono::NaiveDateTime;
use log::{info, warn};

use crate::{
    config::Config, error::ClientError, github_client::GithubClient, seminar_list::SeminarList,
};

/// Get the rendered seminar page for the configured repository.
///
/// `now` decides which seminars are upcoming, resolves relative dates and is highlighted in the
/// calendar.
pub async fn get(config: &Config, now: NaiveDateTime) -> Result<String, ClientError> {
    let client = GithubClient::new(&config.api_url, &config.token);
    let issues = client.list_issues(&config.owner, &config.repo).await?;
    info!("{}/{} has {} issues", config.owner, config.repo, issues.len());
    let mut seminars = SeminarList::from_issues(&issues, config.sort_order, now);
    if seminars.is_empty() {
        warn!("{}/{} announces no seminars", config.owner, config.repo);
    } else {
        info!("found {} seminars", seminars.len());
    }
    if config.resolve_profiles {
        seminars.resolve_speakers(&client).await?;
    }
    Ok(seminars.to_markdown(&config.render, now))
}
