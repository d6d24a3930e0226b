//! The collection of all seminars of a repository.

use std::collections::BTreeMap;

use chrono::{NaiveDateTime, NaiveTime};
use log::{info, warn};

use crate::{
    error::ClientError,
    github_client::GithubClient,
    issue::{Issue, Profile},
    seminar::{is_seminar, Seminar},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    /// Most recent first.
    #[default]
    Descending,
}

/// Where upcoming seminars end and past seminars begin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Boundary {
    /// A seminar is upcoming until its date and time have passed.
    #[default]
    Instant,
    /// A seminar stays upcoming for the whole day it takes place on.
    Day,
}

impl Boundary {
    fn cutoff(self, now: NaiveDateTime) -> NaiveDateTime {
        match self {
            Boundary::Instant => now,
            Boundary::Day => now.date().and_time(NaiveTime::MIN),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub struct Partition<'a> {
    pub upcoming: Vec<&'a Seminar>,
    pub past: Vec<&'a Seminar>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeminarList {
    seminars: Vec<Seminar>,
}

impl SeminarList {
    /// Sort the seminars by date, keeping the input order of seminars on the same date.
    pub fn new(mut seminars: Vec<Seminar>, sort_order: SortOrder) -> Self {
        match sort_order {
            SortOrder::Ascending => seminars.sort_by(|a, b| a.date.cmp(&b.date)),
            SortOrder::Descending => seminars.sort_by(|a, b| b.date.cmp(&a.date)),
        }
        SeminarList { seminars }
    }

    /// Build the list from all issues of a repository.
    ///
    /// Issues without the seminar marker are ignored, seminar issues which can't be parsed are
    /// logged and left out.
    pub fn from_issues(issues: &[Issue], sort_order: SortOrder, now: NaiveDateTime) -> Self {
        let seminars = issues
            .iter()
            .filter(|issue| is_seminar(issue))
            .filter_map(|issue| match Seminar::from_issue(issue, now) {
                Ok(seminar) => {
                    info!("seminar: {seminar:?}");
                    Some(seminar)
                }
                Err(err) => {
                    warn!(
                        "skipping issue {:?}: {err}",
                        issue.title.as_deref().unwrap_or_default()
                    );
                    None
                }
            })
            .collect();
        SeminarList::new(seminars, sort_order)
    }

    pub fn seminars(&self) -> &[Seminar] {
        &self.seminars
    }

    pub fn len(&self) -> usize {
        self.seminars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seminars.is_empty()
    }

    /// Split the seminars into upcoming and past ones, both keeping the sort order.
    pub fn partition(&self, now: NaiveDateTime, boundary: Boundary) -> Partition<'_> {
        let cutoff = boundary.cutoff(now);
        let (upcoming, past) = self
            .seminars
            .iter()
            .partition(|seminar| seminar.date >= cutoff);
        Partition { upcoming, past }
    }

    /// Look up the profile of every speaker.
    ///
    /// Each login is requested once. Invalid credentials abort, any other failure leaves the
    /// speaker without a profile.
    pub async fn resolve_speakers(&mut self, client: &GithubClient) -> Result<(), ClientError> {
        let mut profiles: BTreeMap<String, Option<Profile>> = BTreeMap::new();
        for seminar in &self.seminars {
            let login = &seminar.speaker.login;
            if profiles.contains_key(login) {
                continue;
            }
            let profile = match client.get_user(login).await {
                Ok(profile) => Some(profile),
                Err(err) if err.is_configuration() => return Err(err),
                Err(err) => {
                    warn!("could not resolve speaker {login}: {err}");
                    None
                }
            };
            profiles.insert(login.clone(), profile);
        }
        for seminar in &mut self.seminars {
            seminar.speaker.profile = profiles
                .get(&seminar.speaker.login)
                .cloned()
                .flatten();
        }
        Ok(())
    }
}
