//! This emitter renders seminars as a Markdown document with embedded HTML.

use chrono::NaiveDateTime;
use comrak::{markdown_to_html, Options};

use crate::{
    calendar::month_calendar,
    markup::{element, escape},
    seminar::Seminar,
    seminar_list::{Boundary, SeminarList},
};

static DATE_FORMAT: &str = "%b %-d %Y";
static ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
static AVATAR_WIDTH: &str = "128";

static HEADER: &str = "\n\nClick on each seminar to see more details.\n\n";
static BEGIN_UPCOMING_SEMINARS: &str = "\n\n## Upcoming Seminars\n\n";
static BEGIN_PAST_SEMINARS: &str = "\n\n## Past Seminars\n\n";

/// The page explaining how to announce a seminar.
pub static INSTRUCTIONS_URL: &str = "/seminars/instructions";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SectionOrder {
    #[default]
    UpcomingFirst,
    PastFirst,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Show the current month above the seminars.
    pub calendar: bool,
    pub section_order: SectionOrder,
    pub boundary: Boundary,
    /// Link to the instructions page, no call to action if `None`.
    pub instructions_url: Option<String>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            calendar: true,
            section_order: SectionOrder::default(),
            boundary: Boundary::default(),
            instructions_url: Some(String::from(INSTRUCTIONS_URL)),
        }
    }
}

/// Convert the Markdown of an issue body to HTML.
pub fn render_description(markdown: &str) -> String {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    markdown_to_html(markdown, &options)
}

impl Seminar {
    /// Render the seminar as a collapsible block.
    ///
    /// The summary shows the date, the title and the speaker, the block itself the avatar of the
    /// speaker and the description.
    pub fn to_markdown(&self) -> String {
        let summary = element(
            "summary",
            &[
                self.date_to_markdown(),
                String::from(" "),
                element("em", &[escape(&self.title)], &[]),
                String::from(" ("),
                self.speaker_name_to_markdown(),
                String::from(")"),
            ],
            &[],
        );
        element(
            "details",
            &[
                summary,
                self.speaker_avatar_to_markdown().unwrap_or_default(),
                render_description(&self.description),
            ],
            &[],
        )
    }

    fn date_to_markdown(&self) -> String {
        let date = self.date.format(DATE_FORMAT).to_string();
        let iso_date = self.date.format(ISO_FORMAT).to_string();
        let time = element(
            "time",
            &["📅 ", date.as_str()],
            &[("datetime", iso_date.as_str())],
        );
        element("small", &[element("strong", &[time], &[])], &[])
    }

    fn speaker_name_to_markdown(&self) -> String {
        let url = self.speaker.url();
        element(
            "a",
            &[escape(&self.speaker.display_name())],
            &[("href", url.as_str())],
        )
    }

    fn speaker_avatar_to_markdown(&self) -> Option<String> {
        let avatar_url = self.speaker.avatar_url()?;
        let name = self.speaker.display_name();
        let url = self.speaker.url();
        let image = element::<&str>(
            "img",
            &[],
            &[
                ("src", avatar_url),
                ("alt", self.speaker.login.as_str()),
                ("title", name.as_str()),
                ("align", "left"),
                ("width", AVATAR_WIDTH),
            ],
        );
        Some(element("a", &[image], &[("href", url.as_str())]))
    }
}

impl SeminarList {
    /// Render the whole page fragment.
    ///
    /// Upcoming and past seminars are separated relative to `now`, which is also the day
    /// highlighted in the calendar.
    pub fn to_markdown(&self, options: &RenderOptions, now: NaiveDateTime) -> String {
        let partition = self.partition(now, options.boundary);
        let mut markdown = String::from(HEADER);
        if options.calendar {
            markdown.push_str(&month_calendar(now.date()));
        }
        if let Some(url) = &options.instructions_url {
            markdown.push_str(&format!(
                "\n\n> Want to add *your* seminar? Check if the date of interest is available and take a look at [the instructions page]({url}).\n\n"
            ));
        }
        let upcoming = section(BEGIN_UPCOMING_SEMINARS, &partition.upcoming);
        let past = section(BEGIN_PAST_SEMINARS, &partition.past);
        let sections = match options.section_order {
            SectionOrder::UpcomingFirst => [upcoming, past],
            SectionOrder::PastFirst => [past, upcoming],
        };
        for section in sections {
            markdown.push_str(&section);
        }
        markdown
    }
}

fn section(banner: &str, seminars: &[&Seminar]) -> String {
    let mut section = String::from(banner);
    for seminar in seminars {
        section.push_str(&seminar.to_markdown());
    }
    section
}
