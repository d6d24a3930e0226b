//! Prints the seminars announced in a GitHub repository as a Markdown/HTML fragment.
//!
//! The configuration is read from the environment, the fragment is written to stdout and logs go
//! to stderr.

use std::io::{stdout, Write};

use anyhow::Result;
use clap::{ArgAction, Parser};
use log::LevelFilter;
use seminars_core::{chrono::Local, config::Config, page};
use simplelog::{ColorChoice, TermLogger, TerminalMode};

static ENVIRONMENT: &str = "\
Environment:
  GITHUB_TOKEN               the GitHub API token (required)
  GITHUB_API_URL             the GitHub API [default: https://api.github.com]
  SEMINARS_OWNER             the owner of the repository [default: geem-lab]
  SEMINARS_REPO              the repository announcing the seminars [default: seminars]
  SEMINARS_SORT              ascending or descending [default: descending]
  SEMINARS_SECTION_ORDER     upcoming-first or past-first [default: upcoming-first]
  SEMINARS_BOUNDARY          instant or day [default: instant]
  SEMINARS_CALENDAR          show the calendar of the current month [default: true]
  SEMINARS_PROFILES          look up the profiles of the speakers [default: true]
  SEMINARS_INSTRUCTIONS_URL  the instructions page, empty to hide it";

#[derive(Debug, Parser)]
#[command(version, about, after_help = ENVIRONMENT)]
pub struct Arguments {
    /// log more, repeat for debug output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Arguments {
    fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            _ => LevelFilter::Debug,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Arguments::parse();
    TermLogger::init(
        args.log_level(),
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;
    let config = Config::from_env()?;
    log::debug!("{config:?}");
    let markdown = page::get(&config, Local::now().naive_local()).await?;
    let mut stdout = stdout().lock();
    writeln!(stdout, "{markdown}")?;
    Ok(())
}
