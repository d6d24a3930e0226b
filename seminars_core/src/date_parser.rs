//! This parser reads the free-text date written below the date marker of an announcement.
//!
//! Absolute dates are tried first (ISO, US numeric and written month names), then relative
//! phrases such as `tomorrow`, `in 2 weeks` or `next friday`. Both may be followed by a time.
//! A missing time means midnight, a missing year means the year of `now`.

use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PARENTHESES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\([^)]*\)").unwrap());
static ORDINAL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(?P<number>\d{1,2})(?:st|nd|rd|th)\b").unwrap());
static FILLER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b(?:of|the|on)\b").unwrap());

static ISO_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
            ^(?P<year>\d{4})
            [-/]
            (?P<month>\d{1,2})
            [-/]
            (?P<day>\d{1,2})
            (?:(?:t|\s+)(?P<time>.+))? # 2025-03-03T14:00 or 2025-03-03 14:00
            $
        ",
    )
    .unwrap()
});
static US_NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
            ^(?P<month>\d{1,2})
            /
            (?P<day>\d{1,2})
            /
            (?P<year>\d{4}|\d{2})
            (?:\s+(?P<time>.+))?
            $
        ",
    )
    .unwrap()
});
static MONTH_FIRST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
            ^(?P<month_name>[a-z]+)\.?
            \s+(?P<day>\d{1,2})
            (?:\s+(?P<year>\d{4}))?
            (?:\s+(?P<time>.+))?
            $
        ",
    )
    .unwrap()
});
static DAY_FIRST_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
            ^(?P<day>\d{1,2})
            \s+(?P<month_name>[a-z]+)\.?
            (?:\s+(?P<year>\d{4}))?
            (?:\s+(?P<time>.+))?
            $
        ",
    )
    .unwrap()
});
static RELATIVE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
            ^(?:
                (?P<keyword>today|tomorrow|yesterday)
                | in\s+(?P<in_amount>\d+|an?|one)\s+(?P<in_unit>day|week|month|year)s?
                | (?P<ago_amount>\d+|an?|one)\s+(?P<ago_unit>day|week|month|year)s?\s+ago
                | (?P<direction>next|last)\s+(?P<direction_unit>[a-z]+)
                | (?P<weekday>[a-z]+)
            )
            (?:\s+(?P<time>.+))?
            $
        ",
    )
    .unwrap()
});
static TIME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?x)
            ^(?:at\s+)?
            (?P<hour>\d{1,2})
            (?:
                (?P<separator>[:h])(?P<minute>\d{2})
                (?::(?P<second>\d{2}))?
            )?
            (?P<h_suffix>h)?
            \s*
            (?P<meridiem>am|pm|a\.m\.?|p\.m\.?)?
            (?:\s*(?:utc|gmt)(?:[+-]\d{1,2}(?::?\d{2})?)?)? # the zone is ignored
            $
        ",
    )
    .unwrap()
});

/// Parse a date expression relative to `now`.
///
/// Returns `None` for unrecognised text and impossible calendar dates.
pub fn parse(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let text = normalize(text);
    if text.is_empty() {
        return None;
    }
    if text == "now" {
        return Some(now);
    }
    parse_absolute(&text, now).or_else(|| parse_relative(&text, now))
}

/// Lowercase the text and drop everything that carries no date information.
fn normalize(text: &str) -> String {
    let text = text.to_lowercase().replace(',', " ");
    let text = PARENTHESES_REGEX.replace_all(&text, " ");
    let text = ORDINAL_REGEX.replace_all(&text, "$number");
    let text = FILLER_REGEX.replace_all(&text, " ");
    text.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .trim_end_matches('.')
        .to_string()
}

fn parse_absolute(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let text = strip_leading_weekday(text);
    if let Some(captures) = ISO_REGEX.captures(text) {
        let date = NaiveDate::from_ymd_opt(
            captures["year"].parse().ok()?,
            captures["month"].parse().ok()?,
            captures["day"].parse().ok()?,
        )?;
        return with_time(date, &captures);
    }
    if let Some(captures) = US_NUMERIC_REGEX.captures(text) {
        let year = full_year(captures["year"].parse().ok()?);
        let month: u32 = captures["month"].parse().ok()?;
        let day: u32 = captures["day"].parse().ok()?;
        // 25/03/2025 can only be day first
        let (month, day) = if month > 12 && day <= 12 {
            (day, month)
        } else {
            (month, day)
        };
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        return with_time(date, &captures);
    }
    for regex in [&*MONTH_FIRST_REGEX, &*DAY_FIRST_REGEX] {
        let Some(captures) = regex.captures(text) else {
            continue;
        };
        let Some(month) = month_from_name(&captures["month_name"]) else {
            continue;
        };
        let year = match captures.name("year") {
            Some(year) => year.as_str().parse().ok()?,
            None => now.year(),
        };
        let date = NaiveDate::from_ymd_opt(year, month, captures["day"].parse().ok()?)?;
        return with_time(date, &captures);
    }
    None
}

fn parse_relative(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let captures = RELATIVE_REGEX.captures(text)?;
    let today = now.date();
    let date = if let Some(keyword) = captures.name("keyword") {
        match keyword.as_str() {
            "tomorrow" => today + Duration::days(1),
            "yesterday" => today - Duration::days(1),
            _ => today,
        }
    } else if let (Some(amount), Some(unit)) = (captures.name("in_amount"), captures.name("in_unit"))
    {
        shift(today, parse_amount(amount.as_str())?, unit.as_str())?
    } else if let (Some(amount), Some(unit)) =
        (captures.name("ago_amount"), captures.name("ago_unit"))
    {
        shift(today, -parse_amount(amount.as_str())?, unit.as_str())?
    } else if let (Some(direction), Some(unit)) =
        (captures.name("direction"), captures.name("direction_unit"))
    {
        let forward = direction.as_str() == "next";
        match (unit.as_str(), weekday_from_name(unit.as_str())) {
            (_, Some(weekday)) if forward => next_weekday(today, weekday, false),
            (_, Some(weekday)) => previous_weekday(today, weekday),
            (unit @ ("week" | "month" | "year"), None) => {
                shift(today, if forward { 1 } else { -1 }, unit)?
            }
            _ => return None,
        }
    } else {
        let weekday = weekday_from_name(captures.name("weekday")?.as_str())?;
        next_weekday(today, weekday, true)
    };
    with_time(date, &captures)
}

/// Attach the optional `time` capture to the date.
fn with_time(date: NaiveDate, captures: &Captures) -> Option<NaiveDateTime> {
    let time = match captures.name("time") {
        Some(time) => parse_time(time.as_str())?,
        None => NaiveTime::MIN,
    };
    Some(date.and_time(time))
}

fn parse_time(text: &str) -> Option<NaiveTime> {
    let captures = TIME_REGEX.captures(text.trim())?;
    let meridiem = captures.name("meridiem").map(|m| m.as_str());
    // a bare number is not a time
    if captures.name("separator").is_none()
        && captures.name("h_suffix").is_none()
        && meridiem.is_none()
    {
        return None;
    }
    let mut hour: u32 = captures["hour"].parse().ok()?;
    let minute: u32 = match captures.name("minute") {
        Some(minute) => minute.as_str().parse().ok()?,
        None => 0,
    };
    let second: u32 = match captures.name("second") {
        Some(second) => second.as_str().parse().ok()?,
        None => 0,
    };
    if let Some(meridiem) = meridiem {
        if !(1..=12).contains(&hour) {
            return None;
        }
        let afternoon = meridiem.starts_with('p');
        hour = match (hour, afternoon) {
            (12, false) => 0,
            (12, true) => 12,
            (hour, true) => hour + 12,
            (hour, false) => hour,
        };
    }
    NaiveTime::from_hms_opt(hour, minute, second)
}

fn strip_leading_weekday(text: &str) -> &str {
    match text.split_once(' ') {
        Some((first, rest)) if weekday_from_name(first.trim_end_matches('.')).is_some() => rest,
        _ => text,
    }
}

fn full_year(year: i32) -> i32 {
    if year < 100 {
        2000 + year
    } else {
        year
    }
}

fn parse_amount(amount: &str) -> Option<i64> {
    match amount {
        "a" | "an" | "one" => Some(1),
        amount => amount.parse().ok(),
    }
}

/// Move `date` by `amount` units, `None` if the result is out of range.
fn shift(date: NaiveDate, amount: i64, unit: &str) -> Option<NaiveDate> {
    let months = match unit {
        "day" => return date.checked_add_signed(Duration::try_days(amount)?),
        "week" => return date.checked_add_signed(Duration::try_weeks(amount)?),
        "month" => amount,
        "year" => amount.checked_mul(12)?,
        _ => return None,
    };
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        date.checked_add_months(magnitude)
    } else {
        date.checked_sub_months(magnitude)
    }
}

/// The first `weekday` from `date` on, skipping `date` itself unless `include_today`.
fn next_weekday(date: NaiveDate, weekday: Weekday, include_today: bool) -> NaiveDate {
    let mut days = (7 + i64::from(weekday.num_days_from_monday())
        - i64::from(date.weekday().num_days_from_monday()))
        % 7;
    if days == 0 && !include_today {
        days = 7;
    }
    date + Duration::days(days)
}

fn previous_weekday(date: NaiveDate, weekday: Weekday) -> NaiveDate {
    let mut days = (7 + i64::from(date.weekday().num_days_from_monday())
        - i64::from(weekday.num_days_from_monday()))
        % 7;
    if days == 0 {
        days = 7;
    }
    date - Duration::days(days)
}

fn month_from_name(name: &str) -> Option<u32> {
    let month = match name {
        "jan" | "january" => 1,
        "feb" | "february" => 2,
        "mar" | "march" => 3,
        "apr" | "april" => 4,
        "may" => 5,
        "jun" | "june" => 6,
        "jul" | "july" => 7,
        "aug" | "august" => 8,
        "sep" | "sept" | "september" => 9,
        "oct" | "october" => 10,
        "nov" | "november" => 11,
        "dec" | "december" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let weekday = match name {
        "mon" | "monday" => Weekday::Mon,
        "tue" | "tues" | "tuesday" => Weekday::Tue,
        "wed" | "wednesday" => Weekday::Wed,
        "thu" | "thur" | "thurs" | "thursday" => Weekday::Thu,
        "fri" | "friday" => Weekday::Fri,
        "sat" | "saturday" => Weekday::Sat,
        "sun" | "sunday" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}
