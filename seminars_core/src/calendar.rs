//! An HTML month calendar with the current day highlighted.

use chrono::{Datelike, NaiveDate, Weekday};

use crate::markup::element;

static HIGHLIGHT_COLOR: &str = "#66ff66";

static WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Render the month of `today` as a table, weeks starting on Monday.
pub fn month_calendar(today: NaiveDate) -> String {
    let mut table = vec![String::from("\n")];
    let caption = today.format("%B %Y").to_string();
    let caption = element("th", &[caption], &[("colspan", "7"), ("class", "month")]);
    table.push(element("tr", &[caption], &[]));
    table.push(String::from("\n"));
    let header: Vec<String> = WEEKDAYS
        .iter()
        .map(|weekday| {
            element(
                "th",
                &[weekday.to_string()],
                &[("class", css_class(*weekday))],
            )
        })
        .collect();
    table.push(element("tr", &header, &[]));
    table.push(String::from("\n"));
    for week in weeks(today) {
        let cells: Vec<String> = week
            .iter()
            .zip(WEEKDAYS)
            .map(|(day, weekday)| day_cell(*day, weekday, today))
            .collect();
        table.push(element("tr", &cells, &[]));
        table.push(String::from("\n"));
    }
    let table = element(
        "table",
        &table,
        &[
            ("border", "0"),
            ("cellpadding", "0"),
            ("cellspacing", "0"),
            ("class", "month"),
        ],
    );
    format!("{table}\n")
}

fn day_cell(day: Option<NaiveDate>, weekday: Weekday, today: NaiveDate) -> String {
    match day {
        None => element("td", &["&nbsp;"], &[("class", "noday")]),
        Some(day) if day == today => {
            let highlighted = element("b", &[element("u", &[day.day().to_string()], &[])], &[]);
            element(
                "td",
                &[highlighted],
                &[("class", css_class(weekday)), ("bgcolor", HIGHLIGHT_COLOR)],
            )
        }
        Some(day) => element(
            "td",
            &[day.day().to_string()],
            &[("class", css_class(weekday))],
        ),
    }
}

/// The days of the month grouped by week, padded with `None` outside of the month.
fn weeks(today: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let mut weeks = vec![];
    let mut week = [None; 7];
    let mut day = today.with_day(1);
    while let Some(date) = day.filter(|date| date.month() == today.month()) {
        let column = date.weekday().num_days_from_monday() as usize;
        week[column] = Some(date);
        if column == 6 {
            weeks.push(week);
            week = [None; 7];
        }
        day = date.succ_opt();
    }
    if week.iter().any(Option::is_some) {
        weeks.push(week);
    }
    weeks
}

fn css_class(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use scraper::{Html, Selector};

    use crate::calendar::{month_calendar, weeks};

    #[test]
    fn test_weeks() {
        // October 2026 starts on a Thursday and ends on a Saturday
        let october = weeks(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert_eq!(october.len(), 5);
        assert!(october[0][..3].iter().all(Option::is_none));
        assert_eq!(october[0][3], NaiveDate::from_ymd_opt(2026, 10, 1));
        assert_eq!(october[4][5], NaiveDate::from_ymd_opt(2026, 10, 31));
        assert_eq!(october[4][6], None);
        // February 2021 fills exactly four weeks
        let february = weeks(NaiveDate::from_ymd_opt(2021, 2, 10).unwrap());
        assert_eq!(february.len(), 4);
        assert!(february.iter().all(|week| week.iter().all(Option::is_some)));
    }

    #[test]
    fn test_month_calendar() {
        let calendar = month_calendar(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        assert!(calendar.starts_with(
            "<table border=\"0\" cellpadding=\"0\" cellspacing=\"0\" class=\"month\">\n\
             <tr><th colspan=\"7\" class=\"month\">October 2026</th></tr>\n\
             <tr><th class=\"mon\">Mon</th><th class=\"tue\">Tue</th>"
        ));
        assert!(calendar.contains(
            "<tr><td class=\"noday\">&nbsp;</td><td class=\"noday\">&nbsp;</td><td class=\"noday\">&nbsp;</td><td class=\"thu\">1</td>"
        ));
        assert!(calendar.contains(
            "<td class=\"sun\" bgcolor=\"#66ff66\"><b><u>18</u></b></td>"
        ));
        assert!(calendar.ends_with("</tr>\n</table>\n"));
    }

    #[test]
    fn test_month_calendar_structure() {
        let calendar = month_calendar(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
        let fragment = Html::parse_fragment(&calendar);
        let rows = Selector::parse("table.month tr").unwrap();
        // caption, weekday header and five weeks
        assert_eq!(fragment.select(&rows).count(), 7);
        let highlighted = Selector::parse("td[bgcolor]").unwrap();
        let cells: Vec<String> = fragment
            .select(&highlighted)
            .map(|cell| cell.text().collect())
            .collect();
        assert_eq!(cells, vec!["18"]);
        let days = Selector::parse("td:not(.noday)").unwrap();
        assert_eq!(fragment.select(&days).count(), 31);
    }
}
