//! Parsing of date arguments.

use anyhow::{Result, bail};
use chrono::{Datelike, Days, NaiveDate};
use studibot_core::date_range::DateRange;

/// Accepts `YYYY-MM-DD`, `DD.MM.YYYY` and the words today/heute, tomorrow/morgen.
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate> {
    let input = input.trim();

    match input.to_lowercase().as_str() {
        "today" | "heute" => return Ok(today),
        "tomorrow" | "morgen" => return Ok(today + Days::new(1)),
        _ => {}
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(input, "%d.%m.%Y") {
        return Ok(date);
    }

    bail!("Invalid date '{input}'. Use YYYY-MM-DD, DD.MM.YYYY, today or tomorrow")
}

/// The month given as `YYYY-MM`, or the month containing `today`.
pub fn parse_month(input: Option<&str>, today: NaiveDate) -> Result<DateRange> {
    let Some(input) = input else {
        return Ok(DateRange::containing(today));
    };

    let parsed = input
        .trim()
        .split_once('-')
        .and_then(|(year, month)| Some((year.parse::<i32>().ok()?, month.parse::<u32>().ok()?)))
        .and_then(|(year, month)| DateRange::month(year, month));

    match parsed {
        Some(range) => Ok(range),
        None => bail!("Invalid month '{input}'. Use YYYY-MM, e.g. {}", today.format("%Y-%m")),
    }
}

/// "Today", "Tomorrow" or a short weekday label.
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (date - today).num_days() {
        0 => "Today".to_string(),
        1 => "Tomorrow".to_string(),
        _ if date.year() == today.year() => date.format("%a %b %-d").to_string(),
        _ => date.format("%a %b %-d %Y").to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_date_formats() {
        let today = date(2025, 3, 13);

        assert_eq!(parse_date("2025-03-20", today).unwrap(), date(2025, 3, 20));
        assert_eq!(parse_date("20.03.2025", today).unwrap(), date(2025, 3, 20));
        assert_eq!(parse_date("Heute", today).unwrap(), today);
        assert_eq!(parse_date("tomorrow", today).unwrap(), date(2025, 3, 14));
        assert!(parse_date("next week", today).is_err());
    }

    #[test]
    fn test_parse_month() {
        let today = date(2025, 3, 13);

        let default = parse_month(None, today).unwrap();
        assert_eq!(default.time_min(), "2025-03-01T00:00:00Z");

        let april = parse_month(Some("2025-04"), today).unwrap();
        assert_eq!(april.time_max(), "2025-04-30T23:59:59Z");

        assert!(parse_month(Some("2025-13"), today).is_err());
        assert!(parse_month(Some("April"), today).is_err());
    }

    #[test]
    fn test_day_label() {
        let today = date(2025, 3, 13);

        assert_eq!(day_label(today, today), "Today");
        assert_eq!(day_label(date(2025, 3, 14), today), "Tomorrow");
        assert_eq!(day_label(date(2025, 3, 20), today), "Thu Mar 20");
        assert_eq!(day_label(date(2026, 1, 5), today), "Mon Jan 5 2026");
    }
}
