//! Date range for fetching remote events.

use chrono::{DateTime, Datelike, Days, NaiveDate, SecondsFormat, Utc};

/// Inclusive range of whole calendar days, expressed in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    /// From the start of `first` to the last second of `last`.
    pub fn between(first: NaiveDate, last: NaiveDate) -> Self {
        DateRange {
            from: first.and_time(chrono::NaiveTime::MIN).and_utc(),
            to: last
                .and_hms_opt(23, 59, 59)
                .unwrap_or_else(|| last.and_time(chrono::NaiveTime::MIN))
                .and_utc(),
        }
    }

    /// The whole month containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let first = date - Days::new(u64::from(date.day0()));

        let mut last = date;
        while let Some(next) = last.succ_opt() {
            if next.month() != date.month() {
                break;
            }
            last = next;
        }

        Self::between(first, last)
    }

    /// The given month, or None for an invalid year/month pair.
    pub fn month(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(Self::containing)
    }

    /// `today` through `today + days`.
    pub fn upcoming(today: NaiveDate, days: u64) -> Self {
        let last = today.checked_add_days(Days::new(days)).unwrap_or(today);
        Self::between(today, last)
    }

    /// `from` as the RFC3339 `time_min` the backend expects.
    pub fn time_min(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    /// `to` as the RFC3339 `time_max` the backend expects.
    pub fn time_max(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.from.date_naive() && date <= self.to.date_naive()
    }
}
