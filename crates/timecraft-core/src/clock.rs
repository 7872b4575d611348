//! Weekday labels, wall-clock minutes, and the week base used to mint
//! absolute timestamps.
//!
//! All scheduling happens in minutes since midnight on a dense weekday index
//! (Mon=0 ... Sun=6). Absolute instants only appear at the edges, derived from
//! a Monday 00:00 UTC base.

use chrono::{DateTime, Datelike, Duration, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Minutes in one day; the exclusive upper bound for a start, inclusive for an end.
pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// One of the seven weekday labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Day {
    Mon,
    Tue,
    Wed,
    Thu,
    Fri,
    Sat,
    Sun,
}

impl Day {
    /// All days in index order.
    pub const ALL: [Day; 7] = [
        Day::Mon,
        Day::Tue,
        Day::Wed,
        Day::Thu,
        Day::Fri,
        Day::Sat,
        Day::Sun,
    ];

    /// Dense index, Mon=0 ... Sun=6.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn label(self) -> &'static str {
        match self {
            Day::Mon => "Mon",
            Day::Tue => "Tue",
            Day::Wed => "Wed",
            Day::Thu => "Thu",
            Day::Fri => "Fri",
            Day::Sat => "Sat",
            Day::Sun => "Sun",
        }
    }

    pub fn from_weekday(weekday: chrono::Weekday) -> Day {
        Self::ALL[weekday.num_days_from_monday() as usize]
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Day {
    type Err = ValidationError;

    /// Labels match exactly; "mon" or "Monday" are rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|d| d.label() == s)
            .ok_or_else(|| ValidationError::UnknownDay(s.to_string()))
    }
}

/// Parse an `HH:MM` clock string into minutes since midnight.
///
/// Accepts a one- or two-digit hour. `24:00` is allowed so it can serve as an
/// end-of-day bound.
pub fn parse_clock(s: &str) -> Result<u32, ValidationError> {
    let invalid = || ValidationError::InvalidClock(s.to_string());

    let (h, m) = s.trim().split_once(':').ok_or_else(invalid)?;
    let digits = |p: &str| p.bytes().all(|b| b.is_ascii_digit());
    if h.is_empty() || h.len() > 2 || m.len() != 2 || !digits(h) || !digits(m) {
        return Err(invalid());
    }
    let hour: u32 = h.parse().map_err(|_| invalid())?;
    let minute: u32 = m.parse().map_err(|_| invalid())?;
    if minute > 59 {
        return Err(invalid());
    }

    let total = hour * 60 + minute;
    if total > MINUTES_PER_DAY {
        return Err(invalid());
    }
    Ok(total)
}

/// Render minutes since midnight as `HH:MM`.
pub fn format_clock(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

/// Monday 00:00 UTC of the week containing `at`'s UTC date.
pub fn week_start(at: DateTime<Utc>) -> DateTime<Utc> {
    let date = at.date_naive();
    let monday = date - Duration::days(i64::from(date.weekday().num_days_from_monday()));
    monday.and_time(NaiveTime::MIN).and_utc()
}

/// Absolute instant for `minutes` past midnight on `day` of the week at `base`.
pub fn instant(base: DateTime<Utc>, day: Day, minutes: u32) -> DateTime<Utc> {
    base + Duration::days(day.index() as i64) + Duration::minutes(i64::from(minutes))
}
