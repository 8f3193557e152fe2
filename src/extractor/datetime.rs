//! Turn raw date and time fragments into a concrete start timestamp.
//!
//! Resolution is an ordered attempt chain:
//!
//! 1. [`Resolution::Parsed`] - the fragments parse with the generic date grammar
//! 2. [`Resolution::ManualFallback`] - hour and minute are pulled out of the time
//!    fragment by hand and applied to the current date
//! 3. [`Resolution::HardDefault`] - the current date at 14:00
//!
//! A missing date means "today" and a missing time means [`DEFAULT_TIME`].

use super::date::WEEKDAYS;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Time assumed when the text carries none
pub const DEFAULT_TIME: &str = "2:00 PM";

/// Hour used when nothing in the time fragment can be interpreted
pub const HARD_DEFAULT_HOUR: u32 = 14;

const DATE_FORMATS: &[&str] = &["%B %d %Y", "%m/%d/%Y", "%Y-%m-%d"];

static LEADING_WEEKDAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)^\s*(?:{weekdays})\b", weekdays = WEEKDAYS))
        .expect("leading weekday pattern")
});

static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)([0-9]{1,2})(?:st|nd|rd|th)\b")
        .expect("ordinal suffix pattern")
});

static LEADING_AT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*at\b").expect("leading 'at' pattern")
});

static CLOCK_TIME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^([0-9]{1,2})(?::([0-9]{2}))?\s*([ap]m)?$")
        .expect("clock time pattern")
});

static DIGIT_RUN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[0-9]{1,2}").expect("digit run pattern")
});

/// Outcome of the resolution chain, tagged with the step that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "start", rename_all = "snake_case")]
pub enum Resolution {
    Parsed(NaiveDateTime),
    ManualFallback(NaiveDateTime),
    HardDefault(NaiveDateTime),
}

impl Resolution {
    pub fn start(&self) -> NaiveDateTime {
        match *self {
            Resolution::Parsed(start)
            | Resolution::ManualFallback(start)
            | Resolution::HardDefault(start) => start,
        }
    }
}

/// Resolve the start timestamp for the given fragments
pub fn resolve(date: Option<&str>, time: Option<&str>, now: NaiveDateTime) -> Resolution {
    let today = now.date();
    let time = time.unwrap_or(DEFAULT_TIME);

    if let Some(start) = parse_natural(date, time, today) {
        debug!("Parsed '{:?}' + '{}' as {}", date, time, start);
        return Resolution::Parsed(start);
    }

    if let Some(clock) = manual_time(time) {
        debug!(
            "Generic parse failed, using manual time {} on {}",
            clock, today
        );
        return Resolution::ManualFallback(today.and_time(clock));
    }

    debug!(
        "Could not interpret time '{}', using {}:00 today",
        time, HARD_DEFAULT_HOUR
    );
    Resolution::HardDefault(today.and_time(hard_default_time()))
}

fn hard_default_time() -> NaiveTime {
    NaiveTime::from_hms_opt(HARD_DEFAULT_HOUR, 0, 0).unwrap_or_default()
}

/// Generic grammar: both fragments must parse
fn parse_natural(date: Option<&str>, time: &str, today: NaiveDate) -> Option<NaiveDateTime> {
    let day = match date {
        Some(raw) => parse_date(raw, today.year())?,
        None => today,
    };
    Some(day.and_time(parse_time(time)?))
}

/// Parse a date fragment; a missing year means `year`
pub fn parse_date(raw: &str, year: i32) -> Option<NaiveDate> {
    let without_weekday = LEADING_WEEKDAY.replace(raw, "");
    let without_ordinals = ORDINAL_SUFFIX.replace_all(&without_weekday, "$1");
    let cleaned = without_ordinals
        .replace(',', " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(&cleaned, format).ok())
        .or_else(|| {
            let with_year = format!("{} {}", cleaned, year);
            NaiveDate::parse_from_str(&with_year, "%B %d %Y").ok()
        })
}

/// Parse a time fragment such as "2:00 PM", "at 3pm" or "18:30"
///
/// Without a meridiem the fragment must carry minutes and is read as 24-hour time.
pub fn parse_time(raw: &str) -> Option<NaiveTime> {
    let without_at = LEADING_AT.replace(raw, "");
    let caps = CLOCK_TIME.captures(without_at.trim())?;

    let hour: u32 = caps.get(1)?.as_str().parse().ok()?;
    let minute: u32 = caps.get(2).map_or("0", |m| m.as_str()).parse().ok()?;

    let hour_24 = match caps.get(3) {
        Some(meridiem) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            convert_to_24_hour(hour, &meridiem.as_str().to_lowercase())
        }
        None if caps.get(2).is_some() => hour,
        None => return None,
    };

    NaiveTime::from_hms_opt(hour_24, minute, 0)
}

/// Hand-rolled reading of a time fragment
///
/// The first one-or-two digit run is the hour, the second the minute. Any "pm"
/// in the fragment marks the afternoon; otherwise the hour is read as AM.
pub fn manual_time(raw: &str) -> Option<NaiveTime> {
    let mut runs = DIGIT_RUN.find_iter(raw);
    let hour: u32 = runs.next()?.as_str().parse().ok()?;
    let minute: u32 = match runs.next() {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let meridiem = if raw.to_lowercase().contains("pm") {
        "pm"
    } else {
        "am"
    };
    NaiveTime::from_hms_opt(convert_to_24_hour(hour, meridiem), minute, 0)
}

/// Convert a 12-hour clock hour to 24-hour form
fn convert_to_24_hour(hour: u32, meridiem: &str) -> u32 {
    match (hour, meridiem) {
        (12, "am") => 0,
        (12, "pm") => 12,
        (h, "pm") if h < 12 => h + 12,
        (h, _) => h,
    }
}
