//! Date stage: locate the first date expression in the text.

use super::matcher::{self, Family, StageMatch};
use once_cell::sync::Lazy;
use regex::Regex;

pub(crate) const MONTHS: &str =
    "january|february|march|april|may|june|july|august|september|october|november|december";
pub(crate) const WEEKDAYS: &str = "monday|tuesday|wednesday|thursday|friday|saturday|sunday";

// "March 15th, 2024"
static LONG_FORM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{months})\s+[0-9]{{1,2}}(?:st|nd|rd|th)?,?\s+[0-9]{{4}}\b",
        months = MONTHS
    ))
    .expect("long-form date pattern")
});

// "15/3/2024" - day/month order is left to the normalizer
static SLASHED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{1,2}/[0-9]{1,2}/[0-9]{4}\b")
        .expect("slashed date pattern")
});

static ISO_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b[0-9]{4}-[0-9]{1,2}-[0-9]{1,2}\b")
        .expect("iso date pattern")
});

// "Tuesday, March 15th"
static WEEKDAY_MONTH_DAY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{weekdays}),?\s+(?:{months})\s+[0-9]{{1,2}}(?:st|nd|rd|th)?\b",
        weekdays = WEEKDAYS,
        months = MONTHS
    ))
    .expect("weekday date pattern")
});

fn long_form(text: &str) -> Option<String> {
    matcher::whole(&LONG_FORM, text)
}

fn slashed(text: &str) -> Option<String> {
    matcher::whole(&SLASHED, text)
}

fn iso_like(text: &str) -> Option<String> {
    matcher::whole(&ISO_LIKE, text)
}

fn weekday_month_day(text: &str) -> Option<String> {
    matcher::whole(&WEEKDAY_MONTH_DAY, text)
}

static FAMILIES: &[Family] = &[
    Family {
        name: "long_form",
        extract: long_form,
    },
    Family {
        name: "slashed",
        extract: slashed,
    },
    Family {
        name: "iso_like",
        extract: iso_like,
    },
    Family {
        name: "weekday_month_day",
        extract: weekday_month_day,
    },
];

/// Find the first date expression, honoring family precedence
pub fn extract_date(text: &str) -> Option<StageMatch> {
    matcher::first_match("date", FAMILIES, text)
}
