//! Time stage: locate the first clock-time expression in the text.

use super::matcher::{self, Family, StageMatch};
use once_cell::sync::Lazy;
use regex::Regex;

static CLOCK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[0-9]{1,2}:[0-9]{2}(?:\s*[ap]m)?\b")
        .expect("clock time pattern")
});

static AT_HOUR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bat\s+[0-9]{1,2}(?::[0-9]{2})?(?:\s*[ap]m)?\b")
        .expect("'at' time pattern")
});

fn clock(text: &str) -> Option<String> {
    matcher::whole(&CLOCK, text)
}

fn at_hour(text: &str) -> Option<String> {
    matcher::whole(&AT_HOUR, text)
}

static FAMILIES: &[Family] = &[
    Family {
        name: "clock",
        extract: clock,
    },
    Family {
        name: "at_hour",
        extract: at_hour,
    },
];

/// Find the first time expression, honoring family precedence
pub fn extract_time(text: &str) -> Option<StageMatch> {
    matcher::first_match("time", FAMILIES, text)
}
