//! Title stage: pick a human-readable event title.
//!
//! Pattern families are tried first. When none of them match, the first
//! reasonably long line of the message is used instead, and failing that the
//! fixed [`DEFAULT_TITLE`].

use super::event::{FALLBACK_TITLE_WEIGHT, TITLE_WEIGHT};
use super::matcher::{self, Family, StageMatch};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

pub const DEFAULT_TITLE: &str = "Extracted Event";

/// Lines must be longer than this (in characters) to serve as a fallback title
const MIN_FALLBACK_LEN: usize = 5;

const KEYWORDS: &str =
    "meeting|call|conference|appointment|interview|lunch|dinner|presentation|demo|review";

static KEYWORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)\b(?:{keywords})[ \t]+(?:with[ \t]+)?([^.\n]+)",
        keywords = KEYWORDS
    ))
    .expect("keyword title pattern")
});

static COMPOUND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:team|project|weekly|daily)[ \t]+\w+")
        .expect("compound title pattern")
});

static SUBJECT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bsubject:[ \t]*([^\n]+)")
        .expect("subject title pattern")
});

static QUOTED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"["“]([^"“”\n]+)["”]"#)
        .expect("quoted title pattern")
});

static REPLY_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:(?:subject|re|fwd):\s*)+")
        .expect("reply prefix pattern")
});

fn keyword(text: &str) -> Option<String> {
    matcher::group(&KEYWORD, text)
}

fn compound(text: &str) -> Option<String> {
    matcher::whole(&COMPOUND, text)
}

fn subject(text: &str) -> Option<String> {
    matcher::group(&SUBJECT, text)
}

fn quoted(text: &str) -> Option<String> {
    matcher::group(&QUOTED, text)
}

static FAMILIES: &[Family] = &[
    Family {
        name: "keyword",
        extract: keyword,
    },
    Family {
        name: "compound",
        extract: compound,
    },
    Family {
        name: "subject",
        extract: subject,
    },
    Family {
        name: "quoted",
        extract: quoted,
    },
];

/// Where the final title came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum TitleSource {
    Pattern { family: &'static str },
    FirstLine,
    Default,
}

impl TitleSource {
    pub fn weight(&self) -> u8 {
        match self {
            TitleSource::Pattern { .. } => TITLE_WEIGHT,
            TitleSource::FirstLine => FALLBACK_TITLE_WEIGHT,
            TitleSource::Default => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    pub text: String,
    #[serde(flatten)]
    pub source: TitleSource,
}

/// Find a title using the pattern families only
pub fn extract_title(text: &str) -> Option<StageMatch> {
    matcher::first_match("title", FAMILIES, text)
}

/// First non-empty line longer than five characters, reply prefixes removed
pub fn first_line_title(text: &str) -> Option<String> {
    text.lines()
        .map(|line| REPLY_PREFIX.replace(line.trim(), "").trim().to_string())
        .find(|line| line.chars().count() > MIN_FALLBACK_LEN)
}

/// Resolve the title, falling back to the first line and then the default
pub fn resolve_title(text: &str) -> Title {
    if let Some(m) = extract_title(text) {
        return Title {
            text: m.text,
            source: TitleSource::Pattern { family: m.family },
        };
    }

    if let Some(line) = first_line_title(text) {
        debug!("Using first line as title: '{}'", line);
        return Title {
            text: line,
            source: TitleSource::FirstLine,
        };
    }

    debug!("No title found, using default");
    Title {
        text: DEFAULT_TITLE.to_string(),
        source: TitleSource::Default,
    }
}
