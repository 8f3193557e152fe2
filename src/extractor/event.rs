use chrono::{Duration, NaiveDateTime};
use serde::{Serialize, Serializer};

use super::title::DEFAULT_TITLE;

pub const DATE_WEIGHT: u8 = 30;
pub const TIME_WEIGHT: u8 = 25;
pub const TITLE_WEIGHT: u8 = 25;
pub const FALLBACK_TITLE_WEIGHT: u8 = 10;
pub const LOCATION_WEIGHT: u8 = 20;
pub const MAX_CONFIDENCE: u8 = 100;

/// A calendar event recovered from free-form text
///
/// Values are immutable once built. The end of the event is not stored; it is
/// always one hour after `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedEvent {
    title: String,
    start: NaiveDateTime,
    location: Option<String>,
    confidence: u8,
}

impl ExtractedEvent {
    /// Build an event, trimming text fields and capping the confidence at 100
    ///
    /// A blank title is replaced with the default title.
    pub fn new(title: &str, start: NaiveDateTime, location: Option<&str>, confidence: u32) -> Self {
        let location = location
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(str::to_string);
        let confidence = confidence.min(u32::from(MAX_CONFIDENCE)) as u8;
        let title = match title.trim() {
            "" => DEFAULT_TITLE,
            trimmed => trimmed,
        };
        Self {
            title: title.to_string(),
            start,
            location,
            confidence,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.start + Duration::hours(1)
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn confidence(&self) -> u8 {
        self.confidence
    }
}

#[derive(Serialize)]
struct EventRecord<'a> {
    title: &'a str,
    start: NaiveDateTime,
    end: NaiveDateTime,
    #[serde(skip_serializing_if = "Option::is_none")]
    location: Option<&'a str>,
    confidence: u8,
}

impl Serialize for ExtractedEvent {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        EventRecord {
            title: self.title(),
            start: self.start(),
            end: self.end(),
            location: self.location(),
            confidence: self.confidence(),
        }
        .serialize(serializer)
    }
}
