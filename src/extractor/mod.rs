//! Calendar event extraction from free-form email text.
//!
//! Four independent stages (date, time, title, location) each scan the whole
//! text with their own ordered pattern families. The orchestrator here fills
//! in defaults for anything a stage could not find, resolves the start
//! timestamp and adds up the confidence contributed by each stage.

mod date;
mod datetime;
mod event;
mod location;
mod matcher;
mod time;
mod title;

pub use date::extract_date;
pub use datetime::{
    manual_time, parse_date, parse_time, resolve, Resolution, DEFAULT_TIME, HARD_DEFAULT_HOUR,
};
pub use event::{
    ExtractedEvent, DATE_WEIGHT, FALLBACK_TITLE_WEIGHT, LOCATION_WEIGHT, MAX_CONFIDENCE,
    TIME_WEIGHT, TITLE_WEIGHT,
};
pub use location::extract_location;
pub use matcher::StageMatch;
pub use time::extract_time;
pub use title::{extract_title, first_line_title, resolve_title, Title, TitleSource, DEFAULT_TITLE};

use crate::clock::{Clock, SystemClock};
use crate::utils::{is_blank, sanitize_user_input};
use log::{debug, info};
use serde::Serialize;

/// Errors reported to callers of [`EventExtractor::try_extract`] and
/// [`EventExtractor::try_extract_traced`]
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("Input text is empty")]
    EmptyInput,
}

/// How each part of an [`ExtractedEvent`] was arrived at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractionTrace {
    pub date: Option<StageMatch>,
    pub time: Option<StageMatch>,
    pub title: Title,
    pub location: Option<StageMatch>,
    pub resolution: Resolution,
    pub confidence: u32,
}

/// Pulls a single event out of a block of text
#[derive(Debug, Clone, Default)]
pub struct EventExtractor<C = SystemClock> {
    clock: C,
}

impl EventExtractor<SystemClock> {
    pub fn new() -> Self {
        Self { clock: SystemClock }
    }
}

impl<C: Clock> EventExtractor<C> {
    /// Use `clock` as the source of "today" and the default time
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    /// Extract an event, degrading to defaults when nothing is recognized
    pub fn extract(&self, text: &str) -> ExtractedEvent {
        self.extract_traced(text).0
    }

    /// Like [`extract`](Self::extract) but rejects blank input
    pub fn try_extract(&self, text: &str) -> Result<ExtractedEvent, ExtractError> {
        self.try_extract_traced(text).map(|(event, _)| event)
    }

    /// Extract an event along with a record of which rules produced it
    pub fn extract_traced(&self, text: &str) -> (ExtractedEvent, ExtractionTrace) {
        self.run(&sanitize_user_input(text))
    }

    /// Like [`extract_traced`](Self::extract_traced) but rejects blank input
    pub fn try_extract_traced(
        &self,
        text: &str,
    ) -> Result<(ExtractedEvent, ExtractionTrace), ExtractError> {
        let cleaned = sanitize_user_input(text);
        if is_blank(&cleaned) {
            return Err(ExtractError::EmptyInput);
        }
        Ok(self.run(&cleaned))
    }

    fn run(&self, text: &str) -> (ExtractedEvent, ExtractionTrace) {
        let now = self.clock.now();

        let date = extract_date(text);
        let time = extract_time(text);
        let title = resolve_title(text);
        let location = extract_location(text);

        let resolution = resolve(
            date.as_ref().map(|m| m.text.as_str()),
            time.as_ref().map(|m| m.text.as_str()),
            now,
        );

        let confidence = [
            date.as_ref().map_or(0, |_| DATE_WEIGHT),
            time.as_ref().map_or(0, |_| TIME_WEIGHT),
            title.source.weight(),
            location.as_ref().map_or(0, |_| LOCATION_WEIGHT),
        ]
        .iter()
        .map(|&w| u32::from(w))
        .sum::<u32>();

        let event = ExtractedEvent::new(
            &title.text,
            resolution.start(),
            location.as_ref().map(|m| m.text.as_str()),
            confidence,
        );

        let trace = ExtractionTrace {
            date,
            time,
            title,
            location,
            resolution,
            confidence,
        };
        debug!("Extraction trace: {:?}", trace);
        info!(
            "Extracted '{}' starting {} (confidence {})",
            event.title(),
            event.start(),
            event.confidence()
        );

        (event, trace)
    }
}

/// Extract an event using the system clock
pub fn extract(text: &str) -> ExtractedEvent {
    EventExtractor::new().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap()
    }

    fn extractor() -> EventExtractor<FixedClock> {
        EventExtractor::with_clock(FixedClock(now()))
    }

    #[test]
    fn test_all_stages_contribute() {
        let text = "Tuesday, March 15th at 2:00 PM in Conference Room A";
        let (event, trace) = extractor().extract_traced(text);

        assert_eq!(trace.date.as_ref().unwrap().text, "Tuesday, March 15th");
        assert_eq!(trace.time.as_ref().unwrap().text, "2:00 PM");
        assert_eq!(
            trace.title.source,
            TitleSource::Pattern { family: "keyword" }
        );
        assert_eq!(event.location(), Some("Conference Room A"));
        assert_eq!(event.confidence(), 100);
        assert_eq!(event.start().to_string(), "2024-03-15 14:00:00");
    }

    #[test]
    fn test_nothing_recognized() {
        let (event, trace) = extractor().extract_traced("ok");
        assert_eq!(event.title(), DEFAULT_TITLE);
        assert_eq!(event.confidence(), 0);
        assert_eq!(event.location(), None);
        assert_eq!(event.start().to_string(), "2024-03-10 14:00:00");
        assert!(matches!(trace.resolution, Resolution::Parsed(_)));
    }

    #[test]
    fn test_try_extract_rejects_blank_input() {
        assert_eq!(
            extractor().try_extract(" \r\n\t "),
            Err(ExtractError::EmptyInput)
        );
        assert!(extractor().try_extract("Team sync").is_ok());
    }

    #[test]
    fn test_try_extract_traced_runs_once_per_input() {
        assert_eq!(
            extractor().try_extract_traced("\u{7}  \n"),
            Err(ExtractError::EmptyInput)
        );

        let text = "Weekly standup at 9:15 AM in Room 7";
        let (event, trace) = extractor().try_extract_traced(text).unwrap();
        assert_eq!(event, extractor().extract(text));
        assert_eq!(event.start(), trace.resolution.start());
        assert_eq!(u32::from(event.confidence()), trace.confidence);
    }

    #[test]
    fn test_extract_accepts_blank_input() {
        let event = extractor().extract("");
        assert_eq!(event.title(), DEFAULT_TITLE);
        assert_eq!(event.confidence(), 0);
    }

    #[test]
    fn test_trace_serializes() {
        let (_, trace) = extractor().extract_traced("Call me at 3pm");
        let value = serde_json::to_value(&trace).unwrap();
        assert_eq!(value["time"]["family"], "at_hour");
        assert_eq!(value["title"]["source"], "pattern");
        assert_eq!(value["title"]["family"], "keyword");
        assert_eq!(value["resolution"]["kind"], "parsed");
        assert_eq!(value["resolution"]["start"], "2024-03-10T15:00:00");
        assert_eq!(value["confidence"], 50);
    }
}
