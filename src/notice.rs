//! Short status messages a front end can show after an extraction attempt.

use crate::extractor::ExtractedEvent;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    /// Report a finished extraction; confidence below `threshold` is a warning
    pub fn for_event(event: &ExtractedEvent, threshold: u8) -> Self {
        if event.confidence() >= threshold {
            Self {
                level: NoticeLevel::Success,
                message: format!(
                    "Extracted \"{}\" with {}% confidence",
                    event.title(),
                    event.confidence()
                ),
            }
        } else {
            Self {
                level: NoticeLevel::Warning,
                message: format!(
                    "Extracted \"{}\" with low confidence ({}%), please review the details",
                    event.title(),
                    event.confidence()
                ),
            }
        }
    }

    /// Report a failed extraction
    pub fn failure(error: &dyn fmt::Display) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: format!("Extraction failed: {}", error),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.level {
            NoticeLevel::Success => "OK",
            NoticeLevel::Warning => "WARN",
            NoticeLevel::Error => "ERROR",
        };
        write!(f, "[{}] {}", label, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::ExtractError;
    use chrono::NaiveDate;

    fn event(confidence: u32) -> ExtractedEvent {
        let start = NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(14, 0, 0)
            .unwrap();
        ExtractedEvent::new("Standup", start, None, confidence)
    }

    #[test]
    fn test_success_and_warning() {
        let notice = Notice::for_event(&event(75), 50);
        assert_eq!(notice.level, NoticeLevel::Success);
        assert_eq!(
            notice.to_string(),
            "[OK] Extracted \"Standup\" with 75% confidence"
        );

        let notice = Notice::for_event(&event(10), 50);
        assert_eq!(notice.level, NoticeLevel::Warning);
        assert!(notice.message.contains("low confidence (10%)"));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let notice = Notice::for_event(&event(50), 50);
        assert_eq!(notice.level, NoticeLevel::Success);
    }

    #[test]
    fn test_failure() {
        let notice = Notice::failure(&ExtractError::EmptyInput);
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(
            notice.to_string(),
            "[ERROR] Extraction failed: Input text is empty"
        );
    }
}
