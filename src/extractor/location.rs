//! Location stage: physical places and online meeting services.

use super::matcher::{self, Family, StageMatch};
use once_cell::sync::Lazy;
use regex::Regex;

const PLACE_WORDS: &str = "room|street|st|avenue|ave|building|floor|office";

static ANCHORED_PLACE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"(?i)(?:\b(?:at|in)\s+|\blocation:\s*)([^.\n,]*?\b(?:{places})\b[^.\n,]*)",
        places = PLACE_WORDS
    ))
    .expect("anchored place pattern")
});

static PLACE_WORD: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(r"(?i)\b(?:{places})\b", places = PLACE_WORDS))
        .expect("place word pattern")
});

static ONLINE_SERVICE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:zoom|teams|skype|google meet|webex)\b[^.\n,]*")
        .expect("online service pattern")
});

/// Place introduced by "at", "in" or "location:"
///
/// The first anchor in a sentence often introduces a time rather than the
/// place ("at 2:00 PM in Room 4"), so the match is narrowed to an inner
/// anchored phrase as long as the text being dropped names no place itself.
fn anchored_place(text: &str) -> Option<String> {
    let mut place = matcher::group(&ANCHORED_PLACE, text)?;
    while let Some(inner) = narrower_place(&place) {
        place = inner;
    }
    Some(place)
}

fn narrower_place(place: &str) -> Option<String> {
    let caps = ANCHORED_PLACE.captures(place)?;
    let inner = caps.get(1)?;
    if PLACE_WORD.is_match(&place[..inner.start()]) {
        return None;
    }

    let inner = inner.as_str().trim();
    if inner.is_empty() || inner.len() >= place.len() {
        None
    } else {
        Some(inner.to_string())
    }
}

fn online_service(text: &str) -> Option<String> {
    matcher::whole(&ONLINE_SERVICE, text)
}

static FAMILIES: &[Family] = &[
    Family {
        name: "anchored_place",
        extract: anchored_place,
    },
    Family {
        name: "online_service",
        extract: online_service,
    },
];

/// Find the first location, honoring family precedence
pub fn extract_location(text: &str) -> Option<StageMatch> {
    matcher::first_match("location", FAMILIES, text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location_of(text: &str) -> Option<(&'static str, String)> {
        extract_location(text).map(|m| (m.family, m.text))
    }

    #[test]
    fn test_anchored_places() {
        let test_cases = vec![
            ("See you in Conference Room A.", "Conference Room A"),
            ("Drinks at 42 Baker Street, then dinner", "42 Baker Street"),
            ("Location: 3rd Floor lounge\nBring laptops", "3rd Floor lounge"),
            ("We'll be at the Main St office", "the Main St office"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(
                location_of(input),
                Some(("anchored_place", expected.to_string())),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_time_anchor_is_narrowed_away() {
        let text = "Tuesday, March 15th at 2:00 PM in Conference Room A";
        let m = extract_location(text).unwrap();
        assert_eq!(m.text, "Conference Room A");
    }

    #[test]
    fn test_place_before_inner_anchor_is_kept() {
        let test_cases = vec![
            ("Meet in Room 12 at the main office", "Room 12 at the main office"),
            ("Lunch at 5th Avenue in the food court", "5th Avenue in the food court"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(
                location_of(input),
                Some(("anchored_place", expected.to_string())),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_anchor_without_place_word_is_ignored() {
        assert!(extract_location("Let's meet at noon in the park").is_none());
    }

    #[test]
    fn test_online_services() {
        let test_cases = vec![
            ("Join via Zoom link below", "Zoom link below"),
            ("We'll use Google Meet, as usual", "Google Meet"),
            ("Dial into webex", "webex"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(
                location_of(input),
                Some(("online_service", expected.to_string())),
                "{}",
                input
            );
        }
    }

    #[test]
    fn test_physical_place_precedes_online_service() {
        let m = extract_location("Zoom is down, so meet in Room 12").unwrap();
        assert_eq!(m.family, "anchored_place");
        assert_eq!(m.text, "Room 12");
    }
}
