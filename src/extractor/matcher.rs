//! Ordered pattern families shared by every extraction stage.
//!
//! A stage is a fixed list of [`Family`] values. Families are tried in order and
//! the first one that yields a non-empty match wins; later families are never
//! consulted once an earlier one has matched.

use log::debug;
use regex::Regex;
use serde::Serialize;

/// Extractor function for a single family
pub type ExtractFn = fn(&str) -> Option<String>;

/// One alternative rule within a stage
pub struct Family {
    pub name: &'static str,
    pub extract: ExtractFn,
}

/// Text produced by a stage together with the family that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageMatch {
    pub family: &'static str,
    pub text: String,
}

/// Try each family in order, stopping at the first match
pub fn first_match(stage: &str, families: &[Family], text: &str) -> Option<StageMatch> {
    let found = families.iter().find_map(|family| {
        (family.extract)(text).map(|matched| StageMatch {
            family: family.name,
            text: matched,
        })
    });

    match &found {
        Some(m) => debug!(
            "{} stage matched family '{}': '{}'",
            stage, m.family, m.text
        ),
        None => debug!("{} stage found no match", stage),
    }
    found
}

/// First non-blank whole match of `re`, trimmed
pub fn whole(re: &Regex, text: &str) -> Option<String> {
    re.find_iter(text).find_map(|m| non_empty(m.as_str()))
}

/// First non-blank capture group of `re`, trimmed
///
/// A match whose capture is blank does not end the search; later matches of
/// the same pattern are still considered.
pub fn group(re: &Regex, text: &str) -> Option<String> {
    re.captures_iter(text)
        .find_map(|caps| caps.get(1).and_then(|m| non_empty(m.as_str())))
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
