//! Calendar dates embedded in free header text ("Data as of 03/15/2024").
use crate::error::SmitchError;
use chrono::NaiveDate;
use regex::Regex;
use std::sync::LazyLock;

/// Explicit patterns, each with the formats tried on its matches in order.
static DATE_PATTERNS: LazyLock<[(Regex, [&str; 2]); 2]> = LazyLock::new(|| {
    [
        (
            Regex::new(r"\b\d{1,2}[/-]\d{1,2}[/-]\d{4}\b").expect("Hardcode regex pattern"),
            ["%m/%d/%Y", "%m-%d-%Y"],
        ),
        (
            Regex::new(r"\b\d{4}[/-]\d{1,2}[/-]\d{1,2}\b").expect("Hardcode regex pattern"),
            ["%Y/%m/%d", "%Y-%m-%d"],
        ),
    ]
});

/// Year-first shape with an optional day. Month/year alone is not a date, so
/// only matches that carry the day are accepted.
static LEGACY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{4})[/-](\d{1,2})(?:[/-](\d{1,2}))?").expect("Hardcode regex pattern")
});

/// Finds the first calendar date in `text`.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    for (pattern, formats) in DATE_PATTERNS.iter() {
        for matcher in pattern.find_iter(text) {
            let found = formats
                .iter()
                .find_map(|format| parse_with_format(matcher.as_str(), format).ok());
            if found.is_some() {
                return found;
            }
        }
    }
    parse_legacy(text)
}

fn parse_with_format(value: &str, format: &str) -> Result<NaiveDate, SmitchError> {
    Ok(NaiveDate::parse_from_str(value, format)?)
}

fn parse_legacy(text: &str) -> Option<NaiveDate> {
    LEGACY_PATTERN.captures_iter(text).find_map(|captures| {
        let day = captures.get(3)?;
        let value = format!("{}/{}/{}", &captures[1], &captures[2], day.as_str());
        parse_with_format(&value, "%Y/%m/%d").ok()
    })
}
