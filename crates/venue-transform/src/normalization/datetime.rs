//! Spreadsheet date/time parsing.
//!
//! Exports hand us timestamps in whatever shape the spreadsheet tool chose:
//! ISO with or without fractions, US 12-hour with AM/PM, day-first UK
//! dates, and the occasional stray non-printable character. Parsing runs in
//! two steps:
//!
//! 1. [`normalize_timestamp`] cleans the string (printable ASCII only,
//!    single spaces, fractions cut to 6 digits).
//! 2. [`TIMESTAMP_FORMATS`] is tried in order; the first pattern that
//!    consumes the whole string wins. Numeric dates with a day of 12 or less
//!    are ambiguous, and the order below resolves them month-first.
//!
//! When no pattern matches, a bare `M/D/YYYY` fragment is pulled out of the
//! string and read at noon. Nothing else is guessed.

use std::fmt;
use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use regex::{Captures, Regex};
use venue_model::{ParsedTimestamp, RawValue};

use super::text::to_text;
use crate::diagnostics::{ConversionError, ConversionWarning};

/// Time glued to or spaced away from its AM/PM marker.
static MERIDIEM_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}:\d{2}(?::\d{2})?) ?([AaPp][Mm])\b").expect("Invalid meridiem regex")
});

/// Seconds followed by more than 6 fractional digits.
static LONG_FRACTION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{2}:\d{2}:\d{2})\.(\d{6})\d+").expect("Invalid fraction regex")
});

static EMBEDDED_DATE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d{1,2}/\d{1,2}/\d{4})").expect("Invalid embedded date regex")
});

/// One entry of the ordered format list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormat {
    /// chrono `strftime` pattern.
    pub pattern: &'static str,
    pub has_time: bool,
    /// Only tried when the input carries a `.` fraction.
    pub fractional: bool,
}

const fn date_time(pattern: &'static str) -> TimestampFormat {
    TimestampFormat {
        pattern,
        has_time: true,
        fractional: false,
    }
}

const fn date_only(pattern: &'static str) -> TimestampFormat {
    TimestampFormat {
        pattern,
        has_time: false,
        fractional: false,
    }
}

/// Formats in priority order. Month-first US forms precede day-first ones.
pub const TIMESTAMP_FORMATS: &[TimestampFormat] = &[
    TimestampFormat {
        pattern: "%Y-%m-%d %H:%M:%S%.f",
        has_time: true,
        fractional: true,
    },
    date_time("%Y-%m-%d %H:%M:%S"),
    date_time("%Y-%m-%d %H:%M"),
    date_only("%Y-%m-%d"),
    date_time("%m/%d/%Y %I:%M:%S %p"),
    date_time("%m/%d/%Y %I:%M %p"),
    date_time("%m/%d/%Y %H:%M:%S"),
    date_time("%m/%d/%Y %H:%M"),
    date_only("%m/%d/%Y"),
    date_time("%d/%m/%Y %H:%M:%S"),
    date_time("%d/%m/%Y %H:%M"),
    date_only("%d/%m/%Y"),
    date_time("%Y-%m-%dT%H:%M:%S"),
    date_time("%Y-%m-%dT%H:%M:%SZ"),
];

/// Patterns tried on an embedded date fragment, month-first.
const EMBEDDED_DATE_FORMATS: [&str; 2] = ["%m/%d/%Y", "%d/%m/%Y"];

/// Which rule produced a parsed timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchSource {
    /// Index into [`TIMESTAMP_FORMATS`].
    Format(usize),
    /// Fallback on a `M/D/YYYY` fragment; the pattern that read it.
    EmbeddedDate(&'static str),
}

impl fmt::Display for MatchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(index) => match TIMESTAMP_FORMATS.get(*index) {
                Some(format) => f.write_str(format.pattern),
                None => write!(f, "format #{index}"),
            },
            Self::EmbeddedDate(pattern) => write!(f, "embedded {pattern}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampMatch {
    pub timestamp: ParsedTimestamp,
    pub source: MatchSource,
}

/// Cleans a raw timestamp string.
///
/// Idempotent: normalizing the output again returns it unchanged.
pub fn normalize_timestamp(raw: &str) -> String {
    let printable: String = raw
        .chars()
        .filter_map(|c| {
            if c.is_whitespace() {
                Some(' ')
            } else if (' '..='~').contains(&c) {
                Some(c)
            } else {
                None
            }
        })
        .collect();
    let collapsed = printable.split_whitespace().collect::<Vec<_>>().join(" ");
    let spaced = MERIDIEM_REGEX.replace_all(&collapsed, "$1 $2");
    LONG_FRACTION_REGEX
        .replace_all(&spaced, |caps: &Captures<'_>| format!("{}.{}", &caps[1], &caps[2]))
        .into_owned()
}

fn parse_with(format: &TimestampFormat, text: &str) -> Option<ParsedTimestamp> {
    if format.has_time {
        NaiveDateTime::parse_from_str(text, format.pattern)
            .ok()
            .map(ParsedTimestamp::from)
    } else {
        NaiveDate::parse_from_str(text, format.pattern)
            .ok()
            .map(ParsedTimestamp::date_only)
    }
}

/// Tries every format on an already normalized string, then the embedded
/// date fallback.
pub fn parse_normalized(normalized: &str) -> Option<TimestampMatch> {
    if normalized.is_empty() {
        return None;
    }
    let has_fraction = normalized.contains('.');
    for (index, format) in TIMESTAMP_FORMATS.iter().enumerate() {
        if format.fractional && !has_fraction {
            continue;
        }
        if let Some(timestamp) = parse_with(format, normalized) {
            return Some(TimestampMatch {
                timestamp,
                source: MatchSource::Format(index),
            });
        }
    }

    let fragment = EMBEDDED_DATE_REGEX.captures(normalized)?.get(1)?.as_str();
    let noon = NaiveTime::from_hms_opt(12, 0, 0)?;
    EMBEDDED_DATE_FORMATS.into_iter().find_map(|pattern| {
        NaiveDate::parse_from_str(fragment, pattern)
            .ok()
            .map(|date| TimestampMatch {
                timestamp: ParsedTimestamp::at(date, noon),
                source: MatchSource::EmbeddedDate(pattern),
            })
    })
}

/// Normalizes and parses a raw timestamp string.
pub fn parse_timestamp(raw: &str) -> Option<TimestampMatch> {
    parse_normalized(&normalize_timestamp(raw))
}

/// Timestamp conversion that reports why it failed. `Ok(None)` means the
/// cell was blank.
pub fn try_timestamp(value: &RawValue) -> Result<Option<ParsedTimestamp>, ConversionError> {
    let text = to_text(value);
    if text.is_empty() {
        return Ok(None);
    }
    match parse_timestamp(&text) {
        Some(matched) => {
            tracing::trace!(pattern = %matched.source, "parsed timestamp");
            Ok(Some(matched.timestamp))
        }
        None => Err(ConversionError::UnparsableTimestamp { raw: text }),
    }
}

/// Converts a cell to a timestamp, or `None` when blank or unparsable.
/// Unparsable values log a warning naming `field_label`.
pub fn to_timestamp(value: &RawValue, field_label: &str) -> Option<ParsedTimestamp> {
    match try_timestamp(value) {
        Ok(parsed) => parsed,
        Err(error) => {
            ConversionWarning::new(field_label, error).log();
            None
        }
    }
}
