//! Event date and time resolution.

use chrono::{NaiveDate, NaiveTime, Timelike};
use venue_model::{EndTimePolicy, MissingStartPolicy, ParsedTimestamp};

/// Resolved dates and optional clock times of one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventSchedule {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Combines parsed start and end timestamps under the run's policies.
///
/// Returns `None` when the start is absent and the policy says to skip.
/// A missing end is filled in only when the start has a clock time;
/// date-only starts stay all-day.
pub fn resolve_schedule(
    start: Option<ParsedTimestamp>,
    end: Option<ParsedTimestamp>,
    missing_start: MissingStartPolicy,
    end_policy: EndTimePolicy,
) -> Option<EventSchedule> {
    let start = match (start, missing_start) {
        (Some(start), _) => start,
        (None, MissingStartPolicy::Skip) => return None,
        (None, MissingStartPolicy::Substitute(date)) => ParsedTimestamp::date_only(date),
    };

    if let Some(end) = end {
        return Some(EventSchedule {
            start_date: start.date,
            end_date: end.date,
            start_time: start.time_of_day,
            end_time: end.time_of_day,
        });
    }

    let end_time = start
        .time_of_day
        .and_then(|start_time| default_end_time(start_time, end_policy));
    Some(EventSchedule {
        start_date: start.date,
        end_date: start.date,
        start_time: start.time_of_day,
        end_time,
    })
}

/// End time for an event with no explicit end. Start-plus-hours wraps the
/// hour modulo 24 and keeps the minute.
pub fn default_end_time(start: NaiveTime, policy: EndTimePolicy) -> Option<NaiveTime> {
    match policy {
        EndTimePolicy::StartPlusHours(hours) => {
            NaiveTime::from_hms_opt((start.hour() + hours % 24) % 24, start.minute(), 0)
        }
        EndTimePolicy::ClosingTime(closing) => Some(closing),
    }
}
