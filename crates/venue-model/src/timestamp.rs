use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

/// Naive local date with an optional clock time. No timezone is modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedTimestamp {
    pub date: NaiveDate,
    pub time_of_day: Option<NaiveTime>,
}

impl ParsedTimestamp {
    pub fn date_only(date: NaiveDate) -> Self {
        Self {
            date,
            time_of_day: None,
        }
    }

    pub fn at(date: NaiveDate, time: NaiveTime) -> Self {
        Self {
            date,
            time_of_day: Some(time),
        }
    }

    /// Combined date and time, or `None` when no time of day is known.
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        self.time_of_day.map(|time| self.date.and_time(time))
    }
}

impl From<NaiveDateTime> for ParsedTimestamp {
    fn from(value: NaiveDateTime) -> Self {
        Self::at(value.date(), value.time())
    }
}

impl fmt::Display for ParsedTimestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.time_of_day {
            Some(time) => write!(f, "{} {}", self.date, time),
            None => write!(f, "{}", self.date),
        }
    }
}
