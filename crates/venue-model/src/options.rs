//! Policy switches for an import run.
//!
//! Revisions of the source import disagreed on several behaviors; each of
//! those choices is an explicit option here.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// What end time to use when the end timestamp is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndTimePolicy {
    /// Start time plus a number of hours. The hour wraps modulo 24 and the
    /// end date stays on the start date.
    StartPlusHours(u32),
    /// A fixed closing time on the start date.
    ClosingTime(NaiveTime),
}

impl Default for EndTimePolicy {
    fn default() -> Self {
        Self::StartPlusHours(4)
    }
}

/// What to do when the mandatory start date is absent or unparsable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MissingStartPolicy {
    /// Skip the row and count it as an error.
    #[default]
    Skip,
    /// Use the given date (date only, no clock time).
    Substitute(NaiveDate),
}

/// How to treat several bindings in one section resolving to the same
/// stable identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AliasPolicy {
    /// Refuse the profile at load time.
    #[default]
    Reject,
    /// Accept it; the later binding overwrites the earlier response.
    LastWriteWins,
}

/// Options controlling one import run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOptions {
    pub end_time: EndTimePolicy,
    pub missing_start: MissingStartPolicy,
    pub aliases: AliasPolicy,
    /// Abort the run after this many failed rows while nothing has
    /// succeeded yet. `None` never aborts.
    pub max_failures_without_success: Option<usize>,
    /// Number of error messages surfaced in the summary.
    pub error_display_limit: usize,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            end_time: EndTimePolicy::default(),
            missing_start: MissingStartPolicy::default(),
            aliases: AliasPolicy::default(),
            max_failures_without_success: Some(5),
            error_display_limit: 10,
        }
    }
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_end_time(mut self, policy: EndTimePolicy) -> Self {
        self.end_time = policy;
        self
    }

    #[must_use]
    pub fn with_missing_start(mut self, policy: MissingStartPolicy) -> Self {
        self.missing_start = policy;
        self
    }

    #[must_use]
    pub fn with_aliases(mut self, policy: AliasPolicy) -> Self {
        self.aliases = policy;
        self
    }

    #[must_use]
    pub fn with_failure_budget(mut self, budget: Option<usize>) -> Self {
        self.max_failures_without_success = budget;
        self
    }
}
