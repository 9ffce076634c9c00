//! Conversion diagnostics and raw-value redaction.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;
use thiserror::Error;

static LOG_DATA: AtomicBool = AtomicBool::new(false);

/// Allow raw cell values (names, phone numbers) to appear in logs.
pub fn set_log_data(enabled: bool) {
    LOG_DATA.store(enabled, Ordering::Relaxed);
}

pub fn log_data_enabled() -> bool {
    LOG_DATA.load(Ordering::Relaxed)
}

/// Returns the value itself when data logging is on, else a placeholder.
pub fn redact_value(value: &str) -> &str {
    if log_data_enabled() {
        value
    } else {
        "[REDACTED]"
    }
}

/// Why a cell could not be converted. The caller substitutes a default.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ConversionError {
    #[error("'{raw}' is not a number")]
    NotNumeric { raw: String },
    #[error("'{raw}' is out of range for {target}")]
    OutOfRange { raw: String, target: &'static str },
    #[error("'{raw}' is negative, clamped to 0")]
    Negative { raw: String },
    #[error("'{raw}' is not a recognised date/time")]
    UnparsableTimestamp { raw: String },
    #[error("'{raw}' matches no configured option")]
    UnknownOption { raw: String },
}

impl ConversionError {
    /// Stable name of the failure, safe to log without the raw value.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotNumeric { .. } => "not_numeric",
            Self::OutOfRange { .. } => "out_of_range",
            Self::Negative { .. } => "negative",
            Self::UnparsableTimestamp { .. } => "unparsable_timestamp",
            Self::UnknownOption { .. } => "unknown_option",
        }
    }

    pub fn raw(&self) -> &str {
        match self {
            Self::NotNumeric { raw }
            | Self::OutOfRange { raw, .. }
            | Self::Negative { raw }
            | Self::UnparsableTimestamp { raw }
            | Self::UnknownOption { raw } => raw,
        }
    }
}

/// A non-fatal conversion failure tied to the column it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConversionWarning {
    pub field: String,
    pub error: ConversionError,
}

impl ConversionWarning {
    pub fn new(field: impl Into<String>, error: ConversionError) -> Self {
        Self {
            field: field.into(),
            error,
        }
    }

    /// Emits the warning through `tracing`, redacting the raw value.
    pub fn log(&self) {
        let raw = redact_value(self.error.raw());
        match &self.error {
            ConversionError::NotNumeric { .. } => {
                tracing::warn!(field = %self.field, raw = %raw, "not a number, using default");
            }
            ConversionError::OutOfRange { target, .. } => {
                tracing::warn!(field = %self.field, raw = %raw, expected = *target, "value out of range, using default");
            }
            ConversionError::Negative { .. } => {
                tracing::warn!(field = %self.field, raw = %raw, "negative quantity clamped to 0");
            }
            ConversionError::UnparsableTimestamp { .. } => {
                tracing::warn!(field = %self.field, raw = %raw, "could not parse date/time");
            }
            ConversionError::UnknownOption { .. } => {
                tracing::warn!(field = %self.field, raw = %raw, "no matching option");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn warning_exposes_raw_value() {
        let warning = ConversionWarning::new(
            "ma_depositamount",
            ConversionError::NotNumeric {
                raw: "£100".to_string(),
            },
        );
        assert_eq!(warning.error.raw(), "£100");
        assert_eq!(warning.error.to_string(), "'£100' is not a number");
    }

    #[test]
    fn kind_matches_serialized_tag() {
        let error = ConversionError::OutOfRange {
            raw: "1e40".to_string(),
            target: "decimal",
        };
        assert_eq!(error.kind(), "out_of_range");
        let json = serde_json::to_value(&error).unwrap();
        assert_eq!(json["kind"], error.kind());
        assert_eq!(redact_value("07700 900123"), "[REDACTED]");
    }
}
