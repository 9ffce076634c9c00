//! Integer and fixed-point normalization.
//!
//! Both conversions go through an `f64` parse first, so `"3.0"` and `"3"`
//! read alike. Monetary values are re-quantized into [`Decimal`] from the
//! shortest float representation, which keeps sums free of binary drift.

use std::str::FromStr;

use rust_decimal::Decimal;
use venue_model::RawValue;

use super::text::{format_number, is_null_token};
use crate::diagnostics::{ConversionError, redact_value};

fn numeric_input(value: &RawValue) -> Result<Option<f64>, ConversionError> {
    match value {
        RawValue::Missing => Ok(None),
        RawValue::Bool(flag) => Ok(Some(if *flag { 1.0 } else { 0.0 })),
        RawValue::Number(number) if number.is_nan() => Ok(None),
        RawValue::Number(number) => Ok(Some(*number)),
        RawValue::Text(text) if is_null_token(text) => Ok(None),
        RawValue::Text(text) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConversionError::NotNumeric { raw: text.clone() }),
    }
}

/// Integer conversion that reports why it failed. `Ok(None)` means the
/// cell was blank.
pub fn try_integer(value: &RawValue) -> Result<Option<i64>, ConversionError> {
    let Some(number) = numeric_input(value)? else {
        return Ok(None);
    };
    let truncated = number.trunc();
    // i64::MAX is not exactly representable; compare against 2^63
    const LIMIT: f64 = 9_223_372_036_854_775_808.0;
    if !truncated.is_finite() || truncated >= LIMIT || truncated < -LIMIT {
        return Err(ConversionError::OutOfRange {
            raw: value.to_string(),
            target: "integer",
        });
    }
    Ok(Some(truncated as i64))
}

/// Fixed-point conversion that reports why it failed. `Ok(None)` means the
/// cell was blank.
pub fn try_fixed_point(value: &RawValue) -> Result<Option<Decimal>, ConversionError> {
    let Some(number) = numeric_input(value)? else {
        return Ok(None);
    };
    let out_of_range = || ConversionError::OutOfRange {
        raw: value.to_string(),
        target: "decimal",
    };
    if !number.is_finite() {
        return Err(out_of_range());
    }
    Decimal::from_str(&format_number(number))
        .map(Some)
        .map_err(|_| out_of_range())
}

/// Converts a cell to an integer, truncating toward zero.
///
/// Blank cells, `nan`, `none` and unparsable text yield `default`; the
/// latter also logs a warning.
pub fn to_integer(value: &RawValue, default: i64) -> i64 {
    match try_integer(value) {
        Ok(parsed) => parsed.unwrap_or(default),
        Err(error) => {
            tracing::warn!(
                kind = error.kind(),
                raw = %redact_value(error.raw()),
                default,
                "integer conversion failed"
            );
            default
        }
    }
}

/// Converts a cell to a fixed-point decimal. Same fallback rules as
/// [`to_integer`].
pub fn to_fixed_point(value: &RawValue, default: Decimal) -> Decimal {
    match try_fixed_point(value) {
        Ok(parsed) => parsed.unwrap_or(default),
        Err(error) => {
            tracing::warn!(
                kind = error.kind(),
                raw = %redact_value(error.raw()),
                %default,
                "decimal conversion failed"
            );
            default
        }
    }
}
