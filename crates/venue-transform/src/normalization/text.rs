//! Text normalization.

use venue_model::RawValue;

/// Converts a cell to trimmed text.
///
/// Missing cells and NaN become the empty string. Integral numbers print
/// without a fractional part (`3.0` becomes `"3"`).
pub fn to_text(value: &RawValue) -> String {
    match value {
        RawValue::Missing => String::new(),
        RawValue::Bool(flag) => flag.to_string(),
        RawValue::Number(number) => format_number(*number),
        RawValue::Text(text) => text.trim().to_string(),
    }
}

/// Minimal string form of a number. Rust's float `Display` already omits
/// a trailing `.0` on integral values.
pub fn format_number(number: f64) -> String {
    if number.is_nan() {
        String::new()
    } else if number == 0.0 {
        // avoid "-0"
        "0".to_string()
    } else {
        format!("{number}")
    }
}

/// True for blank text and the spreadsheet null tokens `nan` and `none`.
pub(crate) fn is_null_token(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_integral_fraction() {
        assert_eq!(to_text(&RawValue::Number(3.0)), "3");
        assert_eq!(to_text(&RawValue::Number(3.25)), "3.25");
        assert_eq!(to_text(&RawValue::Number(f64::NAN)), "");
        assert_eq!(to_text(&RawValue::Number(-0.0)), "0");
    }

    #[test]
    fn text_is_trimmed_and_missing_is_empty() {
        assert_eq!(to_text(&RawValue::from("  Gold  ")), "Gold");
        assert_eq!(to_text(&RawValue::Missing), "");
        assert_eq!(to_text(&RawValue::Bool(true)), "true");
    }

    #[test]
    fn null_tokens() {
        assert!(is_null_token(" "));
        assert!(is_null_token("NaN"));
        assert!(is_null_token("None"));
        assert!(!is_null_token("0"));
    }
}
