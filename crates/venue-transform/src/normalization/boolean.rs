//! Yes/no normalization.

use venue_model::RawValue;

/// Tokens read as true, compared case-insensitively after trimming.
pub const TRUTHY_TOKENS: [&str; 4] = ["true", "yes", "1", "on"];

/// Converts a cell to a boolean.
///
/// Native booleans pass through, numbers are true when non-zero, text is
/// true only for [`TRUTHY_TOKENS`]. Missing cells yield `default`.
/// Never fails.
pub fn to_boolean(value: &RawValue, default: bool) -> bool {
    parse_boolean(value).unwrap_or(default)
}

/// `None` when the cell is missing.
pub fn parse_boolean(value: &RawValue) -> Option<bool> {
    match value {
        RawValue::Missing => None,
        RawValue::Bool(flag) => Some(*flag),
        RawValue::Number(number) if number.is_nan() => None,
        RawValue::Number(number) => Some(*number != 0.0),
        RawValue::Text(text) => {
            let token = text.trim().to_lowercase();
            Some(TRUTHY_TOKENS.contains(&token.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truthy_tokens_ignore_case_and_padding() {
        for token in ["Yes", " TRUE ", "1", "on", "yEs"] {
            assert!(to_boolean(&RawValue::from(token), false), "{token}");
        }
    }

    #[test]
    fn other_text_is_false() {
        for token in ["no", "false", "0", "", "y", "enabled"] {
            assert!(!to_boolean(&RawValue::from(token), true), "{token}");
        }
    }

    #[test]
    fn missing_uses_default() {
        assert!(to_boolean(&RawValue::Missing, true));
        assert!(!to_boolean(&RawValue::Missing, false));
        assert!(to_boolean(&RawValue::Number(f64::NAN), true));
    }

    #[test]
    fn numbers_and_bools() {
        assert!(to_boolean(&RawValue::Number(1.0), false));
        assert!(!to_boolean(&RawValue::Number(0.0), true));
        assert!(to_boolean(&RawValue::Bool(true), false));
    }
}
