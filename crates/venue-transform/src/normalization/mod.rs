//! Row normalization: raw spreadsheet cells into typed values.
//!
//! - **text**: trimmed strings, minimal number formatting
//! - **numeric**: integers and fixed-point decimals through a float parse
//! - **boolean**: yes/no token matching
//! - **datetime**: ordered-format timestamp parsing
//!
//! Every `to_*` function is total. Malformed input falls back to the
//! caller's default and logs a warning; the `try_*` variants report the
//! failure instead so callers can count it.

pub mod boolean;
pub mod datetime;
pub mod numeric;
pub mod text;

pub use boolean::{TRUTHY_TOKENS, parse_boolean, to_boolean};
pub use datetime::{
    MatchSource, TIMESTAMP_FORMATS, TimestampFormat, TimestampMatch, normalize_timestamp,
    parse_normalized, parse_timestamp, to_timestamp, try_timestamp,
};
pub use numeric::{to_fixed_point, to_integer, try_fixed_point, try_integer};
pub use text::{format_number, to_text};
