//! Column-aware access to one raw row.
//!
//! [`FieldReader`] wraps the normalization functions and remembers every
//! conversion failure so the run summary can count them.

use rust_decimal::Decimal;
use venue_model::{ParsedTimestamp, RawRow, RawValue};

use crate::diagnostics::{ConversionError, ConversionWarning};
use crate::normalization::{parse_boolean, to_text, try_fixed_point, try_integer, try_timestamp};

#[derive(Debug)]
pub struct FieldReader<'a> {
    row: &'a RawRow,
    warnings: Vec<ConversionWarning>,
}

impl<'a> FieldReader<'a> {
    pub fn new(row: &'a RawRow) -> Self {
        Self {
            row,
            warnings: Vec::new(),
        }
    }

    pub fn row(&self) -> &'a RawRow {
        self.row
    }

    pub fn raw(&self, column: &str) -> &'a RawValue {
        self.row.get(column)
    }

    pub fn text(&self, column: &str) -> String {
        to_text(self.raw(column))
    }

    pub fn boolean(&self, column: &str, default: bool) -> bool {
        parse_boolean(self.raw(column)).unwrap_or(default)
    }

    pub fn integer(&mut self, column: &str, default: i64) -> i64 {
        match try_integer(self.raw(column)) {
            Ok(value) => value.unwrap_or(default),
            Err(error) => {
                self.warn(column, error);
                default
            }
        }
    }

    /// Non-negative count. Negative values clamp to 0 with a warning.
    pub fn count(&mut self, column: &str, default: u32) -> u32 {
        let value = self.integer(column, i64::from(default));
        if value < 0 {
            self.warn(
                column,
                ConversionError::Negative {
                    raw: to_text(self.raw(column)),
                },
            );
            return 0;
        }
        match u32::try_from(value) {
            Ok(count) => count,
            Err(_) => {
                self.warn(
                    column,
                    ConversionError::OutOfRange {
                        raw: to_text(self.raw(column)),
                        target: "count",
                    },
                );
                default
            }
        }
    }

    pub fn decimal(&mut self, column: &str, default: Decimal) -> Decimal {
        match try_fixed_point(self.raw(column)) {
            Ok(value) => value.unwrap_or(default),
            Err(error) => {
                self.warn(column, error);
                default
            }
        }
    }

    pub fn timestamp(&mut self, column: &str) -> Option<ParsedTimestamp> {
        match try_timestamp(self.raw(column)) {
            Ok(value) => value,
            Err(error) => {
                self.warn(column, error);
                None
            }
        }
    }

    /// Logs and records a conversion failure for `column`.
    pub fn warn(&mut self, column: &str, error: ConversionError) {
        let warning = ConversionWarning::new(column, error);
        warning.log();
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[ConversionWarning] {
        &self.warnings
    }

    pub fn into_warnings(self) -> Vec<ConversionWarning> {
        self.warnings
    }
}
