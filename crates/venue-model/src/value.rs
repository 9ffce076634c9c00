//! Raw spreadsheet cells and rows.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One untyped cell as it came out of the spreadsheet export.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawValue {
    #[default]
    Missing,
    Bool(bool),
    Number(f64),
    Text(String),
}

static MISSING: RawValue = RawValue::Missing;

impl RawValue {
    /// Builds a value from a CSV cell. Blank cells become `Missing`.
    pub fn from_cell(cell: &str) -> Self {
        if cell.trim().is_empty() {
            Self::Missing
        } else {
            Self::Text(cell.to_string())
        }
    }

    /// True for `Missing` and for NaN numbers.
    pub fn is_missing(&self) -> bool {
        match self {
            Self::Missing => true,
            Self::Number(value) => value.is_nan(),
            Self::Bool(_) | Self::Text(_) => false,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => f.write_str("<missing>"),
            Self::Bool(value) => write!(f, "{value}"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for RawValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for RawValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Ordered mapping of column name to raw cell, read-only to the core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRow {
    cells: Vec<(String, RawValue)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a column. A repeated column name replaces the earlier cell.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<RawValue>) {
        let column = column.into();
        let value = value.into();
        if let Some(slot) = self.cells.iter_mut().find(|(name, _)| *name == column) {
            slot.1 = value;
        } else {
            self.cells.push((column, value));
        }
    }

    /// Looks a column up by exact name, then case-insensitively.
    /// Absent columns read as `Missing`.
    pub fn get(&self, column: &str) -> &RawValue {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .or_else(|| {
                self.cells
                    .iter()
                    .find(|(name, _)| name.eq_ignore_ascii_case(column))
            })
            .map_or(&MISSING, |(_, value)| value)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.cells
            .iter()
            .any(|(name, _)| name.eq_ignore_ascii_case(column))
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRow
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut row = Self::new();
        for (column, value) in iter {
            row.insert(column, value);
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_are_missing() {
        assert_eq!(RawValue::from_cell("   "), RawValue::Missing);
        assert_eq!(RawValue::from_cell(" Yes "), RawValue::Text(" Yes ".into()));
        assert!(RawValue::Number(f64::NAN).is_missing());
    }

    #[test]
    fn lookup_falls_back_to_case_insensitive() {
        let row: RawRow = [("MA_Title", "Khan Wedding")].into_iter().collect();
        assert_eq!(row.get("MA_Title").as_text(), Some("Khan Wedding"));
        assert_eq!(row.get("ma_title").as_text(), Some("Khan Wedding"));
        assert_eq!(row.get("ma_other"), &RawValue::Missing);
    }

    #[test]
    fn insert_keeps_column_order() {
        let mut row = RawRow::new();
        row.insert("b", "1");
        row.insert("a", "2");
        row.insert("b", "3");
        let columns: Vec<&str> = row.columns().collect();
        assert_eq!(columns, vec!["b", "a"]);
        assert_eq!(row.get("b").as_text(), Some("3"));
    }
}
