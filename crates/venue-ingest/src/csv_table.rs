use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::{debug, warn};
use venue_model::{CaseInsensitiveSet, RawRow, RawValue};

use crate::error::IngestError;

/// A spreadsheet export: normalized headers and one raw row per record.
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl CsvTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows with their 1-based data row number.
    pub fn numbered_rows(&self) -> impl Iterator<Item = (usize, &RawRow)> {
        self.rows.iter().enumerate().map(|(idx, row)| (idx + 1, row))
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> RawValue {
    RawValue::from_cell(raw.trim_matches('\u{feff}'))
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable, IngestError> {
    let file = std::fs::File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_csv_from(file, path)
}

/// Reads CSV from any reader; `path` is only used in error messages.
pub fn read_csv_from<R: Read>(input: R, path: &Path) -> Result<CsvTable, IngestError> {
    let csv_error = |source| IngestError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let raw_headers = reader.headers().map_err(csv_error)?.clone();
    let headers: Vec<String> = raw_headers.iter().map(normalize_header).collect();
    if headers.iter().all(String::is_empty) {
        return Err(IngestError::MissingHeader {
            path: path.to_path_buf(),
        });
    }

    // First occurrence of a column name wins.
    let mut seen = CaseInsensitiveSet::default();
    let keep: Vec<bool> = headers
        .iter()
        .map(|header| {
            if header.is_empty() {
                return false;
            }
            if seen.contains(header) {
                warn!(column = %header, "duplicate column ignored");
                return false;
            }
            seen.insert(header);
            true
        })
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(csv_error)?;
        if record.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        let mut row = RawRow::new();
        for (idx, header) in headers.iter().enumerate() {
            if !keep[idx] {
                continue;
            }
            let value = record.get(idx).map_or(RawValue::Missing, normalize_cell);
            row.insert(header.as_str(), value);
        }
        rows.push(row);
    }
    debug!(path = %path.display(), columns = seen.len(), rows = rows.len(), "read csv");
    Ok(CsvTable { headers, rows })
}
