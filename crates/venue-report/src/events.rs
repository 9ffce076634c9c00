use std::io::{BufRead, BufReader};
use std::path::Path;

use tracing::info;
use venue_model::StoredEvent;

use crate::calendar::CalendarEntry;
use crate::error::ReportError;

/// Reads a JSON-lines file of stored events. Blank lines are ignored.
pub fn read_stored_events(path: &Path) -> Result<Vec<StoredEvent>, ReportError> {
    let io_error = |source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = std::fs::File::open(path).map_err(io_error)?;
    let mut events = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(io_error)?;
        if line.trim().is_empty() {
            continue;
        }
        let event = serde_json::from_str(&line).map_err(|source| ReportError::Json {
            path: path.to_path_buf(),
            line: idx + 1,
            source,
        })?;
        events.push(event);
    }
    Ok(events)
}

/// Writes the entries as a pretty-printed JSON array.
pub fn write_calendar_entries(path: &Path, entries: &[CalendarEntry]) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(entries).map_err(ReportError::Serialize)?;
    std::fs::write(path, json).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!(path = %path.display(), entries = entries.len(), "wrote calendar entries");
    Ok(())
}
