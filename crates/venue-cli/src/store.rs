//! Persistence collaborators for assembled events.
//!
//! A store assigns identifiers and writes one event with all of its forms
//! as a unit. A failed write leaves nothing behind for that row.

use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::warn;
use uuid::Uuid;
use venue_model::{EventRecord, StoredEvent};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize event: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("store rejected event: {message}")]
    Rejected { message: String },
}

pub trait EventStore {
    /// Stores one event and its forms, or nothing.
    fn persist(&mut self, event: &EventRecord) -> Result<StoredEvent, StoreError>;
}

fn assign_ids(event: &EventRecord) -> StoredEvent {
    StoredEvent {
        event_id: Uuid::new_v4().to_string(),
        form_ids: event
            .forms
            .iter()
            .map(|_| Uuid::new_v4().to_string())
            .collect(),
        event: event.clone(),
    }
}

/// Keeps events in memory. Used for dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Vec<StoredEvent>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StoredEvent] {
        &self.events
    }
}

impl EventStore for MemoryStore {
    fn persist(&mut self, event: &EventRecord) -> Result<StoredEvent, StoreError> {
        let stored = assign_ids(event);
        self.events.push(stored.clone());
        Ok(stored)
    }
}

/// Output a [`JsonLinesStore`] can roll back to a previous length.
pub trait LineSink: Write {
    /// Current length of the output in bytes.
    fn end_offset(&mut self) -> io::Result<u64>;

    /// Drops everything past `len` and continues writing from there.
    fn truncate_to(&mut self, len: u64) -> io::Result<()>;
}

impl LineSink for File {
    fn end_offset(&mut self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate_to(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

/// Appends one JSON document per stored event.
///
/// Lines go straight to the sink. A write that fails partway is cut back
/// to the previous line boundary, so later rows never land after a
/// fragment.
pub struct JsonLinesStore<W: LineSink = File> {
    path: PathBuf,
    sink: W,
}

impl JsonLinesStore {
    /// Creates (or truncates) the output file.
    pub fn create(path: &Path) -> Result<Self, StoreError> {
        Self::open(path, false)
    }

    /// Appends to the output file, creating it if needed.
    pub fn append(path: &Path) -> Result<Self, StoreError> {
        Self::open(path, true)
    }

    fn open(path: &Path, append: bool) -> Result<Self, StoreError> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .append(append)
            .truncate(!append)
            .open(path)
            .map_err(|source| StoreError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::with_sink(path, file))
    }
}

impl<W: LineSink> JsonLinesStore<W> {
    /// Writes to `sink`; `path` names it in errors.
    pub fn with_sink(path: &Path, sink: W) -> Self {
        Self {
            path: path.to_path_buf(),
            sink,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_sink(self) -> W {
        self.sink
    }
}

impl<W: LineSink> EventStore for JsonLinesStore<W> {
    fn persist(&mut self, event: &EventRecord) -> Result<StoredEvent, StoreError> {
        let stored = assign_ids(event);
        let mut line = serde_json::to_string(&stored).map_err(StoreError::Serialize)?;
        line.push('\n');
        let io_error = |source| StoreError::Io {
            path: self.path.clone(),
            source,
        };
        let start = self.sink.end_offset().map_err(io_error)?;
        let written = self
            .sink
            .write_all(line.as_bytes())
            .and_then(|()| self.sink.flush());
        if let Err(source) = written {
            if let Err(error) = self.sink.truncate_to(start) {
                warn!(path = %self.path.display(), %error, "could not remove partial line");
            }
            return Err(io_error(source));
        }
        Ok(stored)
    }
}
