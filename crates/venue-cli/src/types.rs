use std::path::PathBuf;

use venue_model::ImportSummary;

#[derive(Debug)]
pub struct ImportResult {
    pub source: PathBuf,
    /// JSON-lines output, `None` for dry runs.
    pub output: Option<PathBuf>,
    pub profile_path: PathBuf,
    pub fingerprint: Option<String>,
    pub summary: ImportSummary,
    pub error_limit: usize,
}

#[derive(Debug)]
pub struct CalendarResult {
    pub entries: usize,
    pub output: Option<PathBuf>,
}
