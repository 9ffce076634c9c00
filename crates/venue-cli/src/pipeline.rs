//! Import run driver.
//!
//! Rows are processed one at a time:
//! 1. **Assemble**: normalize cells and build the event with its forms
//! 2. **Persist**: hand the event to the store as one unit
//! 3. **Record**: tally the outcome and conversion warnings
//!
//! A row failure never stops the run, except that a run which keeps failing
//! without a single success is aborted once the failure budget is spent.

use std::time::Instant;

use tracing::{debug, error, info, info_span, warn};
use venue_ingest::CsvTable;
use venue_model::{ImportOptions, ImportProfile, ImportSummary, RawRow, RowError, RowOutcome};
use venue_transform::{EventAssembler, redact_value};

use crate::store::EventStore;

/// Result of processing a single row.
#[derive(Debug)]
pub struct RowReport {
    pub outcome: RowOutcome,
    pub warnings: usize,
}

/// Runs every row of `table` through assembly and persistence.
pub fn import_rows(
    table: &CsvTable,
    profile: &ImportProfile,
    options: &ImportOptions,
    store: &mut dyn EventStore,
) -> ImportSummary {
    let assembler = EventAssembler::new(profile, options);
    let start = Instant::now();
    let mut summary = ImportSummary::default();

    for (row_number, row) in table.numbered_rows() {
        let span = info_span!("row", row = row_number);
        let report = span.in_scope(|| process_row(&assembler, row_number, row, store));
        summary.conversion_warnings += report.warnings;
        summary.record(report.outcome);

        if let Some(budget) = options.max_failures_without_success
            && summary.imported == 0
            && summary.error_count() >= budget
        {
            error!(
                failures = summary.error_count(),
                remaining = table.len() - summary.attempted,
                "no row imported before the failure budget ran out, stopping"
            );
            summary.aborted = true;
            break;
        }
    }

    info!(
        attempted = summary.attempted,
        imported = summary.imported,
        skipped = summary.skipped,
        failed = summary.failed,
        warnings = summary.conversion_warnings,
        duration_ms = start.elapsed().as_millis(),
        "import complete"
    );
    summary
}

/// Assembles and persists one row.
pub fn process_row(
    assembler: &EventAssembler<'_>,
    row_number: usize,
    row: &RawRow,
    store: &mut dyn EventStore,
) -> RowReport {
    let assembly = assembler.assemble(row_number, row);
    let warnings = assembly.warnings.len();
    let outcome = match assembly.result {
        Ok(event) => match store.persist(&event) {
            Ok(stored) => {
                debug!(
                    event_id = %stored.event_id,
                    title = redact_value(&event.title),
                    forms = stored.form_ids.len(),
                    "row imported"
                );
                RowOutcome::Imported {
                    row: row_number,
                    event_id: stored.event_id,
                }
            }
            Err(error) => {
                warn!(error = %error, "row not stored");
                RowOutcome::Failed(RowError::new(row_number, error.to_string()))
            }
        },
        Err(error) if error.is_skip() => {
            warn!(error = %error, "row skipped");
            RowOutcome::Skipped(RowError::new(row_number, error.to_string()))
        }
        Err(error) => {
            warn!(error = %error, "row failed");
            RowOutcome::Failed(RowError::new(row_number, error.to_string()))
        }
    };
    RowReport { outcome, warnings }
}
