//! Integration tests for the import run driver.

use std::io::Cursor;
use std::path::Path;

use venue_cli::pipeline::import_rows;
use venue_cli::store::{EventStore, JsonLinesStore, MemoryStore, StoreError};
use venue_ingest::{CsvTable, parse_profile, read_csv_from};
use venue_model::{
    AliasPolicy, EventRecord, ImportOptions, ImportProfile, RowError, StoredEvent,
};

const PROFILE: &str = r#"
[[fields]]
canonical_name = "top_up_lamb"
stable_id = "id-lamb"
kind = "toggle"

[[fields]]
canonical_name = "starter"
stable_id = "id-starter"
kind = "text"

[[sections]]
name = "nikkah"
label = "Nikkah"
tab_order = 1
men_count_column = "ma_nikahmencount"
ladies_count_column = "ma_nikahladiescount"

[[sections.bindings]]
source_column = "ma_nikahtopuplambyesno"
field = "top_up_lamb"
price_column = "ma_nikahtopuplambprice"

[[sections]]
name = "reception"
label = "Reception"
tab_order = 2
men_count_column = "ma_receptionmencount"
ladies_count_column = "ma_receptionladiescount"

[[sections.bindings]]
source_column = "ma_starter"
field = "starter"
"#;

const HEADER: &str = "ma_title,ma_nikahstartdatetime,ma_nikahtopuplambyesno,ma_nikahtopuplambprice,\
ma_receptionmencount,ma_receptionladiescount,ma_starter,ma_depositamount";

fn profile() -> ImportProfile {
    parse_profile(PROFILE, AliasPolicy::Reject).unwrap()
}

fn table(rows: &[&str]) -> CsvTable {
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    read_csv_from(Cursor::new(text), Path::new("bookings.csv")).unwrap()
}

const GOOD: &str = "Khan Wedding,10/11/2025  11:00:00 AM,Yes,150,200,220,Samosa,500";
const NO_TITLE: &str = ",10/11/2025 11:00,Yes,150,200,220,Samosa,500";
const NO_START: &str = "Ali Wedding,,Yes,150,200,220,Samosa,500";
const BAD_PRICE: &str = "Shah Wedding,2025-12-01 18:00,Yes,lots,10,10,,abc";

#[test]
fn imports_good_rows_and_records_failures() {
    let table = table(&[GOOD, NO_TITLE, NO_START, BAD_PRICE]);
    let mut store = MemoryStore::new();
    let summary = import_rows(&table, &profile(), &ImportOptions::default(), &mut store);

    assert_eq!(summary.attempted, 4);
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.conversion_warnings, 2);
    assert!(!summary.aborted);
    assert_eq!(summary.errors[0].row, 2);
    assert_eq!(summary.errors[1].row, 3);

    let events = store.events();
    assert_eq!(events.len(), 2);
    let first = &events[0].event;
    assert_eq!(first.title, "Khan Wedding");
    assert_eq!(first.men_count, 200);
    assert_eq!(first.forms.len(), 2);
    assert_eq!(events[0].form_ids.len(), 2);
    assert_eq!(events[1].event.source_row, 4);
}

#[test]
fn failure_budget_stops_a_hopeless_run() {
    let rows = vec![NO_TITLE; 8];
    let table = table(&rows);
    let mut store = MemoryStore::new();
    let summary = import_rows(&table, &profile(), &ImportOptions::default(), &mut store);

    assert!(summary.aborted);
    assert_eq!(summary.attempted, 5);
    assert_eq!(summary.failed, 5);
    assert!(summary.has_errors());
}

#[test]
fn failure_budget_ignored_after_a_success() {
    let mut rows = vec![GOOD];
    rows.extend(vec![NO_TITLE; 7]);
    let table = table(&rows);
    let mut store = MemoryStore::new();
    let summary = import_rows(&table, &profile(), &ImportOptions::default(), &mut store);

    assert!(!summary.aborted);
    assert_eq!(summary.attempted, 8);
    assert_eq!(summary.imported, 1);
}

#[test]
fn disabled_budget_never_aborts() {
    let table = table(&vec![NO_TITLE; 8]);
    let mut store = MemoryStore::new();
    let options = ImportOptions::default().with_failure_budget(None);
    let summary = import_rows(&table, &profile(), &options, &mut store);
    assert!(!summary.aborted);
    assert_eq!(summary.attempted, 8);
}

/// Rejects every other event.
struct FlakyStore {
    inner: MemoryStore,
    calls: usize,
}

impl EventStore for FlakyStore {
    fn persist(&mut self, event: &EventRecord) -> Result<StoredEvent, StoreError> {
        self.calls += 1;
        if self.calls % 2 == 0 {
            return Err(StoreError::Rejected {
                message: "connection reset".to_string(),
            });
        }
        self.inner.persist(event)
    }
}

#[test]
fn store_failure_fails_only_that_row() {
    let table = table(&[GOOD, GOOD, GOOD]);
    let mut store = FlakyStore {
        inner: MemoryStore::new(),
        calls: 0,
    };
    let summary = import_rows(&table, &profile(), &ImportOptions::default(), &mut store);
    assert_eq!(summary.imported, 2);
    assert_eq!(summary.failed, 1);
    assert_eq!(
        summary.errors,
        vec![RowError::new(2, "store rejected event: connection reset")]
    );
    assert_eq!(store.inner.events().len(), 2);
}

#[test]
fn json_lines_store_writes_one_line_per_event() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("events.jsonl");
    let table = table(&[GOOD, NO_TITLE, GOOD]);
    {
        let mut store = JsonLinesStore::create(&path).unwrap();
        let summary = import_rows(&table, &profile(), &ImportOptions::default(), &mut store);
        assert_eq!(summary.imported, 2);
    }

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    let stored: StoredEvent = serde_json::from_str(lines[1]).unwrap();
    assert_eq!(stored.event.source_row, 3);
    assert_eq!(stored.form_ids.len(), 2);

    let mut store = JsonLinesStore::append(&path).unwrap();
    import_rows(&table, &profile(), &ImportOptions::default(), &mut store);
    drop(store);
    assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 4);
}
