use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::Local;
use comfy_table::Table;
use tracing::{info, info_span};

use venue_cli::pipeline::import_rows;
use venue_cli::store::{JsonLinesStore, MemoryStore};
use venue_ingest::{load_profile, read_csv_table, resolve_profile_path};
use venue_model::{AliasPolicy, ImportOptions, ImportProfile, MissingStartPolicy};
use venue_report::{CalendarFormatter, read_stored_events, write_calendar_entries};

use crate::cli::{CalendarArgs, FieldsArgs, ImportArgs, MissingStartArg};
use crate::summary::apply_table_style;
use crate::types::{CalendarResult, ImportResult};

pub fn run_import(args: &ImportArgs) -> Result<ImportResult> {
    let options = import_options(args);
    let profile_path = resolve_profile_path(args.profile.as_deref());
    let profile = load(&profile_path, options.aliases)?;

    let ingest_span = info_span!("ingest", source = %args.csv.display());
    let ingest_start = Instant::now();
    let table = ingest_span
        .in_scope(|| read_csv_table(&args.csv))
        .with_context(|| format!("read {}", args.csv.display()))?;
    info!(
        rows = table.len(),
        columns = table.headers.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    let (summary, output) = if args.dry_run {
        let mut store = MemoryStore::new();
        (import_rows(&table, &profile, &options, &mut store), None)
    } else {
        let path = args
            .output
            .clone()
            .unwrap_or_else(|| default_output_path(&args.csv));
        let mut store = if args.append {
            JsonLinesStore::append(&path)
        } else {
            JsonLinesStore::create(&path)
        }
        .with_context(|| format!("open {}", path.display()))?;
        (import_rows(&table, &profile, &options, &mut store), Some(path))
    };

    Ok(ImportResult {
        source: args.csv.clone(),
        output,
        profile_path,
        fingerprint: profile.fingerprint,
        summary,
        error_limit: options.error_display_limit,
    })
}

pub fn run_calendar(args: &CalendarArgs) -> Result<CalendarResult> {
    let profile_path = resolve_profile_path(args.profile.as_deref());
    let profile = load(&profile_path, AliasPolicy::LastWriteWins)?;
    let events = read_stored_events(&args.events)
        .with_context(|| format!("read {}", args.events.display()))?;
    let formatter = CalendarFormatter::new(&profile);
    let entries: Vec<_> = events
        .iter()
        .map(|stored| formatter.entry(&stored.event))
        .collect();

    match &args.output {
        Some(path) => {
            write_calendar_entries(path, &entries)?;
        }
        None => {
            let json = serde_json::to_string_pretty(&entries).context("serialize calendar entries")?;
            println!("{json}");
        }
    }
    Ok(CalendarResult {
        entries: entries.len(),
        output: args.output.clone(),
    })
}

pub fn run_fields(args: &FieldsArgs) -> Result<()> {
    let profile_path = resolve_profile_path(args.profile.as_deref());
    let profile = load(&profile_path, AliasPolicy::LastWriteWins)?;

    let mut table = Table::new();
    table.set_header(vec!["Field", "Stable id", "Kind", "Unit price", "Label"]);
    apply_table_style(&mut table);
    for entry in profile.catalog.entries() {
        table.add_row(vec![
            entry.canonical_name.clone(),
            entry.stable_id.clone(),
            entry.kind.as_str().to_string(),
            entry.unit_price.to_string(),
            entry.display_label(),
        ]);
    }
    println!("{table}");

    let mut sections = Table::new();
    sections.set_header(vec!["Section", "Label", "Tab", "Bindings", "Form"]);
    apply_table_style(&mut sections);
    for section in &profile.sections {
        sections.add_row(vec![
            section.name.clone(),
            section.display_label().to_string(),
            section.tab_order.to_string(),
            section.bindings.len().to_string(),
            section.form_id.clone().unwrap_or_else(|| "-".to_string()),
        ]);
    }
    println!("{sections}");
    Ok(())
}

fn load(path: &Path, aliases: AliasPolicy) -> Result<ImportProfile> {
    load_profile(path, aliases).with_context(|| format!("load profile {}", path.display()))
}

fn import_options(args: &ImportArgs) -> ImportOptions {
    let missing_start = match args.missing_start {
        MissingStartArg::Skip => MissingStartPolicy::Skip,
        MissingStartArg::Today => MissingStartPolicy::Substitute(Local::now().date_naive()),
    };
    let aliases = if args.allow_aliases {
        AliasPolicy::LastWriteWins
    } else {
        AliasPolicy::Reject
    };
    let budget = (args.max_failures > 0).then_some(args.max_failures);
    ImportOptions {
        error_display_limit: args.max_errors_shown,
        ..ImportOptions::new()
            .with_end_time(args.end_time)
            .with_missing_start(missing_start)
            .with_aliases(aliases)
            .with_failure_budget(budget)
    }
}

/// `bookings.csv` becomes `bookings.events.jsonl` next to it.
fn default_output_path(csv: &Path) -> PathBuf {
    let stem = csv
        .file_stem()
        .map_or_else(|| "events".into(), |stem| stem.to_string_lossy());
    csv.with_file_name(format!("{stem}.events.jsonl"))
}
