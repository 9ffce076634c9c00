//! CLI argument definitions for the venue importer.

use std::path::PathBuf;

use chrono::NaiveTime;
use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use venue_model::EndTimePolicy;

#[derive(Parser)]
#[command(
    name = "venue-import",
    version,
    about = "Import wedding venue bookings from a spreadsheet export",
    long_about = "Import wedding venue bookings from a spreadsheet export.\n\n\
                  Each row becomes one event with a nikkah and a reception form.\n\
                  Field bindings, prices and calendar layout come from a TOML profile."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow raw cell values (names, phone numbers) in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV export into stored events.
    Import(ImportArgs),

    /// Render calendar entries from stored events.
    Calendar(CalendarArgs),

    /// List the field catalog and section layouts of a profile.
    Fields(FieldsArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// CSV export to import.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Import profile (default: $VENUE_PROFILE, then profile/catalog.toml).
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// JSON-lines file for stored events (default: <CSV>.events.jsonl).
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Append to the output file instead of replacing it.
    #[arg(long = "append", conflicts_with = "dry_run")]
    pub append: bool,

    /// Process every row without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// End time when the end timestamp is blank: start-plus-<N>h or closing-time=HH:MM.
    #[arg(
        long = "end-time",
        value_name = "POLICY",
        default_value = "start-plus-4h",
        value_parser = parse_end_time
    )]
    pub end_time: EndTimePolicy,

    /// What to do with rows whose start date is blank or unreadable.
    #[arg(long = "missing-start", value_enum, default_value = "skip")]
    pub missing_start: MissingStartArg,

    /// Accept sections that bind several columns to one stable id (last one wins).
    #[arg(long = "allow-aliases")]
    pub allow_aliases: bool,

    /// Stop after this many failed rows if none succeeded (0 never stops).
    #[arg(long = "max-failures", value_name = "N", default_value_t = 5)]
    pub max_failures: usize,

    /// Number of row errors listed in the summary.
    #[arg(long = "max-errors-shown", value_name = "N", default_value_t = 10)]
    pub max_errors_shown: usize,
}

#[derive(Parser)]
pub struct CalendarArgs {
    /// JSON-lines file written by `import`.
    #[arg(value_name = "EVENTS_JSONL")]
    pub events: PathBuf,

    /// Import profile used for labels and layout.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,

    /// Write the entries to a JSON file instead of stdout.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Import profile to list.
    #[arg(long = "profile", value_name = "PATH")]
    pub profile: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum MissingStartArg {
    /// Skip the row and count it as an error.
    Skip,
    /// Import the row as an all-day event dated today.
    Today,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_end_time(value: &str) -> Result<EndTimePolicy, String> {
    let value = value.trim();
    if let Some(time) = value.strip_prefix("closing-time=") {
        return NaiveTime::parse_from_str(time, "%H:%M")
            .map(EndTimePolicy::ClosingTime)
            .map_err(|error| format!("invalid closing time '{time}': {error}"));
    }
    if let Some(hours) = value
        .strip_prefix("start-plus-")
        .and_then(|rest| rest.strip_suffix('h'))
    {
        return hours
            .parse::<u32>()
            .map(EndTimePolicy::StartPlusHours)
            .map_err(|error| format!("invalid hour count '{hours}': {error}"));
    }
    Err(format!(
        "unknown end time policy '{value}' (expected start-plus-<N>h or closing-time=HH:MM)"
    ))
}
