//! Ingestion for venue booking imports.
//!
//! - **csv_table**: spreadsheet exports into raw rows
//! - **profile**: the TOML import profile (catalog, sections, event columns, calendar)
//! - **paths**: profile location resolution

pub mod csv_table;
pub mod error;
mod hash;
pub mod paths;
pub mod profile;

pub use csv_table::{CsvTable, read_csv_from, read_csv_table};
pub use error::{CatalogError, IngestError};
pub use hash::sha256_hex;
pub use paths::{PROFILE_ENV_VAR, default_profile_path, resolve_profile_path};
pub use profile::{ProfileDocument, build_profile, load_profile, parse_profile};
