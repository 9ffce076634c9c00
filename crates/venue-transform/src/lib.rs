//! Venue booking import transformations.
//!
//! - **normalization**: raw cells into text, integers, decimals, booleans and timestamps
//! - **reader**: column-aware row access that records conversion warnings
//! - **mapper**: section bindings into field responses and subtotals
//! - **schedule**: start/end resolution under the run's policies
//! - **choices**: option lookup for select-like columns
//! - **assembler**: a whole row into an event record

pub mod assembler;
pub mod choices;
pub mod diagnostics;
pub mod mapper;
pub mod normalization;
pub mod reader;
pub mod schedule;

pub use assembler::{AssembleError, Assembly, EventAssembler};
pub use choices::{ChoiceLookup, ChoiceMatch};
pub use diagnostics::{ConversionError, ConversionWarning, redact_value, set_log_data};
pub use mapper::{map_field, map_row, map_section};
pub use normalization::{to_boolean, to_fixed_point, to_integer, to_text, to_timestamp};
pub use reader::FieldReader;
pub use schedule::{EventSchedule, resolve_schedule};
