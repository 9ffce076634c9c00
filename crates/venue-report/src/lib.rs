//! Calendar output for imported venue events.
//!
//! - **calendar**: event kind detection, description text and calendar payloads
//! - **events**: reading stored events back from JSON lines, writing payloads

mod calendar;
mod error;
mod events;

pub use calendar::{CalendarEntry, CalendarFormatter, CalendarTime, EventKind, SECTION_SEPARATOR};
pub use error::ReportError;
pub use events::{read_stored_events, write_calendar_entries};
