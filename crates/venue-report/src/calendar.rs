//! Calendar description formatting.
//!
//! An imported event becomes one calendar entry. The description lists the
//! primary contact, the guest counts of each form section and the section
//! fields worth showing to staff, as configured in the profile's
//! `[calendar]` table.

use std::fmt;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use tracing::debug;
use venue_model::{CalendarSection, EventForm, EventRecord, FieldResponse, ImportProfile};

/// Line placed between the nikkah and reception halves of an all-day description.
pub const SECTION_SEPARATOR: &str = "------------------------------------------------------------";

const NIKKAH: &str = "nikkah";
const RECEPTION: &str = "reception";

/// Which halves of a booking an event covers, judged from its form labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    AllDay,
    Nikkah,
    Reception,
    Unknown,
}

impl EventKind {
    pub fn detect(forms: &[EventForm]) -> Self {
        let has_nikkah = forms.iter().any(|form| form.label_contains(NIKKAH));
        let has_reception = forms.iter().any(|form| form.label_contains(RECEPTION));
        match (has_nikkah, has_reception) {
            (true, true) => Self::AllDay,
            (true, false) => Self::Nikkah,
            (false, true) => Self::Reception,
            (false, false) => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::AllDay => "All Day",
            Self::Nikkah => "Nikkah",
            Self::Reception => "Reception",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Start or end of a calendar entry in the calendar API's JSON shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CalendarTime {
    Timed {
        #[serde(rename = "dateTime")]
        date_time: String,
        #[serde(rename = "timeZone")]
        time_zone: String,
    },
    AllDay { date: NaiveDate },
}

impl CalendarTime {
    fn timed(date: NaiveDate, time: NaiveTime, time_zone: &str) -> Self {
        Self::Timed {
            date_time: NaiveDateTime::new(date, time)
                .format("%Y-%m-%dT%H:%M:%S")
                .to_string(),
            time_zone: time_zone.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEntry {
    pub summary: String,
    pub description: String,
    pub start: CalendarTime,
    pub end: CalendarTime,
}

/// Renders events using the catalog labels and calendar layout of a profile.
pub struct CalendarFormatter<'a> {
    profile: &'a ImportProfile,
}

impl<'a> CalendarFormatter<'a> {
    pub fn new(profile: &'a ImportProfile) -> Self {
        Self { profile }
    }

    pub fn entry(&self, event: &EventRecord) -> CalendarEntry {
        let kind = EventKind::detect(&event.forms);
        let summary = if event.title.trim().is_empty() {
            "Untitled Event".to_string()
        } else {
            event.title.clone()
        };
        let time_zone = self.profile.calendar.time_zone.as_str();
        let (start, end) = match (event.start_time, event.end_time) {
            (Some(start), Some(end)) => (
                CalendarTime::timed(event.event_date, start, time_zone),
                CalendarTime::timed(event.event_end_date, end, time_zone),
            ),
            _ => (
                CalendarTime::AllDay {
                    date: event.event_date,
                },
                CalendarTime::AllDay {
                    date: event.event_end_date,
                },
            ),
        };
        debug!(row = event.source_row, kind = %kind, timed = event.is_timed(), "calendar entry");
        CalendarEntry {
            summary,
            description: self.describe(event, kind),
            start,
            end,
        }
    }

    /// Full description for an event of the given kind. Unknown events get
    /// an empty description.
    pub fn describe(&self, event: &EventRecord, kind: EventKind) -> String {
        match kind {
            EventKind::Nikkah => self.describe_section(event, NIKKAH),
            EventKind::Reception => self.describe_section(event, RECEPTION),
            EventKind::AllDay => format!(
                "{}\n{SECTION_SEPARATOR}\n{}",
                self.describe_section(event, NIKKAH),
                self.describe_section(event, RECEPTION)
            ),
            EventKind::Unknown => String::new(),
        }
    }

    /// Description block for one section, found by form label.
    pub fn describe_section(&self, event: &EventRecord, section: &str) -> String {
        let form = event.form(section);
        let layout = self.profile.calendar.section(section);
        let heading = form.map_or_else(|| title_case(section), |form| form.form_label.clone());

        let mut lines = Vec::new();
        if !event.primary_contact_name.is_empty() {
            lines.push(format!("Primary Contact: {}", event.primary_contact_name));
        }
        if !event.primary_contact_number.is_empty() {
            lines.push(format!("Primary Contact No.: {}", event.primary_contact_number));
        }
        lines.push(String::new());

        let quick_time = layout
            .and_then(|layout| layout.quick_time_field.as_deref())
            .and_then(|field| self.text_value(form, field));
        match quick_time {
            Some(time) => lines.push(format!("{heading} - {time}:")),
            None => lines.push(format!("{heading}:")),
        }
        lines.push(format!("Men Count: {}", form.map_or(0, |form| form.men_count)));
        lines.push(format!(
            "Ladies Count: {}",
            form.map_or(0, |form| form.ladies_count)
        ));
        lines.push(String::new());

        if let Some(layout) = layout {
            self.push_field_lines(&mut lines, form, layout);
        }
        lines.join("\n")
    }

    fn push_field_lines(
        &self,
        lines: &mut Vec<String>,
        form: Option<&EventForm>,
        layout: &CalendarSection,
    ) {
        for field in &layout.text_fields {
            if let Some(text) = self.text_value(form, field) {
                lines.push(format!("{} - {text}", self.label(field)));
            }
        }
        for field in &layout.toggle_fields {
            let Some(response) = self.response(form, field) else {
                continue;
            };
            if !response.is_noteworthy() {
                continue;
            }
            let notes = response.notes.trim();
            if notes.is_empty() {
                lines.push(format!("{} - Yes", self.label(field)));
            } else {
                lines.push(format!("{} - Yes - {notes}", self.label(field)));
            }
        }
    }

    fn response<'e>(&self, form: Option<&'e EventForm>, field: &str) -> Option<&'e FieldResponse> {
        let entry = self.profile.catalog.get(field)?;
        form?.result.responses.get(&entry.stable_id)
    }

    fn text_value(&self, form: Option<&EventForm>, field: &str) -> Option<String> {
        let response = self.response(form, field)?;
        let text = match response.notes.trim() {
            "" => response.selections.first().map_or("", |choice| choice.trim()),
            notes => notes,
        };
        (!text.is_empty()).then(|| text.to_string())
    }

    fn label(&self, field: &str) -> String {
        self.profile
            .catalog
            .get(field)
            .map_or_else(|| field.to_string(), |entry| entry.display_label())
    }
}

fn title_case(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
