//! Import profile: the validated configuration value for one run.
//!
//! Loaded once (see `venue-ingest`) and shared read-only by every row.

use serde::{Deserialize, Serialize};

use crate::catalog::{FieldCatalog, SectionLayout};

/// Source columns the event assembler reads outside of form sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EventColumns {
    pub title: String,
    pub start: String,
    pub end: String,
    pub contact_name: String,
    pub contact_number: String,
    pub deposit: String,
    pub ethnicity: String,
    pub mix_type: String,
    /// Used when the mix type cell is blank.
    pub default_mix_type: String,
    /// Event type stored on every imported event.
    pub event_type: String,
    /// Section whose guest counts become the event's counts.
    pub main_section: Option<String>,
}

impl Default for EventColumns {
    fn default() -> Self {
        Self {
            title: "ma_title".to_string(),
            start: "ma_nikahstartdatetime".to_string(),
            end: "ma_nikahendatetime".to_string(),
            contact_name: "ma_primarycontactname".to_string(),
            contact_number: "ma_primarycontactnumber".to_string(),
            deposit: "ma_depositamount".to_string(),
            ethnicity: "ma_ethnicity".to_string(),
            mix_type: "ma_eventmixtype".to_string(),
            default_mix_type: "mixed".to_string(),
            event_type: "All Day".to_string(),
            main_section: Some("reception".to_string()),
        }
    }
}

/// A selectable option (e.g. ethnicity) with its stored identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub id: String,
    pub name: String,
}

/// What the calendar formatter prints for one section.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSection {
    /// Section name as in the layouts, also the heading text.
    pub section: String,
    /// Field whose value is appended to the heading ("Nikkah - 2pm:").
    pub quick_time_field: Option<String>,
    /// Fields printed as "<Label> - <text>" when non-blank.
    pub text_fields: Vec<String>,
    /// Fields printed as "<Label> - Yes[ - notes]" when worth showing.
    pub toggle_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalendarSettings {
    pub time_zone: String,
    pub sections: Vec<CalendarSection>,
}

impl Default for CalendarSettings {
    fn default() -> Self {
        Self {
            time_zone: "Europe/London".to_string(),
            sections: Vec::new(),
        }
    }
}

impl CalendarSettings {
    pub fn section(&self, name: &str) -> Option<&CalendarSection> {
        self.sections
            .iter()
            .find(|section| section.section.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ImportProfile {
    pub catalog: FieldCatalog,
    pub sections: Vec<SectionLayout>,
    pub event: EventColumns,
    pub choices: Vec<ChoiceOption>,
    pub calendar: CalendarSettings,
    /// SHA-256 of the profile source, hex encoded.
    pub fingerprint: Option<String>,
}

impl ImportProfile {
    pub fn section(&self, name: &str) -> Option<&SectionLayout> {
        self.sections
            .iter()
            .find(|section| section.name.eq_ignore_ascii_case(name))
    }
}
