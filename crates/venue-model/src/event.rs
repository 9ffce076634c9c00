//! Assembled event records handed to the persistence collaborator.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::response::FormResult;

/// One filled-in form section attached to an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventForm {
    #[serde(default)]
    pub form_id: Option<String>,
    pub form_label: String,
    pub tab_order: u32,
    #[serde(flatten)]
    pub result: FormResult,
    pub men_count: u32,
    pub ladies_count: u32,
    pub guest_count: u32,
}

impl EventForm {
    /// Case-insensitive check against the form label, e.g. `"nikkah"`.
    pub fn label_contains(&self, needle: &str) -> bool {
        self.form_label
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

/// Everything one spreadsheet row becomes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// 1-based row number in the source file.
    pub source_row: usize,
    pub title: String,
    pub event_type: String,
    pub event_date: NaiveDate,
    pub event_end_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub event_multiple_days: bool,
    pub men_count: u32,
    pub ladies_count: u32,
    /// Largest head count reported by any section.
    pub total_guests: u32,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_guest_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit_amount: Decimal,
    #[serde(default)]
    pub primary_contact_name: String,
    #[serde(default)]
    pub primary_contact_number: String,
    #[serde(default)]
    pub ethnicity: Option<Vec<String>>,
    #[serde(default)]
    pub event_mix_type: String,
    pub forms: Vec<EventForm>,
    #[serde(with = "rust_decimal::serde::float")]
    pub form_total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub event_total: Decimal,
    /// Event total less the deposit.
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_due: Decimal,
}

impl EventRecord {
    pub fn form(&self, label: &str) -> Option<&EventForm> {
        self.forms.iter().find(|form| form.label_contains(label))
    }

    /// Both clock times known; otherwise the event is all-day.
    pub fn is_timed(&self) -> bool {
        self.start_time.is_some() && self.end_time.is_some()
    }
}

/// An event after the persistence collaborator assigned identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_id: String,
    pub form_ids: Vec<String>,
    pub event: EventRecord,
}
