//! Data model for venue booking imports.
//!
//! The types in this crate carry no behavior beyond construction and
//! validation. Normalization and mapping live in `venue-transform`.

pub mod catalog;
pub mod error;
pub mod event;
pub mod lookup;
pub mod options;
pub mod outcome;
pub mod profile;
pub mod response;
pub mod timestamp;
pub mod value;

pub use catalog::{
    FieldBinding, FieldCatalog, FieldCatalogEntry, FieldKind, SectionLayout, StableIdAlias,
    canonical_key,
};
pub use error::{ModelError, Result};
pub use event::{EventForm, EventRecord, StoredEvent};
pub use lookup::CaseInsensitiveSet;
pub use options::{AliasPolicy, EndTimePolicy, ImportOptions, MissingStartPolicy};
pub use outcome::{ImportSummary, RowError, RowOutcome};
pub use profile::{CalendarSection, CalendarSettings, ChoiceOption, EventColumns, ImportProfile};
pub use response::{FieldResponse, FormResult};
pub use timestamp::ParsedTimestamp;
pub use value::{RawRow, RawValue};

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn summary_counts_outcomes() {
        let mut summary = ImportSummary::default();
        summary.record(RowOutcome::Imported {
            row: 1,
            event_id: "evt-1".to_string(),
        });
        summary.record(RowOutcome::Skipped(RowError::new(2, "no start date")));
        summary.record(RowOutcome::Failed(RowError::new(3, "missing title")));
        assert_eq!(summary.attempted, 3);
        assert_eq!(summary.imported, 1);
        assert_eq!(summary.skipped, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.errors.len(), 2);
        assert!(summary.has_errors());
    }

    #[test]
    fn form_result_serializes() {
        let mut result = FormResult::empty();
        result
            .responses
            .insert("id-1".to_string(), FieldResponse::disabled());
        result.total = Decimal::new(15000, 2);
        let json = serde_json::to_string(&result).expect("serialize form result");
        let round: FormResult = serde_json::from_str(&json).expect("deserialize form result");
        assert_eq!(round.total, Decimal::new(150, 0));
        assert!(round.responses.contains_key("id-1"));
    }
}
