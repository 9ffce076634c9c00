//! Event assembly: one raw row into one [`EventRecord`].

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;
use venue_model::{EventForm, EventRecord, ImportOptions, ImportProfile, RawRow};

use crate::choices::ChoiceLookup;
use crate::diagnostics::{ConversionError, ConversionWarning, redact_value};
use crate::mapper::{map_section, money};
use crate::reader::FieldReader;
use crate::schedule::resolve_schedule;

/// Why a row produced no event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    #[error("missing event title in column '{column}'")]
    MissingTitle { column: String },
    #[error("no usable start date in column '{column}'")]
    MissingStart { column: String },
    #[error("{amount} exceeds the supported money range")]
    AmountOverflow { amount: &'static str },
}

impl AssembleError {
    /// Rows dropped by policy rather than by bad data.
    pub fn is_skip(&self) -> bool {
        matches!(self, Self::MissingStart { .. })
    }
}

/// Result of assembling one row, with the conversion warnings it raised.
#[derive(Debug)]
pub struct Assembly {
    pub result: Result<EventRecord, AssembleError>,
    pub warnings: Vec<ConversionWarning>,
}

/// Builds events from rows using one profile and one set of options.
#[derive(Debug)]
pub struct EventAssembler<'p> {
    profile: &'p ImportProfile,
    options: &'p ImportOptions,
    choices: ChoiceLookup,
}

impl<'p> EventAssembler<'p> {
    pub fn new(profile: &'p ImportProfile, options: &'p ImportOptions) -> Self {
        Self {
            profile,
            options,
            choices: ChoiceLookup::new(&profile.choices),
        }
    }

    pub fn assemble(&self, source_row: usize, row: &RawRow) -> Assembly {
        let mut reader = FieldReader::new(row);
        let result = self.build(source_row, &mut reader);
        Assembly {
            result,
            warnings: reader.into_warnings(),
        }
    }

    fn build(
        &self,
        source_row: usize,
        reader: &mut FieldReader<'_>,
    ) -> Result<EventRecord, AssembleError> {
        let columns = &self.profile.event;

        let title = reader.text(&columns.title);
        if title.is_empty() {
            return Err(AssembleError::MissingTitle {
                column: columns.title.clone(),
            });
        }

        let start = reader.timestamp(&columns.start);
        let end = reader.timestamp(&columns.end);
        let schedule = resolve_schedule(start, end, self.options.missing_start, self.options.end_time)
            .ok_or_else(|| AssembleError::MissingStart {
                column: columns.start.clone(),
            })?;

        let mut forms = Vec::with_capacity(self.profile.sections.len());
        let mut total_guest_price = Decimal::ZERO;
        let mut main_counts = None;
        let mut all_counts = (0u32, 0u32);
        let mut total_guests = 0u32;
        for section in &self.profile.sections {
            let result = map_section(reader, section, &self.profile.catalog);
            let men_count = section
                .men_count_column
                .as_deref()
                .map_or(0, |column| reader.count(column, 0));
            let ladies_count = section
                .ladies_count_column
                .as_deref()
                .map_or(0, |column| reader.count(column, 0));
            let guest_count = men_count.saturating_add(ladies_count);
            let reported = section
                .guest_count_column
                .as_deref()
                .map_or(0, |column| reader.count(column, 0));
            total_guests = total_guests.max(guest_count).max(reported);
            if let Some(column) = section.guest_price_column.as_deref() {
                total_guest_price = checked_sum(
                    total_guest_price,
                    reader.decimal(column, Decimal::ZERO),
                    "guest price total",
                )?;
            }
            if columns
                .main_section
                .as_deref()
                .is_some_and(|main| main.eq_ignore_ascii_case(&section.name))
            {
                main_counts = Some((men_count, ladies_count));
            }
            all_counts.0 = all_counts.0.saturating_add(men_count);
            all_counts.1 = all_counts.1.saturating_add(ladies_count);
            forms.push(EventForm {
                form_id: section.form_id.clone(),
                form_label: section.display_label().to_string(),
                tab_order: section.tab_order,
                result,
                men_count,
                ladies_count,
                guest_count,
            });
        }
        let (men_count, ladies_count) = main_counts.unwrap_or(all_counts);

        let ethnicity = self.resolve_choice(reader, &columns.ethnicity);
        let mut event_mix_type = reader.text(&columns.mix_type);
        if event_mix_type.is_empty() {
            event_mix_type.clone_from(&columns.default_mix_type);
        }
        let form_total = forms.iter().try_fold(Decimal::ZERO, |sum, form| {
            checked_sum(sum, form.result.total, "form total")
        })?;
        let form_total = money(form_total);
        let total_guest_price = money(total_guest_price);
        let deposit_amount = money(reader.decimal(&columns.deposit, Decimal::ZERO));
        let event_total = money(checked_sum(total_guest_price, form_total, "event total")?);
        let balance_due = event_total
            .checked_sub(deposit_amount)
            .ok_or(AssembleError::AmountOverflow {
                amount: "balance due",
            })?;
        let event = EventRecord {
            source_row,
            title,
            event_type: columns.event_type.clone(),
            event_date: schedule.start_date,
            event_end_date: schedule.end_date,
            start_time: schedule.start_time,
            end_time: schedule.end_time,
            event_multiple_days: schedule.start_date != schedule.end_date,
            men_count,
            ladies_count,
            total_guests,
            total_guest_price,
            deposit_amount,
            primary_contact_name: reader.text(&columns.contact_name),
            primary_contact_number: reader.text(&columns.contact_number),
            ethnicity,
            event_mix_type,
            forms,
            form_total,
            event_total,
            balance_due: money(balance_due),
        };
        debug!(
            row = source_row,
            title = %redact_value(&event.title),
            forms = event.forms.len(),
            total = %event.event_total,
            "assembled event"
        );
        Ok(event)
    }

    fn resolve_choice(&self, reader: &mut FieldReader<'_>, column: &str) -> Option<Vec<String>> {
        let value = reader.text(column);
        if value.is_empty() || self.choices.is_empty() {
            return None;
        }
        match self.choices.resolve(&value) {
            Some(matched) => Some(vec![matched.id().to_string()]),
            None => {
                reader.warn(column, ConversionError::UnknownOption { raw: value });
                None
            }
        }
    }
}

fn checked_sum(
    left: Decimal,
    right: Decimal,
    amount: &'static str,
) -> Result<Decimal, AssembleError> {
    left.checked_add(right).ok_or(AssembleError::AmountOverflow { amount })
}
