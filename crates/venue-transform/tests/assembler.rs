//! Event assembly tests.

use chrono::{NaiveDate, NaiveTime};
use rust_decimal::Decimal;
use venue_model::{
    ChoiceOption, EndTimePolicy, EventColumns, FieldBinding, FieldCatalog, FieldCatalogEntry,
    FieldKind, ImportOptions, ImportProfile, MissingStartPolicy, RawRow, SectionLayout,
};
use venue_transform::{AssembleError, ConversionError, EventAssembler};

fn profile() -> ImportProfile {
    let catalog = FieldCatalog::new(vec![
        FieldCatalogEntry::new("top_up_lamb", "id-lamb", FieldKind::Toggle, Decimal::ZERO),
        FieldCatalogEntry::new("cake_from_narmin", "id-cake", FieldKind::Toggle, Decimal::new(80, 0)),
        FieldCatalogEntry::new("theme_colour", "id-theme", FieldKind::Text, Decimal::ZERO),
    ])
    .unwrap();

    let mut nikkah = SectionLayout::new(
        "nikkah",
        vec![FieldBinding::new("ma_nikahtopuplambyesno", "top_up_lamb")
            .with_price_column("ma_nikahtopuplambprice")],
    );
    nikkah.label = Some("Nikkah".to_string());
    nikkah.form_id = Some("form-nikkah".to_string());
    nikkah.tab_order = 1;
    nikkah.men_count_column = Some("ma_nikahmencount".to_string());
    nikkah.ladies_count_column = Some("ma_nikahladiescount".to_string());
    nikkah.guest_price_column = Some("ma_nikahtotalguestprice".to_string());

    let mut reception = SectionLayout::new(
        "reception",
        vec![
            FieldBinding::new("ma_cakefromnarmin", "cake_from_narmin"),
            FieldBinding::new("ma_themecolour", "theme_colour"),
        ],
    );
    reception.label = Some("Reception".to_string());
    reception.tab_order = 2;
    reception.men_count_column = Some("ma_receptionmencount".to_string());
    reception.ladies_count_column = Some("ma_receptionladiescount".to_string());
    reception.guest_price_column = Some("ma_receptiontotalguestprice".to_string());
    reception.guest_count_column = Some("ma_receptiontotalguestcount".to_string());

    ImportProfile {
        catalog,
        sections: vec![nikkah, reception],
        event: EventColumns::default(),
        choices: vec![
            ChoiceOption {
                id: "eth-pk".to_string(),
                name: "Pakistani".to_string(),
            },
            ChoiceOption {
                id: "eth-bd".to_string(),
                name: "Bangladeshi".to_string(),
            },
        ],
        ..ImportProfile::default()
    }
}

fn row(extra: &[(&str, &str)]) -> RawRow {
    let mut row: RawRow = [
        ("ma_title", "Khan & Ali Wedding"),
        ("ma_nikahstartdatetime", "10/11/2025  11:00:00 AM"),
        ("ma_nikahendatetime", ""),
        ("ma_primarycontactname", "Sara Khan"),
        ("ma_primarycontactnumber", "07700 900123"),
        ("ma_depositamount", "500"),
        ("ma_ethnicity", "british pakistani"),
        ("ma_nikahtopuplambyesno", "Yes"),
        ("ma_nikahtopuplambprice", "150.00"),
        ("ma_nikahmencount", "50"),
        ("ma_nikahladiescount", "60"),
        ("ma_nikahtotalguestprice", "1100"),
        ("ma_receptionmencount", "200"),
        ("ma_receptionladiescount", "220.0"),
        ("ma_receptiontotalguestprice", "8400.50"),
        ("ma_cakefromnarmin", "yes"),
        ("ma_themecolour", "Emerald"),
    ]
    .into_iter()
    .collect();
    for (column, value) in extra {
        row.insert(*column, *value);
    }
    row
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

#[test]
fn assembles_full_event() {
    let profile = profile();
    let options = ImportOptions::default();
    let assembler = EventAssembler::new(&profile, &options);
    let assembly = assembler.assemble(2, &row(&[]));
    assert!(assembly.warnings.is_empty());
    let event = assembly.result.unwrap();

    assert_eq!(event.source_row, 2);
    assert_eq!(event.title, "Khan & Ali Wedding");
    assert_eq!(event.event_type, "All Day");
    assert_eq!(event.event_date, date(2025, 10, 11));
    assert_eq!(event.event_end_date, date(2025, 10, 11));
    assert_eq!(event.start_time, Some(time(11, 0)));
    assert_eq!(event.end_time, Some(time(15, 0)));

    // counts come from the reception section
    assert_eq!(event.men_count, 200);
    assert_eq!(event.ladies_count, 220);

    assert_eq!(event.forms.len(), 2);
    let nikkah = event.form("nikkah").unwrap();
    assert_eq!(nikkah.form_id.as_deref(), Some("form-nikkah"));
    assert_eq!(nikkah.guest_count, 110);
    assert_eq!(nikkah.result.total, Decimal::new(15000, 2));
    let reception = event.form("reception").unwrap();
    assert_eq!(reception.result.total, Decimal::new(8000, 2));
    assert_eq!(reception.result.responses["id-theme"].notes, "Emerald");

    assert_eq!(event.total_guest_price, Decimal::new(950050, 2));
    assert_eq!(event.deposit_amount, Decimal::new(50000, 2));
    assert_eq!(event.form_total, Decimal::new(23000, 2));
    assert_eq!(event.event_total, Decimal::new(973050, 2));
    assert_eq!(event.balance_due, Decimal::new(923050, 2));
    assert_eq!(event.total_guests, 420);
    assert!(!event.event_multiple_days);
    assert_eq!(event.event_mix_type, "mixed");
    assert_eq!(event.ethnicity, Some(vec!["eth-pk".to_string()]));
    assert_eq!(event.primary_contact_number, "07700 900123");
}

#[test]
fn missing_title_fails_row() {
    let profile = profile();
    let options = ImportOptions::default();
    let assembly = EventAssembler::new(&profile, &options).assemble(3, &row(&[("ma_title", "  ")]));
    let error = assembly.result.unwrap_err();
    assert!(matches!(error, AssembleError::MissingTitle { .. }));
    assert!(!error.is_skip());
}

#[test]
fn unparsable_start_is_skipped_by_default() {
    let profile = profile();
    let options = ImportOptions::default();
    let assembly = EventAssembler::new(&profile, &options)
        .assemble(4, &row(&[("ma_nikahstartdatetime", "not a date")]));
    let error = assembly.result.unwrap_err();
    assert!(error.is_skip());
    assert_eq!(assembly.warnings.len(), 1);
    assert!(matches!(
        assembly.warnings[0].error,
        ConversionError::UnparsableTimestamp { .. }
    ));
}

#[test]
fn substitute_start_date_is_all_day() {
    let profile = profile();
    let today = date(2026, 3, 1);
    let options = ImportOptions::default().with_missing_start(MissingStartPolicy::Substitute(today));
    let event = EventAssembler::new(&profile, &options)
        .assemble(5, &row(&[("ma_nikahstartdatetime", "")]))
        .result
        .unwrap();
    assert_eq!(event.event_date, today);
    assert!(!event.is_timed());
}

#[test]
fn closing_time_policy_sets_end() {
    let profile = profile();
    let options = ImportOptions::default().with_end_time(EndTimePolicy::ClosingTime(time(23, 0)));
    let event = EventAssembler::new(&profile, &options)
        .assemble(6, &row(&[]))
        .result
        .unwrap();
    assert_eq!(event.end_time, Some(time(23, 0)));
}

#[test]
fn unknown_ethnicity_warns() {
    let profile = profile();
    let options = ImportOptions::default();
    let assembly = EventAssembler::new(&profile, &options)
        .assemble(7, &row(&[("ma_ethnicity", "Somali")]));
    assert_eq!(assembly.result.unwrap().ethnicity, None);
    assert_eq!(assembly.warnings.len(), 1);
    assert_eq!(assembly.warnings[0].field, "ma_ethnicity");
}

const NEAR_MAX: &str = "70000000000000000000000000000";

#[test]
fn guest_price_overflow_fails_only_the_row() {
    let profile = profile();
    let options = ImportOptions::default();
    let assembly = EventAssembler::new(&profile, &options).assemble(
        8,
        &row(&[
            ("ma_nikahtotalguestprice", NEAR_MAX),
            ("ma_receptiontotalguestprice", NEAR_MAX),
        ]),
    );
    let error = assembly.result.unwrap_err();
    assert_eq!(
        error,
        AssembleError::AmountOverflow {
            amount: "guest price total"
        }
    );
    assert!(!error.is_skip());
}

#[test]
fn balance_due_overflow_fails_the_row() {
    let profile = profile();
    let options = ImportOptions::default();
    let assembly = EventAssembler::new(&profile, &options).assemble(
        9,
        &row(&[
            ("ma_nikahtotalguestprice", "700000000000000000000000000"),
            ("ma_receptiontotalguestprice", "0"),
            ("ma_nikahtopuplambyesno", "No"),
            ("ma_cakefromnarmin", "No"),
            ("ma_depositamount", "-79000000000000000000000000000"),
        ]),
    );
    assert_eq!(
        assembly.result.unwrap_err(),
        AssembleError::AmountOverflow {
            amount: "balance due"
        }
    );
}
