//! Field response mapping.
//!
//! Turns the cells bound by one [`SectionLayout`] into a [`FormResult`]:
//! one [`FieldResponse`] per bound catalog field, keyed by stable id, plus
//! the section subtotal.

use rust_decimal::Decimal;
use tracing::{debug, warn};
use venue_model::{
    FieldBinding, FieldCatalog, FieldCatalogEntry, FieldKind, FieldResponse, FormResult, RawRow,
    SectionLayout,
};

use crate::diagnostics::{ConversionError, ConversionWarning};
use crate::reader::FieldReader;

/// Maps one section of a row, collecting conversion warnings into `reader`.
///
/// Bindings whose field is missing from the catalog, or whose source column
/// is absent from the row, are skipped. When two bindings share a stable id
/// the later one overwrites the earlier response; the subtotal is computed
/// from the final map so nothing is counted twice.
pub fn map_section(
    reader: &mut FieldReader<'_>,
    layout: &SectionLayout,
    catalog: &FieldCatalog,
) -> FormResult {
    let mut result = FormResult::empty();
    let mut priced: Vec<(&str, &str)> = Vec::new();

    for binding in &layout.bindings {
        let Some(entry) = catalog.get(&binding.field) else {
            debug!(section = %layout.name, field = %binding.field, "field not in catalog, skipped");
            continue;
        };
        if !reader.row().contains(&binding.source_column) {
            debug!(section = %layout.name, column = %binding.source_column, "column not in row, skipped");
            continue;
        }
        let kind = binding.kind.unwrap_or(entry.kind);
        let response = map_field(reader, binding, entry, kind);
        if result
            .responses
            .insert(entry.stable_id.clone(), response)
            .is_some()
        {
            warn!(
                section = %layout.name,
                stable_id = %entry.stable_id,
                column = %binding.source_column,
                "response overwritten by a later binding"
            );
        }
        priced.retain(|(stable_id, _)| *stable_id != entry.stable_id);
        if kind.is_priced() {
            priced.push((entry.stable_id.as_str(), price_source(binding)));
        }
    }

    result.total = section_total(reader, &mut result, &priced);
    result
}

/// Convenience wrapper for a bare row.
pub fn map_row(
    row: &RawRow,
    layout: &SectionLayout,
    catalog: &FieldCatalog,
) -> (FormResult, Vec<ConversionWarning>) {
    let mut reader = FieldReader::new(row);
    let result = map_section(&mut reader, layout, catalog);
    (result, reader.into_warnings())
}

/// Reads one binding into a response.
pub fn map_field(
    reader: &mut FieldReader<'_>,
    binding: &FieldBinding,
    entry: &FieldCatalogEntry,
    kind: FieldKind,
) -> FieldResponse {
    let column = binding.source_column.as_str();
    let mut response = FieldResponse::disabled();
    match kind {
        FieldKind::Toggle => {
            response.enabled = reader.boolean(column, false);
            if response.enabled {
                response.price = unit_price(reader, binding, entry);
            }
        }
        FieldKind::Quantity => {
            let quantity = match &binding.quantity_column {
                Some(quantity_column) => {
                    if reader.boolean(column, false) {
                        reader.count(quantity_column, binding.default_quantity)
                    } else {
                        0
                    }
                }
                None => reader.count(column, 0),
            };
            response.quantity = quantity;
            response.enabled = quantity > 0;
            if response.enabled {
                let unit = unit_price(reader, binding, entry);
                response.price = match unit.checked_mul(Decimal::from(quantity)) {
                    Some(price) => price,
                    None => {
                        reader.warn(
                            price_source(binding),
                            ConversionError::OutOfRange {
                                raw: format!("{unit} x {quantity}"),
                                target: "price",
                            },
                        );
                        Decimal::ZERO
                    }
                };
            }
        }
        FieldKind::Select => {
            let text = reader.text(column);
            response.enabled = !text.is_empty();
            if response.enabled {
                response.selections.push(text);
            }
        }
        FieldKind::Text => {
            let text = reader.text(column);
            response.enabled = !text.is_empty();
            response.notes = text;
        }
    }
    response
}

fn unit_price(
    reader: &mut FieldReader<'_>,
    binding: &FieldBinding,
    entry: &FieldCatalogEntry,
) -> Decimal {
    match &binding.price_column {
        Some(price_column) => reader.decimal(price_column, entry.unit_price),
        None => entry.unit_price,
    }
}

/// Column a binding's price is read from.
fn price_source(binding: &FieldBinding) -> &str {
    binding
        .price_column
        .as_deref()
        .unwrap_or(binding.source_column.as_str())
}

/// Exact sum of enabled, positively priced toggle and quantity responses,
/// carried with at least two fractional digits. A price that would push the
/// sum past the decimal range is zeroed with a warning on its column.
fn section_total(
    reader: &mut FieldReader<'_>,
    result: &mut FormResult,
    priced: &[(&str, &str)],
) -> Decimal {
    let mut total = Decimal::ZERO;
    for (stable_id, column) in priced {
        let Some(response) = result.responses.get_mut(*stable_id) else {
            continue;
        };
        if !response.enabled || response.price <= Decimal::ZERO {
            continue;
        }
        match total.checked_add(response.price) {
            Some(sum) => total = sum,
            None => {
                reader.warn(
                    column,
                    ConversionError::OutOfRange {
                        raw: response.price.to_string(),
                        target: "section total",
                    },
                );
                response.price = Decimal::ZERO;
            }
        }
    }
    money(total)
}

/// Carries `amount` with at least two fractional digits.
pub(crate) fn money(mut amount: Decimal) -> Decimal {
    if amount.scale() < 2 {
        amount.rescale(2);
    }
    amount
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(vec![
            FieldCatalogEntry::new("top_up_lamb", "id-lamb", FieldKind::Toggle, Decimal::new(120, 0)),
            FieldCatalogEntry::new("extra_hour", "id-hour", FieldKind::Quantity, Decimal::new(40, 0)),
            FieldCatalogEntry::new("dining_chairs", "id-chairs", FieldKind::Select, Decimal::ZERO),
            FieldCatalogEntry::new("theme_colour", "id-theme", FieldKind::Text, Decimal::ZERO),
        ])
        .unwrap()
    }

    #[test]
    fn toggle_reads_price_column() {
        let layout = SectionLayout::new(
            "nikkah",
            vec![FieldBinding::new("ma_nikahtopuplambyesno", "top_up_lamb")
                .with_price_column("ma_nikahtopuplambprice")],
        );
        let row: RawRow = [
            ("ma_nikahtopuplambyesno", "Yes"),
            ("ma_nikahtopuplambprice", "150.00"),
        ]
        .into_iter()
        .collect();
        let (result, warnings) = map_row(&row, &layout, &catalog());
        let lamb = &result.responses["id-lamb"];
        assert!(lamb.enabled);
        assert_eq!(lamb.price, Decimal::new(15000, 2));
        assert_eq!(lamb.quantity, 1);
        assert_eq!(result.total, Decimal::new(15000, 2));
        assert!(warnings.is_empty());
    }

    #[test]
    fn disabled_toggle_is_free() {
        let layout = SectionLayout::new(
            "nikkah",
            vec![FieldBinding::new("ma_lamb", "top_up_lamb").with_price_column("ma_lambprice")],
        );
        let row: RawRow = [("ma_lamb", "No"), ("ma_lambprice", "150")].into_iter().collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        assert!(!result.responses["id-lamb"].enabled);
        assert_eq!(result.responses["id-lamb"].price, Decimal::ZERO);
        assert_eq!(result.total, Decimal::ZERO);
        assert_eq!(result.total.scale(), 2);
    }

    #[test]
    fn toggle_falls_back_to_catalog_price() {
        let layout = SectionLayout::new(
            "nikkah",
            vec![FieldBinding::new("ma_lamb", "top_up_lamb").with_price_column("ma_lambprice")],
        );
        let row: RawRow = [("ma_lamb", "yes"), ("ma_lambprice", "")].into_iter().collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        assert_eq!(result.responses["id-lamb"].price, Decimal::new(120, 0));
    }

    #[test]
    fn quantity_gate_defaults_to_one() {
        let layout = SectionLayout::new(
            "nikkah",
            vec![FieldBinding::new("ma_nikahextrahoursyesno", "extra_hour")
                .with_price_column("ma_nikahextrahoursprice")
                .with_quantity_column("ma_nikahextrahoursquantity")],
        );
        let row: RawRow = [
            ("ma_nikahextrahoursyesno", "1"),
            ("ma_nikahextrahoursprice", "50"),
        ]
        .into_iter()
        .collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        let hours = &result.responses["id-hour"];
        assert!(hours.enabled);
        assert_eq!(hours.quantity, 1);
        assert_eq!(hours.price, Decimal::new(5000, 2));
        assert_eq!(result.total, Decimal::new(5000, 2));
    }

    #[test]
    fn quantity_column_multiplies_unit_price() {
        let layout = SectionLayout::new(
            "reception",
            vec![FieldBinding::new("ma_extrahours", "extra_hour")],
        );
        let row: RawRow = [("ma_extrahours", "3.0")].into_iter().collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        assert_eq!(result.responses["id-hour"].quantity, 3);
        assert_eq!(result.responses["id-hour"].price, Decimal::new(120, 0));
    }

    #[test]
    fn select_and_text_never_count() {
        let layout = SectionLayout::new(
            "reception",
            vec![
                FieldBinding::new("ma_diningchairs", "dining_chairs"),
                FieldBinding::new("ma_themecolour", "theme_colour"),
            ],
        );
        let row: RawRow = [("ma_diningchairs", " Chiavari "), ("ma_themecolour", "Gold")]
            .into_iter()
            .collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        assert_eq!(result.responses["id-chairs"].selections, vec!["Chiavari"]);
        assert!(result.responses["id-chairs"].notes.is_empty());
        assert_eq!(result.responses["id-theme"].notes, "Gold");
        assert!(result.responses["id-theme"].selections.is_empty());
        assert_eq!(result.total, Decimal::ZERO);
    }

    #[test]
    fn unknown_fields_and_absent_columns_are_skipped() {
        let layout = SectionLayout::new(
            "reception",
            vec![
                FieldBinding::new("ma_fireworks", "fireworks"),
                FieldBinding::new("ma_themecolour", "theme_colour"),
            ],
        );
        let row: RawRow = [("ma_fireworks", "Yes")].into_iter().collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        assert!(result.responses.is_empty());
    }

    #[test]
    fn aliased_bindings_count_once() {
        let layout = SectionLayout::new(
            "nikkah",
            vec![
                FieldBinding::new("ma_lamb_a", "top_up_lamb"),
                FieldBinding::new("ma_lamb_b", "top_up_lamb"),
            ],
        );
        let row: RawRow = [("ma_lamb_a", "yes"), ("ma_lamb_b", "yes")].into_iter().collect();
        let (result, _) = map_row(&row, &layout, &catalog());
        assert_eq!(result.responses.len(), 1);
        assert_eq!(result.total, Decimal::new(12000, 2));
    }
}
