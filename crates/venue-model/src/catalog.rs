//! Field catalog and form-section layouts.
//!
//! The catalog is the static list of recognized form fields. A section
//! layout binds spreadsheet columns to catalog fields for one form section
//! (for example the nikkah and reception halves of an all-day booking).

use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// How a field's cell is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Yes/no, optionally priced when enabled.
    #[serde(alias = "fixed_price_notes_toggle")]
    Toggle,
    /// Count multiplied by a unit price.
    #[serde(alias = "number")]
    Quantity,
    /// One free-text choice.
    #[serde(alias = "dropdown_options")]
    Select,
    /// Free-text annotation.
    #[serde(alias = "text_notes_only")]
    Text,
}

impl FieldKind {
    /// Toggle and quantity responses feed the section subtotal.
    pub fn is_priced(self) -> bool {
        matches!(self, Self::Toggle | Self::Quantity)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Toggle => "toggle",
            Self::Quantity => "quantity",
            Self::Select => "select",
            Self::Text => "text",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCatalogEntry {
    pub canonical_name: String,
    pub stable_id: String,
    pub kind: FieldKind,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub unit_price: Decimal,
    /// Human-readable name used by the calendar formatter.
    #[serde(default)]
    pub label: Option<String>,
}

impl FieldCatalogEntry {
    pub fn new(
        canonical_name: impl Into<String>,
        stable_id: impl Into<String>,
        kind: FieldKind,
        unit_price: Decimal,
    ) -> Self {
        Self {
            canonical_name: canonical_name.into(),
            stable_id: stable_id.into(),
            kind,
            unit_price,
            label: None,
        }
    }

    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Display name: the configured label, else the canonical name in title case.
    pub fn display_label(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.canonical_name
            .split('_')
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Normalizes a field name the way catalog keys are stored: trimmed,
/// lowercase, spaces replaced by underscores.
pub fn canonical_key(name: &str) -> String {
    name.trim().to_lowercase().replace(' ', "_")
}

/// Immutable, validated set of catalog entries keyed by canonical name.
#[derive(Debug, Clone, Default)]
pub struct FieldCatalog {
    entries: Vec<FieldCatalogEntry>,
    by_name: HashMap<String, usize>,
}

impl FieldCatalog {
    /// Builds a catalog, rejecting duplicate names and negative prices.
    pub fn new(entries: Vec<FieldCatalogEntry>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(entries.len());
        let mut by_id: HashMap<&str, &str> = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            if entry.unit_price.is_sign_negative() && !entry.unit_price.is_zero() {
                return Err(ModelError::NegativePrice {
                    name: entry.canonical_name.clone(),
                });
            }
            if by_name.insert(canonical_key(&entry.canonical_name), idx).is_some() {
                return Err(ModelError::DuplicateField {
                    name: entry.canonical_name.clone(),
                });
            }
            if let Some(first) = by_id.insert(&entry.stable_id, &entry.canonical_name) {
                return Err(ModelError::DuplicateStableId {
                    stable_id: entry.stable_id.clone(),
                    first: first.to_string(),
                    second: entry.canonical_name.clone(),
                });
            }
        }
        Ok(Self { entries, by_name })
    }

    pub fn get(&self, name: &str) -> Option<&FieldCatalogEntry> {
        self.by_name
            .get(&canonical_key(name))
            .map(|idx| &self.entries[*idx])
    }

    pub fn by_stable_id(&self, stable_id: &str) -> Option<&FieldCatalogEntry> {
        self.entries.iter().find(|entry| entry.stable_id == stable_id)
    }

    pub fn entries(&self) -> &[FieldCatalogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn default_quantity() -> u32 {
    1
}

/// Binds one source column to one catalog field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldBinding {
    pub source_column: String,
    /// Canonical name of the catalog entry.
    pub field: String,
    /// Overrides the catalog entry's kind when set.
    #[serde(default)]
    pub kind: Option<FieldKind>,
    /// Column holding the price (toggle) or unit price (quantity).
    #[serde(default)]
    pub price_column: Option<String>,
    /// Column holding the count. When set, `source_column` acts as a yes/no gate.
    #[serde(default)]
    pub quantity_column: Option<String>,
    /// Count used when `quantity_column` is set but blank.
    #[serde(default = "default_quantity")]
    pub default_quantity: u32,
}

impl FieldBinding {
    pub fn new(source_column: impl Into<String>, field: impl Into<String>) -> Self {
        Self {
            source_column: source_column.into(),
            field: field.into(),
            kind: None,
            price_column: None,
            quantity_column: None,
            default_quantity: default_quantity(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: FieldKind) -> Self {
        self.kind = Some(kind);
        self
    }

    #[must_use]
    pub fn with_price_column(mut self, column: impl Into<String>) -> Self {
        self.price_column = Some(column.into());
        self
    }

    #[must_use]
    pub fn with_quantity_column(mut self, column: impl Into<String>) -> Self {
        self.quantity_column = Some(column.into());
        self
    }
}

/// Stable identifier shared by more than one binding in a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StableIdAlias {
    pub stable_id: String,
    pub source_columns: Vec<String>,
}

/// One named form section with its column bindings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionLayout {
    pub name: String,
    /// Label stored on the event form; defaults to `name`.
    #[serde(default)]
    pub label: Option<String>,
    /// Identifier of the form template this section fills in.
    #[serde(default)]
    pub form_id: Option<String>,
    #[serde(default)]
    pub tab_order: u32,
    #[serde(default)]
    pub men_count_column: Option<String>,
    #[serde(default)]
    pub ladies_count_column: Option<String>,
    /// Reported head count, compared against men plus ladies.
    #[serde(default)]
    pub guest_count_column: Option<String>,
    #[serde(default)]
    pub guest_price_column: Option<String>,
    #[serde(default)]
    pub bindings: Vec<FieldBinding>,
}

impl SectionLayout {
    pub fn new(name: impl Into<String>, bindings: Vec<FieldBinding>) -> Self {
        Self {
            name: name.into(),
            label: None,
            form_id: None,
            tab_order: 0,
            men_count_column: None,
            ladies_count_column: None,
            guest_count_column: None,
            guest_price_column: None,
            bindings,
        }
    }

    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.name)
    }

    /// Stable identifiers reached from more than one binding.
    /// Bindings whose field is absent from the catalog are ignored.
    pub fn aliases(&self, catalog: &FieldCatalog) -> Vec<StableIdAlias> {
        let mut seen: BTreeMap<&str, Vec<String>> = BTreeMap::new();
        for binding in &self.bindings {
            if let Some(entry) = catalog.get(&binding.field) {
                seen.entry(entry.stable_id.as_str())
                    .or_default()
                    .push(binding.source_column.clone());
            }
        }
        seen.into_iter()
            .filter(|(_, columns)| columns.len() > 1)
            .map(|(stable_id, source_columns)| StableIdAlias {
                stable_id: stable_id.to_string(),
                source_columns,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> FieldCatalog {
        FieldCatalog::new(vec![
            FieldCatalogEntry::new("notes_section", "id-notes", FieldKind::Text, Decimal::ZERO),
            FieldCatalogEntry::new("top_up_lamb", "id-lamb", FieldKind::Toggle, Decimal::new(150, 0)),
        ])
        .expect("valid catalog")
    }

    #[test]
    fn lookup_normalizes_names() {
        let catalog = catalog();
        assert_eq!(
            catalog.get("Top Up Lamb").map(|entry| entry.stable_id.as_str()),
            Some("id-lamb")
        );
        assert!(catalog.get("unknown").is_none());
    }

    #[test]
    fn rejects_duplicate_names() {
        let result = FieldCatalog::new(vec![
            FieldCatalogEntry::new("cake", "a", FieldKind::Toggle, Decimal::ZERO),
            FieldCatalogEntry::new("Cake", "b", FieldKind::Toggle, Decimal::ZERO),
        ]);
        assert!(matches!(result, Err(ModelError::DuplicateField { .. })));
    }

    #[test]
    fn rejects_negative_price() {
        let result = FieldCatalog::new(vec![FieldCatalogEntry::new(
            "cake",
            "a",
            FieldKind::Toggle,
            Decimal::new(-1, 0),
        )]);
        assert!(matches!(result, Err(ModelError::NegativePrice { .. })));
    }

    #[test]
    fn finds_aliased_bindings() {
        let layout = SectionLayout::new(
            "reception",
            vec![
                FieldBinding::new("ma_themecolour", "notes_section"),
                FieldBinding::new("ma_stage", "notes_section"),
                FieldBinding::new("ma_lamb", "top_up_lamb"),
                FieldBinding::new("ma_unknown", "not_in_catalog"),
            ],
        );
        let aliases = layout.aliases(&catalog());
        assert_eq!(aliases.len(), 1);
        assert_eq!(aliases[0].stable_id, "id-notes");
        assert_eq!(aliases[0].source_columns, vec!["ma_themecolour", "ma_stage"]);
    }

    #[test]
    fn display_label_title_cases_name() {
        let entry = FieldCatalogEntry::new("fog_and_sparkle", "x", FieldKind::Toggle, Decimal::ZERO);
        assert_eq!(entry.display_label(), "Fog And Sparkle");
        let labelled = entry.with_label("Fog & Sparkle");
        assert_eq!(labelled.display_label(), "Fog & Sparkle");
    }
}
