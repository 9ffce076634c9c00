use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Stored answer for one catalog field within one form section.
///
/// Serialized shape is the external contract of the `form_responses`
/// column: `{enabled, price, quantity, notes, selections}` with price as a
/// JSON number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldResponse {
    pub enabled: bool,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub selections: Vec<String>,
}

impl FieldResponse {
    /// Base response before a cell is read: off, free, quantity one.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            price: Decimal::ZERO,
            quantity: 1,
            notes: String::new(),
            selections: Vec::new(),
        }
    }

    /// Whether the formatter should show this field: enabled and either
    /// priced or annotated.
    pub fn is_noteworthy(&self) -> bool {
        self.enabled && (self.price > Decimal::ZERO || !self.notes.trim().is_empty())
    }
}

/// Responses for one form section keyed by stable id, plus the subtotal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FormResult {
    pub responses: BTreeMap<String, FieldResponse>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

impl FormResult {
    pub fn empty() -> Self {
        Self {
            responses: BTreeMap::new(),
            total: Decimal::new(0, 2),
        }
    }

    pub fn enabled_count(&self) -> usize {
        self.responses.values().filter(|r| r.enabled).count()
    }
}
