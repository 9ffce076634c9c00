//! Option lookup for free-text select columns such as ethnicity.

use std::collections::HashMap;

use venue_model::ChoiceOption;

/// Resolves spreadsheet text to a configured option id.
#[derive(Debug, Clone, Default)]
pub struct ChoiceLookup {
    options: Vec<(String, String)>,
    exact: HashMap<String, usize>,
}

/// How a value was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceMatch<'a> {
    Exact(&'a str),
    Partial(&'a str),
}

impl<'a> ChoiceMatch<'a> {
    pub fn id(self) -> &'a str {
        match self {
            Self::Exact(id) | Self::Partial(id) => id,
        }
    }
}

impl ChoiceLookup {
    pub fn new(options: &[ChoiceOption]) -> Self {
        let mut lookup = Self::default();
        for option in options {
            let name = option.name.trim().to_lowercase();
            lookup
                .exact
                .entry(name.clone())
                .or_insert(lookup.options.len());
            lookup.options.push((name, option.id.clone()));
        }
        lookup
    }

    /// Exact case-insensitive name first, then the first option (in
    /// configured order) whose name contains the value or is contained in it.
    /// Blank values resolve to nothing.
    pub fn resolve(&self, value: &str) -> Option<ChoiceMatch<'_>> {
        let needle = value.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        if let Some(index) = self.exact.get(&needle) {
            return Some(ChoiceMatch::Exact(&self.options[*index].1));
        }
        self.options
            .iter()
            .find(|(name, _)| !name.is_empty() && (name.contains(&needle) || needle.contains(name.as_str())))
            .map(|(_, id)| ChoiceMatch::Partial(id))
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
