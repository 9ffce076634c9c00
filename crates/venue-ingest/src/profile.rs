//! TOML import profile loading and validation.
//!
//! A profile holds the field catalog, the section layouts that bind
//! spreadsheet columns to catalog fields, the event-level column names, the
//! ethnicity options and the calendar description layout. It is read once per
//! run; any problem here is fatal.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use venue_model::{
    AliasPolicy, CalendarSettings, ChoiceOption, EventColumns, FieldCatalog, FieldCatalogEntry,
    ImportProfile, SectionLayout,
};

use crate::error::CatalogError;
use crate::hash::sha256_hex;

/// On-disk shape of `catalog.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProfileDocument {
    pub event: EventColumns,
    pub fields: Vec<FieldCatalogEntry>,
    pub sections: Vec<SectionLayout>,
    pub options: Vec<ChoiceOption>,
    pub calendar: CalendarSettings,
}

/// Reads, validates and fingerprints a profile file.
pub fn load_profile(path: &Path, aliases: AliasPolicy) -> Result<ImportProfile, CatalogError> {
    let text = std::fs::read_to_string(path).map_err(|e| CatalogError::io(path, e))?;
    let document: ProfileDocument = toml::from_str(&text).map_err(|source| CatalogError::Toml {
        path: path.to_path_buf(),
        source,
    })?;
    let mut profile = build_profile(document, aliases)?;
    let fingerprint = sha256_hex(text.as_bytes());
    info!(
        path = %path.display(),
        fields = profile.catalog.len(),
        sections = profile.sections.len(),
        fingerprint = %fingerprint,
        "loaded import profile"
    );
    profile.fingerprint = Some(fingerprint);
    Ok(profile)
}

/// Parses a profile from TOML text. No fingerprint is attached.
pub fn parse_profile(text: &str, aliases: AliasPolicy) -> Result<ImportProfile, CatalogError> {
    let document: ProfileDocument =
        toml::from_str(text).map_err(|source| CatalogError::Toml {
            path: "<inline>".into(),
            source,
        })?;
    build_profile(document, aliases)
}

/// Validates a parsed document into an [`ImportProfile`].
pub fn build_profile(
    document: ProfileDocument,
    aliases: AliasPolicy,
) -> Result<ImportProfile, CatalogError> {
    if document.fields.is_empty() {
        return Err(CatalogError::InvalidProfile {
            message: "no [[fields]] defined".to_string(),
        });
    }
    let catalog = FieldCatalog::new(document.fields)?;

    let mut names = BTreeSet::new();
    for section in &document.sections {
        if !names.insert(section.name.to_lowercase()) {
            return Err(CatalogError::DuplicateSection {
                name: section.name.clone(),
            });
        }
        for binding in &section.bindings {
            if catalog.get(&binding.field).is_none() {
                warn!(
                    section = %section.name,
                    field = %binding.field,
                    column = %binding.source_column,
                    "binding refers to a field missing from the catalog"
                );
            }
        }
        for alias in section.aliases(&catalog) {
            let columns = alias.source_columns.join(", ");
            match aliases {
                AliasPolicy::Reject => {
                    return Err(CatalogError::AliasedStableId {
                        section: section.name.clone(),
                        stable_id: alias.stable_id,
                        columns,
                    });
                }
                AliasPolicy::LastWriteWins => {
                    warn!(
                        section = %section.name,
                        stable_id = %alias.stable_id,
                        columns = %columns,
                        "columns share a stable id, last one wins"
                    );
                }
            }
        }
    }

    if let Some(main) = &document.event.main_section
        && !names.contains(&main.to_lowercase())
    {
        return Err(CatalogError::UnknownSection {
            section: main.clone(),
            context: "[event].main_section".to_string(),
        });
    }

    for layout in &document.calendar.sections {
        if !names.contains(&layout.section.to_lowercase()) {
            return Err(CatalogError::UnknownSection {
                section: layout.section.clone(),
                context: "[[calendar.sections]]".to_string(),
            });
        }
        let fields = layout
            .quick_time_field
            .iter()
            .chain(&layout.text_fields)
            .chain(&layout.toggle_fields);
        for field in fields {
            if catalog.get(field).is_none() {
                warn!(section = %layout.section, field = %field, "calendar field missing from the catalog");
            }
        }
    }

    Ok(ImportProfile {
        catalog,
        sections: document.sections,
        event: document.event,
        choices: document.options,
        calendar: document.calendar,
        fingerprint: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"
[event]
main_section = "reception"

[[fields]]
canonical_name = "top_up_lamb"
stable_id = "id-lamb"
kind = "fixed_price_notes_toggle"

[[sections]]
name = "reception"

[[sections.bindings]]
source_column = "ma_lamb"
field = "top_up_lamb"
"#;

    #[test]
    fn parses_minimal_profile() {
        let profile = parse_profile(MINIMAL, AliasPolicy::Reject).unwrap();
        assert_eq!(profile.catalog.len(), 1);
        assert_eq!(profile.sections[0].bindings[0].default_quantity, 1);
        assert_eq!(profile.event.title, "ma_title");
        assert_eq!(profile.calendar.time_zone, "Europe/London");
        assert!(profile.fingerprint.is_none());
    }

    #[test]
    fn rejects_empty_catalog() {
        let error = parse_profile("", AliasPolicy::Reject).unwrap_err();
        assert!(matches!(error, CatalogError::InvalidProfile { .. }));
    }

    #[test]
    fn rejects_unknown_main_section() {
        let text = MINIMAL.replace("main_section = \"reception\"", "main_section = \"mehndi\"");
        let error = parse_profile(&text, AliasPolicy::Reject).unwrap_err();
        assert!(matches!(error, CatalogError::UnknownSection { .. }));
    }
}
