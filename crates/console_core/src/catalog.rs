//! Static command catalog and its UI-local expansion flags.

use std::collections::BTreeSet;

use console_contract::{CatalogEntry, CommandCategory};
use thiserror::Error;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/command_catalog_generated.rs"));
}

pub use generated::COMMAND_CATALOG_JSON;

/// Errors raised while loading catalog data.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog payload could not be parsed.
    #[error("catalog data is invalid: {0}")]
    Invalid(String),
    /// Two entries share the same command id.
    #[error("duplicate command id `{0}`")]
    DuplicateId(String),
}

/// Read-only table of known commands, in display order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandCatalog {
    entries: Vec<CatalogEntry>,
}

impl CommandCatalog {
    /// Builds a catalog from `entries`, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateId`] when two entries share an id.
    pub fn new(entries: Vec<CatalogEntry>) -> Result<Self, CatalogError> {
        let mut seen = BTreeSet::new();
        for entry in &entries {
            if !seen.insert(entry.id.as_str()) {
                return Err(CatalogError::DuplicateId(entry.id.clone()));
            }
        }
        Ok(Self { entries })
    }

    /// Parses a JSON array of [`CatalogEntry`] records.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed JSON or duplicate ids.
    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let entries = serde_json::from_str::<Vec<CatalogEntry>>(raw)
            .map_err(|err| CatalogError::Invalid(err.to_string()))?;
        Self::new(entries)
    }

    /// Loads the catalog compiled from `catalog/commands.toml`.
    ///
    /// # Errors
    ///
    /// Returns an error if the generated payload does not parse.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json(COMMAND_CATALOG_JSON)
    }

    /// Finds the entry with id `id`. Unknown ids are a normal outcome.
    pub fn lookup(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// All entries in catalog order.
    pub fn all(&self) -> &[CatalogEntry] {
        &self.entries
    }

    /// Entries grouped by category, skipping empty categories.
    pub fn by_category(&self) -> Vec<(CommandCategory, Vec<&CatalogEntry>)> {
        CommandCategory::ALL
            .into_iter()
            .filter_map(|category| {
                let entries = self
                    .entries
                    .iter()
                    .filter(|entry| entry.category == category)
                    .collect::<Vec<_>>();
                (!entries.is_empty()).then_some((category, entries))
            })
            .collect()
    }
}

/// Display context in which a catalog entry can be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExpansionContext {
    /// The sidebar list next to the transcript.
    Inline,
    /// The full-screen catalog dialog.
    Modal,
}

/// Expanded/collapsed flags for catalog entries, tracked per display context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogExpansion {
    inline: BTreeSet<String>,
    modal: BTreeSet<String>,
}

impl CatalogExpansion {
    fn set_mut(&mut self, context: ExpansionContext) -> &mut BTreeSet<String> {
        match context {
            ExpansionContext::Inline => &mut self.inline,
            ExpansionContext::Modal => &mut self.modal,
        }
    }

    /// Flips the flag for `id` in `context` and returns the new value.
    pub fn toggle(&mut self, context: ExpansionContext, id: &str) -> bool {
        let set = self.set_mut(context);
        if set.remove(id) {
            false
        } else {
            set.insert(id.to_string());
            true
        }
    }

    /// Returns whether `id` is expanded in `context`.
    pub fn is_expanded(&self, context: ExpansionContext, id: &str) -> bool {
        match context {
            ExpansionContext::Inline => self.inline.contains(id),
            ExpansionContext::Modal => self.modal.contains(id),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::entry;

    #[test]
    fn builtin_catalog_loads_in_file_order() {
        let catalog = CommandCatalog::builtin().expect("builtin catalog");
        let ids = catalog
            .all()
            .iter()
            .map(|entry| entry.id.as_str())
            .collect::<Vec<_>>();
        assert_eq!(ids.first(), Some(&"help"));
        assert!(ids.contains(&"cd"));
        assert!(ids.contains(&"pwd"));
        assert_eq!(ids.last(), Some(&"dig"));
    }

    #[test]
    fn lookup_returns_none_for_unknown_ids() {
        let catalog = CommandCatalog::builtin().expect("builtin catalog");
        assert_eq!(
            catalog.lookup("cd").map(|entry| entry.category),
            Some(CommandCategory::Navigation)
        );
        assert!(catalog.lookup("frobnicate").is_none());
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = CommandCatalog::new(vec![entry("ls"), entry("ls")]).expect_err("duplicate");
        assert_eq!(err, CatalogError::DuplicateId("ls".to_string()));
    }

    #[test]
    fn grouping_follows_category_order() {
        let catalog = CommandCatalog::builtin().expect("builtin catalog");
        let categories = catalog
            .by_category()
            .into_iter()
            .map(|(category, _)| category)
            .collect::<Vec<_>>();
        assert_eq!(categories, CommandCategory::ALL.to_vec());
    }

    #[test]
    fn inline_and_modal_expansion_are_independent() {
        let mut expansion = CatalogExpansion::default();

        assert!(expansion.toggle(ExpansionContext::Inline, "cd"));
        assert!(expansion.is_expanded(ExpansionContext::Inline, "cd"));
        assert!(!expansion.is_expanded(ExpansionContext::Modal, "cd"));

        assert!(expansion.toggle(ExpansionContext::Modal, "cd"));
        assert!(!expansion.toggle(ExpansionContext::Inline, "cd"));
        assert!(expansion.is_expanded(ExpansionContext::Modal, "cd"));
        assert!(!expansion.is_expanded(ExpansionContext::Inline, "cd"));
    }
}
