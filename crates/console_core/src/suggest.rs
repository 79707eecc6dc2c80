//! Prefix suggestions over the command catalog and visited directories.

use console_contract::{Suggestion, SuggestionKind, CD_COMMAND_PREFIX};

use crate::catalog::CommandCatalog;

/// Returns every candidate whose label starts with `partial_input`, ignoring case.
///
/// Catalog commands come first in catalog order, followed by `cd <dir>` hints for `directories` in
/// the given order. Empty input yields no suggestions.
pub fn suggest(
    catalog: &CommandCatalog,
    directories: &[String],
    partial_input: &str,
) -> Vec<Suggestion> {
    if partial_input.is_empty() {
        return Vec::new();
    }
    let needle = partial_input.to_lowercase();
    let matches = |label: &str| label.to_lowercase().starts_with(&needle);

    let commands = catalog
        .all()
        .iter()
        .filter(|entry| matches(&entry.id))
        .map(|entry| Suggestion {
            id: entry.id.clone(),
            label: entry.id.clone(),
            kind: SuggestionKind::Command,
        });
    let hints = directories
        .iter()
        .map(|dir| (dir, format!("{CD_COMMAND_PREFIX}{dir}")))
        .filter(|(_, label)| matches(label))
        .map(|(dir, label)| Suggestion {
            id: dir.clone(),
            label,
            kind: SuggestionKind::Directory,
        });

    commands.chain(hints).collect()
}
