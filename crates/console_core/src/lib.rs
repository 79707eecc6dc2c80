//! Session core for the multi-window console: command catalog, prefix suggestions, the window
//! and transcript store, command dispatch to the execution service, and working-directory
//! tracking.

pub mod catalog;
pub mod config;
pub mod directory;
pub mod dispatcher;
pub mod model;
pub mod preferences;
pub mod reducer;
pub mod runtime;
pub mod store;
pub mod suggest;

#[cfg(test)]
mod test_support;

pub use catalog::{CatalogError, CatalogExpansion, CommandCatalog, ExpansionContext};
pub use config::ConsoleConfig;
pub use directory::DirectoryTracker;
pub use dispatcher::{error_text, CommandDispatcher, DispatchOutcome, PendingDispatch};
pub use model::*;
pub use preferences::{load_dark_mode, save_dark_mode, ThemePreference, THEME_PREF_KEY};
pub use reducer::{reduce_session, RecallDirection, SessionAction, SessionEffect, SessionError};
pub use runtime::ConsoleRuntime;
pub use store::SessionStore;
pub use suggest::suggest;
