//! Persisted display preference.

use leptos::logging;
use platform_host::{load_pref_with, save_pref_with, PrefsStore};
use serde::{Deserialize, Serialize};

/// Preference key for the display theme.
pub const THEME_PREF_KEY: &str = "console.theme.v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
/// Stored theme flag. Never influences session or transcript state.
pub struct ThemePreference {
    pub dark: bool,
}

/// Reads the theme once at start-up. Missing or unreadable values mean light mode.
pub async fn load_dark_mode(prefs: &dyn PrefsStore) -> bool {
    match load_pref_with::<_, ThemePreference>(prefs, THEME_PREF_KEY).await {
        Ok(pref) => pref.unwrap_or_default().dark,
        Err(err) => {
            logging::warn!("theme preference load failed: {err}");
            false
        }
    }
}

/// Persists the theme after a toggle; failures are logged.
pub async fn save_dark_mode(prefs: &dyn PrefsStore, dark: bool) {
    if let Err(err) = save_pref_with(prefs, THEME_PREF_KEY, &ThemePreference { dark }).await {
        logging::warn!("theme preference save failed: {err}");
    }
}
