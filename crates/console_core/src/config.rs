//! Build-time console configuration.

use crate::model::DEFAULT_WINDOW_ID;

/// Endpoint used when none is configured at build time.
pub const DEFAULT_EXECUTE_ENDPOINT: &str = "/execute";

#[derive(Debug, Clone, PartialEq, Eq)]
/// Console wiring options resolved before the runtime starts.
pub struct ConsoleConfig {
    /// Execution service URL. A relative path is resolved against the page origin. Empty disables
    /// the remote service.
    pub execute_endpoint: String,
    /// Windows opened at start-up, in tab order.
    pub initial_windows: Vec<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            execute_endpoint: DEFAULT_EXECUTE_ENDPOINT.to_string(),
            initial_windows: vec![DEFAULT_WINDOW_ID.to_string()],
        }
    }
}

impl ConsoleConfig {
    /// Reads `CONSOLE_EXECUTE_ENDPOINT` and `CONSOLE_INITIAL_WINDOWS` from the compile-time
    /// environment, since the browser target has no process environment.
    pub fn from_build_env() -> Self {
        Self::from_values(
            option_env!("CONSOLE_EXECUTE_ENDPOINT"),
            option_env!("CONSOLE_INITIAL_WINDOWS"),
        )
    }

    /// Builds a config from optional raw values. `windows` is comma-separated; blank and duplicate
    /// names are dropped and an empty list falls back to the default window.
    pub fn from_values(endpoint: Option<&str>, windows: Option<&str>) -> Self {
        let defaults = Self::default();
        let execute_endpoint = endpoint
            .map(|raw| raw.trim().to_string())
            .unwrap_or(defaults.execute_endpoint);

        let mut initial_windows = Vec::<String>::new();
        for name in windows.unwrap_or_default().split(',').map(str::trim) {
            if !name.is_empty() && !initial_windows.iter().any(|known| known == name) {
                initial_windows.push(name.to_string());
            }
        }
        if initial_windows.is_empty() {
            initial_windows = defaults.initial_windows;
        }

        Self {
            execute_endpoint,
            initial_windows,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        assert_eq!(ConsoleConfig::from_values(None, None), ConsoleConfig::default());
    }

    #[test]
    fn window_list_is_trimmed_and_deduplicated() {
        let config = ConsoleConfig::from_values(
            Some(" http://localhost:5000/execute "),
            Some("tests, data,,tests ,game"),
        );
        assert_eq!(config.execute_endpoint, "http://localhost:5000/execute");
        assert_eq!(config.initial_windows, vec!["tests", "data", "game"]);
    }

    #[test]
    fn blank_window_list_falls_back_to_default() {
        let config = ConsoleConfig::from_values(Some(""), Some(" , "));
        assert_eq!(config.execute_endpoint, "");
        assert_eq!(config.initial_windows, vec![DEFAULT_WINDOW_ID]);
    }
}
