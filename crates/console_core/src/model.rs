use std::fmt;

use console_contract::{LexicalToken, CD_COMMAND_PREFIX};
use serde::{Deserialize, Serialize};

/// Window opened when no configured window name survives validation.
pub const DEFAULT_WINDOW_ID: &str = "main";

/// Session-unique window (tab) identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct WindowId(String);

impl WindowId {
    /// Creates a window identifier from trusted caller input.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Title-cased label used by the tab strip.
    pub fn title(&self) -> String {
        let mut chars = self.0.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One line pair half in a window transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum TranscriptEntry {
    /// Optimistic echo of a submitted command.
    Submission {
        /// Trimmed command text.
        command: String,
        /// Working directory known when the command was submitted.
        directory: String,
        /// Unix milliseconds.
        timestamp_ms: u64,
    },
    /// Output or error text for a resolved submission.
    Result {
        /// Printable output.
        output: String,
        /// Working directory known when the result arrived.
        directory: String,
        /// Unix milliseconds.
        timestamp_ms: u64,
    },
}

impl TranscriptEntry {
    /// Returns the submitted command for [`TranscriptEntry::Submission`] entries.
    pub fn command(&self) -> Option<&str> {
        match self {
            Self::Submission { command, .. } => Some(command),
            Self::Result { .. } => None,
        }
    }

    /// Returns the output text for [`TranscriptEntry::Result`] entries.
    pub fn output(&self) -> Option<&str> {
        match self {
            Self::Submission { .. } => None,
            Self::Result { output, .. } => Some(output),
        }
    }

    /// Entry timestamp in unix milliseconds.
    pub fn timestamp_ms(&self) -> u64 {
        match self {
            Self::Submission { timestamp_ms, .. } | Self::Result { timestamp_ms, .. } => {
                *timestamp_ms
            }
        }
    }
}

/// An independent command transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionWindow {
    pub id: WindowId,
    pub transcript: Vec<TranscriptEntry>,
}

impl SessionWindow {
    pub fn new(id: WindowId) -> Self {
        Self {
            id,
            transcript: Vec::new(),
        }
    }

    /// Commands submitted in this window, oldest first.
    pub fn submitted_commands(&self) -> impl Iterator<Item = &str> {
        self.transcript.iter().filter_map(TranscriptEntry::command)
    }
}

/// Shared input line state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Composer {
    pub buffer: String,
    pub suggestions_open: bool,
    /// Position in the active window's submitted commands while recalling history.
    pub history_cursor: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub windows: Vec<SessionWindow>,
    pub active_window_id: WindowId,
    pub next_window_seq: u64,
    pub current_directory: String,
    /// Tokenization of the most recently resolved command only.
    pub display_tokens: Vec<LexicalToken>,
    pub composer: Composer,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::with_windows([DEFAULT_WINDOW_ID.to_string()])
    }
}

impl SessionState {
    /// Creates a session with one empty window per distinct, non-blank name.
    ///
    /// Falls back to a single [`DEFAULT_WINDOW_ID`] window so at least one window always exists.
    pub fn with_windows(names: impl IntoIterator<Item = String>) -> Self {
        let mut windows = Vec::<SessionWindow>::new();
        for name in names {
            let name = name.trim();
            if name.is_empty() || windows.iter().any(|w| w.id.as_str() == name) {
                continue;
            }
            windows.push(SessionWindow::new(WindowId::new(name)));
        }
        if windows.is_empty() {
            windows.push(SessionWindow::new(WindowId::new(DEFAULT_WINDOW_ID)));
        }

        let active_window_id = windows[0].id.clone();
        Self {
            next_window_seq: windows.len() as u64 + 1,
            windows,
            active_window_id,
            current_directory: String::new(),
            display_tokens: Vec::new(),
            composer: Composer::default(),
        }
    }

    pub fn window(&self, window_id: &WindowId) -> Option<&SessionWindow> {
        self.windows.iter().find(|w| &w.id == window_id)
    }

    pub fn active_window(&self) -> Option<&SessionWindow> {
        self.window(&self.active_window_id)
    }

    /// Distinct `cd` targets submitted anywhere in the session, oldest first.
    pub fn visited_directories(&self) -> Vec<String> {
        let mut visited = Vec::<String>::new();
        let targets = self
            .windows
            .iter()
            .flat_map(SessionWindow::submitted_commands)
            .filter_map(|command| command.strip_prefix(CD_COMMAND_PREFIX))
            .map(str::trim)
            .filter(|target| !target.is_empty());
        for target in targets {
            if !visited.iter().any(|known| known == target) {
                visited.push(target.to_string());
            }
        }
        visited
    }
}
