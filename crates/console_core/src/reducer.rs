//! Reducer actions, presentation effects, and transition logic for the console session.

use console_contract::LexicalToken;
use thiserror::Error;

use crate::model::{SessionState, SessionWindow, TranscriptEntry, WindowId};

#[derive(Debug, Clone, PartialEq)]
/// Actions accepted by [`reduce_session`] to mutate [`SessionState`].
pub enum SessionAction {
    /// Open a new empty window with a generated id and make it active.
    OpenWindow,
    /// Close a window unless it is the last one.
    CloseWindow {
        /// Window to close.
        window_id: WindowId,
    },
    /// Make a window active.
    ActivateWindow {
        /// Window to activate.
        window_id: WindowId,
    },
    /// Replace the input buffer after a keystroke.
    EditInput {
        /// Full input text.
        text: String,
    },
    /// Put a suggestion label into the input buffer without submitting it.
    SelectSuggestion {
        /// Suggestion label.
        label: String,
    },
    /// Close the suggestion panel, keeping the buffer.
    DismissSuggestions,
    /// Step through the active window's submitted commands.
    RecallHistory {
        /// Direction to move in.
        direction: RecallDirection,
    },
    /// Clear the input buffer and close the suggestion panel.
    ResetComposer,
    /// Append the optimistic echo of a submitted command.
    AppendSubmission {
        /// Target window.
        window_id: WindowId,
        /// Trimmed command text.
        command: String,
        /// Unix milliseconds.
        timestamp_ms: u64,
    },
    /// Append the output for a resolved submission.
    AppendResult {
        /// Target window.
        window_id: WindowId,
        /// Printable output or error text.
        output: String,
        /// Unix milliseconds.
        timestamp_ms: u64,
    },
    /// Empty a window transcript.
    ClearTranscript {
        /// Target window.
        window_id: WindowId,
    },
    /// Replace the displayed lexical breakdown wholesale.
    ReplaceTokens {
        /// Tokens of the latest resolved command.
        tokens: Vec<LexicalToken>,
    },
    /// Store a refreshed working directory.
    SetCurrentDirectory {
        /// Trimmed directory text.
        directory: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// History recall direction.
pub enum RecallDirection {
    /// Towards older commands.
    Older,
    /// Towards newer commands, ending on an empty buffer.
    Newer,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Side-effect intents emitted by [`reduce_session`] for the presentation layer.
pub enum SessionEffect {
    /// Move keyboard focus to the input line.
    FocusComposer,
    /// Scroll a window transcript to its newest entry.
    RevealTranscriptEnd(WindowId),
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
/// Reducer errors for actions that reference a window that does not exist.
pub enum SessionError {
    /// The target window id was not found in the current state.
    #[error("window `{0}` not found")]
    WindowNotFound(WindowId),
}

/// Applies a [`SessionAction`] to the session state and collects resulting effects.
///
/// Closing the last window is accepted and ignored so that at least one window always exists.
///
/// # Errors
///
/// Returns [`SessionError::WindowNotFound`] when an action references a missing window. The state
/// is left unchanged in that case.
pub fn reduce_session(
    state: &mut SessionState,
    action: SessionAction,
) -> Result<Vec<SessionEffect>, SessionError> {
    let mut effects = Vec::new();
    match action {
        SessionAction::OpenWindow => {
            let window_id = next_window_id(state);
            state.windows.push(SessionWindow::new(window_id.clone()));
            state.active_window_id = window_id;
            state.composer.history_cursor = None;
            effects.push(SessionEffect::FocusComposer);
        }
        SessionAction::CloseWindow { window_id } => {
            let index = window_index(state, &window_id)?;
            if state.windows.len() > 1 {
                state.windows.remove(index);
                if state.active_window_id == window_id {
                    state.active_window_id = state.windows[0].id.clone();
                    state.composer.history_cursor = None;
                }
            }
        }
        SessionAction::ActivateWindow { window_id } => {
            window_index(state, &window_id)?;
            if state.active_window_id != window_id {
                state.active_window_id = window_id.clone();
                state.composer.history_cursor = None;
            }
            effects.push(SessionEffect::FocusComposer);
            effects.push(SessionEffect::RevealTranscriptEnd(window_id));
        }
        SessionAction::EditInput { text } => {
            state.composer.suggestions_open = !text.is_empty();
            state.composer.buffer = text;
            state.composer.history_cursor = None;
        }
        SessionAction::SelectSuggestion { label } => {
            state.composer.buffer = label;
            state.composer.suggestions_open = false;
            effects.push(SessionEffect::FocusComposer);
        }
        SessionAction::DismissSuggestions => {
            state.composer.suggestions_open = false;
        }
        SessionAction::RecallHistory { direction } => recall_history(state, direction),
        SessionAction::ResetComposer => {
            state.composer.buffer.clear();
            state.composer.suggestions_open = false;
            state.composer.history_cursor = None;
        }
        SessionAction::AppendSubmission {
            window_id,
            command,
            timestamp_ms,
        } => {
            let directory = state.current_directory.clone();
            let index = window_index(state, &window_id)?;
            state.windows[index]
                .transcript
                .push(TranscriptEntry::Submission {
                    command,
                    directory,
                    timestamp_ms,
                });
            effects.push(SessionEffect::RevealTranscriptEnd(window_id));
        }
        SessionAction::AppendResult {
            window_id,
            output,
            timestamp_ms,
        } => {
            let directory = state.current_directory.clone();
            let index = window_index(state, &window_id)?;
            state.windows[index].transcript.push(TranscriptEntry::Result {
                output,
                directory,
                timestamp_ms,
            });
            effects.push(SessionEffect::RevealTranscriptEnd(window_id));
        }
        SessionAction::ClearTranscript { window_id } => {
            let index = window_index(state, &window_id)?;
            state.windows[index].transcript.clear();
        }
        SessionAction::ReplaceTokens { tokens } => {
            state.display_tokens = tokens;
        }
        SessionAction::SetCurrentDirectory { directory } => {
            state.current_directory = directory;
        }
    }

    Ok(effects)
}

fn window_index(state: &SessionState, window_id: &WindowId) -> Result<usize, SessionError> {
    state
        .windows
        .iter()
        .position(|w| &w.id == window_id)
        .ok_or_else(|| SessionError::WindowNotFound(window_id.clone()))
}

fn next_window_id(state: &mut SessionState) -> WindowId {
    loop {
        let candidate = WindowId::new(format!("tab{}", state.next_window_seq));
        state.next_window_seq = state.next_window_seq.saturating_add(1);
        if state.window(&candidate).is_none() {
            return candidate;
        }
    }
}

fn recall_history(state: &mut SessionState, direction: RecallDirection) {
    let history = state
        .active_window()
        .map(|window| {
            window
                .submitted_commands()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();
    if history.is_empty() {
        return;
    }

    let next_index = match (state.composer.history_cursor, direction) {
        (None, RecallDirection::Older) => Some(history.len() - 1),
        (Some(index), RecallDirection::Older) => Some(index.saturating_sub(1)),
        (Some(index), RecallDirection::Newer) if index + 1 < history.len() => Some(index + 1),
        (Some(_), RecallDirection::Newer) => None,
        (None, RecallDirection::Newer) => return,
    };

    state.composer.history_cursor = next_index;
    state.composer.suggestions_open = false;
    state.composer.buffer = next_index
        .and_then(|index| history.get(index).cloned())
        .unwrap_or_default();
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn submit(state: &mut SessionState, window: &str, command: &str) {
        reduce_session(
            state,
            SessionAction::AppendSubmission {
                window_id: WindowId::new(window),
                command: command.to_string(),
                timestamp_ms: 1,
            },
        )
        .expect("append submission");
    }

    fn ids(state: &SessionState) -> Vec<&str> {
        state.windows.iter().map(|w| w.id.as_str()).collect()
    }

    #[test]
    fn open_window_generates_unique_id_and_activates_it() {
        let mut state = SessionState::with_windows(["tab2".to_string()]);

        reduce_session(&mut state, SessionAction::OpenWindow).expect("open");

        assert_eq!(ids(&state), vec!["tab2", "tab3"]);
        assert_eq!(state.active_window_id, WindowId::new("tab3"));
        assert!(state.windows[1].transcript.is_empty());
    }

    #[test]
    fn reopening_after_close_never_reuses_a_live_id() {
        let mut state = SessionState::with_windows(["main".to_string()]);
        reduce_session(&mut state, SessionAction::OpenWindow).expect("open tab2");
        reduce_session(&mut state, SessionAction::OpenWindow).expect("open tab3");
        reduce_session(
            &mut state,
            SessionAction::CloseWindow {
                window_id: WindowId::new("tab2"),
            },
        )
        .expect("close tab2");
        reduce_session(&mut state, SessionAction::OpenWindow).expect("open again");

        assert_eq!(ids(&state), vec!["main", "tab3", "tab4"]);
    }

    #[test]
    fn closing_last_window_is_noop() {
        let mut state = SessionState::default();
        let before = state.clone();

        let effects = reduce_session(
            &mut state,
            SessionAction::CloseWindow {
                window_id: before.active_window_id.clone(),
            },
        )
        .expect("close last window");

        assert!(effects.is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn closing_active_window_activates_first_remaining() {
        let mut state =
            SessionState::with_windows(["tests", "data", "game"].map(str::to_string));
        reduce_session(
            &mut state,
            SessionAction::ActivateWindow {
                window_id: WindowId::new("game"),
            },
        )
        .expect("activate game");

        reduce_session(
            &mut state,
            SessionAction::CloseWindow {
                window_id: WindowId::new("game"),
            },
        )
        .expect("close game");

        assert_eq!(ids(&state), vec!["tests", "data"]);
        assert_eq!(state.active_window_id, WindowId::new("tests"));
    }

    #[test]
    fn closing_inactive_window_keeps_activation() {
        let mut state = SessionState::with_windows(["tests", "data"].map(str::to_string));
        reduce_session(
            &mut state,
            SessionAction::ActivateWindow {
                window_id: WindowId::new("data"),
            },
        )
        .expect("activate data");
        reduce_session(
            &mut state,
            SessionAction::CloseWindow {
                window_id: WindowId::new("tests"),
            },
        )
        .expect("close tests");

        assert_eq!(state.active_window_id, WindowId::new("data"));
    }

    #[test]
    fn activating_unknown_window_errors_without_change() {
        let mut state = SessionState::default();
        let before = state.clone();

        let err = reduce_session(
            &mut state,
            SessionAction::ActivateWindow {
                window_id: WindowId::new("missing"),
            },
        )
        .expect_err("unknown window");

        assert_eq!(err, SessionError::WindowNotFound(WindowId::new("missing")));
        assert_eq!(state, before);
    }

    #[test]
    fn entries_capture_directory_known_at_append_time() {
        let mut state = SessionState::default();
        state.current_directory = "/home".to_string();
        submit(&mut state, "main", "cd /tmp");
        reduce_session(
            &mut state,
            SessionAction::SetCurrentDirectory {
                directory: "/tmp".to_string(),
            },
        )
        .expect("set directory");
        reduce_session(
            &mut state,
            SessionAction::AppendResult {
                window_id: WindowId::new("main"),
                output: String::new(),
                timestamp_ms: 2,
            },
        )
        .expect("append result");

        assert_eq!(
            state.windows[0].transcript,
            vec![
                TranscriptEntry::Submission {
                    command: "cd /tmp".to_string(),
                    directory: "/home".to_string(),
                    timestamp_ms: 1,
                },
                TranscriptEntry::Result {
                    output: String::new(),
                    directory: "/tmp".to_string(),
                    timestamp_ms: 2,
                },
            ]
        );
    }

    #[test]
    fn editing_input_opens_panel_only_for_non_empty_text() {
        let mut state = SessionState::default();
        reduce_session(
            &mut state,
            SessionAction::EditInput {
                text: "mk".to_string(),
            },
        )
        .expect("edit");
        assert!(state.composer.suggestions_open);

        reduce_session(
            &mut state,
            SessionAction::EditInput {
                text: String::new(),
            },
        )
        .expect("erase");
        assert!(!state.composer.suggestions_open);
    }

    #[test]
    fn selecting_suggestion_fills_buffer_and_closes_panel() {
        let mut state = SessionState::default();
        reduce_session(
            &mut state,
            SessionAction::EditInput {
                text: "mk".to_string(),
            },
        )
        .expect("edit");
        reduce_session(
            &mut state,
            SessionAction::SelectSuggestion {
                label: "mkdir".to_string(),
            },
        )
        .expect("select");

        assert_eq!(state.composer.buffer, "mkdir");
        assert!(!state.composer.suggestions_open);
        assert!(state.windows[0].transcript.is_empty());
    }

    #[test]
    fn history_recall_walks_active_window_commands() {
        let mut state = SessionState::default();
        submit(&mut state, "main", "ls");
        submit(&mut state, "main", "pwd");
        let recall = |state: &mut SessionState, direction| {
            reduce_session(state, SessionAction::RecallHistory { direction }).expect("recall");
            state.composer.buffer.clone()
        };

        assert_eq!(recall(&mut state, RecallDirection::Older), "pwd");
        assert_eq!(recall(&mut state, RecallDirection::Older), "ls");
        assert_eq!(recall(&mut state, RecallDirection::Older), "ls");
        assert_eq!(recall(&mut state, RecallDirection::Newer), "pwd");
        assert_eq!(recall(&mut state, RecallDirection::Newer), "");
        assert_eq!(state.composer.history_cursor, None);
    }
}
