//! Reactive container for [`SessionState`] and the reducer effect queue.

use leptos::*;

use crate::{
    model::{SessionState, WindowId},
    reducer::{reduce_session, SessionAction, SessionEffect},
};

#[derive(Clone, Copy)]
/// Signal-backed session store shared by the dispatcher, the directory tracker, and the views.
pub struct SessionStore {
    /// Reactive session state.
    pub state: RwSignal<SessionState>,
    /// Effects emitted by the reducer and not yet drained by the presentation layer.
    pub effects: RwSignal<Vec<SessionEffect>>,
}

impl SessionStore {
    /// Creates a store owned by the current reactive scope.
    pub fn new(initial: SessionState) -> Self {
        Self {
            state: create_rw_signal(initial),
            effects: create_rw_signal(Vec::new()),
        }
    }

    /// Reduces `action` against the current state.
    ///
    /// Reducer errors are logged and leave the state untouched.
    pub fn dispatch(&self, action: SessionAction) {
        let mut session = self.state.get_untracked();
        let previous = session.clone();

        match reduce_session(&mut session, action) {
            Ok(new_effects) => {
                if session != previous {
                    self.state.set(session);
                }
                if !new_effects.is_empty() {
                    self.effects.update(|queue| queue.extend(new_effects));
                }
            }
            Err(err) => logging::warn!("session reducer error: {err}"),
        }
    }

    /// Untracked copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.state.get_untracked()
    }

    /// Reads the current state without cloning or subscribing.
    pub fn with<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        self.state.with_untracked(f)
    }

    /// Drains queued effects in emission order.
    pub fn take_effects(&self) -> Vec<SessionEffect> {
        let mut drained = Vec::new();
        self.effects.update(|queue| drained = std::mem::take(queue));
        drained
    }

    /// Opens a window and returns its generated id.
    pub fn open(&self) -> WindowId {
        self.dispatch(SessionAction::OpenWindow);
        self.with(|state| state.active_window_id.clone())
    }

    pub fn close(&self, window_id: WindowId) {
        self.dispatch(SessionAction::CloseWindow { window_id });
    }

    pub fn activate(&self, window_id: WindowId) {
        self.dispatch(SessionAction::ActivateWindow { window_id });
    }

    pub fn current_directory(&self) -> String {
        self.with(|state| state.current_directory.clone())
    }
}
