//! Console runtime composition: one store plus the components that read and write it.
//!
//! The runtime is created once per page session and handed to the presentation layer, which calls
//! [`ConsoleRuntime::boot`] once, spawns the futures returned by [`ConsoleRuntime::submit_active`],
//! and drains [`SessionStore::take_effects`].

use std::rc::Rc;

use console_contract::Suggestion;
use futures::future::LocalBoxFuture;
use platform_host::HostServices;

use crate::{
    catalog::CommandCatalog,
    config::ConsoleConfig,
    directory::DirectoryTracker,
    dispatcher::{CommandDispatcher, PendingDispatch},
    model::SessionState,
    store::SessionStore,
    suggest::suggest,
};

#[derive(Clone)]
/// Session-scoped console services sharing one [`SessionStore`].
pub struct ConsoleRuntime {
    pub store: SessionStore,
    pub catalog: Rc<CommandCatalog>,
    pub dispatcher: CommandDispatcher,
    pub tracker: DirectoryTracker,
    pub services: HostServices,
}

impl ConsoleRuntime {
    /// Must be called inside a reactive owner; the store signals belong to it.
    pub fn new(config: &ConsoleConfig, catalog: CommandCatalog, services: HostServices) -> Self {
        let store = SessionStore::new(SessionState::with_windows(
            config.initial_windows.iter().cloned(),
        ));
        let tracker = DirectoryTracker::new(store, Rc::clone(&services.execution));
        let dispatcher =
            CommandDispatcher::new(store, Rc::clone(&services.execution), tracker.clone());
        Self {
            store,
            catalog: Rc::new(catalog),
            dispatcher,
            tracker,
            services,
        }
    }

    /// Start-up directory refresh.
    pub fn boot(&self) -> LocalBoxFuture<'static, Option<String>> {
        self.tracker.refresh()
    }

    /// Suggestions for the current input buffer.
    pub fn suggestions(&self) -> Vec<Suggestion> {
        let (buffer, directories) = self.store.with(|state| {
            (
                state.composer.buffer.clone(),
                state.visited_directories(),
            )
        });
        suggest(&self.catalog, &directories, &buffer)
    }

    /// Submits the current input buffer to the active window.
    pub fn submit_active(&self) -> Option<PendingDispatch> {
        let (window_id, buffer) = self.store.with(|state| {
            (
                state.active_window_id.clone(),
                state.composer.buffer.clone(),
            )
        });
        self.dispatcher.submit(&window_id, &buffer)
    }
}
