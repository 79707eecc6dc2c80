//! Background refresh of the session working directory.

use std::rc::Rc;

use console_contract::{ExecuteRequest, ExecutionOutput};
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::logging;
use platform_host::ExecutionService;

use crate::{reducer::SessionAction, store::SessionStore};

#[derive(Clone)]
/// Sole writer of [`crate::SessionState::current_directory`].
///
/// A refresh issues the `pwd` introspection command through the regular execution channel and
/// stores the trimmed result. It never touches transcripts or the displayed tokens.
pub struct DirectoryTracker {
    store: SessionStore,
    service: Rc<dyn ExecutionService>,
}

impl DirectoryTracker {
    pub fn new(store: SessionStore, service: Rc<dyn ExecutionService>) -> Self {
        Self { store, service }
    }

    /// Returns a future that refreshes the working directory once.
    ///
    /// Resolves with the stored directory, or `None` when the refresh failed and the previous value
    /// was kept.
    pub fn refresh(&self) -> LocalBoxFuture<'static, Option<String>> {
        let store = self.store;
        let service = Rc::clone(&self.service);
        async move {
            let response = match service.execute(ExecuteRequest::pwd()).await {
                Ok(response) => response,
                Err(err) => {
                    logging::warn!("working directory refresh failed: {err}");
                    return None;
                }
            };

            let directory = match response.into_reply().output {
                ExecutionOutput::Text(text) => text.trim().to_string(),
                ExecutionOutput::ClearScreen => String::new(),
            };
            if directory.is_empty() {
                logging::warn!("working directory refresh returned no directory");
                return None;
            }

            store.dispatch(SessionAction::SetCurrentDirectory {
                directory: directory.clone(),
            });
            Some(directory)
        }
        .boxed_local()
    }
}

#[cfg(test)]
mod tests {
    use console_contract::{ExecuteResponse, WireToken};
    use futures::executor::block_on;
    use platform_host::{ExecutionError, MemoryExecutionService};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::model::SessionState;

    fn tracker_with(service: &MemoryExecutionService) -> (SessionStore, DirectoryTracker) {
        let store = SessionStore::new(SessionState::default());
        let tracker = DirectoryTracker::new(store, Rc::new(service.clone()));
        (store, tracker)
    }

    #[test]
    fn refresh_stores_trimmed_directory_without_touching_transcript_or_tokens() {
        let _ = leptos::create_runtime();
        let service = MemoryExecutionService::default();
        service.reply(
            "pwd",
            Ok(ExecuteResponse {
                execution_result: json!("/home/demo\n"),
                lexical_analysis: vec![WireToken {
                    numero: 1,
                    valor: json!("pwd"),
                    tipo: "COMMAND".to_string(),
                }],
            }),
        );
        let (store, tracker) = tracker_with(&service);

        let refreshed = block_on(tracker.refresh());

        let state = store.snapshot();
        assert_eq!(refreshed.as_deref(), Some("/home/demo"));
        assert_eq!(state.current_directory, "/home/demo");
        assert!(state.windows[0].transcript.is_empty());
        assert!(state.display_tokens.is_empty());
    }

    #[test]
    fn failed_refresh_keeps_previous_directory() {
        let _ = leptos::create_runtime();
        let service = MemoryExecutionService::default();
        service.reply("pwd", Ok(ExecuteResponse::text("/srv")));
        let (store, tracker) = tracker_with(&service);
        block_on(tracker.refresh());

        service.reply(
            "pwd",
            Err(ExecutionError::Transport("offline".to_string())),
        );
        let refreshed = block_on(tracker.refresh());

        assert_eq!(refreshed, None);
        assert_eq!(store.current_directory(), "/srv");
        assert!(store.snapshot().windows[0].transcript.is_empty());
    }

    #[test]
    fn blank_directory_is_ignored() {
        let _ = leptos::create_runtime();
        let service = MemoryExecutionService::default();
        service.reply("pwd", Ok(ExecuteResponse::text("  ")));
        let (store, tracker) = tracker_with(&service);

        assert_eq!(block_on(tracker.refresh()), None);
        assert_eq!(store.current_directory(), "");
    }
}
