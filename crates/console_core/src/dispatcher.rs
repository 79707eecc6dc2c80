//! Command submission: optimistic echo, one service exchange, and reply interpretation.

use std::rc::Rc;

use console_contract::{ExecuteRequest, ExecutionOutput, CD_COMMAND_PREFIX};
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::logging;
use platform_host::{unix_time_ms_now, ExecutionError, ExecutionService};

use crate::{
    directory::DirectoryTracker, model::WindowId, reducer::SessionAction, store::SessionStore,
};

/// Terminal state of one submitted command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A Result entry with the service output was appended.
    Rendered,
    /// The service asked for the transcript to be cleared.
    Cleared,
    /// The exchange failed and an error Result entry was appended.
    Failed(ExecutionError),
    /// The target window was closed before the reply arrived; nothing was appended.
    Dropped,
}

/// In-flight part of a submission. Callers spawn it and do not wait for it.
pub type PendingDispatch = LocalBoxFuture<'static, DispatchOutcome>;

#[derive(Clone)]
/// Sends submitted commands to the execution service and records the outcome in the store.
pub struct CommandDispatcher {
    store: SessionStore,
    service: Rc<dyn ExecutionService>,
    tracker: DirectoryTracker,
}

impl CommandDispatcher {
    pub fn new(
        store: SessionStore,
        service: Rc<dyn ExecutionService>,
        tracker: DirectoryTracker,
    ) -> Self {
        Self {
            store,
            service,
            tracker,
        }
    }

    /// Submits `raw_text` to `window_id`.
    ///
    /// Blank input and unknown windows are ignored and yield `None`; nothing reaches the service.
    /// Otherwise the Submission entry is appended and the composer is reset before this returns.
    /// The text is echoed and sent exactly as typed; trimming only decides whether it is blank. The
    /// returned future performs the exchange and appends exactly one Result entry, or clears the
    /// transcript for the clear-screen sentinel. Concurrent submissions to the same window land in
    /// the order their replies resolve.
    pub fn submit(&self, window_id: &WindowId, raw_text: &str) -> Option<PendingDispatch> {
        if raw_text.trim().is_empty() {
            return None;
        }
        if !window_is_open(self.store, window_id) {
            logging::warn!("ignoring submission to unknown window {window_id}");
            return None;
        }
        let command = raw_text.to_string();

        self.store.dispatch(SessionAction::AppendSubmission {
            window_id: window_id.clone(),
            command: command.clone(),
            timestamp_ms: unix_time_ms_now(),
        });
        self.store.dispatch(SessionAction::ResetComposer);

        let store = self.store;
        let service = Rc::clone(&self.service);
        let tracker = self.tracker.clone();
        let window_id = window_id.clone();
        Some(
            async move {
                let result = service.execute(ExecuteRequest::new(command.clone())).await;
                let outcome = match result {
                    Ok(response) => {
                        let reply = response.into_reply();
                        store.dispatch(SessionAction::ReplaceTokens {
                            tokens: reply.tokens,
                        });
                        let outcome = match reply.output {
                            ExecutionOutput::ClearScreen => clear_transcript(store, &window_id),
                            ExecutionOutput::Text(output) => {
                                append_result(store, &window_id, output)
                                    .unwrap_or(DispatchOutcome::Rendered)
                            }
                        };
                        if command.starts_with(CD_COMMAND_PREFIX) {
                            tracker.refresh().await;
                        }
                        outcome
                    }
                    Err(err) => append_result(store, &window_id, error_text(&err))
                        .unwrap_or(DispatchOutcome::Failed(err)),
                };
                logging::log!("`{command}` in window {window_id}: {outcome:?}");
                outcome
            }
            .boxed_local(),
        )
    }
}

fn window_is_open(store: SessionStore, window_id: &WindowId) -> bool {
    store.with(|state| state.window(window_id).is_some())
}

fn clear_transcript(store: SessionStore, window_id: &WindowId) -> DispatchOutcome {
    if !window_is_open(store, window_id) {
        logging::warn!("dropping clear for closed window {window_id}");
        return DispatchOutcome::Dropped;
    }
    store.dispatch(SessionAction::ClearTranscript {
        window_id: window_id.clone(),
    });
    DispatchOutcome::Cleared
}

/// Appends a Result entry, returning [`DispatchOutcome::Dropped`] when the window is gone.
fn append_result(
    store: SessionStore,
    window_id: &WindowId,
    output: String,
) -> Option<DispatchOutcome> {
    if !window_is_open(store, window_id) {
        logging::warn!("dropping result for closed window {window_id}");
        return Some(DispatchOutcome::Dropped);
    }
    store.dispatch(SessionAction::AppendResult {
        window_id: window_id.clone(),
        output,
        timestamp_ms: unix_time_ms_now(),
    });
    None
}

/// User-visible transcript line for a failed exchange.
pub fn error_text(err: &ExecutionError) -> String {
    match err {
        ExecutionError::Transport(message) => format!("connection failed: {message}"),
        ExecutionError::Service { .. } | ExecutionError::Malformed(_) => format!("error: {err}"),
    }
}
