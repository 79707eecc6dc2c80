//! Remote command-execution host contract.

use std::{cell::RefCell, collections::HashMap, future::Future, pin::Pin, rc::Rc};

use console_contract::{ExecuteRequest, ExecuteResponse};
use thiserror::Error;

/// Object-safe boxed future used by [`ExecutionService`] async methods.
pub type ExecutionFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Failure of one request/response exchange with the execution service.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExecutionError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Service {
        /// HTTP-style status code.
        status: u16,
        /// Message taken from the failure body.
        message: String,
    },
    /// No response was received.
    #[error("{0}")]
    Transport(String),
    /// A success status arrived with a body that is not a valid response.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// Host service that runs one command per exchange.
pub trait ExecutionService {
    /// Sends `request` and resolves with the service's structured response.
    fn execute<'a>(
        &'a self,
        request: ExecuteRequest,
    ) -> ExecutionFuture<'a, Result<ExecuteResponse, ExecutionError>>;
}

#[derive(Debug, Clone, Copy, Default)]
/// Execution backend used when no service endpoint is configured.
pub struct NoopExecutionService;

impl ExecutionService for NoopExecutionService {
    fn execute<'a>(
        &'a self,
        _request: ExecuteRequest,
    ) -> ExecutionFuture<'a, Result<ExecuteResponse, ExecutionError>> {
        Box::pin(async {
            Err(ExecutionError::Transport(
                "execution service unavailable".to_string(),
            ))
        })
    }
}

type CannedReply = Result<ExecuteResponse, ExecutionError>;

#[derive(Default)]
struct MemoryExecutionState {
    replies: HashMap<String, CannedReply>,
    fallback: Option<CannedReply>,
    requests: Vec<ExecuteRequest>,
}

#[derive(Clone, Default)]
/// In-memory execution service answering from canned replies keyed by exact command text.
///
/// Commands without a canned reply resolve with the fallback, or with a service error when no
/// fallback is set. Every received request is recorded.
pub struct MemoryExecutionService {
    inner: Rc<RefCell<MemoryExecutionState>>,
}

impl MemoryExecutionService {
    /// Registers the reply returned for `command`.
    pub fn reply(&self, command: impl Into<String>, reply: CannedReply) -> &Self {
        self.inner.borrow_mut().replies.insert(command.into(), reply);
        self
    }

    /// Sets the reply used for unknown commands.
    pub fn fallback(&self, reply: CannedReply) -> &Self {
        self.inner.borrow_mut().fallback = Some(reply);
        self
    }

    /// Returns every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ExecuteRequest> {
        self.inner.borrow().requests.clone()
    }

    /// Counts received requests whose command equals `command`.
    pub fn request_count(&self, command: &str) -> usize {
        self.inner
            .borrow()
            .requests
            .iter()
            .filter(|request| request.command == command)
            .count()
    }
}

impl ExecutionService for MemoryExecutionService {
    fn execute<'a>(
        &'a self,
        request: ExecuteRequest,
    ) -> ExecutionFuture<'a, Result<ExecuteResponse, ExecutionError>> {
        Box::pin(async move {
            let mut state = self.inner.borrow_mut();
            let reply = state
                .replies
                .get(&request.command)
                .or(state.fallback.as_ref())
                .cloned()
                .unwrap_or_else(|| {
                    Err(ExecutionError::Service {
                        status: 404,
                        message: format!("unknown command: {}", request.command),
                    })
                });
            state.requests.push(request);
            reply
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn memory_service_answers_canned_and_fallback_replies() {
        let service = MemoryExecutionService::default();
        service
            .reply("pwd", Ok(ExecuteResponse::text("/home/demo")))
            .fallback(Ok(ExecuteResponse::text("ok")));
        let service_obj: &dyn ExecutionService = &service;

        let pwd = block_on(service_obj.execute(ExecuteRequest::pwd())).expect("pwd reply");
        assert_eq!(pwd, ExecuteResponse::text("/home/demo"));
        let other = block_on(service_obj.execute(ExecuteRequest::new("ls"))).expect("fallback");
        assert_eq!(other, ExecuteResponse::text("ok"));
        assert_eq!(service.request_count("pwd"), 1);
        assert_eq!(service.requests().len(), 2);
    }

    #[test]
    fn memory_service_without_fallback_reports_unknown_command() {
        let service = MemoryExecutionService::default();
        let err = block_on(service.execute(ExecuteRequest::new("nope"))).expect_err("unknown");
        assert_eq!(err.to_string(), "unknown command: nope");
    }

    #[test]
    fn noop_service_fails_as_transport_error() {
        let err = block_on(NoopExecutionService.execute(ExecuteRequest::pwd())).expect_err("noop");
        assert!(matches!(err, ExecutionError::Transport(_)));
    }
}
