//! HTTP adapter for the remote execution service.

use console_contract::{ExecuteFailure, ExecuteRequest, ExecuteResponse};
use platform_host::{ExecutionError, ExecutionFuture, ExecutionService};

#[derive(Debug, Clone)]
/// Execution service reached with one JSON `POST` per command.
pub struct HttpExecutionService {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpExecutionService {
    /// Creates a service posting to `endpoint`. Relative paths are resolved against the page origin.
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Configured endpoint, as given.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn post(&self, request: ExecuteRequest) -> Result<ExecuteResponse, ExecutionError> {
        let response = self
            .client
            .post(resolve_endpoint(&self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|err| ExecutionError::Transport(err.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| ExecutionError::Transport(format!("response read failed: {err}")))?;

        if !status.is_success() {
            return Err(service_error(status.as_u16(), status.canonical_reason(), &body));
        }
        parse_success(&body)
    }
}

impl ExecutionService for HttpExecutionService {
    fn execute<'a>(
        &'a self,
        request: ExecuteRequest,
    ) -> ExecutionFuture<'a, Result<ExecuteResponse, ExecutionError>> {
        Box::pin(self.post(request))
    }
}

fn parse_success(body: &str) -> Result<ExecuteResponse, ExecutionError> {
    serde_json::from_str(body).map_err(|err| ExecutionError::Malformed(err.to_string()))
}

/// Message preference: the `error` field, then the raw body, then the status reason.
fn service_error(status: u16, reason: Option<&str>, body: &str) -> ExecutionError {
    let message = match serde_json::from_str::<ExecuteFailure>(body) {
        Ok(failure) => failure.error,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => reason
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {status}")),
    };
    ExecutionError::Service { status, message }
}

fn resolve_endpoint(endpoint: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if endpoint.starts_with('/') {
            if let Some(origin) = web_sys::window().and_then(|w| w.location().origin().ok()) {
                return format!("{origin}{endpoint}");
            }
        }
        endpoint.to_string()
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        endpoint.to_string()
    }
}
