//! Host-service bundle injected into the console runtime.

use std::rc::Rc;

use crate::{ExecutionService, MemoryPrefsStore, NoopExecutionService, PrefsStore};

/// Host strategy selected for the current build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStrategy {
    /// Execution requests go to a configured HTTP endpoint.
    Browser,
    /// No execution endpoint is configured; every request fails as a transport error.
    Offline,
}

impl HostStrategy {
    /// Returns a stable string token for diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Browser => "browser",
            Self::Offline => "offline",
        }
    }
}

/// Runtime-selected host service bundle.
///
/// All environment-specific service selection happens before this bundle crosses into
/// `console_core`, which keeps the session core decoupled from browser adapter details.
#[derive(Clone)]
pub struct HostServices {
    /// Remote command execution.
    pub execution: Rc<dyn ExecutionService>,
    /// Lightweight typed preference store.
    pub prefs: Rc<dyn PrefsStore>,
    /// Stable strategy identifier for diagnostics.
    pub host_strategy: HostStrategy,
}

impl HostServices {
    /// Bundle with no execution backend and in-memory preferences.
    pub fn offline() -> Self {
        Self {
            execution: Rc::new(NoopExecutionService),
            prefs: Rc::new(MemoryPrefsStore::default()),
            host_strategy: HostStrategy::Offline,
        }
    }
}

#[cfg(test)]
mod tests {
    use console_contract::ExecuteRequest;
    use futures::executor::block_on;

    use super::*;
    use crate::ExecutionError;

    #[test]
    fn offline_bundle_reports_unavailable_execution() {
        let host = HostServices::offline();
        assert_eq!(host.host_strategy.as_str(), "offline");

        let err = block_on(host.execution.execute(ExecuteRequest::new("ls"))).expect_err("offline");
        assert!(matches!(err, ExecutionError::Transport(_)));
    }
}
