use std::rc::Rc;

use platform_host::{ExecutionService, HostServices, HostStrategy, NoopExecutionService};

use crate::{HttpExecutionService, WebPrefsStore};

/// Returns the host strategy implied by the configured execution endpoint.
pub fn host_strategy_for(execute_endpoint: &str) -> HostStrategy {
    if execute_endpoint.trim().is_empty() {
        HostStrategy::Offline
    } else {
        HostStrategy::Browser
    }
}

/// Builds the browser host-service bundle.
///
/// An empty endpoint selects [`NoopExecutionService`], so every command renders a transport error
/// while the rest of the console keeps working.
pub fn build_host_services(execute_endpoint: &str) -> HostServices {
    let host_strategy = host_strategy_for(execute_endpoint);
    let execution: Rc<dyn ExecutionService> = match host_strategy {
        HostStrategy::Browser => Rc::new(HttpExecutionService::new(execute_endpoint.trim())),
        HostStrategy::Offline => Rc::new(NoopExecutionService),
    };
    HostServices {
        execution,
        prefs: Rc::new(WebPrefsStore),
        host_strategy,
    }
}

#[cfg(test)]
mod tests {
    use console_contract::ExecuteRequest;
    use futures::executor::block_on;
    use platform_host::ExecutionError;

    use super::*;

    #[test]
    fn blank_endpoint_selects_offline_bundle() {
        let host = build_host_services("  ");
        assert_eq!(host.host_strategy, HostStrategy::Offline);

        let err = block_on(host.execution.execute(ExecuteRequest::new("ls"))).expect_err("offline");
        assert!(matches!(err, ExecutionError::Transport(_)));
    }

    #[test]
    fn configured_endpoint_selects_browser_bundle() {
        assert_eq!(host_strategy_for("/execute"), HostStrategy::Browser);
        assert_eq!(
            build_host_services("/execute").host_strategy,
            HostStrategy::Browser
        );
    }
}
