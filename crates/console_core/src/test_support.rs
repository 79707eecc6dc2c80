use std::{cell::RefCell, collections::HashMap, rc::Rc};

use console_contract::{CatalogEntry, CommandCategory, ExecuteRequest, ExecuteResponse};
use futures::channel::oneshot;
use platform_host::{ExecutionError, ExecutionFuture, ExecutionService};

type Reply = Result<ExecuteResponse, ExecutionError>;

pub(crate) fn entry(id: &str) -> CatalogEntry {
    CatalogEntry {
        id: id.to_string(),
        description: format!("{id} description"),
        example: id.to_string(),
        category: CommandCategory::File,
    }
}

/// Execution service whose replies are released by the test, one command at a time.
#[derive(Clone, Default)]
pub(crate) struct ScriptedService {
    pending: Rc<RefCell<HashMap<String, oneshot::Sender<Reply>>>>,
}

impl ScriptedService {
    pub(crate) fn resolve(&self, command: &str, reply: Reply) {
        let sender = self
            .pending
            .borrow_mut()
            .remove(command)
            .unwrap_or_else(|| panic!("no pending request for `{command}`"));
        let _ = sender.send(reply);
    }
}

impl ExecutionService for ScriptedService {
    fn execute<'a>(&'a self, request: ExecuteRequest) -> ExecutionFuture<'a, Reply> {
        let (sender, receiver) = oneshot::channel();
        self.pending.borrow_mut().insert(request.command, sender);
        Box::pin(async move {
            receiver
                .await
                .unwrap_or_else(|_| Err(ExecutionError::Transport("request cancelled".to_string())))
        })
    }
}
