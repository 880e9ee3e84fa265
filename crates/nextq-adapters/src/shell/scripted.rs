//! Scripted shell adapter for testing.

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex, MutexGuard},
};

use nextq_core::{
    application::ports::{RunnerEvent, Shell, ShellOutput},
    domain::CommandRequest,
    error::NextqResult,
};

/// Shell that returns queued exit codes and records every request.
///
/// Once the queue is empty every further attempt succeeds.
#[derive(Debug, Clone, Default)]
pub struct ScriptedShell {
    inner: Arc<Mutex<ScriptedShellInner>>,
}

#[derive(Debug, Default)]
struct ScriptedShellInner {
    exit_codes: VecDeque<i32>,
    requests: Vec<CommandRequest>,
    events: Vec<RunnerEvent>,
}

impl ScriptedShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Exit codes for the next attempts, in order.
    pub fn with_exit_codes(codes: impl IntoIterator<Item = i32>) -> Self {
        let shell = Self::default();
        shell.lock().exit_codes = codes.into_iter().collect();
        shell
    }

    /// Command lines spawned so far, one entry per attempt.
    pub fn commands(&self) -> Vec<String> {
        self.lock()
            .requests
            .iter()
            .map(|r| r.command.clone())
            .collect()
    }

    pub fn requests(&self) -> Vec<CommandRequest> {
        self.lock().requests.clone()
    }

    pub fn events(&self) -> Vec<RunnerEvent> {
        self.lock().events.clone()
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedShellInner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Shell for ScriptedShell {
    fn spawn(&self, request: &CommandRequest) -> NextqResult<ShellOutput> {
        let mut inner = self.lock();
        inner.requests.push(request.clone());
        let code = inner.exit_codes.pop_front().unwrap_or(0);
        Ok(ShellOutput {
            exit_code: Some(code),
            stdout: String::new(),
            stderr: if code == 0 {
                String::new()
            } else {
                format!("exit status {code}")
            },
        })
    }

    fn notify(&self, event: &RunnerEvent) {
        self.lock().events.push(event.clone());
    }
}
