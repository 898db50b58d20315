//! Launching external actions.
//!
//! An action is a bare command string. Launching observes only whether the
//! process could be started. The turn never blocks on the child; a
//! background thread waits for it so it does not linger as a zombie.

use std::process::{Child, Command, Stdio};
use std::thread;

use log::{debug, warn};
use serde::Serialize;

use crate::error::{BotError, Result};

/// Handle to a successfully launched action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchHandle {
    /// The command that was launched.
    pub command: String,
    /// OS process id, when the launcher knows it.
    pub pid: Option<u32>,
}

/// Capability to start an external command.
pub trait ActionLauncher: Send + Sync {
    /// Start `command` without waiting for it to finish.
    fn launch(&self, command: &str) -> Result<LaunchHandle>;

    /// Get the name of this launcher for debugging and logging.
    fn name(&self) -> &str;
}

/// Launches actions as child processes with null stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessLauncher;

impl ProcessLauncher {
    pub fn new() -> Self {
        ProcessLauncher
    }
}

impl ActionLauncher for ProcessLauncher {
    fn launch(&self, command: &str) -> Result<LaunchHandle> {
        let program = command.trim();
        if program.is_empty() {
            return Err(BotError::action_invocation("empty command"));
        }

        let child = Command::new(program)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| BotError::action_invocation(e.to_string()))?;

        let pid = child.id();
        debug!("Launched '{program}' as pid {pid}");
        reap_in_background(child, program);

        Ok(LaunchHandle {
            command: program.to_string(),
            pid: Some(pid),
        })
    }

    fn name(&self) -> &str {
        "process"
    }
}

fn reap_in_background(mut child: Child, program: &str) {
    let pid = child.id();
    let label = program.to_string();
    let spawned = thread::Builder::new()
        .name(format!("reap-{pid}"))
        .spawn(move || match child.wait() {
            Ok(status) => debug!("Action '{label}' (pid {pid}) exited with {status}"),
            Err(e) => warn!("Failed to wait for action '{label}' (pid {pid}): {e}"),
        });

    if let Err(e) = spawned {
        warn!("Cannot watch action '{program}' (pid {pid}); it will not be reaped: {e}");
    }
}

/// Whether an action was started.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ActionStatus {
    Launched { pid: Option<u32> },
    Failed { error: String },
}

/// Result of attempting one action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionOutcome {
    /// The action string from the catalog.
    pub action: String,
    #[serde(flatten)]
    pub status: ActionStatus,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self.status, ActionStatus::Launched { .. })
    }

    /// Error message for a failed launch.
    pub fn error(&self) -> Option<&str> {
        match &self.status {
            ActionStatus::Failed { error } => Some(error),
            ActionStatus::Launched { .. } => None,
        }
    }
}
