//! Turning a predicted tag into a reply and side effects.
//!
//! The [`Dispatcher`] pairs a seedable [`Responder`] with an
//! [`ActionLauncher`]. Both are injected so conversations can be replayed
//! and actions observed without spawning processes.

mod action;
mod responder;

pub use action::{ActionLauncher, ActionOutcome, ActionStatus, LaunchHandle, ProcessLauncher};
pub use responder::{FALLBACK_RESPONSE, Responder};

use log::warn;

use crate::intent::IntentCatalog;

/// Chooses responses and launches actions for predicted intents.
pub struct Dispatcher {
    responder: Responder,
    launcher: Box<dyn ActionLauncher>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("responder", &self.responder)
            .field("launcher", &self.launcher.name())
            .finish()
    }
}

impl Dispatcher {
    pub fn new(responder: Responder, launcher: Box<dyn ActionLauncher>) -> Self {
        Self {
            responder,
            launcher,
        }
    }

    /// Dispatcher launching real processes, optionally with a fixed seed.
    pub fn with_process_launcher(seed: Option<u64>) -> Self {
        let responder = match seed {
            Some(seed) => Responder::with_seed(seed),
            None => Responder::new(),
        };
        Self::new(responder, Box::new(ProcessLauncher::new()))
    }

    /// Pick a reply for `label`, or [`FALLBACK_RESPONSE`].
    pub fn respond(&mut self, label: &str, catalog: &IntentCatalog) -> String {
        self.responder.respond(label, catalog)
    }

    /// Attempt every action of the intent tagged `label`.
    ///
    /// Each action is tried independently; a failure is recorded in its
    /// outcome and does not stop the remaining actions.
    pub fn act(&self, label: &str, catalog: &IntentCatalog) -> Vec<ActionOutcome> {
        let Some(intent) = catalog.get(label) else {
            return Vec::new();
        };

        intent
            .actions
            .iter()
            .map(|action| {
                let status = match self.launcher.launch(action) {
                    Ok(handle) => ActionStatus::Launched { pid: handle.pid },
                    Err(e) => {
                        warn!("Action '{action}' for intent '{label}' failed: {e}");
                        ActionStatus::Failed {
                            error: e.to_string(),
                        }
                    }
                };
                ActionOutcome {
                    action: action.clone(),
                    status,
                }
            })
            .collect()
    }
}
