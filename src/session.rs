//! Interactive chat loop.
//!
//! Reads one line per turn, classifies it, prints a reply and launches the
//! intent's actions. Turns are independent; nothing carries over between
//! them. The loop is generic over its input and output so it can run
//! against stdin/stdout or in-memory buffers.

use std::io::{BufRead, Write};

use log::{debug, error, info};
use serde::Serialize;

use crate::config::{DEFAULT_EXIT_KEYWORD, matches_exit_keyword};
use crate::dispatch::{ActionStatus, Dispatcher};
use crate::error::Result;
use crate::intent::IntentCatalog;
use crate::predictor::PredictionService;

/// Printed once when the session starts.
pub const BANNER: &str = "Chatbot started. Type 'exit' to quit.";

/// Printed before each line of input.
pub const PROMPT: &str = "You: ";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionState {
    Running,
    Stopped,
}

/// What a finished session did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionSummary {
    /// Inputs handled before stopping, excluding the exit keyword. A turn
    /// whose prediction failed still counts.
    pub turns: usize,
    pub state: SessionState,
}

/// A conversation over a fixed catalog and classifier.
#[derive(Debug)]
pub struct ChatSession {
    catalog: IntentCatalog,
    predictor: PredictionService,
    dispatcher: Dispatcher,
    exit_keyword: String,
    state: SessionState,
}

impl ChatSession {
    pub fn new(catalog: IntentCatalog, predictor: PredictionService, dispatcher: Dispatcher) -> Self {
        Self {
            catalog,
            predictor,
            dispatcher,
            exit_keyword: DEFAULT_EXIT_KEYWORD.to_string(),
            state: SessionState::Running,
        }
    }

    pub fn with_exit_keyword<S: Into<String>>(mut self, keyword: S) -> Self {
        self.exit_keyword = keyword.into();
        self
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Run until the exit keyword or end of input.
    ///
    /// Inference and action failures are reported in the conversation and
    /// the loop continues. Only I/O errors on `input` or `output` end the
    /// session early.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> Result<SessionSummary> {
        self.state = SessionState::Running;
        writeln!(output, "{BANNER}")?;

        let mut turns = 0;
        let mut line = String::new();

        while self.state == SessionState::Running {
            write!(output, "{PROMPT}")?;
            output.flush()?;

            line.clear();
            if input.read_line(&mut line)? == 0 {
                debug!("End of input");
                writeln!(output)?;
                self.state = SessionState::Stopped;
                break;
            }

            let text = line.trim_end_matches(['\r', '\n']);
            if matches_exit_keyword(text, &self.exit_keyword) {
                self.state = SessionState::Stopped;
                break;
            }

            self.turn(text, &mut output)?;
            turns += 1;
        }

        info!("Session ended after {turns} turns");
        Ok(SessionSummary {
            turns,
            state: self.state,
        })
    }

    fn turn<W: Write>(&mut self, text: &str, output: &mut W) -> Result<()> {
        let label = match self.predictor.predict(text) {
            Ok(label) => label,
            Err(e) if !e.is_fatal() => {
                error!("Prediction failed for {text:?}: {e}");
                writeln!(output, "Bot: Sorry, something went wrong: {e}")?;
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        let response = self.dispatcher.respond(&label, &self.catalog);
        writeln!(output, "Bot: {response}")?;

        for outcome in self.dispatcher.act(&label, &self.catalog) {
            match outcome.status {
                ActionStatus::Launched { .. } => {
                    writeln!(output, "Executing action: {}", outcome.action)?
                }
                ActionStatus::Failed { error } => writeln!(
                    output,
                    "Failed to execute action: {}, Error: {error}",
                    outcome.action
                )?,
            }
        }
        Ok(())
    }
}
