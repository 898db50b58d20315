//! Error types for intentbot.
//!
//! All library errors are represented by the [`BotError`] enum. Startup errors
//! (configuration, training, persistence) are fatal; inference and action
//! errors are reported per turn and the session continues.
//!
//! # Examples
//!
//! ```
//! use intentbot::error::{BotError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(BotError::configuration("intents file is empty"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for intentbot operations.
#[derive(Error, Debug)]
pub enum BotError {
    /// I/O errors (file operations, terminal, etc.)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Intent catalog missing, unreadable or malformed
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Degenerate training data
    #[error("Training error: {0}")]
    Training(String),

    /// Model uninitialized or inconsistent at prediction time
    #[error("Inference error: {0}")]
    Inference(String),

    /// An action could not be launched
    #[error("Action invocation error: {0}")]
    ActionInvocation(String),

    /// Model file unreadable, corrupt or unwritable
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Analysis-related errors (tokenization, filtering, etc.)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Binary model encoding errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] bincode::Error),
}

/// Result type alias for operations that may fail with BotError.
pub type Result<T> = std::result::Result<T, BotError>;

impl BotError {
    /// Create a new configuration error.
    pub fn configuration<S: Into<String>>(msg: S) -> Self {
        BotError::Configuration(msg.into())
    }

    /// Create a new training error.
    pub fn training<S: Into<String>>(msg: S) -> Self {
        BotError::Training(msg.into())
    }

    /// Create a new inference error.
    pub fn inference<S: Into<String>>(msg: S) -> Self {
        BotError::Inference(msg.into())
    }

    /// Create a new action invocation error.
    pub fn action_invocation<S: Into<String>>(msg: S) -> Self {
        BotError::ActionInvocation(msg.into())
    }

    /// Create a new persistence error.
    pub fn persistence<S: Into<String>>(msg: S) -> Self {
        BotError::Persistence(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        BotError::Analysis(msg.into())
    }

    /// Whether this error must abort startup rather than a single turn.
    pub fn is_fatal(&self) -> bool {
        !matches!(
            self,
            BotError::Inference(_) | BotError::ActionInvocation(_)
        )
    }
}
