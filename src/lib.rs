//! # intentbot
//!
//! A terminal chatbot driven by an intents catalog.
//!
//! Each intent in the JSON catalog carries example phrasings, canned replies
//! and optional actions. The phrasings train a maximum-entropy classifier
//! over word and character n-gram TF-IDF features. At runtime each line of
//! input is classified, answered with one of the intent's replies and the
//! intent's actions are launched.
//!
//! ```no_run
//! use std::io;
//! use intentbot::config::BotConfig;
//! use intentbot::cli::run_chat;
//!
//! let config = BotConfig::default();
//! let summary = run_chat(&config, io::stdin().lock(), io::stdout()).unwrap();
//! println!("{} turns", summary.turns);
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod intent;
pub mod ml;
pub mod predictor;
pub mod session;

pub mod prelude {
    pub use crate::config::BotConfig;
    pub use crate::dispatch::{ActionLauncher, Dispatcher, FALLBACK_RESPONSE, Responder};
    pub use crate::error::{BotError, Result};
    pub use crate::intent::{Intent, IntentCatalog};
    pub use crate::ml::{IntentClassifier, MaxEntIntentClassifier, ModelLifecycle, ModelSource};
    pub use crate::predictor::PredictionService;
    pub use crate::session::{ChatSession, SessionState, SessionSummary};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
