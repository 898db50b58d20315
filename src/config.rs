//! Resolved runtime configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::cli::args::{DEFAULT_INTENTS_PATH, DEFAULT_MODEL_PATH, IntentBotArgs};
use crate::error::{BotError, Result};
use crate::ml::intent_classifier::TrainingParams;

/// Keyword that ends a chat session.
pub const DEFAULT_EXIT_KEYWORD: &str = "exit";

/// Everything a chat session needs to start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BotConfig {
    pub intents_path: PathBuf,
    pub model_path: PathBuf,
    /// Train even when a model file is present.
    pub force_retrain: bool,
    /// Fixed seed for response selection; OS entropy when `None`.
    pub seed: Option<u64>,
    /// Compared case-insensitively against trimmed input.
    pub exit_keyword: String,
    pub training: TrainingParams,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            intents_path: PathBuf::from(DEFAULT_INTENTS_PATH),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            force_retrain: false,
            seed: None,
            exit_keyword: DEFAULT_EXIT_KEYWORD.to_string(),
            training: TrainingParams::default(),
        }
    }
}

impl BotConfig {
    pub fn from_args(args: &IntentBotArgs) -> Result<Self> {
        let config = Self {
            intents_path: args.intents.clone(),
            model_path: args.model.clone(),
            force_retrain: args.retrain,
            seed: args.seed,
            ..Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.exit_keyword.trim().is_empty() {
            return Err(BotError::configuration(
                "exit keyword must not be blank",
            ));
        }
        self.training.validate()
    }

    /// Whether `input` ends the session.
    pub fn is_exit(&self, input: &str) -> bool {
        matches_exit_keyword(input, &self.exit_keyword)
    }
}

/// Trimmed, ASCII case-insensitive comparison against the exit keyword.
pub fn matches_exit_keyword(input: &str, keyword: &str) -> bool {
    input.trim().eq_ignore_ascii_case(keyword.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_from_args() {
        let args =
            IntentBotArgs::try_parse_from(["intentbot", "-m", "m.bin", "--retrain", "--seed", "9"])
                .unwrap();
        let config = BotConfig::from_args(&args).unwrap();

        assert_eq!(config.model_path, PathBuf::from("m.bin"));
        assert!(config.force_retrain);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.exit_keyword, "exit");
        assert_eq!(config.training, TrainingParams::default());
    }

    #[test]
    fn test_exit_keyword_matching() {
        let config = BotConfig::default();

        assert!(config.is_exit("exit"));
        assert!(config.is_exit("EXIT"));
        assert!(config.is_exit("  Exit \n"));
        assert!(!config.is_exit("exit now"));
        assert!(!config.is_exit(""));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: BotConfig = serde_json::from_str(r#"{"seed": 5}"#).unwrap();

        assert_eq!(config.seed, Some(5));
        assert_eq!(config.intents_path, PathBuf::from("data/intents.json"));
        assert_eq!(config.training.max_epochs, 300);
    }

    #[test]
    fn test_blank_exit_keyword_rejected() {
        let config = BotConfig {
            exit_keyword: " ".into(),
            ..BotConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
