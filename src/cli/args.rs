//! Command line argument parsing for the intentbot CLI using clap.

use std::path::PathBuf;

use clap::Parser;

/// Default location of the intents catalog.
pub const DEFAULT_INTENTS_PATH: &str = "data/intents.json";

/// Default location of the persisted model.
pub const DEFAULT_MODEL_PATH: &str = "model/model.bin";

/// intentbot - an intent-classifying chatbot for the terminal
#[derive(Parser, Debug, Clone)]
#[command(name = "intentbot")]
#[command(about = "Chat with an intent-classifying bot trained from a JSON catalog")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct IntentBotArgs {
    /// Intents catalog (JSON)
    #[arg(short, long, env = "INTENTBOT_INTENTS", default_value = DEFAULT_INTENTS_PATH)]
    pub intents: PathBuf,

    /// Model file; trained and written here when missing
    #[arg(short, long, env = "INTENTBOT_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Retrain even if the model file exists, overwriting it
    #[arg(long)]
    pub retrain: bool,

    /// Seed for response selection
    #[arg(long, env = "INTENTBOT_SEED")]
    pub seed: Option<u64>,

    /// Verbosity level (repeat for more logging)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

impl IntentBotArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1,
                n => n + 1,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_runs_without_flags() {
        let args = IntentBotArgs::try_parse_from(["intentbot"]).unwrap();

        assert!(!args.retrain);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_all_flags() {
        let args = IntentBotArgs::try_parse_from([
            "intentbot",
            "-i",
            "bots/support.json",
            "--model",
            "/tmp/support.bin",
            "--retrain",
            "--seed",
            "42",
        ])
        .unwrap();

        assert_eq!(args.intents, PathBuf::from("bots/support.json"));
        assert_eq!(args.model, PathBuf::from("/tmp/support.bin"));
        assert!(args.retrain);
        assert_eq!(args.seed, Some(42));
    }

    #[test]
    fn test_verbosity_levels() {
        let args = IntentBotArgs::try_parse_from(["intentbot"]).unwrap();
        assert_eq!(args.verbosity(), 1);

        let args = IntentBotArgs::try_parse_from(["intentbot", "-v"]).unwrap();
        assert_eq!(args.verbosity(), 2);

        let args = IntentBotArgs::try_parse_from(["intentbot", "-vv"]).unwrap();
        assert_eq!(args.verbosity(), 3);

        let args = IntentBotArgs::try_parse_from(["intentbot", "-vv", "-q"]).unwrap();
        assert_eq!(args.verbosity(), 0);
    }

    #[test]
    fn test_rejects_bad_seed() {
        assert!(IntentBotArgs::try_parse_from(["intentbot", "--seed", "lots"]).is_err());
    }
}
