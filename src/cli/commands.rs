//! Command implementation for the intentbot CLI.

use std::io::{self, BufRead, Write};
use std::sync::Arc;

use anyhow::Context;

use crate::cli::args::IntentBotArgs;
use crate::config::BotConfig;
use crate::dispatch::Dispatcher;
use crate::intent::IntentCatalog;
use crate::ml::lifecycle::{ModelLifecycle, ModelSource};
use crate::predictor::PredictionService;
use crate::session::{ChatSession, SessionSummary};

/// Start a chat on stdin/stdout.
pub fn execute_command(args: IntentBotArgs) -> anyhow::Result<()> {
    let config = BotConfig::from_args(&args).context("invalid arguments")?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    run_chat(&config, stdin.lock(), stdout.lock())?;
    Ok(())
}

/// Load the catalog, obtain a model, and converse until exit.
pub fn run_chat<R: BufRead, W: Write>(
    config: &BotConfig,
    input: R,
    mut output: W,
) -> anyhow::Result<SessionSummary> {
    let session = start_session(config, &mut output)?;
    chat(session, input, output)
}

fn start_session<W: Write>(config: &BotConfig, output: &mut W) -> anyhow::Result<ChatSession> {
    let catalog = IntentCatalog::load(&config.intents_path).with_context(|| {
        format!("failed to load intents from {}", config.intents_path.display())
    })?;

    let (classifier, source) = ModelLifecycle::new(config.training.clone())
        .force_retrain(config.force_retrain)
        .obtain(&catalog, &config.model_path)
        .with_context(|| format!("failed to prepare model {}", config.model_path.display()))?;

    match source {
        ModelSource::Loaded => {
            writeln!(output, "Model loaded from {}", config.model_path.display())?
        }
        ModelSource::Trained => writeln!(
            output,
            "Model trained and saved to {}",
            config.model_path.display()
        )?,
    }

    let predictor = PredictionService::new(Arc::new(classifier));
    let dispatcher = Dispatcher::with_process_launcher(config.seed);
    Ok(ChatSession::new(catalog, predictor, dispatcher).with_exit_keyword(config.exit_keyword.clone()))
}

fn chat<R: BufRead, W: Write>(
    mut session: ChatSession,
    input: R,
    output: W,
) -> anyhow::Result<SessionSummary> {
    let summary = session.run(input, output).context("chat session failed")?;
    Ok(summary)
}
