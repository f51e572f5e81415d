//! Headless fight runner entry point.
mod config;
mod report;
mod session;

use std::path::Path;

use anyhow::{Context, Result};
use config::CliConfig;
use fight_content::{ConfigLoader, InputScript, ScriptLoader};
use fight_core::{CombatConfig, Match, MoveTable};
use session::SessionLimits;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let config = CliConfig::from_env()?;
    let _guard = setup_logging(config.log_dir.as_deref())?;

    let combat = match &config.config_path {
        Some(path) => ConfigLoader::load(path)?,
        None => CombatConfig::default(),
    };
    let script = match &config.script_path {
        Some(path) => ScriptLoader::load(path)?,
        None => InputScript::demo()?,
    };

    let mut game = Match::new(combat, MoveTable::standard()).context("combat config rejected")?;
    game.start_match()?;

    let round_ticks = u64::from(combat.round.round_ticks());
    let limits = SessionLimits {
        max_ticks: config.max_ticks.unwrap_or(if config.full_match {
            // Every round may go to time, and draws do not count toward the win.
            round_ticks * u64::from(combat.round.rounds_to_win) * 4
        } else {
            round_ticks
        }),
        full_match: config.full_match,
    };
    tracing::info!(
        max_ticks = limits.max_ticks,
        full_match = limits.full_match,
        segments = script.segments().len(),
        "starting headless match"
    );

    let summary = session::run(&mut game, &script, limits);
    println!("{}", report::render(&summary, config.output)?);

    Ok(())
}

/// Setup logging to stderr, plus a log file when a directory is configured.
///
/// The returned guard must stay alive for the file writer to flush.
fn setup_logging(log_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let file_appender = tracing_appender::rolling::never(dir, "fight.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/fight.log", dir.display());
    }

    Ok(guard)
}
