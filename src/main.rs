//! State pattern demonstration.
//!
//! Starts a context in `StateA` and issues `request1` then `request2`.
//! Output can be translated through a phrasebook; see `statecraft::config`.

use anyhow::{Context as _, Result};
use statecraft::config::Settings;
use statecraft::output::Console;
use statecraft::states::StateA;
use statecraft::Context;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(env_filter)
        .init();
}

fn main() -> Result<()> {
    let settings = Settings::from_env();
    init_tracing(&settings.log_filter);
    settings.check().context("invalid settings")?;

    let emitter = settings
        .emitter(Arc::new(Console))
        .context("failed to set up output")?;

    let context = Context::with_emitter(StateA::new(), emitter);
    context.request1()?;
    context.request2()?;

    info!(
        path = ?context.history().get_path(),
        "demonstration complete"
    );
    Ok(())
}
