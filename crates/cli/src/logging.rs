use crate::config::LogSettings;
use anyhow::Result;
use tracing::Level;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize logging for the CLI
///
/// Logs go to stderr so command output on stdout stays scriptable. `RUST_LOG`
/// wins over both the flag and the configured level.
pub fn init_logging(settings: &LogSettings, override_level: Option<Level>) -> Result<()> {
    let level_str = override_level
        .map(|level| level.as_str().to_lowercase())
        .unwrap_or_else(|| settings.level.to_lowercase());
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!("koov={level_str},koov_core={level_str},koov_http={level_str}").into()
    });

    if settings.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .try_init()?;
    }

    Ok(())
}
