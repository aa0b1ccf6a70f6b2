//! Koov CLI - terminal client for the Koov dashboard session

mod commands;
mod config;
mod logging;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use commands::Commands;
use config::Settings;
use koov_core::{FileStore, SessionManager};
use koov_http::HttpAuthClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, debug, error};

#[derive(Parser)]
#[command(name = "koov")]
#[command(about = "Log in to the Koov dashboard and keep the session alive")]
#[command(version)]
struct Cli {
    /// Configuration file (TOML or YAML)
    #[arg(short = 'c', long, global = true, env = "KOOV_CONFIG")]
    config: Option<PathBuf>,

    /// Override the configured log level
    #[arg(short = 'l', long, global = true)]
    log_level: Option<LogLevel>,

    /// Override the API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Override the session file
    #[arg(long, global = true)]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Command failed: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        settings.api.base_url = url;
    }
    if let Some(file) = cli.session_file {
        settings.session.file = Some(file);
    }

    logging::init_logging(&settings.log, cli.log_level.map(Into::into))?;

    let session_file = settings.session_file();
    debug!(api = %settings.api.base_url, session = %session_file.display(), "Loaded settings");

    let store = FileStore::open(&session_file)
        .with_context(|| format!("failed to open session file {}", session_file.display()))?;
    let client = match settings.request_timeout() {
        Some(timeout) => HttpAuthClient::with_timeout(settings.api.base_url.clone(), timeout),
        None => HttpAuthClient::new(settings.api.base_url.clone()),
    }
    .context("failed to build API client")?;

    let manager = Arc::new(SessionManager::new(store, client));
    cli.command.execute(manager, &settings).await
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => Level::ERROR,
            LogLevel::Warn => Level::WARN,
            LogLevel::Info => Level::INFO,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Trace => Level::TRACE,
        }
    }
}
