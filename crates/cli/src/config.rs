//! CLI configuration
//!
//! Layered with the `config` crate: built-in defaults, then an optional
//! TOML/YAML file, then `KOOV_`-prefixed environment variables
//! (`KOOV_API__BASE_URL`, `KOOV_SESSION__FILE`, ...).

use anyhow::{Context, Result};
use koov_core::AuthConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// REST backend
    pub api: ApiSettings,

    /// Session persistence and refresh
    pub session: SessionSettings,

    /// Logging
    pub log: LogSettings,

    /// Allow `koov login --demo <role>`
    #[serde(default)]
    pub demo_logins: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiSettings {
    pub base_url: String,

    /// Request timeout in seconds (0 disables it)
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Session file; defaults to the platform data directory
    #[serde(default)]
    pub file: Option<PathBuf>,

    /// Background refresh period for `koov watch`
    pub refresh_interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    pub level: String,
    pub json: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api: ApiSettings {
                base_url: AuthConfig::DEFAULT_API_URL.to_string(),
                timeout_secs: 30,
            },
            session: SessionSettings {
                file: None,
                refresh_interval_secs: AuthConfig::REFRESH_INTERVAL.as_secs(),
            },
            log: LogSettings {
                level: "info".to_string(),
                json: false,
            },
            demo_logins: false,
        }
    }
}

impl Settings {
    /// Load settings, layering an optional file and the environment over the defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a value has the wrong type
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Self::default();

        let mut builder = config::Config::builder()
            .set_default("api.base_url", defaults.api.base_url)?
            .set_default("api.timeout_secs", defaults.api.timeout_secs)?
            .set_default(
                "session.refresh_interval_secs",
                defaults.session.refresh_interval_secs,
            )?
            .set_default("log.level", defaults.log.level)?
            .set_default("log.json", defaults.log.json)?
            .set_default("demo_logins", defaults.demo_logins)?;

        if let Some(path) = file {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix("KOOV")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .context("failed to assemble configuration")?;

        settings
            .try_deserialize()
            .context("invalid configuration")
    }

    /// Resolved session file path
    pub fn session_file(&self) -> PathBuf {
        self.session.file.clone().unwrap_or_else(default_session_file)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        (self.api.timeout_secs > 0).then(|| Duration::from_secs(self.api.timeout_secs))
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.session.refresh_interval_secs.max(1))
    }
}

fn default_session_file() -> PathBuf {
    directories::ProjectDirs::from("app", "koov", "koov")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from(".koov"))
        .join("session.json")
}
