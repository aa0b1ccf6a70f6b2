//! API client wiring for the browser build

use crate::storage::BrowserStorage;
use koov_core::{AuthConfig, SessionManager};
use koov_http::{ClientError, HttpAuthClient};

pub type Manager = SessionManager<BrowserStorage, HttpAuthClient>;

/// Backend base URL, fixed at build time via `KOOV_API_URL`
pub fn api_base_url() -> &'static str {
    option_env!("KOOV_API_URL").unwrap_or(AuthConfig::DEFAULT_API_URL)
}

/// Whether the login form offers the demo role presets (`KOOV_DEMO_LOGINS=true`)
pub fn demo_logins_enabled() -> bool {
    matches!(option_env!("KOOV_DEMO_LOGINS"), Some("true" | "1"))
}

pub fn build_manager() -> Result<Manager, ClientError> {
    let client = HttpAuthClient::new(api_base_url())?;
    Ok(SessionManager::new(BrowserStorage, client))
}
