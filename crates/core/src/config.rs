//! Session configuration

use std::time::Duration;

/// Authentication configuration
pub struct AuthConfig;

impl AuthConfig {
    /// Interval between background token refreshes
    pub const REFRESH_INTERVAL: Duration = Duration::from_secs(20 * 60);

    /// Same interval in milliseconds, for browser timers
    pub const REFRESH_INTERVAL_MS: u32 = 20 * 60 * 1000;

    /// Default REST backend
    pub const DEFAULT_API_URL: &'static str = "https://kooviot.vercel.app";

    /// Storage key for the access token
    pub const ACCESS_TOKEN_KEY: &'static str = "accessToken";

    /// Storage key for the refresh token
    pub const REFRESH_TOKEN_KEY: &'static str = "refreshToken";

    /// Storage key for the JSON-encoded user snapshot
    pub const USER_DETAILS_KEY: &'static str = "userDetails";

    /// Storage key for the light/dark preference
    pub const THEME_KEY: &'static str = "theme";

    /// Keys that make up one session, in write order
    pub const SESSION_KEYS: [&'static str; 3] = [
        Self::USER_DETAILS_KEY,
        Self::REFRESH_TOKEN_KEY,
        Self::ACCESS_TOKEN_KEY,
    ];

    pub const LOGIN_FAILED_MESSAGE: &'static str =
        "Login failed. Please check your credentials and try again.";

    pub const DEMO_PASSWORD: &'static str = "12345";

    pub const MIN_PASSWORD_LEN: usize = 8;
}
